use crate::config::{KawaSettings, ServerSettings, TomlConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "prun-tools")]
#[command(about = "Prosperous Universe dashboard backed by the FIO REST API")]
pub struct ServerArgs {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:3000
    #[arg(long)]
    pub listen: Option<String>,

    /// FIO REST API base URL
    #[arg(long)]
    pub fio_base_url: Option<String>,

    /// Fallback FIO API key for users without a saved key
    #[arg(long)]
    pub fio_api_key: Option<String>,

    /// Outbound request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Header carrying the signed-in dashboard user
    #[arg(long)]
    pub identity_header: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerArgs {
    /// Reads and validates `--config`, or returns an empty config without it.
    pub fn load_config(&self) -> Result<TomlConfig> {
        load_file(self.config.as_deref())
    }

    pub fn resolve(&self) -> Result<ServerSettings> {
        Ok(self.resolve_with(&self.load_config()?))
    }

    /// Flags win over the settings file, which wins over the environment.
    pub fn resolve_with(&self, file: &TomlConfig) -> ServerSettings {
        let mut settings = ServerSettings::from_file_config(file);

        if let Some(listen) = &self.listen {
            settings.listen = listen.clone();
        }
        if let Some(base_url) = &self.fio_base_url {
            settings.fio_base_url = base_url.clone();
        }
        if let Some(key) = self.fio_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            settings.fio_api_key = Some(key.to_string());
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout = Duration::from_secs(timeout);
        }
        if let Some(header) = &self.identity_header {
            settings.identity_header = header.clone();
        }
        settings.json_logs |= self.json_logs;

        settings
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "kawa-import")]
#[command(about = "Export one planet's KAWA prices as a ticker/price sheet")]
pub struct KawaArgs {
    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// KAWA pricing collection records URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Planet whose prices are exported
    #[arg(long)]
    pub planet: Option<String>,

    /// Records requested per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Directory receiving kawa_prices.csv and kawa_prices.json
    #[arg(long)]
    pub output_path: Option<String>,

    /// Log CPU and memory usage per phase
    #[arg(long)]
    pub monitor: bool,

    /// Show the resolved settings without fetching anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl KawaArgs {
    pub fn resolve(&self) -> Result<KawaSettings> {
        let file = load_file(self.config.as_deref())?;
        let mut settings = KawaSettings::from_file_config(&file);

        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(planet) = &self.planet {
            settings.planet = planet.clone();
        }
        if let Some(per_page) = self.per_page {
            settings.per_page = per_page;
        }
        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }

        Ok(settings)
    }
}

fn load_file(path: Option<&str>) -> Result<TomlConfig> {
    match path {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            crate::utils::validation::Validate::validate(&config)?;
            Ok(config)
        }
        None => Ok(TomlConfig::default()),
    }
}
