#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::fio::DEFAULT_FIO_BASE_URL;
use crate::adapters::kawa::{DEFAULT_KAWA_ENDPOINT, DEFAULT_PER_PAGE};
use crate::core::kawa::DEFAULT_PLANET;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::HashMap;
use std::time::Duration;

pub use toml_config::TomlConfig;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_IDENTITY_HEADER: &str = "x-forwarded-user";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const FIO_API_KEY_ENV: &str = "FIO_API_KEY";

/// Fully resolved settings for the dashboard server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub listen: String,
    pub fio_base_url: String,
    pub fio_api_key: Option<String>,
    pub request_timeout: Duration,
    /// Request header carrying the signed-in dashboard user, set by the fronting proxy.
    pub identity_header: String,
    pub api_keys: HashMap<String, String>,
    pub json_logs: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            fio_base_url: DEFAULT_FIO_BASE_URL.to_string(),
            fio_api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            api_keys: HashMap::new(),
            json_logs: false,
        }
    }
}

impl ServerSettings {
    /// Layers the settings file over defaults; the environment only supplies the API key.
    pub fn from_file_config(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            listen: file.server.listen.clone().unwrap_or(defaults.listen),
            fio_base_url: file.fio.base_url.clone().unwrap_or(defaults.fio_base_url),
            fio_api_key: file
                .fio_api_key()
                .map(str::to_string)
                .or_else(env_api_key),
            request_timeout: file
                .fio
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            identity_header: file
                .server
                .identity_header
                .clone()
                .unwrap_or(defaults.identity_header),
            api_keys: file.api_keys(),
            json_logs: file.server.json_logs.unwrap_or(false),
        }
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_listen_addr("server.listen", &self.listen)?;
        validation::validate_url("fio.base_url", &self.fio_base_url)?;
        validation::validate_non_empty_string("server.identity_header", &self.identity_header)?;
        validation::validate_positive_number(
            "fio.timeout_seconds",
            self.request_timeout.as_secs() as usize,
            1,
        )
    }
}

/// Fully resolved settings for the KAWA price export.
#[derive(Debug, Clone)]
pub struct KawaSettings {
    pub endpoint: String,
    pub planet: String,
    pub per_page: u32,
    pub output_path: String,
    pub request_timeout: Duration,
}

impl Default for KawaSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_KAWA_ENDPOINT.to_string(),
            planet: DEFAULT_PLANET.to_string(),
            per_page: DEFAULT_PER_PAGE,
            output_path: "./output".to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl KawaSettings {
    pub fn from_file_config(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        let kawa = &file.kawa;
        Self {
            endpoint: kawa.endpoint.clone().unwrap_or(defaults.endpoint),
            planet: kawa.planet.clone().unwrap_or(defaults.planet),
            per_page: kawa.per_page.unwrap_or(defaults.per_page),
            output_path: kawa.output_path.clone().unwrap_or(defaults.output_path),
            request_timeout: kawa
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

impl Validate for KawaSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("kawa.endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("kawa.planet", &self.planet)?;
        validation::validate_positive_number("kawa.per_page", self.per_page as usize, 1)?;
        validation::validate_path("kawa.output_path", &self.output_path)
    }
}

fn env_api_key() -> Option<String> {
    std::env::var(FIO_API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_settings_defaults() {
        let settings = ServerSettings::from_file_config(&TomlConfig::default());
        assert_eq!(settings.listen, DEFAULT_LISTEN);
        assert_eq!(settings.fio_base_url, DEFAULT_FIO_BASE_URL);
        assert_eq!(settings.identity_header, DEFAULT_IDENTITY_HEADER);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[server]
listen = "127.0.0.1:8080"

[fio]
api_key = "file-key"
timeout_seconds = 5

[kawa]
planet = "Montem"
"#,
        )
        .unwrap();

        let server = ServerSettings::from_file_config(&file);
        assert_eq!(server.listen, "127.0.0.1:8080");
        assert_eq!(server.fio_api_key.as_deref(), Some("file-key"));
        assert_eq!(server.request_timeout, Duration::from_secs(5));

        let kawa = KawaSettings::from_file_config(&file);
        assert_eq!(kawa.planet, "Montem");
        assert_eq!(kawa.per_page, DEFAULT_PER_PAGE);
        assert!(kawa.validate().is_ok());
    }
}
