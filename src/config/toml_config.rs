use crate::utils::error::{PrunError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Optional settings file. Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub fio: FioSection,
    #[serde(default)]
    pub kawa: KawaSection,
    /// Dashboard user → saved FIO API key.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub listen: Option<String>,
    pub identity_header: Option<String>,
    pub json_logs: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FioSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KawaSection {
    pub endpoint: Option<String>,
    pub planet: Option<String>,
    pub per_page: Option<u32>,
    pub output_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PrunError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PrunError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PrunError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The configured key, unless it is blank or an unresolved `${VAR}`.
    pub fn fio_api_key(&self) -> Option<&str> {
        self.fio
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !is_placeholder(key))
    }

    pub fn api_keys(&self) -> HashMap<String, String> {
        self.api_keys
            .iter()
            .filter(|(_, key)| !is_placeholder(key))
            .map(|(user, key)| (user.clone(), key.clone()))
            .collect()
    }
}

fn is_placeholder(value: &str) -> bool {
    value.starts_with("${") && value.ends_with('}')
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(listen) = &self.server.listen {
            validation::validate_listen_addr("server.listen", listen)?;
        }
        if let Some(header) = &self.server.identity_header {
            validation::validate_non_empty_string("server.identity_header", header)?;
        }
        if let Some(base_url) = &self.fio.base_url {
            validation::validate_url("fio.base_url", base_url)?;
        }
        if let Some(timeout) = self.fio.timeout_seconds {
            validation::validate_positive_number("fio.timeout_seconds", timeout as usize, 1)?;
        }
        if let Some(endpoint) = &self.kawa.endpoint {
            validation::validate_url("kawa.endpoint", endpoint)?;
        }
        if let Some(planet) = &self.kawa.planet {
            validation::validate_non_empty_string("kawa.planet", planet)?;
        }
        if let Some(per_page) = self.kawa.per_page {
            validation::validate_positive_number("kawa.per_page", per_page as usize, 1)?;
        }
        if let Some(output_path) = &self.kawa.output_path {
            validation::validate_path("kawa.output_path", output_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
listen = "127.0.0.1:4000"
identity_header = "x-forwarded-user"

[fio]
base_url = "https://rest.fnar.net"
api_key = "server-key"
timeout_seconds = 10

[kawa]
planet = "Montem"
per_page = 100

[api_keys]
alice = "alice-key"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.listen.as_deref(), Some("127.0.0.1:4000"));
        assert_eq!(config.fio_api_key(), Some("server-key"));
        assert_eq!(config.kawa.per_page, Some(100));
        assert_eq!(config.api_keys().get("alice").map(String::as_str), Some("alice-key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.fio_api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PRUN_TEST_FIO_KEY", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[fio]
api_key = "${PRUN_TEST_FIO_KEY}"

[api_keys]
bob = "${PRUN_TEST_UNSET_KEY}"
"#,
        )
        .unwrap();

        assert_eq!(config.fio_api_key(), Some("from-env"));
        assert!(config.api_keys().is_empty());

        std::env::remove_var("PRUN_TEST_FIO_KEY");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[fio]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[kawa]\nper_page = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nlisten = \"0.0.0.0:3000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.listen.as_deref(), Some("0.0.0.0:3000"));
    }
}
