use crate::utils::error::{MccError, Result};
use crate::utils::validation::{self, Validate};
use chrono::FixedOffset;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub venue: Option<VenueConfig>,
    #[serde(default)]
    pub clients: ClientsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    pub name: String,
    pub utc_offset: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientsConfig {
    pub drafthouse: Option<ClientConfig>,
    pub feeds: Option<ClientConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
            user_agent: None,
            headers: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("mcc-domain/{}", env!("CARGO_PKG_VERSION")))
    }

    fn validate_as(&self, section: &str) -> Result<()> {
        validation::validate_url(&format!("{}.base_url", section), &self.base_url)?;

        if let Some(timeout) = self.timeout_seconds {
            let field = format!("{}.timeout_seconds", section);
            validation::validate_positive_number(&field, timeout, 1)?;
        }

        if let Some(headers) = &self.headers {
            for name in headers.keys() {
                validation::validate_non_empty_string(&format!("{}.headers", section), name)?;
            }
        }

        Ok(())
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // 固定的正規表達式，編譯失敗屬於程式錯誤
        Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid")
    })
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MccError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MccError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DRAFTHOUSE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(venue) = &self.venue {
            validation::validate_non_empty_string("venue.name", &venue.name)?;
            if let Some(offset) = &venue.utc_offset {
                validation::validate_utc_offset("venue.utc_offset", offset)?;
            }
        }

        if let Some(drafthouse) = &self.clients.drafthouse {
            drafthouse.validate_as("clients.drafthouse")?;
        }
        if let Some(feeds) = &self.clients.feeds {
            feeds.validate_as("clients.feeds")?;
        }

        Ok(())
    }

    pub fn venue_name(&self) -> Option<&str> {
        self.venue.as_ref().map(|v| v.name.as_str())
    }

    /// 取得影城當地時區偏移，未設定時回傳 `None`
    pub fn venue_offset(&self) -> Result<Option<FixedOffset>> {
        match self.venue.as_ref().and_then(|v| v.utc_offset.as_deref()) {
            Some(offset) => validation::validate_utc_offset("venue.utc_offset", offset).map(Some),
            None => Ok(None),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
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
[venue]
name = "Ritz"
utc_offset = "-05:00"

[clients.drafthouse]
base_url = "https://drafthouse.com/s/mother/v2/"
timeout_seconds = 10
user_agent = "mcc-test"
headers = { "x-api-key" = "secret" }

[clients.feeds]
base_url = "https://feeds.drafthouse.com/market/"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.venue_name(), Some("Ritz"));
        assert_eq!(
            config.venue_offset().unwrap().unwrap().local_minus_utc(),
            -5 * 3600
        );

        let drafthouse = config.clients.drafthouse.as_ref().unwrap();
        assert_eq!(drafthouse.timeout(), Duration::from_secs(10));
        assert_eq!(drafthouse.user_agent(), "mcc-test");

        let feeds = config.clients.feeds.as_ref().unwrap();
        assert_eq!(feeds.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert!(feeds.user_agent().starts_with("mcc-domain/"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MCC_TEST_FEEDS_URL", "https://feeds.test.com/");

        let toml_content = r#"
[clients.feeds]
base_url = "${MCC_TEST_FEEDS_URL}"
headers = { "x-api-key" = "${MCC_TEST_UNSET_VARIABLE}" }
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let feeds = config.clients.feeds.unwrap();
        assert_eq!(feeds.base_url, "https://feeds.test.com/");
        assert_eq!(
            feeds.headers.unwrap().get("x-api-key").map(String::as_str),
            Some("${MCC_TEST_UNSET_VARIABLE}")
        );

        std::env::remove_var("MCC_TEST_FEEDS_URL");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = r#"
[clients.drafthouse]
base_url = "invalid-url"
"#;
        let config = TomlConfig::from_toml_str(invalid_url).unwrap();
        assert!(config.validate().is_err());

        let zero_timeout = r#"
[clients.feeds]
base_url = "https://feeds.drafthouse.com/"
timeout_seconds = 0
"#;
        let config = TomlConfig::from_toml_str(zero_timeout).unwrap();
        match config.validate() {
            Err(MccError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "clients.feeds.timeout_seconds")
            }
            other => panic!("expected timeout validation error, got {:?}", other),
        }

        let bad_offset = r#"
[venue]
name = "Ritz"
utc_offset = "Central"

[clients]
"#;
        let config = TomlConfig::from_toml_str(bad_offset).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_venue_only_config_has_no_clients() {
        let config = TomlConfig::from_toml_str(
            "[venue]\nname = \"Ritz\"\nutc_offset = \"+01:00\"\n",
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert!(config.clients.drafthouse.is_none());
        assert!(config.clients.feeds.is_none());
        assert_eq!(
            config.venue_offset().unwrap().unwrap().local_minus_utc(),
            3600
        );
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = TomlConfig::from_toml_str("[venue\nname = ");
        assert!(matches!(result, Err(MccError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[clients.drafthouse]
base_url = "https://drafthouse.com/"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.clients.drafthouse.is_some());
        assert!(config.clients.feeds.is_none());
        assert!(config.venue.is_none());
    }
}
