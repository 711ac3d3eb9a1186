use crate::adapters::scryfall::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::core::engine::{DEFAULT_MAX_CONCURRENT_RESOLUTIONS, MAX_CONCURRENT_RESOLUTIONS_LIMIT};
use crate::domain::model::ColorIdentityMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AssistError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub resolver: Option<ResolverConfig>,
    pub validation: Option<ValidationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub color_identity: Option<ColorIdentityMode>,
    pub max_concurrent_resolutions: Option<usize>,
    pub deadline_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AssistError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AssistError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCRYFALL_ENDPOINT})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("resolver.endpoint", self.resolver_endpoint())?;
        validate_non_empty_string("resolver.user_agent", self.user_agent())?;

        if let Some(timeout) = self.resolver.as_ref().and_then(|r| r.timeout_seconds) {
            validate_range("resolver.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(validation) = &self.validation {
            if let Some(concurrent) = validation.max_concurrent_resolutions {
                validate_range(
                    "validation.max_concurrent_resolutions",
                    concurrent,
                    1,
                    MAX_CONCURRENT_RESOLUTIONS_LIMIT,
                )?;
            }
            if let Some(deadline) = validation.deadline_seconds {
                validate_range("validation.deadline_seconds", deadline, 1, 3600)?;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validate_one_of("logging.level", level, &LOG_LEVELS)?;
            }
            if let Some(format) = &logging.format {
                validate_one_of("logging.format", format, &LOG_FORMATS)?;
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|format| format == "json")
    }

    // 命令列覆蓋設定

    pub fn set_endpoint(&mut self, endpoint: String) {
        self.resolver.get_or_insert_with(Default::default).endpoint = Some(endpoint);
    }

    pub fn set_color_identity_mode(&mut self, mode: ColorIdentityMode) {
        self.validation
            .get_or_insert_with(Default::default)
            .color_identity = Some(mode);
    }

    pub fn set_max_concurrent_resolutions(&mut self, concurrent: usize) {
        self.validation
            .get_or_insert_with(Default::default)
            .max_concurrent_resolutions = Some(concurrent);
    }

    pub fn set_deadline_seconds(&mut self, seconds: u64) {
        self.validation
            .get_or_insert_with(Default::default)
            .deadline_seconds = Some(seconds);
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl ConfigProvider for TomlConfig {
    fn resolver_endpoint(&self) -> &str {
        self.resolver
            .as_ref()
            .and_then(|r| r.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    fn request_timeout(&self) -> Duration {
        let seconds = self
            .resolver
            .as_ref()
            .and_then(|r| r.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    fn user_agent(&self) -> &str {
        self.resolver
            .as_ref()
            .and_then(|r| r.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn color_identity_mode(&self) -> ColorIdentityMode {
        self.validation
            .as_ref()
            .and_then(|v| v.color_identity)
            .unwrap_or_default()
    }

    fn max_concurrent_resolutions(&self) -> usize {
        self.validation
            .as_ref()
            .and_then(|v| v.max_concurrent_resolutions)
            .unwrap_or(DEFAULT_MAX_CONCURRENT_RESOLUTIONS)
    }

    fn deadline(&self) -> Option<Duration> {
        self.validation
            .as_ref()
            .and_then(|v| v.deadline_seconds)
            .map(Duration::from_secs)
    }
}
