#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::dsn::Dsn;
use crate::domain::model::Severity;
use crate::utils::error::{RavenError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RavenConfig {
    #[serde(default)]
    pub dsn: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub level: Severity,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    5
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for RavenConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            enabled: false,
            level: Severity::default(),
            server_name: None,
            tags: BTreeMap::new(),
            transport: TransportConfig::default(),
        }
    }
}

impl RavenConfig {
    pub fn new(dsn: impl Into<String>, enabled: bool, level: Severity) -> Self {
        Self {
            dsn: Some(dsn.into()),
            enabled,
            level,
            ..Self::default()
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RavenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RavenError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RAVEN_DSN})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RavenError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 空字串視同未設定
    pub fn dsn(&self) -> Option<&str> {
        self.dsn.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    pub fn parsed_dsn(&self) -> Result<Option<Dsn>> {
        self.dsn().map(Dsn::parse).transpose()
    }
}

impl Validate for RavenConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled {
            validation::validate_required_field("dsn", &self.dsn())?;
        }
        self.parsed_dsn()?;
        validation::validate_positive_number(
            "transport.timeout_seconds",
            self.transport.timeout_seconds,
            1,
        )?;
        for (key, value) in &self.tags {
            validation::validate_non_empty_string(&format!("tags.{}", key), value)?;
        }
        Ok(())
    }
}
