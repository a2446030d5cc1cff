use crate::config::RavenConfig;
use crate::domain::model::Severity;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "raven-log")]
#[command(about = "Send a test record through the error-reporting log handler")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "RAVEN_DSN")]
    pub dsn: Option<String>,

    #[arg(long, help = "Force error reporting on")]
    pub enabled: bool,

    #[arg(long, help = "Minimum severity forwarded to the reporting service")]
    pub level: Option<Severity>,

    #[arg(long, default_value = "production")]
    pub environment: String,

    #[arg(long, default_value = "raven-log test event")]
    pub message: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON formatted logs")]
    pub json: bool,
}

impl CliConfig {
    /// 讀取設定檔後以命令列參數覆寫
    pub fn resolve(&self) -> Result<RavenConfig> {
        let mut config = match &self.config {
            Some(path) => RavenConfig::from_file(path)?,
            None => RavenConfig::default(),
        };

        if let Some(dsn) = &self.dsn {
            config.dsn = Some(dsn.clone());
        }
        if self.enabled {
            config.enabled = true;
        }
        if let Some(level) = self.level {
            config.level = level;
        }

        Ok(config)
    }
}
