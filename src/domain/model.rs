use crate::utils::error::RavenError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 日誌嚴重程度，由低到高排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    #[default]
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Alert => "alert",
            Severity::Emergency => "emergency",
        }
    }

    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Severity::Error,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::INFO => Severity::Info,
            _ => Severity::Debug,
        }
    }

    /// 對應到錯誤回報服務的等級字串
    pub fn sentry_level(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info | Severity::Notice => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical | Severity::Alert | Severity::Emergency => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RavenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "notice" => Ok(Severity::Notice),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            "critical" | "crit" => Ok(Severity::Critical),
            "alert" => Ok(Severity::Alert),
            "emergency" | "emerg" => Ok(Severity::Emergency),
            _ => Err(RavenError::InvalidConfigValueError {
                field: "level".to_string(),
                value: s.to_string(),
                reason: "Unknown severity. Valid levels: debug, info, notice, warning, error, critical, alert, emergency".to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 在管道中流動的一筆日誌
#[derive(Debug, Clone)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
    pub target: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl Record {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            target: String::new(),
            fields: serde_json::Map::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// 送往錯誤回報服務的事件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub event_id: String,
    pub message: String,
    pub level: String,
    pub logger: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culprit: Option<String>,
    pub platform: String,
    pub timestamp: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    pub fn new_event_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
