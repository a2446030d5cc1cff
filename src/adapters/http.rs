use crate::config::TransportConfig;
use crate::core::client::DELIVERY_TARGET;
use crate::domain::dsn::Dsn;
use crate::domain::model::Event;
use crate::domain::ports::Transport;
use crate::utils::error::{RavenError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const PROTOCOL_VERSION: u8 = 4;

/// 透過 HTTP POST 將事件送到 store 端點
pub struct HttpTransport {
    dsn: Dsn,
    client: Client,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(dsn: Dsn, config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            dsn,
            client,
            user_agent: crate::core::client::Client::client_name(),
        })
    }

    pub fn dsn(&self) -> &Dsn {
        &self.dsn
    }

    pub fn auth_header(&self, timestamp: i64) -> String {
        let mut header = format!(
            "Sentry sentry_version={}, sentry_client={}, sentry_timestamp={}, sentry_key={}",
            PROTOCOL_VERSION,
            self.user_agent,
            timestamp,
            self.dsn.public_key()
        );
        if let Some(secret) = self.dsn.secret_key() {
            header.push_str(&format!(", sentry_secret={}", secret));
        }
        header
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, event: &Event) -> Result<()> {
        let url = self.dsn.store_url();
        tracing::debug!(target: DELIVERY_TARGET, "Sending event {} to {}", event.event_id, url);

        let response = self
            .client
            .post(&url)
            .header("X-Sentry-Auth", self.auth_header(chrono::Utc::now().timestamp()))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RavenError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(target: DELIVERY_TARGET, "Event {} accepted ({})", event.event_id, status);
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}
