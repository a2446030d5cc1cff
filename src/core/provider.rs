use crate::adapters::http::HttpTransport;
use crate::config::RavenConfig;
use crate::core::client::{Client, ClientOptions};
use crate::core::handler::RavenHandler;
use crate::core::pipeline::LogPipeline;
use crate::domain::ports::{Handler, Transport};
use crate::utils::error::{RavenError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;

/// 應用程式層提供給 provider 的環境資訊
#[derive(Clone)]
pub struct AppContext {
    pub environment: String,
    pub app_version: String,
    pub pipeline: Arc<LogPipeline>,
}

impl AppContext {
    pub fn new(
        environment: impl Into<String>,
        app_version: impl Into<String>,
        pipeline: Arc<LogPipeline>,
    ) -> Self {
        Self {
            environment: environment.into(),
            app_version: app_version.into(),
            pipeline,
        }
    }
}

struct Bindings {
    transport: Arc<dyn Transport>,
    client: Arc<Client>,
    handler: Arc<RavenHandler>,
}

/// 依設定建立 transport、client、handler，並在啟用時掛進日誌管道
pub struct RavenServiceProvider {
    config: RavenConfig,
    app: AppContext,
    bindings: Option<Bindings>,
    registered: bool,
    patched: bool,
}

impl RavenServiceProvider {
    pub fn new(config: RavenConfig, app: AppContext) -> Self {
        Self {
            config,
            app,
            bindings: None,
            registered: false,
            patched: false,
        }
    }

    pub fn config(&self) -> &RavenConfig {
        &self.config
    }

    /// 重複呼叫不會替換已建立的 bindings
    pub fn register(&mut self) -> Result<()> {
        if self.registered {
            return Ok(());
        }

        let Some(dsn) = self.config.parsed_dsn()? else {
            self.config.validate()?;
            tracing::debug!("No DSN configured, error reporting stays unbound");
            self.registered = true;
            return Ok(());
        };

        let transport: Arc<dyn Transport> =
            Arc::new(HttpTransport::new(dsn, &self.config.transport)?);
        self.register_with_transport(transport)
    }

    /// 使用自訂 transport 註冊
    pub fn register_with_transport(&mut self, transport: Arc<dyn Transport>) -> Result<()> {
        if self.registered {
            return Ok(());
        }

        self.config.validate()?;
        let dsn = self
            .config
            .parsed_dsn()?
            .ok_or_else(|| RavenError::MissingConfigError {
                field: "dsn".to_string(),
            })?;

        let options = ClientOptions {
            server_name: self.config.server_name.clone(),
            tags: self.config.tags.clone(),
        }
        .with_tag("environment", self.app.environment.clone())
        .with_tag("app_version", self.app.app_version.clone());

        let client = Arc::new(Client::new(dsn, Arc::clone(&transport), options));
        let handler = Arc::new(RavenHandler::new(Arc::clone(&client), self.config.level));

        tracing::debug!(
            "Registered error reporting for project {} via {} transport",
            client.project(),
            transport.name()
        );

        self.bindings = Some(Bindings {
            transport,
            client,
            handler,
        });
        self.registered = true;
        Ok(())
    }

    /// 回傳 handler 是否已掛進管道
    pub fn boot(&mut self) -> Result<bool> {
        if !self.registered {
            return Err(RavenError::NotRegistered);
        }

        if !self.config.enabled {
            tracing::debug!("Error reporting disabled, leaving the log pipeline untouched");
            return Ok(false);
        }

        if self.patched {
            return Ok(true);
        }

        let handler = self
            .handler()
            .ok_or_else(|| RavenError::MissingConfigError {
                field: "dsn".to_string(),
            })?;
        self.app.pipeline.push_handler(handler as Arc<dyn Handler>);
        self.patched = true;

        tracing::info!(
            "Error reporting attached to '{}' at level {}",
            self.app.pipeline.name(),
            self.config.level
        );
        Ok(true)
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn is_patched(&self) -> bool {
        self.patched
    }

    pub fn transport(&self) -> Option<Arc<dyn Transport>> {
        self.bindings.as_ref().map(|b| Arc::clone(&b.transport))
    }

    pub fn client(&self) -> Option<Arc<Client>> {
        self.bindings.as_ref().map(|b| Arc::clone(&b.client))
    }

    pub fn handler(&self) -> Option<Arc<RavenHandler>> {
        self.bindings.as_ref().map(|b| Arc::clone(&b.handler))
    }
}
