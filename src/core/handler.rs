use crate::core::client::Client;
use crate::domain::model::{Record, Severity};
use crate::domain::ports::Handler;
use std::sync::Arc;

/// 把達到門檻的日誌轉送給錯誤回報客戶端
pub struct RavenHandler {
    client: Arc<Client>,
    level: Severity,
}

impl RavenHandler {
    pub fn new(client: Arc<Client>, level: Severity) -> Self {
        Self { client, level }
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }
}

impl Handler for RavenHandler {
    fn level(&self) -> Severity {
        self.level
    }

    fn handle(&self, record: &Record) {
        if !self.is_handling(record) {
            return;
        }
        let event = self.client.build_event(record);
        self.client.capture(event);
    }

    fn name(&self) -> &str {
        "raven"
    }
}
