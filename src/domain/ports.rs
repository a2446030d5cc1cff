use crate::domain::model::{Event, Record, Severity};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 將事件送到錯誤回報服務
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, event: &Event) -> Result<()>;

    fn name(&self) -> &str;
}

/// 日誌管道中的處理器
pub trait Handler: Send + Sync {
    fn level(&self) -> Severity;

    fn is_handling(&self, record: &Record) -> bool {
        record.severity >= self.level()
    }

    fn handle(&self, record: &Record);

    fn name(&self) -> &str;
}
