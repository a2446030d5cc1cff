//! 日誌管道：一個具名的處理器堆疊，並以 `tracing` layer 的形式掛進 subscriber。

use crate::core::client::DELIVERY_TARGET;
use crate::domain::model::{Record, Severity};
use crate::domain::ports::Handler;
use crate::utils::error::{RavenError, Result};
use std::sync::{Arc, RwLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

/// HTTP 堆疊自身的日誌不回送，避免投遞時再產生事件
const IGNORED_TARGETS: [&str; 5] = [DELIVERY_TARGET, "reqwest", "hyper", "h2", "rustls"];

/// 只比對完整的模組路徑段，`hyperion::db` 不算 `hyper`
fn is_ignored_target(target: &str) -> bool {
    IGNORED_TARGETS.iter().any(|prefix| {
        target
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

pub struct LogPipeline {
    name: String,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
}

impl LogPipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push_handler(&self, handler: Arc<dyn Handler>) {
        match self.handlers.write() {
            Ok(mut handlers) => handlers.push(handler),
            Err(poisoned) => poisoned.into_inner().push(handler),
        }
    }

    pub fn pop_handler(&self) -> Result<Arc<dyn Handler>> {
        let popped = match self.handlers.write() {
            Ok(mut handlers) => handlers.pop(),
            Err(poisoned) => poisoned.into_inner().pop(),
        };
        popped.ok_or(RavenError::EmptyHandlerStack)
    }

    pub fn handlers(&self) -> Vec<Arc<dyn Handler>> {
        match self.handlers.read() {
            Ok(handlers) => handlers.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers().len()
    }

    /// 最後加入的處理器最先收到
    pub fn dispatch(&self, record: &Record) -> usize {
        let mut handled = 0;
        for handler in self.handlers().iter().rev() {
            if handler.is_handling(record) {
                handler.handle(record);
                handled += 1;
            }
        }
        handled
    }

    pub fn layer(self: &Arc<Self>) -> PipelineLayer {
        PipelineLayer::new(Arc::clone(self))
    }
}

/// 將 `tracing` 事件轉成 [`Record`] 並交給管道
pub struct PipelineLayer {
    pipeline: Arc<LogPipeline>,
}

impl PipelineLayer {
    pub fn new(pipeline: Arc<LogPipeline>) -> Self {
        Self { pipeline }
    }
}

impl<S> Layer<S> for PipelineLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_ignored_target(metadata.target()) {
            return;
        }

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let severity = visitor
            .severity
            .unwrap_or_else(|| Severity::from_tracing(metadata.level()));
        let mut record = Record::new(severity, visitor.message).with_target(metadata.target());
        record.fields = visitor.fields;

        self.pipeline.dispatch(&record);
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    severity: Option<Severity>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl RecordVisitor {
    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "severity" => match value.parse() {
                Ok(severity) => self.severity = Some(severity),
                Err(_) => self.insert(field, serde_json::Value::String(value.to_string())),
            },
            _ => self.insert(field, serde_json::Value::String(value.to_string())),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let formatted = format!("{:?}", value);
        match field.name() {
            "message" => self.message = formatted,
            "severity" => self.record_str(field, formatted.trim_matches('"')),
            _ => self.insert(field, serde_json::Value::String(formatted)),
        }
    }
}
