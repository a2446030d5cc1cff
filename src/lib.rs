pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpTransport;
pub use config::{RavenConfig, TransportConfig};
pub use crate::core::{
    client::{Client, ClientOptions},
    handler::RavenHandler,
    pipeline::{LogPipeline, PipelineLayer},
    provider::{AppContext, RavenServiceProvider},
};
pub use domain::{dsn::Dsn, model::Severity};
pub use utils::error::{RavenError, Result};
