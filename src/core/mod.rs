pub mod client;
pub mod handler;
pub mod pipeline;
pub mod provider;

pub use crate::domain::model::{Event, Record, Severity};
pub use crate::domain::ports::{Handler, Transport};
pub use crate::utils::error::Result;
