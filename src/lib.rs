pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod history;
pub mod notify;
pub mod poll;
pub mod report;

pub use crate::config::Settings;
pub use crate::error::{Result, WatchError};
