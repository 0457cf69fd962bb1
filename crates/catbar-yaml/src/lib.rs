//! YAML and JSON configuration for catbar category bars.

mod config;
mod error;

pub use config::{CategoryBarConfig, Theme};
pub use error::ParseError;
