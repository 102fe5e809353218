//! sales-config
//!
//! Persistent user preferences and configuration model.
//! Owns the Config data structure, home directory resolution and disk persistence.

pub mod error;
pub mod manager;
pub mod model;
pub mod paths;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, ConfigKey};
pub use paths::{resolve_home, HOME_ENV};
