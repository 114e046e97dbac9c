//! TrustBank Core — errors, configuration, display formatting.

pub mod config;
pub mod error;
pub mod format;

pub use config::{DataPaths, TrustBankConfig};
pub use error::{Error, Result};
