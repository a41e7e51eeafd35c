//! CLI command implementations for postmap operations.
//!
//! Available commands:
//! - **analyze**: Load people and posts, then report the derived views
//! - **init**: Initialize a new postmap configuration file

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
