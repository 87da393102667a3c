pub mod config;
pub mod error;

// GitHub REST access
pub mod github;

// Data shaping
pub mod normalize;
pub mod pagination;
pub mod stats;

// Orchestration
pub mod query;

// Terminal front end
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, ErrorKind, Result};
