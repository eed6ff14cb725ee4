//! Configuration model for githelper.
//!
//! This module defines the Config struct that represents `.githelper.json`.
//! Recognized keys overwrite hardcoded defaults (with type coercion), unknown
//! keys are ignored, and a malformed file falls back to the defaults.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::{CONFIG_FILE_NAME, LogLevel, SyncStrategy};
