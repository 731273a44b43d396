//! Common types and utilities for Review Pulse

pub mod config;
pub mod error;
pub mod format;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};
