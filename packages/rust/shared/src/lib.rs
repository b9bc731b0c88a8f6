//! Shared error model and configuration for conflabel.
//!
//! This crate is the foundation depended on by all other conflabel crates.
//! It provides:
//! - [`ConflabelError`] — the unified error type
//! - [`WikiConfig`] — wiki connection settings loaded from the environment

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{ENV_API_KEY, ENV_BASE_URL, ENV_USERNAME, WikiConfig, load_dotenv};
pub use error::{ConflabelError, Result};
