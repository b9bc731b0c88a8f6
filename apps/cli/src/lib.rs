//! conflabel CLI — bulk labeling of Confluence hierarchies.
//!
//! The pipeline lives here rather than in `main.rs` so integration tests
//! can drive it against a mock server with an explicit [`WikiConfig`].

pub mod commands;
