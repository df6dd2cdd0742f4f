//! # Storage Layer
//!
//! Project discovery and configuration for Craft CLI.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `.craft/config.toml` |
//! | Environments | Directories | `.craft/envs/{name}/` |
//!
//! ## Project Structure
//!
//! ```text
//! .craft/
//! ├── config.toml           # Project configuration
//! └── envs/                 # Materialized tool environments
//!     └── static-analysis/  # Lint/format environment
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a Craft project
//! - [`ProjectConfig`] - Parsed `.craft/config.toml`

mod config;
mod project;

pub use config::{ConfigError, EnvsConfig, FormatConfig, ProjectConfig, StaticAnalysisConfig};
pub use project::{Project, ProjectError};
