//! Configuration handling for Craft CLI
//!
//! Project configuration is stored in `.craft/config.toml`. A missing file
//! is equivalent to an empty one; every table has defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// The `[format]` table.
///
/// `config-path` here is deprecated in favor of the environment-scoped
/// `envs.static-analysis.config-path` and will be removed after the
/// migration window.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatConfig {
    pub config_path: Option<String>,
}

/// The `[envs.static-analysis]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct StaticAnalysisConfig {
    /// Path of the static-analysis config file, relative to the project
    /// root. Absent means the environment generates its own file.
    pub config_path: Option<String>,

    /// Default arguments the environment exposes to every script.
    pub default_args: Vec<String>,

    /// Platforms the environment supports ("linux", "macos", "windows").
    /// Empty means any platform.
    pub platforms: Vec<String>,

    /// Overrides of the built-in script commands, keyed by script name.
    pub scripts: BTreeMap<String, String>,
}

/// The `[envs]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnvsConfig {
    #[serde(rename = "static-analysis")]
    pub static_analysis: StaticAnalysisConfig,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    pub format: FormatConfig,
    pub envs: EnvsConfig,
}

impl ProjectConfig {
    /// Loads project configuration from a specific root
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".craft").join("config.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")
    }

    /// Finds the project root by looking for `.craft/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        Self::find_project_root_from(std::env::current_dir().ok()?)
    }

    /// Walks up from `start` looking for a `.craft/` directory
    pub fn find_project_root_from(start: PathBuf) -> Option<PathBuf> {
        let mut current = start;

        loop {
            if current.join(".craft").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_paths() {
        let config = ProjectConfig::default();

        assert!(config.format.config_path.is_none());
        assert!(config.envs.static_analysis.config_path.is_none());
        assert!(config.envs.static_analysis.scripts.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[format]
config-path = "legacy-ruff.toml"

[envs.static-analysis]
config-path = "ruff.toml"
default-args = ["src/"]
platforms = ["linux", "macos"]

[envs.static-analysis.scripts]
lint-check = "ruff check"
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.format.config_path.as_deref(),
            Some("legacy-ruff.toml")
        );

        let sa = &config.envs.static_analysis;
        assert_eq!(sa.config_path.as_deref(), Some("ruff.toml"));
        assert_eq!(sa.default_args, vec!["src/"]);
        assert_eq!(sa.platforms, vec!["linux", "macos"]);
        assert_eq!(
            sa.scripts.get("lint-check").map(String::as_str),
            Some("ruff check")
        );
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".craft")).unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.format.config_path.is_none());
    }

    #[test]
    fn load_reads_project_config() {
        let dir = TempDir::new().unwrap();
        let craft_dir = dir.path().join(".craft");
        fs::create_dir_all(&craft_dir).unwrap();
        fs::write(
            craft_dir.join("config.toml"),
            "[envs.static-analysis]\nconfig-path = \"ruff.toml\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(
            config.envs.static_analysis.config_path.as_deref(),
            Some("ruff.toml")
        );
    }

    #[test]
    fn find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".craft")).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = ProjectConfig::find_project_root_from(sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn find_project_root_misses_when_absent() {
        let dir = TempDir::new().unwrap();
        let root = ProjectConfig::find_project_root_from(dir.path().to_path_buf());
        assert_eq!(root, None);
    }
}
