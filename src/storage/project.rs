//! Project management
//!
//! Handles project initialization and provides access to configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::ProjectConfig;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a craft project. Run 'craft init' first.")]
    NotInProject,
}

/// A Craft project
pub struct Project {
    root: PathBuf,
    config: ProjectConfig,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let craft_dir = root.join(".craft");

        if !craft_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = ProjectConfig::load(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = ProjectConfig::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let craft_dir = root.join(".craft");

        fs::create_dir_all(&craft_dir).with_context(|| {
            format!("Failed to create .craft directory: {}", craft_dir.display())
        })?;

        let envs_dir = craft_dir.join("envs");
        fs::create_dir_all(&envs_dir)
            .with_context(|| format!("Failed to create envs directory: {}", envs_dir.display()))?;

        let config_path = craft_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Craft CLI configuration

# Static-analysis environment for 'craft fmt'
# [envs.static-analysis]
# config-path = "ruff.toml"
# default-args = []
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = craft_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore materialized environments (they're regenerated)
envs/
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.craft` directory
    pub fn craft_dir(&self) -> PathBuf {
        self.root.join(".craft")
    }

    /// Returns the directory where environments are materialized
    pub fn envs_dir(&self) -> PathBuf {
        self.craft_dir().join("envs")
    }

    /// Returns the project configuration
    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }
}
