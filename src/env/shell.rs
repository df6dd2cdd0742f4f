//! Shell-backed static-analysis environment
//!
//! Scripts are shell command lines, either the built-in defaults or
//! overrides from `[envs.static-analysis.scripts]`. Each script runs
//! through the system shell with the project root as working directory
//! and `CRAFT_FMT_ARGS` injected; the composed command line itself is
//! never echoed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::Script;
use crate::storage::{Project, StaticAnalysisConfig};

use super::{Compatibility, EnvError, Environment, ExecContext};

/// Name of the environment dedicated to lint/format tooling.
pub const ENV_NAME: &str = "static-analysis";

/// The static-analysis environment, materialized under
/// `.craft/envs/static-analysis/`.
pub struct ShellEnvironment {
    env_dir: PathBuf,
    config: StaticAnalysisConfig,
}

impl ShellEnvironment {
    pub fn new(project: &Project) -> Self {
        Self {
            env_dir: project.envs_dir().join(ENV_NAME),
            config: project.config().envs.static_analysis.clone(),
        }
    }

    #[cfg(test)]
    fn with_config(env_dir: PathBuf, config: StaticAnalysisConfig) -> Self {
        Self { env_dir, config }
    }

    /// The shell command for a script: config override, or built-in.
    fn script_command(&self, script: Script) -> String {
        if let Some(command) = self.config.scripts.get(script.name()) {
            return command.clone();
        }

        // Built-ins reference the args variable directly after the tool
        // name; the variable value carries its own leading space.
        let var = if cfg!(windows) {
            "%CRAFT_FMT_ARGS%"
        } else {
            "$CRAFT_FMT_ARGS"
        };

        match script.name() {
            "lint-check" => format!("ruff check{var}"),
            "lint-fix" => format!("ruff check --fix{var}"),
            "format-check" => format!("ruff format --check --diff{var}"),
            _ => format!("ruff format{var}"),
        }
    }

    fn current_platform() -> &'static str {
        if cfg!(windows) {
            "windows"
        } else if cfg!(target_os = "macos") {
            "macos"
        } else {
            "linux"
        }
    }

    fn shell_command(command_line: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command_line);
            cmd
        }

        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command_line);
            cmd
        }
    }
}

impl Environment for ShellEnvironment {
    fn compatibility(&self) -> Compatibility {
        // A materialized environment is usable as-is; the platform gate
        // only guards creation.
        if self.env_dir.is_dir() {
            return Compatibility::Existing;
        }

        let platforms = &self.config.platforms;
        if !platforms.is_empty() {
            let current = Self::current_platform();
            if !platforms.iter().any(|p| p == current) {
                return Compatibility::Incompatible(format!(
                    "environment '{ENV_NAME}' does not support platform '{current}'"
                ));
            }
        }

        Compatibility::Creatable
    }

    fn prepare(&self) -> Result<(), EnvError> {
        fs::create_dir_all(&self.env_dir)
            .map_err(|e| EnvError::Prepare(format!("{}: {}", self.env_dir.display(), e)))?;

        // Marker recording that dependencies were materialized.
        let marker = self.env_dir.join(".prepared");
        if !marker.exists() {
            fs::write(&marker, "").map_err(|e| EnvError::Prepare(e.to_string()))?;
        }

        Ok(())
    }

    fn default_args(&self) -> Vec<String> {
        self.config.default_args.clone()
    }

    fn internal_config_path(&self) -> PathBuf {
        self.env_dir.join("fmt-config.toml")
    }

    fn write_config_file(&self, path: &Path, preview: bool) -> Result<(), EnvError> {
        let content = format!(
            "# Generated by 'craft fmt' with the current defaults.\n\
             \n\
             [lint]\n\
             select = [\"E\", \"F\", \"I\", \"W\"]\n\
             preview = {preview}\n\
             \n\
             [format]\n\
             preview = {preview}\n"
        );

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| EnvError::WriteConfig {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, content).map_err(|e| EnvError::WriteConfig {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn run_script(
        &self,
        script: Script,
        user_args: &str,
        ctx: &ExecContext,
    ) -> Result<(), EnvError> {
        let command = self.script_command(script);
        let command_line = if user_args.is_empty() {
            command
        } else {
            format!("{command} {user_args}")
        };

        let mut cmd = Self::shell_command(&command_line);
        cmd.current_dir(ctx.root())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        for (key, value) in ctx.vars() {
            cmd.env(key, value);
        }

        let status = cmd.status().map_err(|e| EnvError::Spawn {
            script: script.name().to_string(),
            source: e,
        })?;

        if !status.success() {
            return Err(EnvError::ScriptFailed {
                script: script.name().to_string(),
                status,
            });
        }

        Ok(())
    }
}
