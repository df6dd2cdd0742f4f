//! # Execution Environments
//!
//! Isolated, tool-managed contexts in which preconfigured scripts run.
//!
//! ## Overview
//!
//! The `fmt` command never invokes tools directly; it hands a script plan
//! to an [`Environment`], which owns the scripts, their default arguments
//! and the materialized directory under `.craft/envs/`.
//!
//! ## Compatibility
//!
//! Whether an environment can be used is a capability query, not an
//! exception path:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Existing` | Already materialized on disk |
//! | `Creatable` | Not materialized yet, but can be prepared |
//! | `Incompatible` | Cannot run here (e.g. platform restriction) |
//!
//! ## Child process context
//!
//! Working directory and injected variables travel in an [`ExecContext`]
//! value applied per spawn. No process-global state is mutated, so nothing
//! leaks across invocations.
//!
//! ## Key Types
//!
//! - [`Environment`] - Seam between planning and actual execution
//! - [`ShellEnvironment`] - Runs scripts through the system shell
//! - [`execute`] - Facade running a whole script plan fail-fast

mod shell;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use crate::domain::{ArgumentBundle, EffectiveConfig, Script, ScriptPlan};

pub use shell::{ShellEnvironment, ENV_NAME};

/// Variable exposing the composed default arguments to script commands.
pub const FMT_ARGS_VAR: &str = "CRAFT_FMT_ARGS";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Environment is incompatible: {0}")]
    Incompatible(String),

    #[error("Failed to prepare environment: {0}")]
    Prepare(String),

    #[error("Failed to write config file {path}: {source}")]
    WriteConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to spawn '{script}': {source}")]
    Spawn {
        script: String,
        source: std::io::Error,
    },

    #[error("'{script}' failed with {status}")]
    ScriptFailed { script: String, status: ExitStatus },
}

/// Whether an environment can be used on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compatibility {
    /// The environment is materialized on disk.
    Existing,
    /// Not materialized yet; `prepare` can create it.
    Creatable,
    /// The environment cannot run here; the reason is user-facing.
    Incompatible(String),
}

/// Spawn-scoped execution context: the working directory and the variables
/// injected into each child process for the duration of one run.
#[derive(Debug, Clone)]
pub struct ExecContext {
    root: PathBuf,
    vars: Vec<(String, String)>,
}

impl ExecContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            vars: Vec::new(),
        }
    }

    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.push((key.into(), value.into()));
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }
}

/// Seam between the `fmt` decision logic and actual tool execution.
pub trait Environment {
    /// Capability query; checked before any other interaction.
    fn compatibility(&self) -> Compatibility;

    /// Materializes the environment (dependencies included). Must be called
    /// before running scripts; failures are not retried.
    fn prepare(&self) -> Result<(), EnvError>;

    /// Default arguments the environment contributes to every script.
    fn default_args(&self) -> Vec<String>;

    /// Where the generated config file lives when the user configured no
    /// explicit path.
    fn internal_config_path(&self) -> PathBuf;

    /// Writes the static-analysis config file with current defaults.
    fn write_config_file(&self, path: &Path, preview: bool) -> Result<(), EnvError>;

    /// Runs one named script with the user's residual arguments appended.
    fn run_script(&self, script: Script, user_args: &str, ctx: &ExecContext)
        -> Result<(), EnvError>;
}

/// Runs a script plan inside an environment.
///
/// Writes the config file first when required (using the preview flag from
/// argument reconciliation), then prepares the environment, then runs each
/// planned script in order. The first failing step aborts the rest.
pub fn execute(
    environment: &dyn Environment,
    project_root: &Path,
    plan: &ScriptPlan,
    bundle: &ArgumentBundle,
    config: &EffectiveConfig,
    preview: bool,
) -> Result<(), EnvError> {
    let mut ctx = ExecContext::new(project_root);
    ctx.set_var(FMT_ARGS_VAR, bundle.internal_args());

    if config.must_write {
        let path = match &config.path {
            Some(relative) => project_root.join(relative),
            None => environment.internal_config_path(),
        };
        environment.write_config_file(&path, preview)?;
    }

    environment.prepare()?;

    let user_args = bundle.formatted_user_args();
    for script in plan {
        environment.run_script(*script, &user_args, &ctx)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_plan, resolve};
    use std::cell::RefCell;
    use std::io;

    /// Records every facade call; scripts listed in `failing` return a
    /// spawn error so ordering and fail-fast behavior can be asserted.
    struct RecordingEnvironment {
        calls: RefCell<Vec<String>>,
        failing: Vec<&'static str>,
    }

    impl RecordingEnvironment {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                failing: Vec::new(),
            }
        }

        fn failing_on(script: &'static str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                failing: vec![script],
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Environment for RecordingEnvironment {
        fn compatibility(&self) -> Compatibility {
            Compatibility::Existing
        }

        fn prepare(&self) -> Result<(), EnvError> {
            self.calls.borrow_mut().push("prepare".to_string());
            Ok(())
        }

        fn default_args(&self) -> Vec<String> {
            vec![]
        }

        fn internal_config_path(&self) -> PathBuf {
            PathBuf::from("internal/fmt-config.toml")
        }

        fn write_config_file(&self, path: &Path, preview: bool) -> Result<(), EnvError> {
            self.calls
                .borrow_mut()
                .push(format!("write:{}:preview={}", path.display(), preview));
            Ok(())
        }

        fn run_script(
            &self,
            script: Script,
            user_args: &str,
            _ctx: &ExecContext,
        ) -> Result<(), EnvError> {
            self.calls
                .borrow_mut()
                .push(format!("run:{}:{}", script.name(), user_args));

            if self.failing.contains(&script.name()) {
                return Err(EnvError::Spawn {
                    script: script.name().to_string(),
                    source: io::Error::other("boom"),
                });
            }

            Ok(())
        }
    }

    #[test]
    fn executes_plan_in_order_after_write_and_prepare() {
        let env = RecordingEnvironment::new();
        let plan = build_plan(false, false, false).unwrap();
        let bundle = ArgumentBundle::new(vec![], vec!["src/".to_string()]);
        let config = resolve(false, None, None).unwrap();

        execute(&env, Path::new("/project"), &plan, &bundle, &config, false).unwrap();

        assert_eq!(
            env.calls(),
            [
                "write:internal/fmt-config.toml:preview=false",
                "prepare",
                "run:lint-fix:src/",
                "run:format-fix:src/",
            ]
        );
    }

    #[test]
    fn skips_config_write_when_not_required() {
        let env = RecordingEnvironment::new();
        let plan = build_plan(true, true, false).unwrap();
        let bundle = ArgumentBundle::default();
        let config = resolve(false, None, Some("ruff.toml")).unwrap();

        execute(&env, Path::new("/project"), &plan, &bundle, &config, false).unwrap();

        assert_eq!(env.calls(), ["prepare", "run:lint-check:"]);
    }

    #[test]
    fn sync_rewrites_user_config_at_project_relative_path() {
        let env = RecordingEnvironment::new();
        let plan = build_plan(true, true, false).unwrap();
        let bundle = ArgumentBundle::default();
        let config = resolve(true, None, Some("ruff.toml")).unwrap();

        execute(&env, Path::new("/project"), &plan, &bundle, &config, true).unwrap();

        assert_eq!(
            env.calls(),
            [
                "write:/project/ruff.toml:preview=true",
                "prepare",
                "run:lint-check:",
            ]
        );
    }

    #[test]
    fn failing_script_aborts_remaining_plan() {
        let env = RecordingEnvironment::failing_on("lint-fix");
        let plan = build_plan(false, false, false).unwrap();
        let bundle = ArgumentBundle::default();
        let config = resolve(false, None, Some("ruff.toml")).unwrap();

        let err = execute(&env, Path::new("/project"), &plan, &bundle, &config, false);

        assert!(err.is_err());
        assert_eq!(env.calls(), ["prepare", "run:lint-fix:"]);
    }
}
