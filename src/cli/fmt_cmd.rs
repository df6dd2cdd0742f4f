//! The `fmt` command
//!
//! Dispatches lint and format scripts into the static-analysis environment,
//! reconciling CLI flags, legacy project configuration and environment
//! defaults into concrete shell invocations.

use anyhow::Result;

use super::output::Output;
use crate::domain::{build_plan, reconcile, resolve, ArgumentBundle, PlanError, Script};
use crate::env::{self, Compatibility, EnvError, Environment, ShellEnvironment};
use crate::storage::Project;

/// Parsed flags for one `craft fmt` invocation.
pub struct FmtOptions {
    pub args: Vec<String>,
    pub check: bool,
    pub linter: bool,
    pub formatter: bool,
    pub sync: bool,
}

pub fn run(opts: FmtOptions, output: &Output) -> Result<()> {
    // Validated before any environment interaction.
    if opts.linter && opts.formatter {
        return Err(PlanError::ConflictingFlags.into());
    }

    let project = Project::open_current()?;
    let environment = ShellEnvironment::new(&project);

    if let Compatibility::Incompatible(reason) = environment.compatibility() {
        return Err(EnvError::Incompatible(reason).into());
    }

    let config = project.config();
    let effective = resolve(
        opts.sync,
        config.format.config_path.as_deref(),
        config.envs.static_analysis.config_path.as_deref(),
    )?;

    if effective.used_legacy_setting() {
        output.warning(
            "The `format.config-path` option is deprecated and will be removed in a future \
             release. Use `envs.static-analysis.config-path` instead.",
        );
    }

    let plan = build_plan(opts.check, opts.linter, opts.formatter)?;
    let (residual_args, preview) = reconcile(&opts.args);

    let mut default_args = environment.default_args();
    if effective.path.is_none() {
        default_args.push("--config".to_string());
        default_args.push(environment.internal_config_path().display().to_string());
    }
    if preview {
        default_args.push("--preview".to_string());
    }

    let bundle = ArgumentBundle::new(default_args, residual_args);

    output.verbose_ctx(
        "fmt",
        &format!(
            "Running scripts: {:?}, preview={}, sync={}",
            plan.iter().map(Script::name).collect::<Vec<_>>(),
            preview,
            opts.sync
        ),
    );

    env::execute(
        &environment,
        project.root(),
        &plan,
        &bundle,
        &effective,
        preview,
    )?;

    Ok(())
}
