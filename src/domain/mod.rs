//! Domain logic for the `fmt` command
//!
//! Contains the pure decision-making stages without any I/O concerns:
//! argument reconciliation, config resolution and script planning.

mod args;
mod plan;
mod resolve;

pub use args::{join_command_args, reconcile, ArgumentBundle};
pub use plan::{build_plan, PlanError, Script, ScriptKind, ScriptMode, ScriptPlan};
pub use resolve::{resolve, ConfigSource, EffectiveConfig, ResolveError};
