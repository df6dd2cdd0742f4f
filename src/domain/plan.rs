//! Script planning for the `fmt` command
//!
//! Decides which environment scripts run and in what order. Linting always
//! precedes formatting when both are selected.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Cannot specify both --linter and --formatter")]
    ConflictingFlags,
}

/// Whether a script validates or rewrites source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    Check,
    Fix,
}

/// Which tool family a script belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Lint,
    Format,
}

/// A named environment script, e.g. `lint-check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script {
    pub kind: ScriptKind,
    pub mode: ScriptMode,
}

impl Script {
    pub const fn new(kind: ScriptKind, mode: ScriptMode) -> Self {
        Self { kind, mode }
    }

    /// The script's name as configured in the environment.
    pub fn name(&self) -> &'static str {
        match (self.kind, self.mode) {
            (ScriptKind::Lint, ScriptMode::Check) => "lint-check",
            (ScriptKind::Lint, ScriptMode::Fix) => "lint-fix",
            (ScriptKind::Format, ScriptMode::Check) => "format-check",
            (ScriptKind::Format, ScriptMode::Fix) => "format-fix",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered scripts to run for one invocation. At most two entries; lint
/// comes before format when both are present.
pub type ScriptPlan = Vec<Script>;

/// Builds the script plan from the mode flags.
///
/// `linter_only` and `formatter_only` are mutually exclusive; the caller
/// validates that before any environment interaction, so a conflicting
/// combination here is a programming error surfaced as [`PlanError`].
pub fn build_plan(
    check_mode: bool,
    linter_only: bool,
    formatter_only: bool,
) -> Result<ScriptPlan, PlanError> {
    if linter_only && formatter_only {
        return Err(PlanError::ConflictingFlags);
    }

    let mode = if check_mode {
        ScriptMode::Check
    } else {
        ScriptMode::Fix
    };

    let mut plan = ScriptPlan::new();
    if !formatter_only {
        plan.push(Script::new(ScriptKind::Lint, mode));
    }
    if !linter_only {
        plan.push(Script::new(ScriptKind::Format, mode));
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(plan: &ScriptPlan) -> Vec<&'static str> {
        plan.iter().map(Script::name).collect()
    }

    #[test]
    fn default_run_lints_then_formats() {
        let plan = build_plan(false, false, false).unwrap();
        assert_eq!(names(&plan), ["lint-fix", "format-fix"]);
    }

    #[test]
    fn check_mode_uses_check_scripts() {
        let plan = build_plan(true, false, false).unwrap();
        assert_eq!(names(&plan), ["lint-check", "format-check"]);
    }

    #[test]
    fn linter_only_check() {
        let plan = build_plan(true, true, false).unwrap();
        assert_eq!(names(&plan), ["lint-check"]);
    }

    #[test]
    fn formatter_only_fix() {
        let plan = build_plan(false, false, true).unwrap();
        assert_eq!(names(&plan), ["format-fix"]);
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let err = build_plan(false, true, true).unwrap_err();
        assert_eq!(err, PlanError::ConflictingFlags);
    }

    #[test]
    fn script_display_matches_name() {
        let script = Script::new(ScriptKind::Format, ScriptMode::Check);
        assert_eq!(script.to_string(), "format-check");
    }
}
