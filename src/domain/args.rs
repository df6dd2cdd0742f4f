//! Pass-through argument reconciliation
//!
//! The `fmt` command forwards its positional arguments verbatim to the
//! underlying tools, except for a single `--preview` token which is
//! intercepted and turned into preview mode for the whole run.

/// Splits raw pass-through arguments into residual arguments and a
/// preview-mode flag.
///
/// Only the FIRST `--preview` occurrence is stripped; any later occurrence
/// is forwarded to the tools untouched. Repeating the flag has no defined
/// meaning, so the extra token is left for the tool to reject.
pub fn reconcile(raw_args: &[String]) -> (Vec<String>, bool) {
    let mut residual = raw_args.to_vec();

    match residual.iter().position(|arg| arg == "--preview") {
        Some(index) => {
            residual.remove(index);
            (residual, true)
        }
        None => (residual, false),
    }
}

/// Final arguments handed to the environment for one run.
///
/// Holds the environment-provided default arguments (already extended with
/// `--preview` when requested) and the user's residual positional arguments.
#[derive(Debug, Clone, Default)]
pub struct ArgumentBundle {
    default_args: Vec<String>,
    user_args: Vec<String>,
}

impl ArgumentBundle {
    pub fn new(default_args: Vec<String>, user_args: Vec<String>) -> Self {
        Self {
            default_args,
            user_args,
        }
    }

    /// Joined default arguments for the `CRAFT_FMT_ARGS` variable.
    ///
    /// Non-empty values get a single leading space so script commands can
    /// embed `$CRAFT_FMT_ARGS` directly after a tool name.
    pub fn internal_args(&self) -> String {
        let joined = join_command_args(&self.default_args);
        if joined.is_empty() {
            joined
        } else {
            format!(" {}", joined)
        }
    }

    /// Joined residual user arguments, appended to each script command.
    pub fn formatted_user_args(&self) -> String {
        join_command_args(&self.user_args)
    }

    pub fn default_args(&self) -> &[String] {
        &self.default_args
    }

    pub fn user_args(&self) -> &[String] {
        &self.user_args
    }
}

/// Quotes and joins arguments into a single shell command fragment.
pub fn join_command_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
