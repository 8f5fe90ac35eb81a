use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    /// The orchestration tool is not on `PATH`. Raised before any step runs.
    #[error(
        "'{program}' was not found on PATH. Install it or point compose.program at the orchestration tool."
    )]
    MissingPrerequisite { program: String },

    /// An administrative command exited non-zero; later steps were skipped.
    #[error("step '{step}' failed: `{command}` {}", describe_exit(.code))]
    CommandFailed {
        step: String,
        command: String,
        code: Option<i32>,
    },

    /// The process could not be started or fed its confirmation text.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl ComposeError {
    /// Process exit code for the CLI: the child's own code when available.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingPrerequisite { .. } => 127,
            Self::CommandFailed { code, .. } => code.filter(|c| *c != 0).unwrap_or(1),
            Self::Spawn { .. } => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "was terminated by a signal".to_string(),
        |code| format!("exited with status {code}"),
    )
}
