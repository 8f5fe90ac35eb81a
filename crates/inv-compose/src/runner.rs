//! Process execution behind a trait so procedures can be tested without a
//! container runtime.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::ComposeError;
use crate::invocation::Invocation;

/// Outcome of a finished command. `code` is `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: Option<i32>,
}

impl ExitOutcome {
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

pub trait CommandRunner {
    /// Resolve `program` on `PATH`.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run to completion with inherited stdout/stderr.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Spawn`] when the process cannot be started.
    fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ComposeError>;
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ComposeError> {
        let spawn_error = |source| ComposeError::Spawn {
            command: invocation.command_line(),
            source,
        };

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }
        command.stdin(if invocation.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });

        debug!(command = %invocation, "spawning");
        let mut child = command.spawn().map_err(spawn_error)?;

        if let (Some(text), Some(mut stdin)) = (&invocation.stdin, child.stdin.take()) {
            match stdin.write_all(text.as_bytes()) {
                Ok(()) => {}
                // The child closed stdin early; its exit status still decides.
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(command = %invocation, "stdin closed before confirmation was written");
                }
                Err(err) => {
                    drop(stdin);
                    let _ = child.wait();
                    return Err(spawn_error(err));
                }
            }
        }

        let status = child.wait().map_err(spawn_error)?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(script: &str, stdin: Option<&str>) -> Invocation {
        Invocation {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            working_dir: None,
            stdin: stdin.map(str::to_string),
        }
    }

    #[test]
    fn locates_programs_on_path() {
        assert!(SystemRunner.locate("sh").is_some());
        assert!(
            SystemRunner
                .locate("definitely-not-an-installed-tool-7f3a")
                .is_none()
        );
    }

    #[test]
    fn reports_exit_status() {
        let outcome = SystemRunner.run(&shell("exit 3", None)).expect("runs");
        assert_eq!(outcome.code, Some(3));
        assert!(!outcome.success());
    }

    #[test]
    fn pipes_confirmation_text_to_stdin() {
        let script = r#"read answer; [ "$answer" = "yes" ]"#;
        assert!(SystemRunner.run(&shell(script, Some("yes\n"))).expect("runs").success());
        assert!(!SystemRunner.run(&shell(script, Some("y\n"))).expect("runs").success());
    }

    #[test]
    fn closed_stdin_keeps_child_exit_status() {
        for _ in 0..200 {
            let outcome = SystemRunner
                .run(&shell("exec 0<&-; exit 5", Some("yes\n")))
                .expect("runs");
            assert_eq!(outcome.code, Some(5));
        }
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let invocation = Invocation {
            program: "definitely-not-an-installed-tool-7f3a".into(),
            args: Vec::new(),
            working_dir: None,
            stdin: None,
        };
        assert!(matches!(
            SystemRunner.run(&invocation),
            Err(ComposeError::Spawn { .. })
        ));
    }
}
