//! Ordered, fail-fast sequences of administrative actions.

use std::fmt;

use serde::Serialize;
use tracing::{error, info};

use crate::action::AdminAction;
use crate::error::ComposeError;
use crate::invocation::ComposeCommand;
use crate::runner::CommandRunner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    name: &'static str,
    steps: Vec<AdminAction>,
    /// Whether manual follow-up instructions are reported on success.
    follow_up: bool,
}

impl Procedure {
    /// Erase every record in the deployment.
    #[must_use]
    pub fn reset(force: bool) -> Self {
        Self {
            name: "reset",
            steps: vec![AdminAction::DeleteData { force }],
            follow_up: false,
        }
    }

    /// Apply migrations, optionally after a reset.
    #[must_use]
    pub fn setup(reset_first: bool, force: bool) -> Self {
        let mut steps = Vec::with_capacity(2);
        if reset_first {
            steps.push(AdminAction::DeleteData { force });
        }
        steps.push(AdminAction::Update);
        Self {
            name: if reset_first { "reset-setup" } else { "setup" },
            steps,
            follow_up: true,
        }
    }

    /// A one-step procedure.
    #[must_use]
    pub fn single(action: AdminAction) -> Self {
        Self {
            name: action.label(),
            steps: vec![action],
            follow_up: false,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn steps(&self) -> &[AdminAction] {
        &self.steps
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.steps.iter().any(AdminAction::is_destructive)
    }

    /// Run every step in order.
    ///
    /// The orchestration tool is located first; nothing runs when it is
    /// missing. The first step exiting non-zero aborts the procedure.
    ///
    /// # Errors
    ///
    /// [`ComposeError::MissingPrerequisite`], [`ComposeError::Spawn`] or
    /// [`ComposeError::CommandFailed`] for the failing step.
    pub fn run(
        &self,
        compose: &ComposeCommand,
        runner: &dyn CommandRunner,
    ) -> Result<ProcedureReport, ComposeError> {
        let program = compose.program();
        if runner.locate(program).is_none() {
            error!(program, "orchestration tool not found");
            return Err(ComposeError::MissingPrerequisite {
                program: program.to_string(),
            });
        }

        let mut reports = Vec::with_capacity(self.steps.len());
        for (index, action) in self.steps.iter().enumerate() {
            let invocation = compose.invocation(action);
            info!(
                procedure = self.name,
                step = index + 1,
                of = self.steps.len(),
                command = %invocation,
                "running {action}"
            );

            let outcome = runner.run(&invocation)?;
            if !outcome.success() {
                return Err(ComposeError::CommandFailed {
                    step: action.label().to_string(),
                    command: invocation.command_line(),
                    code: outcome.code,
                });
            }

            reports.push(StepReport {
                step: action.label(),
                command: invocation.command_line(),
                exit_code: outcome.code.unwrap_or_default(),
            });
        }

        let next_steps = if self.follow_up {
            vec![
                format!(
                    "Create an administrator account: {}",
                    compose.manual_task("superuser")
                ),
                format!("Start the services: {}", compose.start_stack()),
            ]
        } else {
            Vec::new()
        };

        Ok(ProcedureReport {
            procedure: self.name,
            steps: reports,
            next_steps,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub command: String,
    pub exit_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcedureReport {
    pub procedure: &'static str,
    pub steps: Vec<StepReport>,
    pub next_steps: Vec<String>,
}

impl fmt::Display for ProcedureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "✓ {}  ({})", step.step, step.command)?;
        }
        writeln!(f, "{} completed successfully.", self.procedure)?;
        if !self.next_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "Next steps:")?;
            for (index, step) in self.next_steps.iter().enumerate() {
                writeln!(f, "  {}. {step}", index + 1)?;
            }
        }
        Ok(())
    }
}
