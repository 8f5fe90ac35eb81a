//! Procedure behaviour against a scripted runner.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

use inv_compose::{
    AdminAction, CommandRunner, ComposeCommand, ComposeError, ExitOutcome, Invocation, Procedure,
};
use inv_config::ComposeConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Records every invocation and answers with queued exit codes (0 once the
/// queue runs dry).
struct ScriptedRunner {
    installed: bool,
    exits: RefCell<VecDeque<Option<i32>>>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    fn new(exits: &[Option<i32>]) -> Self {
        Self {
            installed: true,
            exits: RefCell::new(exits.iter().copied().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn without_tool() -> Self {
        Self {
            installed: false,
            ..Self::new(&[])
        }
    }

    fn tasks(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|call| {
                let invoke = call
                    .args
                    .iter()
                    .position(|arg| arg == "invoke")
                    .expect("invoke present");
                call.args[invoke + 1..].join(" ")
            })
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed
            .then(|| PathBuf::from("/usr/bin").join(program))
    }

    fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ComposeError> {
        self.calls.borrow_mut().push(invocation.clone());
        let code = self.exits.borrow_mut().pop_front().unwrap_or(Some(0));
        Ok(ExitOutcome { code })
    }
}

fn compose() -> ComposeCommand {
    ComposeCommand::new(ComposeConfig::default())
}

#[rstest]
#[case(Procedure::reset(false))]
#[case(Procedure::setup(false, false))]
#[case(Procedure::setup(true, false))]
#[case(Procedure::single(AdminAction::Backup))]
fn missing_tool_runs_nothing(#[case] procedure: Procedure) {
    let runner = ScriptedRunner::without_tool();
    let err = procedure.run(&compose(), &runner).unwrap_err();

    assert!(matches!(err, ComposeError::MissingPrerequisite { ref program } if program == "docker"));
    assert_ne!(err.exit_code(), 0);
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn successful_reset_reports_the_flush() {
    let runner = ScriptedRunner::new(&[Some(0)]);
    let report = Procedure::reset(false)
        .run(&compose(), &runner)
        .expect("reset succeeds");

    assert_eq!(runner.tasks(), vec!["delete-data"]);
    assert_eq!(report.steps.len(), 1);
    assert_eq!(report.steps[0].step, "delete-data");
    assert!(report.next_steps.is_empty());
}

#[test]
fn reset_then_setup_runs_update_after_flush() {
    let runner = ScriptedRunner::new(&[Some(0), Some(0)]);
    let report = Procedure::setup(true, false)
        .run(&compose(), &runner)
        .expect("procedure succeeds");

    assert_eq!(runner.tasks(), vec!["delete-data", "update"]);
    assert_eq!(report.procedure, "reset-setup");
    assert_eq!(report.next_steps.len(), 2);
    assert!(report.next_steps[0].ends_with("invoke superuser"));
    assert!(report.next_steps[1].ends_with("up -d"));
}

#[test]
fn failed_flush_skips_update_and_keeps_exit_code() {
    let runner = ScriptedRunner::new(&[Some(2)]);
    let err = Procedure::setup(true, false)
        .run(&compose(), &runner)
        .unwrap_err();

    assert_eq!(runner.tasks(), vec!["delete-data"]);
    assert_eq!(err.exit_code(), 2);
    match err {
        ComposeError::CommandFailed { step, code, .. } => {
            assert_eq!(step, "delete-data");
            assert_eq!(code, Some(2));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_update_is_reported_as_update() {
    let runner = ScriptedRunner::new(&[Some(1)]);
    let err = Procedure::setup(false, false)
        .run(&compose(), &runner)
        .unwrap_err();
    assert!(matches!(err, ComposeError::CommandFailed { ref step, .. } if step == "update"));
}

#[test]
fn reset_twice_on_an_empty_database() {
    let runner = ScriptedRunner::new(&[Some(0), Some(0)]);
    let procedure = Procedure::reset(false);

    procedure.run(&compose(), &runner).expect("first reset");
    procedure.run(&compose(), &runner).expect("second reset");

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[test]
fn confirmation_text_is_exactly_the_configured_answer() {
    let runner = ScriptedRunner::new(&[]);
    Procedure::reset(false)
        .run(&compose(), &runner)
        .expect("reset succeeds");
    assert_eq!(runner.calls.borrow()[0].stdin.as_deref(), Some("yes\n"));

    let legacy = ComposeCommand::new(ComposeConfig {
        confirm_text: "y".into(),
        ..Default::default()
    });
    let runner = ScriptedRunner::new(&[]);
    Procedure::reset(false)
        .run(&legacy, &runner)
        .expect("reset succeeds");
    assert_eq!(runner.calls.borrow()[0].stdin.as_deref(), Some("y\n"));
}

#[test]
fn forced_reset_sends_no_stdin() {
    let runner = ScriptedRunner::new(&[]);
    Procedure::reset(true)
        .run(&compose(), &runner)
        .expect("reset succeeds");
    assert_eq!(runner.tasks(), vec!["delete-data --force"]);
    assert_eq!(runner.calls.borrow()[0].stdin, None);
}

#[test]
fn report_renders_next_steps() {
    let runner = ScriptedRunner::new(&[]);
    let report = Procedure::setup(false, false)
        .run(&compose(), &runner)
        .expect("setup succeeds");
    let text = report.to_string();
    assert!(text.contains("setup completed successfully."));
    assert!(text.contains("Next steps:"));
    assert!(text.contains("1. Create an administrator account: docker compose run --rm inventree-server invoke superuser"));
}
