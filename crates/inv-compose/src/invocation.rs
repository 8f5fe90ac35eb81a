//! Command-line construction for `<tool> compose run --rm <service> invoke ...`.

use std::fmt;
use std::path::PathBuf;

use inv_config::ComposeConfig;
use serde::Serialize;

use crate::action::AdminAction;

/// A fully built external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Text written to the child's stdin; `None` inherits the terminal.
    #[serde(skip)]
    pub stdin: Option<String>,
}

impl Invocation {
    /// Shell-like rendering for logs and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(char::is_whitespace) {
        arg.to_string()
    } else {
        format!("'{arg}'")
    }
}

/// Builds invocations against the configured compose project.
#[derive(Debug, Clone)]
pub struct ComposeCommand {
    config: ComposeConfig,
}

impl ComposeCommand {
    #[must_use]
    pub const fn new(config: ComposeConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// The orchestration tool that must be on `PATH`.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.config.program
    }

    /// `<program> <program_args…> [-f <file>]`, shared by every invocation.
    fn base_args(&self) -> Vec<String> {
        let mut args = self.config.program_args.clone();
        if let Some(file) = &self.config.file {
            args.push("-f".into());
            args.push(file.clone());
        }
        args
    }

    /// Invocation running `action` in a throwaway service container.
    #[must_use]
    pub fn invocation(&self, action: &AdminAction) -> Invocation {
        let mut args = self.base_args();
        args.extend([
            "run".to_string(),
            "--rm".to_string(),
            self.config.service.clone(),
            "invoke".to_string(),
            action.task(&self.config).to_string(),
        ]);
        args.extend(action.task_args());

        Invocation {
            program: self.config.program.clone(),
            args,
            working_dir: self.config.project_directory.as_ref().map(PathBuf::from),
            stdin: action.stdin(&self.config),
        }
    }

    /// `invoke <task>` line a user runs by hand, e.g. `superuser`.
    #[must_use]
    pub fn manual_task(&self, task: &str) -> String {
        let mut args = self.base_args();
        args.extend([
            "run".to_string(),
            "--rm".to_string(),
            self.config.service.clone(),
            "invoke".to_string(),
            task.to_string(),
        ]);
        self.render(args)
    }

    /// `<program> <program_args…> up -d`.
    #[must_use]
    pub fn start_stack(&self) -> String {
        let mut args = self.base_args();
        args.extend(["up".to_string(), "-d".to_string()]);
        self.render(args)
    }

    fn render(&self, args: Vec<String>) -> String {
        Invocation {
            program: self.config.program.clone(),
            args,
            working_dir: None,
            stdin: None,
        }
        .command_line()
    }
}
