use std::io::{BufRead, IsTerminal, Write};
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
    pub interactive: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let stderr_tty = std::io::stderr().is_terminal();
    let interactive = std::io::stdin().is_terminal();

    let _ = UI_PREFS.set(UiPrefs {
        progress: stderr_tty && !flags.quiet && flags.format == OutputFormat::Text,
        interactive,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        progress: false,
        interactive: false,
    })
}

/// Ask a yes/no question on stderr. Non-interactive sessions answer no.
pub fn confirm(question: &str) -> anyhow::Result<bool> {
    if !prefs().interactive {
        return Ok(false);
    }
    let mut stderr = std::io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
