//! Administrative tasks run through `invoke` inside the server container.

use std::fmt;

use inv_config::ComposeConfig;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum AdminAction {
    /// Erase every record and credential. Without `force` the interactive
    /// prompt is answered with the configured confirmation text.
    DeleteData { force: bool },
    /// Apply migrations and collect static files.
    Update,
    Backup,
    Restore,
    ExportRecords { file: String },
    ImportRecords { file: String, clear: bool },
}

impl AdminAction {
    /// The `invoke` task name.
    #[must_use]
    pub fn task<'a>(&self, config: &'a ComposeConfig) -> &'a str {
        match self {
            Self::DeleteData { .. } => &config.delete_data_task,
            Self::Update => &config.update_task,
            Self::Backup => "backup",
            Self::Restore => "restore",
            Self::ExportRecords { .. } => "export-records",
            Self::ImportRecords { .. } => "import-records",
        }
    }

    /// Arguments passed after the task name.
    #[must_use]
    pub fn task_args(&self) -> Vec<String> {
        match self {
            Self::DeleteData { force: true } => vec!["--force".into()],
            Self::DeleteData { force: false } | Self::Update | Self::Backup | Self::Restore => {
                Vec::new()
            }
            Self::ExportRecords { file } => vec!["--filename".into(), file.clone()],
            Self::ImportRecords { file, clear } => {
                let mut args = vec!["--filename".into(), file.clone()];
                if *clear {
                    args.push("--clear".into());
                }
                args
            }
        }
    }

    /// Text piped to the task's stdin, newline terminated.
    #[must_use]
    pub fn stdin(&self, config: &ComposeConfig) -> Option<String> {
        match self {
            Self::DeleteData { force: false } => Some(format!("{}\n", config.confirm_text)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        self.destructive_effect().is_some()
    }

    /// What a destructive action overwrites, for the warning shown before it runs.
    #[must_use]
    pub const fn destructive_effect(&self) -> Option<&'static str> {
        match self {
            Self::DeleteData { .. } => Some("erasing all records and credentials"),
            Self::Restore => Some("replacing the database and media files with the latest backup"),
            Self::ImportRecords { clear: true, .. } => {
                Some("clearing existing records before importing")
            }
            _ => None,
        }
    }

    /// Short step label used in reports and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DeleteData { .. } => "delete-data",
            Self::Update => "update",
            Self::Backup => "backup",
            Self::Restore => "restore",
            Self::ExportRecords { .. } => "export-records",
            Self::ImportRecords { .. } => "import-records",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
