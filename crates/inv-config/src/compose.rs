//! Container orchestration settings for the administrative procedures.

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "docker".to_string()
}

fn default_program_args() -> Vec<String> {
    vec!["compose".to_string()]
}

fn default_service() -> String {
    "inventree-server".to_string()
}

fn default_confirm_text() -> String {
    "yes".to_string()
}

fn default_delete_data_task() -> String {
    "delete-data".to_string()
}

fn default_update_task() -> String {
    "update".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComposeConfig {
    /// Orchestration tool looked up on `PATH`.
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments selecting the compose subcommand, e.g. `["compose"]`.
    #[serde(default = "default_program_args")]
    pub program_args: Vec<String>,

    /// Compose definition passed with `-f`.
    #[serde(default)]
    pub file: Option<String>,

    /// Working directory for the tool; defaults to the current directory.
    #[serde(default)]
    pub project_directory: Option<String>,

    #[serde(default = "default_service")]
    pub service: String,

    /// Answer piped to the flush prompt. Django's `flush` only proceeds on
    /// the exact text `yes`.
    #[serde(default = "default_confirm_text")]
    pub confirm_text: String,

    #[serde(default = "default_delete_data_task")]
    pub delete_data_task: String,

    #[serde(default = "default_update_task")]
    pub update_task: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            program_args: default_program_args(),
            file: None,
            project_directory: None,
            service: default_service(),
            confirm_text: default_confirm_text(),
            delete_data_task: default_delete_data_task(),
            update_task: default_update_task(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_docker_compose() {
        let config = ComposeConfig::default();
        assert_eq!(config.program, "docker");
        assert_eq!(config.program_args, vec!["compose".to_string()]);
        assert_eq!(config.service, "inventree-server");
        assert_eq!(config.confirm_text, "yes");
        assert_eq!(config.delete_data_task, "delete-data");
        assert_eq!(config.update_task, "update");
        assert!(config.file.is_none());
    }
}
