use std::fmt;

use anyhow::bail;
use inv_catalog::{DeleteSummary, EntityResolver, delete_all, delete_kind, entity_kind_names};
use inv_config::InvConfig;
use inv_core::EntityKind;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::DeleteCommands;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct DeleteResponse(Vec<DeleteSummary>);

impl fmt::Display for DeleteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.0 {
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct KindList(Vec<&'static str>);

impl fmt::Display for KindList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Available entity types for deletion:")?;
        for name in &self.0 {
            writeln!(f, "  - {name}")?;
        }
        Ok(())
    }
}

/// Handle `invt delete`.
pub async fn handle(action: &DeleteCommands, config: &InvConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DeleteCommands::List => output(&KindList(entity_kind_names()), flags.format),
        DeleteCommands::Kind { kind, yes } => {
            let kind: EntityKind = kind.parse()?;
            confirm(*yes, &format!("Delete every {kind} record?"))?;
            let api = bootstrap::connect(config).await?;
            let mut resolver = EntityResolver::new(&api);

            let progress = Progress::spinner(&format!("deleting {kind} records"));
            let summary = delete_kind(&mut resolver, kind).await?;
            progress.finish_clear();
            output(&DeleteResponse(vec![summary]), flags.format)
        }
        DeleteCommands::All { yes } => {
            confirm(*yes, "Delete every catalog record of every kind?")?;
            let api = bootstrap::connect(config).await?;
            let mut resolver = EntityResolver::new(&api);

            let progress = Progress::spinner("deleting all records");
            let summaries = delete_all(&mut resolver).await;
            progress.finish_clear();
            output(&DeleteResponse(summaries), flags.format)
        }
    }
}

fn confirm(yes: bool, question: &str) -> anyhow::Result<()> {
    if yes || ui::confirm(question)? {
        return Ok(());
    }
    bail!("aborted; pass --yes to delete without confirmation")
}
