//! Part relations collected during import and created once every part exists.

use inv_core::{EntityKind, Pk};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::resolver::EntityResolver;

/// Relations whose second part is known only by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRelations {
    pending: Vec<(Pk, String)>,
}

/// Outcome of [`PendingRelations::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelationSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PendingRelations {
    pub fn add(&mut self, part: Pk, other: &str) {
        let other = other.trim();
        if other.is_empty() {
            warn!(part, "ignoring relation with an empty part name");
            return;
        }
        debug!(part, other, "queued relation");
        self.pending.push((part, other.to_string()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Create the queued relations, draining the queue.
    ///
    /// Names are looked up in the resolver's part cache; unknown names and
    /// failed creations are logged and counted.
    pub async fn resolve(&mut self, resolver: &mut EntityResolver<'_>) -> RelationSummary {
        let parts = resolver.part_names();
        info!(pending = self.pending.len(), known_parts = parts.len(), "resolving part relations");

        let mut summary = RelationSummary::default();
        for (part, other) in self.pending.drain(..) {
            let Some(&other_pk) = parts.get(&other) else {
                warn!(part, %other, "related part not found, skipping relation");
                summary.skipped += 1;
                continue;
            };
            let created = resolver
                .resolve_value(
                    EntityKind::PartRelated,
                    json!({ "part_1": part, "part_2": other_pk }),
                )
                .await;
            match created {
                Ok(_) => summary.created += 1,
                Err(err) => {
                    warn!(part, other = other_pk, %err, "failed to create relation");
                    summary.failed += 1;
                }
            }
        }
        info!(created = summary.created, "part relations resolved");
        summary
    }
}
