//! Bulk deletion of every record of an entity kind.

use std::fmt;

use inv_api::{delete_entity, list_entities, pk_of, str_field};
use inv_core::EntityKind;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::CatalogError;
use crate::resolver::EntityResolver;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub kind: EntityKind,
    pub found: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: deleted {} of {}", self.kind, self.deleted, self.found)?;
        if self.failed > 0 {
            write!(f, " ({} failed)", self.failed)?;
        }
        Ok(())
    }
}

/// Delete every record of `kind` and drop its cache.
///
/// Parts are deactivated with a `PUT` first, since the server refuses to
/// delete active parts. Per-record failures are counted, not returned.
///
/// # Errors
///
/// When the records cannot be listed.
pub async fn delete_kind(resolver: &mut EntityResolver<'_>, kind: EntityKind) -> Result<DeleteSummary, CatalogError> {
    let api = resolver.api();
    let records = list_entities(api, kind, &[]).await?;
    info!(%kind, count = records.len(), "deleting records");

    let mut summary = DeleteSummary {
        kind,
        found: records.len(),
        deleted: 0,
        failed: 0,
    };
    for record in &records {
        let Some(pk) = pk_of(record) else {
            warn!(%kind, "record without pk, skipping");
            summary.failed += 1;
            continue;
        };
        let result = async {
            if kind == EntityKind::Part {
                api.put(
                    &kind.detail_path(pk),
                    &json!({
                        "active": false,
                        "name": str_field(record, "name"),
                        "minimum_stock": 0,
                    }),
                )
                .await?;
            }
            delete_entity(api, kind, pk).await
        }
        .await;
        match result {
            Ok(()) => {
                debug!(%kind, pk, "deleted");
                summary.deleted += 1;
            }
            Err(err) => {
                warn!(%kind, pk, %err, "failed to delete");
                summary.failed += 1;
            }
        }
    }

    resolver.clear_kind(kind);
    info!(%kind, deleted = summary.deleted, failed = summary.failed, "deletion finished");
    Ok(summary)
}

/// Delete every kind in dependency order. Kinds that cannot be listed are
/// logged and reported with zero counts.
pub async fn delete_all(resolver: &mut EntityResolver<'_>) -> Vec<DeleteSummary> {
    let mut summaries = Vec::with_capacity(EntityKind::DELETION_ORDER.len());
    for kind in EntityKind::DELETION_ORDER {
        match delete_kind(resolver, kind).await {
            Ok(summary) => summaries.push(summary),
            Err(err) => {
                warn!(%kind, %err, "failed to list records for deletion");
                summaries.push(DeleteSummary {
                    kind,
                    found: 0,
                    deleted: 0,
                    failed: 0,
                });
            }
        }
    }
    summaries
}

/// Kind names accepted by [`delete_kind`], sorted.
#[must_use]
pub fn entity_kind_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = EntityKind::ALL.iter().map(|kind| kind.name()).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::fake::FakeApi;

    #[tokio::test]
    async fn parts_are_deactivated_before_deletion() {
        let api = FakeApi::new();
        api.seed("part/", vec![json!({"pk": 4, "name": "R1", "active": true})]);
        let mut resolver = EntityResolver::new(&api);

        let summary = delete_kind(&mut resolver, EntityKind::Part).await.unwrap();

        assert_eq!(summary.deleted, 1);
        let put = api.calls_to("PUT", "part/4/");
        assert_eq!(put[0].body, json!({"active": false, "name": "R1", "minimum_stock": 0}));
        assert_eq!(api.calls_to("DELETE", "part/4/").len(), 1);
        assert!(api.records("part/").is_empty());
    }

    #[tokio::test]
    async fn failures_are_counted_and_cache_is_cleared() {
        let api = FakeApi::new();
        api.seed("company/", vec![json!({"pk": 1, "name": "A"}), json!({"pk": 2, "name": "B"})]);
        api.fail_on("DELETE", "company/2/");
        let mut resolver = EntityResolver::new(&api);
        resolver.refresh(EntityKind::Company).await.unwrap();

        let summary = delete_kind(&mut resolver, EntityKind::Company).await.unwrap();

        assert_eq!(summary, DeleteSummary { kind: EntityKind::Company, found: 2, deleted: 1, failed: 1 });
        assert!(resolver.cached(EntityKind::Company).is_empty());
        assert!(api.calls_to("PUT", "company/1/").is_empty());
    }

    #[tokio::test]
    async fn delete_all_follows_dependency_order() {
        let api = FakeApi::new();
        api.seed("part/", vec![json!({"pk": 4, "name": "R1"})]);
        api.seed("part/category/", vec![json!({"pk": 2, "name": "Resistor"})]);
        let mut resolver = EntityResolver::new(&api);

        let summaries = delete_all(&mut resolver).await;

        assert_eq!(summaries.len(), EntityKind::DELETION_ORDER.len());
        let deletes: Vec<String> = api
            .calls()
            .into_iter()
            .filter(|call| call.verb == "DELETE")
            .map(|call| call.path)
            .collect();
        assert_eq!(deletes, vec!["part/4/", "part/category/2/"]);
    }

    #[test]
    fn summary_mentions_failures_only_when_present() {
        let mut summary = DeleteSummary { kind: EntityKind::Part, found: 3, deleted: 3, failed: 0 };
        assert_eq!(summary.to_string(), "Part: deleted 3 of 3");
        summary.deleted = 2;
        summary.failed = 1;
        assert_eq!(summary.to_string(), "Part: deleted 2 of 3 (1 failed)");
    }

    #[test]
    fn kind_names_are_sorted() {
        let names = entity_kind_names();
        assert_eq!(names.first(), Some(&"Attachment"));
        assert_eq!(names.last(), Some(&"SupplierPart"));
        assert_eq!(names.len(), 12);
    }
}
