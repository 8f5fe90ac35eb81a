//! Part creation from a database sheet row.

use inv_api::patch_entity;
use inv_core::{EntityKind, PartType, Pk, format_ipn, part_link};
use serde_json::json;
use tracing::warn;

use crate::error::CatalogError;
use crate::relations::PendingRelations;
use crate::resolver::EntityResolver;
use crate::table::Row;

pub const NAME_COLUMN: &str = "NAME";
pub const DESCRIPTION_COLUMN: &str = "DESCRIPTION";
pub const TYPE_COLUMN: &str = "TYPE";
pub const REVISION_COLUMN: &str = "REVISION";
pub const DESIGNATOR_COLUMN: &str = "DESIGNATOR [str]";
pub const DATASHEET_COLUMN: &str = "DATASHEET_LINK";
pub const RELATED_COLUMN: &str = "RELATEDPARTS";

/// What was created for one part row besides the part itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartOutcome {
    pub pk: Pk,
    /// Non-fatal follow-up failures (link, IPN, attachment).
    pub warnings: usize,
    pub relations_queued: usize,
}

/// Create (or find) the part described by `row` in `category`.
///
/// The part itself is fatal; link/IPN patching, the datasheet attachment,
/// and relation queueing only log warnings.
///
/// # Errors
///
/// [`CatalogError::InvalidName`] for an empty `NAME`, or the resolver error.
pub async fn create_part(
    resolver: &mut EntityResolver<'_>,
    row: &Row<'_>,
    category: Pk,
    site_url: &str,
    pending: &mut PendingRelations,
) -> Result<PartOutcome, CatalogError> {
    let name = row
        .get(NAME_COLUMN)
        .ok_or(CatalogError::InvalidName { row: row.index() })?;
    let is_virtual = PartType::classify(row.get(TYPE_COLUMN).unwrap_or_default()).is_virtual();

    let pk = resolver
        .resolve_value(
            EntityKind::Part,
            json!({
                "name": name,
                "category": category,
                "description": row.get(DESCRIPTION_COLUMN).unwrap_or_default(),
                "virtual": is_virtual,
                "revision": row.get(REVISION_COLUMN).unwrap_or("0"),
            }),
        )
        .await?;

    let mut outcome = PartOutcome {
        pk,
        ..PartOutcome::default()
    };
    let api = resolver.api();
    let link = part_link(site_url, pk);

    let designator = row.get(DESIGNATOR_COLUMN).unwrap_or_default();
    let patch = patch_entity(
        api,
        EntityKind::Part,
        pk,
        json!({ "link": link, "IPN": format_ipn(designator, pk) }),
    )
    .await;
    if let Err(err) = patch {
        warn!(part = pk, %err, "failed to update part link or IPN");
        outcome.warnings += 1;
    }

    let datasheet = if is_virtual {
        Some(link.as_str())
    } else {
        row.get(DATASHEET_COLUMN)
    };
    if let Some(datasheet) = datasheet {
        let attachment = resolver
            .resolve_value(
                EntityKind::Attachment,
                json!({
                    "link": datasheet,
                    "comment": "datasheet",
                    "model_type": "part",
                    "model_id": pk,
                }),
            )
            .await;
        if let Err(err) = attachment {
            warn!(part = pk, %err, "failed to create datasheet attachment");
            outcome.warnings += 1;
        }
    }

    if let Some(related) = row.get(RELATED_COLUMN) {
        for other in related.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            pending.add(pk, other);
            outcome.relations_queued += 1;
        }
    }

    Ok(outcome)
}
