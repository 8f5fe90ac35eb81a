//! Stock location and initial stock items.

use inv_core::{EntityKind, Pk};
use serde_json::json;

use crate::error::CatalogError;
use crate::resolver::EntityResolver;

/// Find or create the stock location that imported stock is placed in.
///
/// # Errors
///
/// Resolver errors.
pub async fn default_location(resolver: &mut EntityResolver<'_>, name: &str) -> Result<Pk, CatalogError> {
    resolver
        .resolve_value(
            EntityKind::StockLocation,
            json!({
                "name": name,
                "description": "Default stock location for all parts",
            }),
        )
        .await
}

/// Find or create the stock item for a supplier part.
///
/// # Errors
///
/// Resolver errors.
pub async fn create_stock_item(
    resolver: &mut EntityResolver<'_>,
    part: Pk,
    supplier_part: Pk,
    quantity: u32,
    location: Pk,
) -> Result<Pk, CatalogError> {
    resolver
        .resolve_value(
            EntityKind::StockItem,
            json!({
                "part": part,
                "supplier_part": supplier_part,
                "quantity": quantity,
                "location": location,
            }),
        )
        .await
}
