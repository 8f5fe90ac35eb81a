//! InvenTree entity kinds and composite identity keys.
//!
//! Every entity kind the catalog tooling touches is listed here together with
//! its API collection endpoint and the fields that identify an instance. The
//! identifier table drives cache lookups in the entity resolver: two records
//! with equal identifier values are treated as the same entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Primary key of an InvenTree database record.
pub type Pk = u64;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// An entity type exposed by the InvenTree REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Attachment,
    BomItem,
    Company,
    ManufacturerPart,
    Parameter,
    ParameterTemplate,
    Part,
    PartCategory,
    PartRelated,
    StockItem,
    StockLocation,
    SupplierPart,
}

impl EntityKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Attachment,
        Self::BomItem,
        Self::Company,
        Self::ManufacturerPart,
        Self::Parameter,
        Self::ParameterTemplate,
        Self::Part,
        Self::PartCategory,
        Self::PartRelated,
        Self::StockItem,
        Self::StockLocation,
        Self::SupplierPart,
    ];

    /// Order for bulk deletion: records referencing other records go first.
    pub const DELETION_ORDER: [Self; 12] = [
        Self::Attachment,
        Self::BomItem,
        Self::Parameter,
        Self::PartRelated,
        Self::StockItem,
        Self::SupplierPart,
        Self::ManufacturerPart,
        Self::Part,
        Self::ParameterTemplate,
        Self::PartCategory,
        Self::StockLocation,
        Self::Company,
    ];

    /// Type name as shown to users (`Part`, `PartCategory`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attachment => "Attachment",
            Self::BomItem => "BomItem",
            Self::Company => "Company",
            Self::ManufacturerPart => "ManufacturerPart",
            Self::Parameter => "Parameter",
            Self::ParameterTemplate => "ParameterTemplate",
            Self::Part => "Part",
            Self::PartCategory => "PartCategory",
            Self::PartRelated => "PartRelated",
            Self::StockItem => "StockItem",
            Self::StockLocation => "StockLocation",
            Self::SupplierPart => "SupplierPart",
        }
    }

    /// Collection endpoint relative to the API root, with trailing slash.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Attachment => "attachment/",
            Self::BomItem => "bom/",
            Self::Company => "company/",
            Self::ManufacturerPart => "company/part/manufacturer/",
            Self::Parameter => "part/parameter/",
            Self::ParameterTemplate => "part/parameter/template/",
            Self::Part => "part/",
            Self::PartCategory => "part/category/",
            Self::PartRelated => "part/related/",
            Self::StockItem => "stock/",
            Self::StockLocation => "stock/location/",
            Self::SupplierPart => "company/part/",
        }
    }

    /// Detail endpoint for a single record.
    #[must_use]
    pub fn detail_path(self, pk: Pk) -> String {
        format!("{}{pk}/", self.endpoint())
    }

    /// Fields whose values identify an instance of this kind.
    #[must_use]
    pub const fn identifiers(self) -> &'static [&'static str] {
        match self {
            Self::Attachment => &["link", "model_id"],
            Self::BomItem => &["part", "sub_part"],
            Self::Company | Self::ParameterTemplate | Self::StockLocation => &["name"],
            Self::ManufacturerPart => &["MPN"],
            Self::Parameter => &["part", "template"],
            Self::Part => &["name", "category", "revision"],
            Self::PartCategory => &["name", "parent"],
            Self::PartRelated => &["part_1", "part_2"],
            Self::StockItem => &["part", "supplier_part"],
            Self::SupplierPart => &["SKU"],
        }
    }

    /// Comma-separated list of all kind names, for error messages.
    #[must_use]
    pub fn available_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownEntityKind {
                name: wanted.to_string(),
                available: Self::available_names(),
            })
    }
}

// ---------------------------------------------------------------------------
// CompositeKey
// ---------------------------------------------------------------------------

/// Identity of a record: the stringified values of its kind's identifier fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(Vec<String>);

impl CompositeKey {
    /// Build the key for `record` using the identifier fields of `kind`.
    ///
    /// Absent and `null` fields become empty components, so a record created
    /// with `parent: null` matches the listing of a top-level category.
    #[must_use]
    pub fn from_record(kind: EntityKind, record: &Map<String, Value>) -> Self {
        Self(
            kind.identifiers()
                .iter()
                .map(|field| record.get(*field).map_or_else(String::new, value_text))
                .collect(),
        )
    }

    /// Key components in identifier order.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// First component, e.g. the part name for [`EntityKind::Part`].
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// Text form of a JSON value used for identity comparisons: `null` is empty,
/// strings are unquoted, everything else uses its JSON text.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
