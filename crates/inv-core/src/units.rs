//! Custom physical units registered on the server.

use serde::Serialize;

/// A custom unit definition as posted to `units/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitDefinition {
    pub name: &'static str,
    pub definition: &'static str,
    pub symbol: &'static str,
}

/// Units used by the electrical parameter templates.
pub const DEFAULT_UNITS: [UnitDefinition; 5] = [
    UnitDefinition {
        name: "A2S",
        definition: "A ** 2 / t",
        symbol: "A2S",
    },
    UnitDefinition {
        name: "AAC",
        definition: "A",
        symbol: "AAC",
    },
    UnitDefinition {
        name: "ADC",
        definition: "A",
        symbol: "ADC",
    },
    UnitDefinition {
        name: "VAC",
        definition: "V",
        symbol: "VAC",
    },
    UnitDefinition {
        name: "VDC",
        definition: "V",
        symbol: "VDC",
    },
];
