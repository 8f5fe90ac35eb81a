use std::fmt;

use inv_core::{ParsedValue, format_value_with_unit, parse_parameter_value};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValueArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ValueResponse {
    raw: String,
    unit: String,
    #[serde(flatten)]
    parsed: ParsedValue,
    formatted: String,
}

impl ValueResponse {
    fn new(raw: &str, unit: &str) -> Self {
        let parsed = parse_parameter_value(Some(raw), unit);
        let formatted = format_value_with_unit(parsed.numeric, unit, None);
        Self {
            raw: raw.to_string(),
            unit: unit.to_string(),
            parsed,
            formatted,
        }
    }
}

impl fmt::Display for ValueResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data:         {}", self.parsed.display)?;
        match self.parsed.numeric {
            Some(numeric) => writeln!(f, "data_numeric: {numeric:e}")?,
            None => writeln!(f, "data_numeric: -")?,
        }
        writeln!(f, "formatted:    {}", self.formatted)
    }
}

/// Handle `invt value`.
pub fn handle(args: &ValueArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ValueResponse::new(&args.raw, &args.unit), flags.format)
}
