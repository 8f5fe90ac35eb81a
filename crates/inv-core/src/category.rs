//! Slash-separated part category paths such as `Passive / Resistor / generic`.

use std::fmt;

use crate::errors::CoreError;

/// One level of a category path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLevel {
    pub name: String,
    /// Every level except the leaf is structural (holds categories, not parts).
    pub structural: bool,
}

/// A parsed category path, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPath {
    levels: Vec<CategoryLevel>,
}

impl CategoryPath {
    /// Parse `"A / B / C"`. Empty segments and spreadsheet `nan` placeholders
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCategoryPath`] when no level remains.
    pub fn parse(path: &str) -> Result<Self, CoreError> {
        let names: Vec<&str> = path
            .split('/')
            .map(str::trim)
            .filter(|level| !level.is_empty() && !level.eq_ignore_ascii_case("nan"))
            .collect();

        if names.is_empty() {
            return Err(CoreError::EmptyCategoryPath(path.to_string()));
        }

        let last = names.len() - 1;
        let levels = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| CategoryLevel {
                name: name.to_string(),
                structural: idx != last,
            })
            .collect();

        Ok(Self { levels })
    }

    /// Build the `{category} / {type}` path used by database CSV rows.
    ///
    /// # Errors
    ///
    /// Same as [`CategoryPath::parse`].
    pub fn from_columns(category: &str, part_type: &str) -> Result<Self, CoreError> {
        Self::parse(&format!("{category} / {part_type}"))
    }

    #[must_use]
    pub fn levels(&self) -> &[CategoryLevel] {
        &self.levels
    }

    /// Name of the leaf level.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.levels.last().map_or("", |level| level.name.as_str())
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.levels.iter().map(|l| l.name.as_str()).collect();
        f.write_str(&names.join(" / "))
    }
}
