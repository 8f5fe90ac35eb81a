//! CSV sheets with every cell kept as text.
//!
//! Nothing is type-inferred, so footprints such as `0402` survive intact.
//! Cells that are empty after trimming are treated as absent.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl CsvTable {
    /// Read a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Csv`] when the file cannot be opened or parsed.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let csv_error = |source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(csv_error)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::from_csv_reader(name, reader).map_err(csv_error)
    }

    /// Parse CSV text from any reader; `name` labels the table in messages.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Csv`] on malformed input.
    pub fn from_reader<R: Read>(name: &str, input: R) -> Result<Self, CatalogError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        Self::from_csv_reader(name.to_string(), reader).map_err(|source| CatalogError::Csv {
            path: PathBuf::from(name),
            source,
        })
    }

    fn from_csv_reader<R: Read>(name: String, mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut cells: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    let cell = cell.trim();
                    (!cell.is_empty()).then(|| cell.to_string())
                })
                .collect();
            cells.resize(headers.len(), None);
            if cells.iter().any(Option::is_some) {
                rows.push(cells);
            }
        }
        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Index of `column`, or [`CatalogError::MissingColumn`].
    ///
    /// # Errors
    ///
    /// When the header row has no such column.
    pub fn require_column(&self, column: &str) -> Result<usize, CatalogError> {
        self.column_index(column)
            .ok_or_else(|| CatalogError::MissingColumn {
                file: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(|(index, cells)| Row {
            table: self,
            index,
            cells,
        })
    }

    /// Distinct non-empty values of `column` in first-seen order.
    #[must_use]
    pub fn distinct(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen = Vec::new();
        for value in self.rows.iter().filter_map(|cells| cells[idx].as_ref()) {
            if !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        seen
    }

    /// Index of `column`, appending an empty column when missing.
    pub fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(idx) = self.column_index(column) {
            return idx;
        }
        self.headers.push(column.to_string());
        for cells in &mut self.rows {
            cells.push(None);
        }
        self.headers.len() - 1
    }

    /// Set a cell, adding the column when needed.
    pub fn set(&mut self, row: usize, column: &str, value: impl Into<String>) {
        let idx = self.ensure_column(column);
        if let Some(cells) = self.rows.get_mut(row) {
            cells[idx] = Some(value.into());
        }
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    /// Write the table as CSV; absent cells become empty fields.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Csv`] when the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), CatalogError> {
        let csv_error = |source| CatalogError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        writer.write_record(&self.headers).map_err(csv_error)?;
        for cells in &self.rows {
            writer
                .write_record(cells.iter().map(|c| c.as_deref().unwrap_or_default()))
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|e| csv_error(e.into()))?;
        Ok(())
    }
}

/// One data row, borrowed from its table.
#[derive(Debug, Clone, Copy)]
pub struct Row<'t> {
    table: &'t CsvTable,
    index: usize,
    cells: &'t [Option<String>],
}

impl<'t> Row<'t> {
    /// Zero-based data row index (header excluded).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&'t str> {
        let idx = self.table.column_index(column)?;
        self.at(idx)
    }

    #[must_use]
    pub fn at(&self, idx: usize) -> Option<&'t str> {
        self.cells.get(idx).and_then(|c| c.as_deref())
    }

    /// Columns strictly between `start` and `end`, with their values.
    ///
    /// # Errors
    ///
    /// [`CatalogError::MissingColumn`] when either bound is absent.
    pub fn between(&self, start: &str, end: &str) -> Result<Vec<(&'t str, Option<&'t str>)>, CatalogError> {
        let from = self.table.require_column(start)?;
        let to = self.table.require_column(end)?;
        Ok(self.table.headers[(from + 1).min(to)..to]
            .iter()
            .enumerate()
            .map(|(offset, header)| (header.as_str(), self.at(from + 1 + offset)))
            .collect())
    }

    /// `(suffix, value)` for every column named `<prefix><digits>`.
    #[must_use]
    pub fn numbered(&self, prefix: &str) -> Vec<(&'t str, Option<&'t str>)> {
        self.table
            .headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| {
                let suffix = header.strip_prefix(prefix)?;
                (!suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()))
                    .then(|| (suffix, self.at(idx)))
            })
            .collect()
    }
}
