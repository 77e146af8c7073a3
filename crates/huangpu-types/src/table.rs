//! Normalized tabular data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column-named table of rows, the normalized form of every provider
/// response.
///
/// Rows hold loosely typed JSON values because the provider mixes strings,
/// integers, floats, and nulls within one column across datasets. Consumers
/// that need a typed view go through the accessor helpers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataTable {
    fields: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Creates a table from column names and rows.
    ///
    /// Rows shorter than the field list are tolerated; missing cells read as
    /// absent.
    #[must_use]
    pub fn new(fields: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { fields, rows }
    }

    /// Returns the ordered column names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the data rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    /// Returns the cell at `(row, column)` if present.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Returns the cell at `(row, column)` as a string slice, if it is a
    /// JSON string.
    #[must_use]
    pub fn str_cell(&self, row: usize, column: &str) -> Option<&str> {
        self.cell(row, column)?.as_str()
    }

    /// Iterates over one column's cells in row order.
    ///
    /// Returns `None` if the column does not exist. Rows too short to reach
    /// the column yield [`Value::Null`].
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let col = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(move |row| row.get(col).unwrap_or(&Value::Null)),
        )
    }
}
