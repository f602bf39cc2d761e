//! In-memory results table returned by compilers.
//!
//! Rows are annotated units or turns; columns are metadata followed by one
//! indicator column per problem bucket. The table owns its data and is
//! handed to the caller, who decides whether and where to persist it.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::errors::{CrowdsiftError, Result};

/// A single table value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Free text
    Text(String),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Indicator value
    Bool(bool),
    /// Missing value
    Empty,
}

impl Cell {
    /// Whether the cell is an indicator set to `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, Cell::Bool(true))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Integer(value) => write!(f, "{value}"),
            Cell::Float(value) => write!(f, "{value}"),
            Cell::Bool(value) => write!(f, "{value}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Empty, Cell::Text)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// Selection statistics for one problem bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    /// Bucket label
    pub bucket: String,
    /// Rows where the bucket was selected
    pub count: usize,
    /// `count` divided by the number of rows, 0.0 for an empty table
    pub fraction: f64,
}

/// Named columns and typed rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ResultsTable {
    /// Empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Empty table, failing when a column name appears more than once.
    pub fn try_new(columns: Vec<String>) -> Result<Self> {
        for (index, column) in columns.iter().enumerate() {
            if columns[..index].contains(column) {
                return Err(CrowdsiftError::Validation {
                    message: format!("Duplicate column name '{column}'"),
                    field: Some(column.clone()),
                });
            }
        }
        Ok(Self::new(columns))
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CrowdsiftError::validation(format!(
                "Row has {} value(s) but the table has {} column(s)",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Values of the column called `name`, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Count how often each bucket column is set.
    pub fn bucket_summary(&self, buckets: &[String]) -> Result<Vec<BucketSummary>> {
        let total = self.num_rows();
        buckets
            .iter()
            .map(|bucket| {
                let index = self.column_index(bucket).ok_or_else(|| CrowdsiftError::Validation {
                    message: format!("Table has no column for bucket '{bucket}'"),
                    field: Some(bucket.clone()),
                })?;
                let count = self.rows.iter().filter(|row| row[index].is_true()).count();
                #[allow(clippy::cast_precision_loss)]
                let fraction = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                Ok(BucketSummary {
                    bucket: bucket.clone(),
                    count,
                    fraction,
                })
            })
            .collect()
    }

    /// Render as CSV with a header line.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, self.columns.iter().map(String::as_str));
        for row in &self.rows {
            let values: Vec<String> = row.iter().map(ToString::to_string).collect();
            push_csv_line(&mut out, values.iter().map(String::as_str));
        }
        out
    }

    /// Render as a pretty-printed JSON array of row objects, keys in column order.
    pub fn to_json(&self) -> Result<String> {
        let records: Vec<IndexMap<&str, &Cell>> = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter())
                    .collect()
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

fn push_csv_line<'a>(out: &mut String, values: impl Iterator<Item = &'a str>) {
    let line: Vec<String> = values.map(escape_csv_field).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
