//! Rectangular view of a sheet: column labels taken from the header row and
//! positional rows of typed cell values.
use crate::spreadsheet::sheet::Sheet;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

/// Errors raised when a table does not have the expected shape.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },
}

/// Typed value of one cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl CellValue {
    /// True for empty cells, whitespace-only text and non-finite numbers.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(number) => !number.is_finite(),
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Bool(_) => false,
        }
    }

    /// Returns `None` for absent values, the value otherwise.
    pub fn present(&self) -> Option<&CellValue> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Display text of a present value.
    pub fn text(&self) -> Option<String> {
        self.present().map(ToString::to_string)
    }

    /// Same value with absent values collapsed to [`CellValue::Empty`].
    pub fn normalized(&self) -> CellValue {
        self.present().cloned().unwrap_or_default()
    }
}

/// Integral numbers print without a fractional part.
fn integral(number: f64) -> Option<i64> {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER {
        Some(number as i64)
    } else {
        None
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Number(number) => match integral(*number) {
                Some(integer) => write!(f, "{}", integer),
                None => write!(f, "{}", number),
            },
            CellValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl Serialize for CellValue {
    /// Non-finite numbers serialize as `null`, never as a bare `NaN` token.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Bool(value) => serializer.serialize_bool(*value),
            CellValue::Number(number) if !number.is_finite() => serializer.serialize_none(),
            CellValue::Number(number) => match integral(*number) {
                Some(integer) => serializer.serialize_i64(integer),
                None => serializer.serialize_f64(*number),
            },
            CellValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(CellValue::Empty),
            serde_json::Value::Bool(value) => Ok(CellValue::Bool(value)),
            serde_json::Value::Number(number) => number
                .as_f64()
                .map(CellValue::Number)
                .ok_or_else(|| D::Error::custom(format!("number {} out of range", number))),
            serde_json::Value::String(text) => Ok(CellValue::Text(text)),
            other => Err(D::Error::custom(format!("expected a scalar cell value, got {}", other))),
        }
    }
}

/// A sheet laid out as rows of values under column labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// Sheet name the table was loaded from
    pub name: String,
    /// Column labels, one per positional column starting at column `A`
    pub columns: Vec<String>,
    /// Data rows (header row excluded), each as long as `columns`
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Builds a table from explicit header cells and rows.
    ///
    /// Empty header cells become `Unnamed: <i>`, labels are trimmed and
    /// duplicates get a `.<n>` suffix. Rows are padded or cut to the header width.
    pub fn new(name: &str, header: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).chain([header.len()]).max().unwrap_or(0);
        let mut seen = HashMap::<String, usize>::new();
        let columns = (0..width)
            .map(|index| {
                let label = header
                    .get(index)
                    .and_then(CellValue::text)
                    .map(|text| text.trim().to_owned())
                    .unwrap_or_else(|| format!("Unnamed: {}", index));
                let count = seen.entry(label.clone()).or_insert(0);
                let label = if *count == 0 {
                    label
                } else {
                    format!("{}.{}", label, count)
                };
                *count += 1;
                label
            })
            .collect::<Vec<_>>();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self {
            name: name.to_owned(),
            columns,
            rows,
        }
    }

    /// Builds a table from a loaded sheet; the first populated row is the header.
    pub(crate) fn from_sheet(sheet: &Sheet) -> Self {
        let mut grid = sheet.grid().into_iter().map(|row| {
            row.into_iter()
                .map(|cell| cell.map(|cell| cell.to_value()).unwrap_or_default())
                .collect::<Vec<_>>()
        });
        let header = grid.next().unwrap_or_default();
        Table::new(&sheet.name, header, grid.collect())
    }

    /// Position of the column with the given label.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == label)
    }

    /// Like [`Table::column_index`], but a missing column is an error.
    pub fn require_column(&self, label: &str) -> Result<usize, TableError> {
        self.column_index(label).ok_or_else(|| TableError::MissingColumn {
            sheet: self.name.to_owned(),
            column: label.to_owned(),
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Each row as an ordered `label -> value` object; absent values become `null`.
    pub fn records(&self) -> Vec<IndexMap<String, CellValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(CellValue::normalized))
                    .collect()
            })
            .collect()
    }
}
