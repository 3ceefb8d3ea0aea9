//! CSV import of titration tables.
//!
//! A table has a header row of residue labels and one row per titration
//! point (or experiment). The first column holds the row names; the header
//! cell above it is ignored:
//!
//! ```text
//! point,1,2,3,4
//! 0.5,0.01,0.02,nan,0.04
//! 1.0,0.02,0.05,,0.06
//! ```
//!
//! Empty cells and `nan` mark unmeasured residues and become NaN.
//! Companion tables of text (peak status, user details, tag positions)
//! use the same layout and are read with [`StringTable`].

use std::io::Read;
use std::path::Path;

use ndarray::Array2;

use crate::error::{Error, Result};

/// A numeric titration table.
#[derive(Debug, Clone, PartialEq)]
pub struct TitrationTable {
    /// First-column names, one per row.
    pub row_names: Vec<String>,
    /// Header labels, one per column.
    pub labels: Vec<String>,
    /// Values, `row_names.len()` x `labels.len()`.
    pub values: Array2<f64>,
}

impl TitrationTable {
    /// Reads a table from a CSV file.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Reading titration table {}", path.display());
        Self::from_reader(std::fs::File::open(path)?)
    }

    /// Reads a table from CSV data.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw = RawTable::read(reader)?;
        let mut flat = Vec::with_capacity(raw.cells.len() * raw.labels.len());
        for (r, row) in raw.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                flat.push(parse_value(cell).ok_or_else(|| Error::Import {
                    line: r + 2,
                    reason: format!("column '{}': '{}' is not a number", raw.labels[c], cell),
                })?);
            }
        }
        let values = raw.shape(flat)?;
        Ok(Self {
            row_names: raw.row_names,
            labels: raw.labels,
            values,
        })
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            row_names: self.labels.clone(),
            labels: self.row_names.clone(),
            values: self.values.t().to_owned(),
        }
    }
}

/// A text table with the same layout as [`TitrationTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct StringTable {
    pub row_names: Vec<String>,
    pub labels: Vec<String>,
    pub values: Array2<String>,
}

impl StringTable {
    /// Reads a table from a CSV file.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(std::fs::File::open(path.as_ref())?)
    }

    /// Reads a table from CSV data.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raw = RawTable::read(reader)?;
        let flat: Vec<String> = raw.cells.iter().flatten().cloned().collect();
        let values = raw.shape(flat)?;
        Ok(Self {
            row_names: raw.row_names,
            labels: raw.labels,
            values,
        })
    }
}

/// Parsed CSV before cell conversion.
struct RawTable {
    row_names: Vec<String>,
    labels: Vec<String>,
    cells: Vec<Vec<String>>,
}

impl RawTable {
    fn read<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let labels: Vec<String> = reader.headers()?.iter().skip(1).map(String::from).collect();
        if labels.is_empty() {
            return Err(Error::Import {
                line: 1,
                reason: "header has no residue columns".to_string(),
            });
        }

        let mut row_names = Vec::new();
        let mut cells = Vec::new();
        for (line_num, record) in reader.records().enumerate() {
            let line = line_num + 2; // 1-based, after the header
            let record = record.map_err(|e| Error::Import {
                line,
                reason: e.to_string(),
            })?;
            if record.len() != labels.len() + 1 {
                return Err(Error::Import {
                    line,
                    reason: format!("expected {} fields, found {}", labels.len() + 1, record.len()),
                });
            }
            let mut fields = record.iter().map(String::from);
            row_names.extend(fields.next());
            cells.push(fields.collect());
        }

        if row_names.is_empty() {
            return Err(Error::Import {
                line: 2,
                reason: "table has no data rows".to_string(),
            });
        }

        Ok(Self {
            row_names,
            labels,
            cells,
        })
    }

    fn shape<T>(&self, flat: Vec<T>) -> Result<Array2<T>> {
        Array2::from_shape_vec((self.row_names.len(), self.labels.len()), flat).map_err(|e| {
            Error::Import {
                line: 0,
                reason: e.to_string(),
            }
        })
    }
}

/// Parses a cell; empty and `nan` cells are NaN.
fn parse_value(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    cell.parse().ok()
}
