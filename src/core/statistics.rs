//! Descriptive statistics over inflammation tables.
//!
//! A table holds one row per patient and one column per day.

use crate::utils::error::{InflammationError, Result};
use serde_json::Value;
use std::path::Path;

/// A rectangular table of inflammation readings. `NaN` marks a missing reading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Builds a table, rejecting ragged rows.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let width = first.len();
            if let Some((index, row)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != width)
            {
                return Err(InflammationError::ShapeError {
                    message: format!(
                        "row {} has {} columns, expected {}",
                        index,
                        row.len(),
                        width
                    ),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Builds a table from nested JSON arrays. `null` cells become `NaN`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let outer = value.as_array().ok_or_else(|| InflammationError::TypeError {
            message: format!("expected an array of rows, found {}", kind_of(value)),
        })?;

        let mut rows = Vec::with_capacity(outer.len());
        for (r, row) in outer.iter().enumerate() {
            let cells = match row {
                Value::Array(cells) => cells,
                Value::Number(_) | Value::Null => {
                    return Err(InflammationError::ShapeError {
                        message: "found a 1D array".to_string(),
                    })
                }
                other => {
                    return Err(InflammationError::TypeError {
                        message: format!("row {} is {}", r, kind_of(other)),
                    })
                }
            };

            let values = cells
                .iter()
                .enumerate()
                .map(|(c, cell)| match cell {
                    Value::Number(n) => n.as_f64().ok_or_else(|| InflammationError::TypeError {
                        message: format!("cell ({}, {}) is not representable as f64", r, c),
                    }),
                    Value::Null => Ok(f64::NAN),
                    Value::Array(_) => Err(InflammationError::ShapeError {
                        message: "found more than 2 dimensions".to_string(),
                    }),
                    other => Err(InflammationError::TypeError {
                        message: format!("cell ({}, {}) is {}", r, c, kind_of(other)),
                    }),
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(values);
        }

        Self::new(rows)
    }

    /// Loads delimited numeric text, one patient per line.
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
        has_headers: bool,
    ) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(has_headers)
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut rows = Vec::new();
        for (r, record) in reader.records().enumerate() {
            let record = record?;
            let row = record
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    cell.trim().parse::<f64>().map_err(|_| InflammationError::TypeError {
                        message: format!("cell ({}, {}) is not a number: '{}'", r, c, cell),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }

        tracing::debug!(
            "Loaded {} rows from {}",
            rows.len(),
            path.as_ref().display()
        );
        Self::new(rows)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// f64::max/min skip NaN; column reductions must propagate it instead.
fn propagate_nan(a: f64, b: f64, pick: fn(f64, f64) -> f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        pick(a, b)
    }
}

/// Mean of each day across all patients.
pub fn daily_mean(data: &Table) -> Vec<f64> {
    let count = data.row_count() as f64;
    (0..data.column_count())
        .map(|c| data.column(c).sum::<f64>() / count)
        .collect()
}

/// Maximum of each day across all patients.
pub fn daily_max(data: &Table) -> Vec<f64> {
    (0..data.column_count())
        .map(|c| {
            data.column(c)
                .fold(f64::NEG_INFINITY, |acc, v| propagate_nan(acc, v, f64::max))
        })
        .collect()
}

/// Minimum of each day across all patients.
pub fn daily_min(data: &Table) -> Vec<f64> {
    (0..data.column_count())
        .map(|c| {
            data.column(c)
                .fold(f64::INFINITY, |acc, v| propagate_nan(acc, v, f64::min))
        })
        .collect()
}

/// Scales every patient's readings into `[0, 1]` by that patient's maximum.
///
/// `NaN` readings are ignored when finding the maximum and come out as 0, as do
/// rows whose maximum is 0.
pub fn patient_normalise(data: &Table) -> Result<Table> {
    if data.is_empty() {
        return Err(InflammationError::EmptyInput);
    }

    for (r, row) in data.rows().iter().enumerate() {
        if let Some((c, &value)) = row.iter().enumerate().find(|(_, v)| **v < 0.0) {
            return Err(InflammationError::NegativeValue {
                row: r,
                column: c,
                value,
            });
        }
    }

    let rows = data
        .rows()
        .iter()
        .map(|row| {
            let row_max = row
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .reduce(f64::max)
                .unwrap_or(f64::NAN);

            row.iter()
                .map(|v| {
                    let scaled = v / row_max;
                    if scaled.is_nan() || scaled < 0.0 {
                        0.0
                    } else {
                        scaled
                    }
                })
                .collect()
        })
        .collect();

    Ok(Table { rows })
}
