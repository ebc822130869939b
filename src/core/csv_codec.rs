//! Wide CSV layout: one row per patient, one column per observation.
//!
//! ```text
//! name,0,1,2,
//! Alice,1,2,3,
//! Sarah,
//! ```
//!
//! Column headers are observation positions. Loading turns each header back into
//! the day number, so only patients whose days run `0..n` survive a round trip
//! unchanged.

use crate::core::serializer::{encode_reading, PatientSerializer};
use crate::domain::model::Patient;
use crate::domain::ports::{Named, PatientCodec, Record, Serializer};
use crate::utils::error::{InflammationError, Result};
use serde_json::{json, Value};
use std::path::Path;

const NAME_COLUMN: &str = "name";

#[derive(Debug, Clone, Default)]
pub struct PatientCsvSerializer;

impl PatientCsvSerializer {
    pub fn new() -> Self {
        Self
    }

    fn write_patients(patients: &[Patient], path: &Path) -> Result<()> {
        let width = patients
            .iter()
            .map(|patient| patient.observations().len())
            .max()
            .unwrap_or(0);

        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        // 每列結尾多一個逗號
        let mut header = vec![NAME_COLUMN.to_string()];
        header.extend((0..width).map(|i| i.to_string()));
        header.push(String::new());
        writer.write_record(&header)?;

        for patient in patients {
            let mut row = vec![patient.name().to_string()];
            row.extend(patient.observations().iter().map(ToString::to_string));
            row.push(String::new());
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn read_records(path: &Path) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut data = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            let mut record = Record::new();
            let mut observations = Vec::new();

            for (index, cell) in row.iter().enumerate() {
                let key = headers.get(index).ok_or_else(|| InflammationError::ParseError {
                    field: format!("row {}", line + 1),
                    value: cell.to_string(),
                    reason: "more cells than header columns".to_string(),
                })?;

                if cell.is_empty() {
                    continue;
                }

                if key == NAME_COLUMN {
                    record.insert(NAME_COLUMN.to_string(), Value::String(cell.to_string()));
                    continue;
                }

                let day: u32 = key.parse().map_err(|_| InflammationError::ParseError {
                    field: "day column header".to_string(),
                    value: key.to_string(),
                    reason: "expected a non-negative integer".to_string(),
                })?;
                let value: f64 = cell.parse().map_err(|_| InflammationError::ParseError {
                    field: format!("row {}, day {}", line + 1, day),
                    value: cell.to_string(),
                    reason: "expected a number".to_string(),
                })?;

                let mut observation = Record::new();
                observation.insert("day".to_string(), json!(day));
                observation.insert("value".to_string(), encode_reading(value));
                observations.push(Value::Object(observation));
            }

            record.insert("observations".to_string(), Value::Array(observations));
            data.push(record);
        }

        Ok(data)
    }
}

impl PatientCodec for PatientCsvSerializer {
    fn save(&self, patients: &[Patient], path: &Path) -> Result<()> {
        if let Err(e) = Self::write_patients(patients, path) {
            tracing::error!("❌ Failed to write CSV to {}: {}", path.display(), e);
            return Err(e);
        }

        tracing::debug!("Saved {} patients to {}", patients.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Vec<Patient>> {
        let data = Self::read_records(path)?;
        tracing::debug!("Read {} patient rows from {}", data.len(), path.display());
        PatientSerializer::deserialize(data)
    }
}
