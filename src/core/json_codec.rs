use crate::core::serializer::PatientSerializer;
use crate::domain::model::Patient;
use crate::domain::ports::{PatientCodec, Record, Serializer};
use crate::utils::error::Result;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Stores patients as a JSON array of patient records.
#[derive(Debug, Clone, Default)]
pub struct PatientJsonSerializer {
    pretty: bool,
}

impl PatientJsonSerializer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn to_json_string(&self, patients: &[Patient]) -> Result<String> {
        let data = Self::to_value(patients);
        let text = if self.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        Ok(text)
    }

    pub fn from_json_str(text: &str) -> Result<Vec<Patient>> {
        let data: Vec<Record> = serde_json::from_str(text)?;
        PatientSerializer::deserialize(data)
    }

    fn to_value(patients: &[Patient]) -> Value {
        Value::Array(
            PatientSerializer::serialize(patients)
                .into_iter()
                .map(Value::Object)
                .collect(),
        )
    }
}

impl PatientCodec for PatientJsonSerializer {
    fn save(&self, patients: &[Patient], path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let data = Self::to_value(patients);

        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &data)?;
        } else {
            serde_json::to_writer(&mut writer, &data)?;
        }
        writer.flush()?;

        tracing::debug!("Saved {} patients to {}", patients.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Vec<Patient>> {
        let reader = BufReader::new(File::open(path)?);
        let data: Vec<Record> = serde_json::from_reader(reader)?;

        tracing::debug!("Read {} patient records from {}", data.len(), path.display());
        PatientSerializer::deserialize(data)
    }
}
