pub mod csv_codec;
pub mod json_codec;
pub mod serializer;
pub mod statistics;

pub use crate::domain::model::{Doctor, Observation, Patient, Person};
pub use crate::domain::ports::{Named, PatientCodec, Record, Serializer};
pub use crate::utils::error::Result;

use crate::utils::validation::validate_file_extension;
use csv_codec::PatientCsvSerializer;
use json_codec::PatientJsonSerializer;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["json", "csv"];

/// Picks the codec matching the file extension (`.json` or `.csv`).
pub fn codec_for_path(path: &Path, pretty_json: bool) -> Result<Box<dyn PatientCodec>> {
    let display = path.to_string_lossy();
    validate_file_extension("path", &display, &SUPPORTED_EXTENSIONS)?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(Box::new(PatientCsvSerializer::new()))
    } else {
        Ok(Box::new(PatientJsonSerializer::new(pretty_json)))
    }
}
