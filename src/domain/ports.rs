use crate::domain::model::Patient;
use crate::utils::error::Result;
use serde_json::{Map, Value};
use std::path::Path;

/// A plain dictionary-shaped record, the intermediate form between domain
/// entities and the JSON/CSV encodings.
pub type Record = Map<String, Value>;

/// Anything that has a name and prints as that name.
pub trait Named: std::fmt::Display {
    fn name(&self) -> &str;
}

/// Converts a domain type to and from plain records.
pub trait Serializer {
    type Model;

    fn serialize(instances: &[Self::Model]) -> Vec<Record>;
    fn deserialize(data: Vec<Record>) -> Result<Vec<Self::Model>>;
}

/// Persists patient lists to a file, overwriting whatever was there.
pub trait PatientCodec {
    fn save(&self, patients: &[Patient], path: &Path) -> Result<()>;
    fn load(&self, path: &Path) -> Result<Vec<Patient>>;
}
