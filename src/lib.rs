pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use crate::config::toml_config::Settings;
pub use crate::core::{
    codec_for_path,
    csv_codec::PatientCsvSerializer,
    json_codec::PatientJsonSerializer,
    serializer::{ObservationSerializer, PatientSerializer},
    statistics::{daily_max, daily_mean, daily_min, patient_normalise, Table},
};
pub use domain::model::{Doctor, Observation, Patient, Person};
pub use domain::ports::{Named, PatientCodec, Record, Serializer};
pub use utils::error::{InflammationError, Result};
