use crate::domain::model::{Observation, Patient};
use crate::domain::ports::{Named, Record, Serializer};
use crate::utils::error::{InflammationError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";
const NAN: &str = "NaN";

/// JSON numbers cannot hold non-finite floats, so those readings are stored as
/// the strings `"Infinity"`, `"-Infinity"` and `"NaN"`.
pub(crate) fn encode_reading(value: f64) -> Value {
    if value.is_nan() {
        Value::String(NAN.to_string())
    } else if value == f64::INFINITY {
        Value::String(INFINITY.to_string())
    } else if value == f64::NEG_INFINITY {
        Value::String(NEG_INFINITY.to_string())
    } else {
        json!(value)
    }
}

fn decode_reading<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reading {
        Number(f64),
        Label(String),
    }

    match Reading::deserialize(deserializer)? {
        Reading::Number(value) => Ok(value),
        Reading::Label(label) => match label.as_str() {
            INFINITY => Ok(f64::INFINITY),
            NEG_INFINITY => Ok(f64::NEG_INFINITY),
            NAN => Ok(f64::NAN),
            other => Err(D::Error::custom(format!(
                "invalid reading '{}', expected a number",
                other
            ))),
        },
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ObservationFields {
    day: u32,
    #[serde(deserialize_with = "decode_reading")]
    value: f64,
}

pub struct ObservationSerializer;

impl Serializer for ObservationSerializer {
    type Model = Observation;

    fn serialize(instances: &[Observation]) -> Vec<Record> {
        instances
            .iter()
            .map(|observation| {
                let mut record = Record::new();
                record.insert("day".to_string(), json!(observation.day()));
                record.insert("value".to_string(), encode_reading(observation.value()));
                record
            })
            .collect()
    }

    fn deserialize(data: Vec<Record>) -> Result<Vec<Observation>> {
        data.into_iter()
            .map(|record| {
                serde_json::from_value::<ObservationFields>(Value::Object(record))
                    .map(|fields| Observation::new(fields.value, fields.day))
                    .map_err(|e| InflammationError::Construction {
                        entity: "Observation",
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

/// Everything a patient record carries besides its observations.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PatientFields {
    name: String,
}

pub struct PatientSerializer;

impl Serializer for PatientSerializer {
    type Model = Patient;

    fn serialize(instances: &[Patient]) -> Vec<Record> {
        instances
            .iter()
            .map(|patient| {
                let observations = ObservationSerializer::serialize(patient.observations())
                    .into_iter()
                    .map(Value::Object)
                    .collect();

                let mut record = Record::new();
                record.insert("name".to_string(), Value::String(patient.name().to_string()));
                record.insert("observations".to_string(), Value::Array(observations));
                record
            })
            .collect()
    }

    fn deserialize(data: Vec<Record>) -> Result<Vec<Patient>> {
        let mut instances = Vec::with_capacity(data.len());

        for mut record in data {
            let observations = match record.remove("observations") {
                Some(Value::Array(items)) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => Ok(map),
                        other => Err(InflammationError::Construction {
                            entity: "Observation",
                            message: format!("expected an object, found {}", other),
                        }),
                    })
                    .collect::<Result<Vec<Record>>>()?,
                Some(other) => {
                    return Err(InflammationError::Construction {
                        entity: "Patient",
                        message: format!("observations should be a list, found {}", other),
                    })
                }
                None => {
                    return Err(InflammationError::Construction {
                        entity: "Patient",
                        message: "missing field `observations`".to_string(),
                    })
                }
            };
            let observations = ObservationSerializer::deserialize(observations)?;

            let fields: PatientFields = serde_json::from_value(Value::Object(record)).map_err(|e| {
                InflammationError::Construction {
                    entity: "Patient",
                    message: e.to_string(),
                }
            })?;

            instances.push(Patient::new(fields.name, Some(observations)));
        }

        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_serialize_observations() {
        let records = ObservationSerializer::serialize(&[Observation::new(1.5, 3)]);
        assert_eq!(Value::Object(records[0].clone()), json!({"day": 3, "value": 1.5}));
    }

    #[test]
    fn test_non_finite_readings_are_labelled() {
        let records = ObservationSerializer::serialize(&[
            Observation::new(f64::INFINITY, 0),
            Observation::new(f64::NEG_INFINITY, 1),
            Observation::new(f64::NAN, 2),
        ]);
        let values: Vec<Option<&str>> = records.iter().map(|r| r["value"].as_str()).collect();
        assert_eq!(values, vec![Some("Infinity"), Some("-Infinity"), Some("NaN")]);

        let restored = ObservationSerializer::deserialize(records).unwrap();
        assert_eq!(restored[0], Observation::new(f64::INFINITY, 0));
        assert_eq!(restored[1], Observation::new(f64::NEG_INFINITY, 1));
        assert!(restored[2].value().is_nan());
    }

    #[test]
    fn test_serialize_patient() {
        let patient = Patient::new("Alice", Some(vec![Observation::new(2.0, 0)]));
        let records = PatientSerializer::serialize(&[patient]);
        assert_eq!(
            Value::Object(records[0].clone()),
            json!({"name": "Alice", "observations": [{"day": 0, "value": 2.0}]})
        );
    }

    #[test]
    fn test_deserialize_patient() {
        let data = vec![record(json!({
            "name": "Bob",
            "observations": [{"day": 0, "value": 0}, {"day": 1, "value": 2}]
        }))];

        let patients = PatientSerializer::deserialize(data).unwrap();

        assert_eq!(
            patients,
            vec![Patient::new(
                "Bob",
                Some(vec![Observation::new(0.0, 0), Observation::new(2.0, 1)])
            )]
        );
    }

    #[test]
    fn test_deserialize_observation_missing_field() {
        let err = ObservationSerializer::deserialize(vec![record(json!({"day": 0}))]).unwrap_err();
        assert!(matches!(
            err,
            InflammationError::Construction { entity: "Observation", .. }
        ));
    }

    #[test]
    fn test_deserialize_observation_mistyped_field() {
        let data = vec![record(json!({"day": -1, "value": 2.0}))];
        assert!(ObservationSerializer::deserialize(data).is_err());

        let data = vec![record(json!({"day": 0, "value": "high"}))];
        assert!(ObservationSerializer::deserialize(data).is_err());

        let data = vec![record(json!({"day": 0, "value": null}))];
        assert!(ObservationSerializer::deserialize(data).is_err());
    }

    #[test]
    fn test_deserialize_patient_requires_observations_and_name() {
        let missing_observations = vec![record(json!({"name": "Alice"}))];
        assert!(matches!(
            PatientSerializer::deserialize(missing_observations),
            Err(InflammationError::Construction { entity: "Patient", .. })
        ));

        let missing_name = vec![record(json!({"observations": []}))];
        assert!(matches!(
            PatientSerializer::deserialize(missing_name),
            Err(InflammationError::Construction { entity: "Patient", .. })
        ));

        let unknown_field = vec![record(json!({"name": "Alice", "observations": [], "age": 4}))];
        assert!(PatientSerializer::deserialize(unknown_field).is_err());
    }
}
