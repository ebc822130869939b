//! Patients, doctors and the inflammation readings taken from them.

use crate::domain::ports::Named;
use crate::utils::error::{InflammationError, Result};
use std::fmt;

/// A single inflammation reading for a patient on a given day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    day: u32,
    value: f64,
}

impl Observation {
    pub fn new(value: f64, day: u32) -> Self {
        Self { day, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Named for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A patient in an inflammation study.
///
/// Observations keep insertion order, which is not necessarily sorted by day.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    name: String,
    observations: Vec<Observation>,
}

impl Patient {
    pub fn new(name: impl Into<String>, observations: Option<Vec<Observation>>) -> Self {
        Self {
            name: name.into(),
            observations: observations.unwrap_or_default(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Appends a reading. Without an explicit day, the reading lands on the
    /// day after the last observation (day 0 for a fresh patient).
    pub fn add_observation(&mut self, value: f64, day: Option<u32>) -> Result<Observation> {
        let day = match (day, self.observations.last()) {
            (Some(day), _) => day,
            (None, None) => 0,
            (None, Some(last)) => {
                last.day()
                    .checked_add(1)
                    .ok_or_else(|| InflammationError::DayOverflow {
                        patient: self.name.clone(),
                    })?
            }
        };

        let observation = Observation::new(value, day);
        self.observations.push(observation);
        Ok(observation)
    }

    /// Returns the observation at position `day` in the list.
    ///
    /// This indexes by position, not by the stored day number. The two only agree
    /// when the days run contiguously from 0; see [`Patient::find_observation`]
    /// for a lookup on the stored day.
    pub fn get_observation_by_day(&self, day: i64) -> Result<&Observation> {
        if self.observations.is_empty() {
            return Err(InflammationError::EmptyObservations {
                patient: self.name.clone(),
            });
        }

        usize::try_from(day)
            .ok()
            .and_then(|index| self.observations.get(index))
            .ok_or(InflammationError::DayOutOfBounds {
                day,
                len: self.observations.len(),
            })
    }

    /// First observation whose stored day equals `day`.
    pub fn find_observation(&self, day: u32) -> Option<&Observation> {
        self.observations.iter().find(|obs| obs.day() == day)
    }
}

impl Named for Patient {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A doctor in an inflammation study, responsible for a set of uniquely named patients.
///
/// Doctors compare by name only, like [`Person`].
#[derive(Debug, Clone)]
pub struct Doctor {
    name: String,
    patients: Vec<Patient>,
}

impl Doctor {
    pub fn new(name: impl Into<String>, patients: Option<Vec<Patient>>) -> Self {
        Self {
            name: name.into(),
            patients: patients.unwrap_or_default(),
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Registers a patient unless one with the same name is already on the list.
    /// Returns whichever patient is registered under that name afterwards.
    pub fn add_patient(&mut self, patient: Patient) -> &Patient {
        match self
            .patients
            .iter()
            .position(|existing| existing.name() == patient.name())
        {
            Some(index) => {
                tracing::debug!(
                    "Doctor {} already has a patient named {}, skipping",
                    self.name,
                    patient.name()
                );
                &self.patients[index]
            }
            None => {
                self.patients.push(patient);
                &self.patients[self.patients.len() - 1]
            }
        }
    }

    pub fn get_patient_by_name(&self, name: &str) -> Result<&Patient> {
        self.patients
            .iter()
            .find(|patient| patient.name() == name)
            .ok_or_else(|| InflammationError::PatientNotFound {
                name: name.to_string(),
            })
    }
}

impl PartialEq for Doctor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Doctor {}

impl Named for Doctor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_patient() {
        let p = Patient::new("Alice", None);
        assert_eq!(p.name(), "Alice");
        assert!(p.observations().is_empty());
    }

    #[test]
    fn test_patient_equality() {
        let mut p = Patient::new("Alice", None);
        p.add_observation(1.0, Some(0)).unwrap();

        let mut p2 = Patient::new("Alice", None);
        p2.add_observation(1.0, Some(0)).unwrap();

        let mut p3 = Patient::new("Alice", None);
        p3.add_observation(2.0, Some(0)).unwrap();

        let mut p4 = Patient::new("John", None);
        p4.add_observation(2.0, Some(0)).unwrap();

        let mut p5 = Patient::new("John", None);
        p5.add_observation(2.0, Some(0)).unwrap();
        p5.add_observation(4.0, Some(1)).unwrap();

        assert_eq!(p, p2);
        assert_ne!(p2, p3);
        assert_ne!(p3, p4);
        assert_ne!(p4, p5);
    }

    #[test]
    fn test_patient_equality_is_order_sensitive() {
        let a = Patient::new(
            "Alice",
            Some(vec![Observation::new(1.0, 0), Observation::new(2.0, 1)]),
        );
        let b = Patient::new(
            "Alice",
            Some(vec![Observation::new(2.0, 1), Observation::new(1.0, 0)]),
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_observation() {
        let observation = Observation::new(5.0, 0);
        let same = Observation::new(5.0, 0);
        let other = Observation::new(6.0, 1);

        assert_eq!(observation.value(), 5.0);
        assert_eq!(observation.day(), 0);
        assert_eq!(observation, same);
        assert_ne!(observation, other);
        assert_eq!(observation.to_string(), "5");
        assert_eq!(Observation::new(2.5, 3).to_string(), "2.5");
    }

    #[test]
    fn test_person() {
        let p = Person::new("Alice");
        let p2 = Person::new("Alice");
        let p3 = Person::new("John");

        assert_eq!(p.name(), "Alice");
        assert_eq!(p, p2);
        assert_eq!(p.to_string(), p2.to_string());
        assert_ne!(p, p3);
    }

    #[test]
    fn test_add_observation_assigns_sequential_days() {
        let mut p = Patient::new("Alice", None);

        let first = p.add_observation(5.0, None).unwrap();
        let second = p.add_observation(7.0, None).unwrap();

        assert_eq!(first, Observation::new(5.0, 0));
        assert_eq!(second, Observation::new(7.0, 1));
    }

    #[test]
    fn test_add_observation_continues_after_explicit_day() {
        let mut p = Patient::new("Alice", None);
        p.add_observation(1.0, Some(10)).unwrap();
        let next = p.add_observation(2.0, None).unwrap();
        assert_eq!(next.day(), 11);
    }

    #[test]
    fn test_add_observation_after_last_representable_day() {
        let mut p = Patient::new("Alice", None);
        p.add_observation(1.0, Some(u32::MAX)).unwrap();

        assert!(matches!(
            p.add_observation(2.0, None),
            Err(InflammationError::DayOverflow { .. })
        ));
        assert_eq!(p.observations().len(), 1);

        // 明確指定 day 仍可加入
        assert_eq!(p.add_observation(2.0, Some(0)).unwrap().day(), 0);
    }

    #[test]
    fn test_get_observation_by_day() {
        let mut p = Patient::new("Alice", None);

        assert!(matches!(
            p.get_observation_by_day(0),
            Err(InflammationError::EmptyObservations { .. })
        ));

        p.add_observation(5.0, Some(0)).unwrap();

        assert!(matches!(
            p.get_observation_by_day(-1),
            Err(InflammationError::DayOutOfBounds { day: -1, len: 1 })
        ));
        assert!(matches!(
            p.get_observation_by_day(1),
            Err(InflammationError::DayOutOfBounds { day: 1, len: 1 })
        ));
        assert_eq!(p.get_observation_by_day(0).unwrap(), &Observation::new(5.0, 0));
    }

    #[test]
    fn test_get_observation_by_day_is_positional() {
        let p = Patient::new(
            "Alice",
            Some(vec![Observation::new(3.0, 4), Observation::new(8.0, 9)]),
        );

        assert_eq!(p.get_observation_by_day(1).unwrap().day(), 9);
        assert_eq!(p.find_observation(4), Some(&Observation::new(3.0, 4)));
        assert_eq!(p.find_observation(1), None);
    }

    #[test]
    fn test_doctor_add_patient() {
        let mut d = Doctor::new("John", None);
        assert_eq!(d.name(), "John");

        d.add_patient(Patient::new("Alice", None));
        d.add_patient(Patient::new("Sarah", None));
        d.add_patient(Patient::new("Sarah", None));

        assert_eq!(d.patients().len(), 2);
        assert_eq!(d.patients()[0], Patient::new("Alice", None));
    }

    #[test]
    fn test_doctor_add_duplicate_keeps_existing() {
        let mut d = Doctor::new("John", None);
        d.add_patient(Patient::new("Alice", Some(vec![Observation::new(1.0, 0)])));

        let kept = d.add_patient(Patient::new("Alice", None));

        assert_eq!(kept.observations().len(), 1);
        assert_eq!(d.patients().len(), 1);
    }

    #[test]
    fn test_doctor_equality_is_by_name() {
        let without_patients = Doctor::new("John", None);
        let with_patients = Doctor::new("John", Some(vec![Patient::new("Alice", None)]));

        assert_eq!(without_patients, with_patients);
        assert_ne!(without_patients, Doctor::new("Jane", None));
    }

    #[test]
    fn test_doctor_get_patient_by_name() {
        let mut d = Doctor::new("John", None);
        let p = Patient::new("Alice", None);
        d.add_patient(p.clone());

        assert_eq!(d.get_patient_by_name("Alice").unwrap(), &p);

        match d.get_patient_by_name("Sarah") {
            Err(InflammationError::PatientNotFound { name }) => assert_eq!(name, "Sarah"),
            other => panic!("expected PatientNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_named_entities_display_their_name() {
        let entities: Vec<Box<dyn Named>> = vec![
            Box::new(Person::new("Ann")),
            Box::new(Patient::new("Bob", None)),
            Box::new(Doctor::new("Cy", None)),
        ];
        let names: Vec<String> = entities.iter().map(|e| e.to_string()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
        assert_eq!(entities[1].name(), "Bob");
    }
}
