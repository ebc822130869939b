use thiserror::Error;

#[derive(Error, Debug)]
pub enum InflammationError {
    #[error("Data should not be empty")]
    EmptyInput,

    #[error("Data should be 2D: {message}")]
    ShapeError { message: String },

    #[error("Data values should not be negative (row {row}, column {column}: {value})")]
    NegativeValue { row: usize, column: usize, value: f64 },

    #[error("Data should be numeric: {message}")]
    TypeError { message: String },

    #[error("Observations for patient '{patient}' are empty")]
    EmptyObservations { patient: String },

    #[error("Day {day} is out of bounds for an observation list of length {len}")]
    DayOutOfBounds { day: i64, len: usize },

    #[error("Patient '{patient}' has no day after the last observation left to assign")]
    DayOverflow { patient: String },

    #[error("Patient with name: {name} not found")]
    PatientNotFound { name: String },

    #[error("Cannot construct {entity}: {message}")]
    Construction { entity: &'static str, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    ParseError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Lookup,
    Data,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl InflammationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyInput
            | Self::ShapeError { .. }
            | Self::NegativeValue { .. }
            | Self::TypeError { .. }
            | Self::DayOverflow { .. } => ErrorCategory::Validation,
            Self::EmptyObservations { .. }
            | Self::DayOutOfBounds { .. }
            | Self::PatientNotFound { .. } => ErrorCategory::Lookup,
            Self::Construction { .. }
            | Self::ParseError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::Io,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::EmptyInput => "Provide a table with at least one patient row",
            Self::ShapeError { .. } => "Make sure every row has the same number of day columns",
            Self::NegativeValue { .. } => "Inflammation readings must be zero or positive",
            Self::TypeError { .. } => "Remove non-numeric cells from the table",
            Self::DayOverflow { .. } => "Pass an explicit day for the observation",
            Self::EmptyObservations { .. } => "Record at least one observation first",
            Self::DayOutOfBounds { .. } => "Use a day within the patient's observation list",
            Self::PatientNotFound { .. } => "Check the patient name for typos",
            Self::Construction { .. } | Self::ParseError { .. } => {
                "Check that the input file was written by this tool"
            }
            Self::CsvError(_) => "Check the CSV file for malformed rows",
            Self::SerializationError(_) => "Check the JSON file for syntax errors",
            Self::IoError(_) => "Check that the path exists and is writable",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation => format!("Invalid inflammation data: {}", self),
            ErrorCategory::Lookup => format!("Record not found: {}", self),
            ErrorCategory::Data => format!("Could not read patient records: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Configuration => format!("Bad configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, InflammationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_name() {
        let err = InflammationError::PatientNotFound {
            name: "Sarah".to_string(),
        };
        assert_eq!(err.to_string(), "Patient with name: Sarah not found");
        assert_eq!(err.category(), ErrorCategory::Lookup);
    }

    #[test]
    fn test_severity_by_category() {
        let lookup = InflammationError::DayOutOfBounds { day: 4, len: 2 };
        let validation = InflammationError::DayOverflow {
            patient: "Alice".to_string(),
        };
        let config = InflammationError::ConfigError {
            message: "bad".to_string(),
        };

        assert_eq!(lookup.severity(), ErrorSeverity::Medium);
        assert_eq!(validation.severity(), ErrorSeverity::High);
        assert_eq!(config.severity(), ErrorSeverity::Critical);
        assert!(lookup.severity() < validation.severity());
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = InflammationError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("File access failed"));
    }
}
