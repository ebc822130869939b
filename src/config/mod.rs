pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::SUPPORTED_EXTENSIONS;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "inflammation")]
#[command(about = "Patient inflammation records and statistics")]
pub struct CliConfig {
    /// Path to TOML settings file
    #[arg(short, long, default_value = "inflammation.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print daily mean, max and min of a numeric table
    Stats {
        input: String,

        /// Print each patient's readings scaled into [0, 1] instead
        #[arg(long)]
        normalise: bool,
    },
    /// Convert a patient file between JSON and CSV
    Convert { input: String, output: String },
    /// Print patient records
    Show {
        input: String,

        #[arg(long)]
        name: Option<String>,

        /// Print serializer output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;

        match &self.command {
            Command::Stats { input, .. } => validate_path("input", input),
            Command::Convert { input, output } => {
                validate_path("input", input)?;
                validate_file_extension("input", input, &SUPPORTED_EXTENSIONS)?;
                validate_path("output", output)?;
                validate_file_extension("output", output, &SUPPORTED_EXTENSIONS)
            }
            Command::Show { input, name, .. } => {
                if let Some(name) = name {
                    validate_non_empty_string("name", name)?;
                }
                validate_path("input", input)?;
                validate_file_extension("input", input, &SUPPORTED_EXTENSIONS)
            }
        }
    }
}
