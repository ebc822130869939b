use anyhow::Context;
use clap::Parser;
use inflammation::utils::error::ErrorSeverity;
use inflammation::utils::{logger, validation::Validate};
use inflammation::{
    codec_for_path, daily_max, daily_mean, daily_min, patient_normalise, CliConfig, Command,
    InflammationError, Named, Patient, PatientJsonSerializer, Settings, Table,
};
use std::path::Path;

fn main() {
    let config = CliConfig::parse();

    // 設定檔有錯時先用預設值初始化日誌
    let settings = Settings::load_or_default(&config.config);
    let verbose = config.verbose
        || settings
            .as_ref()
            .map(|s| s.logging.verbose)
            .unwrap_or(false);

    if settings.as_ref().map(Settings::json_logging).unwrap_or(false) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting inflammation CLI");
    tracing::debug!("CLI config: {:?}", config);

    let result = settings
        .map_err(anyhow::Error::from)
        .and_then(|settings| {
            settings.validate()?;
            config.validate()?;
            run(&config.command, &settings)
        });

    if let Err(e) = result {
        match e.downcast_ref::<InflammationError>() {
            Some(err) => {
                tracing::error!(
                    "❌ Command failed: {:#} (Category: {:?}, Severity: {:?})",
                    e,
                    err.category(),
                    err.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", err.recovery_suggestion());
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());

                let exit_code = match err.severity() {
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                std::process::exit(exit_code);
            }
            None => {
                tracing::error!("❌ Command failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(command: &Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Stats { input, normalise } => {
            let table =
                Table::from_csv_path(input, settings.delimiter_byte(), settings.table.has_headers)
                    .with_context(|| format!("loading table from {}", input))?;
            tracing::info!(
                "📊 Loaded {} patients over {} days",
                table.row_count(),
                table.column_count()
            );

            if *normalise {
                for row in patient_normalise(&table)?.rows() {
                    println!("{}", format_row(row));
                }
            } else {
                println!("mean: {}", format_row(&daily_mean(&table)));
                println!("max:  {}", format_row(&daily_max(&table)));
                println!("min:  {}", format_row(&daily_min(&table)));
            }
        }
        Command::Convert { input, output } => {
            let patients = load_patients(input, settings)?;
            codec_for_path(Path::new(output), settings.json.pretty)?
                .save(&patients, Path::new(output))
                .with_context(|| format!("saving patients to {}", output))?;

            tracing::info!("✅ Converted {} patients to {}", patients.len(), output);
            println!("✅ Converted {} patients", patients.len());
            println!("📁 Output saved to: {}", output);
        }
        Command::Show { input, name, json } => {
            let patients = load_patients(input, settings)?;
            let selected: Vec<Patient> = match name {
                Some(name) => {
                    let patient = patients
                        .iter()
                        .find(|patient| patient.name() == name.as_str())
                        .ok_or_else(|| InflammationError::PatientNotFound { name: name.clone() })?;
                    vec![patient.clone()]
                }
                None => patients,
            };

            if *json {
                println!("{}", PatientJsonSerializer::new(true).to_json_string(&selected)?);
            } else {
                for patient in &selected {
                    println!("{}", patient);
                    for obs in patient.observations() {
                        println!("{} {}", obs.day(), obs.value());
                    }
                }
            }
        }
    }

    Ok(())
}

fn load_patients(input: &str, settings: &Settings) -> anyhow::Result<Vec<Patient>> {
    let path = Path::new(input);
    let patients = codec_for_path(path, settings.json.pretty)?
        .load(path)
        .with_context(|| format!("loading patients from {}", input))?;
    tracing::debug!("Loaded {} patients from {}", patients.len(), input);
    Ok(patients)
}

fn format_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.2}", v))
        .collect::<Vec<_>>()
        .join(",")
}
