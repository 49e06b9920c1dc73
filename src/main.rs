use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use miracle_config::{
    configuration::{
        Configuration,
        LoadableSectionWithContext,
        PipelineConfiguration,
    },
    logging::{initialize_tracing, LogFileOutput},
    pipeline::{DataEnvelope, ModelFileReaderOperation, Operation, Payload},
    platform::{FixedDirectories, PlatformDirectories, SystemDirectories},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::CLIArgs;

mod cli;


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    let console_level_filter = EnvFilter::try_new(&cli_args.log_level)
        .into_diagnostic()
        .wrap_err("Failed to parse --log-level.")?;

    let log_file_output = match cli_args.log_file_directory.as_ref() {
        Some(directory) => Some(LogFileOutput {
            level_filter: EnvFilter::try_new(&cli_args.log_level)
                .into_diagnostic()
                .wrap_err("Failed to parse --log-level.")?,
            directory,
            file_name_prefix: "miracle-config",
        }),
        None => None,
    };

    let logging_raii_guard = initialize_tracing(console_level_filter, log_file_output)
        .wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    let system_directories = SystemDirectories::from_environment();
    let platform: Box<dyn PlatformDirectories> = match cli_args.data_directory.as_ref() {
        Some(data_directory) => Box::new(FixedDirectories::new(
            system_directories.config_directory(),
            data_directory,
        )),
        None => Box::new(system_directories),
    };


    // Load configuration.
    let configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            info!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            info!("Loading configuration at default path.");
            Configuration::load_from_default_path(platform.as_ref())
        }
    }
    .wrap_err("Failed to load configuration file.")?;

    info!(
        "Configuration loaded: {}.",
        configuration.file_path.display()
    );

    if cli_args.dump_document {
        println!("{}", configuration.as_json()?);
    }


    let sections = PipelineConfiguration::load_from(&configuration, platform.as_ref())
        .wrap_err("Configuration file is invalid.")?;

    info!(
        "Machine {} ({} firmware {}), {} extruder(s), {} extrusion profile(s).",
        sections.gcoder.machine_name,
        sections.gcoder.program_name,
        sections.gcoder.firmware,
        sections.gcoder.extruders.len(),
        sections.gcoder.extrusion_profiles.len()
    );

    for extruder in sections.gcoder.extruders.iter() {
        for profile_name in [
            &extruder.first_layer_extrusion_profile,
            &extruder.insets_extrusion_profile,
            &extruder.infills_extrusion_profile,
        ] {
            if !sections.gcoder.extrusion_profiles.contains(profile_name) {
                warn!(
                    "Extruder {} refers to undefined extrusion profile \"{}\".",
                    extruder.code, profile_name
                );
            }
        }
    }

    if cli_args.dump_sections {
        let sections_json = serde_json::to_string_pretty(&serde_json::json!({
            "gcoder": sections.gcoder,
            "extruder": sections.extruder,
            "slicer": sections.slicer,
            "regioner": sections.regioner,
        }))
        .into_diagnostic()
        .wrap_err("Failed to serialize configuration sections.")?;

        println!("{}", sections_json);
    }


    if let Some(model_file_path) = cli_args.model_file_path.as_ref() {
        let mut model_reader = ModelFileReaderOperation::new(model_file_path);
        model_reader.init(&configuration);

        let mut received: Vec<DataEnvelope> = Vec::new();
        model_reader
            .start(&mut received)
            .wrap_err("Failed to read model file.")?;

        for envelope in &received {
            let Payload::Model(model_data) = &envelope.payload;
            info!(
                "Model {} loaded ({} bytes).",
                model_data.source_path.display(),
                model_data.contents.len()
            );
        }
    }


    drop(logging_raii_guard);
    Ok(())
}
