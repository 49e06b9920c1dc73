//! Command-line interface definitions for the `miracle-config` binary.

use std::path::PathBuf;

use clap::Parser;



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "miracle-config",
    author,
    about = "Loads and validates a toolpath pipeline configuration file.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If unspecified, this defaults to `miracle.config` in the platform
    /// configuration directory, or in the current directory.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        help = "Path to the configuration file to use. \
                Defaults to miracle.config in the platform configuration directory."
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        long = "data-directory",
        help = "Directory that default:// resources are resolved against. \
                Defaults to the platform data directory."
    )]
    pub data_directory: Option<PathBuf>,

    #[arg(
        short = 'm',
        long = "model-file-path",
        help = "Model file to read after the configuration has been validated."
    )]
    pub model_file_path: Option<PathBuf>,

    #[arg(
        long = "dump-document",
        help = "Print the parsed configuration document as JSON."
    )]
    pub dump_document: bool,

    #[arg(
        long = "dump-sections",
        help = "Print the validated configuration sections as JSON."
    )]
    pub dump_sections: bool,

    #[arg(
        long = "log-level",
        default_value = "info",
        help = "Console log filter, e.g. \"debug\" or \"miracle_config=trace\"."
    )]
    pub log_level: String,

    #[arg(
        long = "log-file-directory",
        help = "If specified, logs are additionally written to daily log files in this directory."
    )]
    pub log_file_directory: Option<PathBuf>,
}
