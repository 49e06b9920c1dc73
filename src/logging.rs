use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt::layer,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 10;


/// Where (and how verbosely) to write log files, if at all.
pub struct LogFileOutput<'a> {
    pub level_filter: EnvFilter,
    pub directory: &'a Path,
    pub file_name_prefix: &'a str,
}


/// Initializes the global tracing subscriber: a console layer filtered by
/// `console_level_filter` and, optionally, a daily-rotated log file.
///
/// The returned guard (if any) must be kept alive until the program exits,
/// otherwise buffered log lines may be lost.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_output: Option<LogFileOutput>,
) -> Result<Option<WorkerGuard>> {
    let console_layer = layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(console_level_filter);

    let Some(log_file_output) = log_file_output else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .into_diagnostic()
            .wrap_err("Failed to initialize the global tracing subscriber.")?;

        return Ok(None);
    };


    std::fs::create_dir_all(log_file_output.directory)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!(
                "Failed to create log file directory {}.",
                log_file_output.directory.display()
            )
        })?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_output.file_name_prefix)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_file_output.directory)
        .into_diagnostic()
        .wrap_err("Failed to initialize the rolling file appender.")?;

    let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .with_filter(log_file_output.level_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to initialize the global tracing subscriber.")?;

    Ok(Some(guard))
}
