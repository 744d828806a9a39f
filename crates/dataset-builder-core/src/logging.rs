use log::{error, info, Level, LevelFilter};
use std::fmt;
use std::path::Path;

use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Environment variable overriding the configured log level
pub const LOG_ENV_VAR: &str = "DATASET_LOG";

/// Severity of a per-file status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    pub fn level(self) -> Level {
        match self {
            Severity::Info => Level::Info,
            Severity::Warning => Level::Warn,
        }
    }
}

/// Emit a status line tagged with the file or URL it concerns
pub fn report_status<T: fmt::Display>(severity: Severity, target: T, message: &str) {
    log::log!(severity.level(), "{}: {}", message, target);
}

/// Initialize the logger with console output and, when `log_dir` is given,
/// a size-rotated log file alongside it
pub fn init_logger(
    log_dir: Option<&Path>,
    level: LevelFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{l} {m}{n}")))
        .build();

    let mut builder =
        Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");

    let mut log_file_path = None;
    if let Some(log_dir) = log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_path = log_dir.join("dataset-builder.log");
        let archived_logs_pattern = format!("{}/dataset-builder.{{}}.log", log_dir.display());

        // Rotate at 10MB, keep 5 archived files
        let file_trigger = SizeTrigger::new(10 * 1024 * 1024);
        let file_roller = FixedWindowRoller::builder()
            .build(&archived_logs_pattern, 5)
            .map_err(|e| format!("Failed to create log roller: {}", e))?;
        let compound_policy = CompoundPolicy::new(Box::new(file_trigger), Box::new(file_roller));

        let rolling_file = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} [{l}] [{M}:{L}] - {m}{n}",
            )))
            .build(&file_path, Box::new(compound_policy))
            .map_err(|e| format!("Failed to create log appender: {}", e))?;

        builder = builder.appender(Appender::builder().build("file", Box::new(rolling_file)));
        root = root.appender("file");
        log_file_path = Some(file_path);
    }

    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(level);

    let config = builder
        .build(root.build(level))
        .map_err(|e| format!("Failed to build log config: {}", e))?;

    log4rs::init_config(config).map_err(|e| format!("Failed to initialize log4rs: {}", e))?;

    if let Some(file_path) = log_file_path {
        info!("Logging to file: {}", file_path.display());
    }
    Ok(())
}

/// Log file operation that failed
pub fn log_file_error(path: &Path, operation: &str, error: &dyn std::error::Error) {
    error!(
        "File operation failed - Operation: {}, Path: {}, Error: {}",
        operation,
        path.display(),
        error
    );
}

/// Log file system modification
pub fn log_fs_modification(operation: &str, path: &Path, details: Option<&str>) {
    let details_str = details.unwrap_or("");
    info!(
        "FS CHANGE - Operation: {}, Path: {}{}",
        operation,
        path.display(),
        if details_str.is_empty() {
            "".to_string()
        } else {
            format!(", Details: {}", details_str)
        }
    );
}
