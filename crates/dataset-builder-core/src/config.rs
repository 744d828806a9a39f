use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default image search endpoint
pub const SEARCH_URL: &str = "https://api.bing.microsoft.com/v7.0/images/search";

/// Results requested per search page
pub const NUMBER_OF_IMAGES_PER_PAGE: u32 = 50;

/// Upper bound on images fetched for one query
pub const MAX_NUMBER_OF_IMAGES: u32 = 250;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Settings for the image search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint URL
    pub endpoint: String,

    /// Number of results requested per page
    pub page_size: u32,

    /// Maximum number of results to walk through
    pub max_images: u32,

    /// License filter passed to the API
    pub license: String,

    /// Image type filter passed to the API
    pub image_type: String,

    /// Timeout for each HTTP request, in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: SEARCH_URL.to_string(),
            page_size: NUMBER_OF_IMAGES_PER_PAGE,
            max_images: MAX_NUMBER_OF_IMAGES,
            license: "public".to_string(),
            image_type: "photo".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Configuration for building and deduplicating a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Known-good collection; also where downloads and novel images land
    pub reference_dir: PathBuf,

    /// Candidate images to classify against the reference collection
    pub incoming_dir: PathBuf,

    /// Image search settings
    pub search: SearchConfig,

    /// Directory for rotated log files (console only when unset)
    pub log_dir: Option<PathBuf>,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_dir: PathBuf::from("dataset"),
            incoming_dir: PathBuf::from("incoming"),
            search: SearchConfig::default(),
            log_dir: None,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.reference_dir == self.incoming_dir {
            return Err(Error::Configuration(
                "Reference and incoming directories must differ".to_string(),
            ));
        }

        if self.search.page_size == 0 {
            return Err(Error::Configuration(
                "Search page size must be greater than zero".to_string(),
            ));
        }

        if self.search.timeout_secs == 0 {
            return Err(Error::Configuration(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
