use anyhow::{anyhow, Context, Result};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application configuration module
/// This module handles the export run configuration including loading from an
/// optional JSON file, applying defaults and validating settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Folder to search for DokuWiki pages
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,

    /// Table of contents tag name
    #[serde(default = "default_toc_name")]
    pub toc_name: String,

    /// Page filename excluded from the export; empty disables skipping
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Output JSON file path
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// Emit the table-of-contents sidebar node
    #[serde(default)]
    pub create_toc: bool,

    /// Word-capitalize page titles derived from filenames
    #[serde(default)]
    pub capitalize_titles: bool,

    /// Emit the stats/report node
    #[serde(default)]
    pub save_stats: bool,

    /// Echo the action log to the console while exporting
    #[serde(default)]
    pub verbose: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_search_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_toc_name() -> String {
    "TOC".to_string()
}

fn default_ignore_file() -> String {
    "start.txt".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("tiddler_import.json")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_dir: default_search_dir(),
            toc_name: default_toc_name(),
            ignore_file: default_ignore_file(),
            output_file: default_output_file(),
            create_toc: false,
            capitalize_titles: false,
            save_stats: false,
            verbose: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open config file: {:?}", path.as_ref()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.toc_name.trim().is_empty() {
            return Err(anyhow!("Table of contents tag name must not be empty"));
        }
        if self.search_dir.as_os_str().is_empty() {
            return Err(anyhow!("Search directory must not be empty"));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(anyhow!("Output file path must not be empty"));
        }
        Ok(())
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: log crate level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
