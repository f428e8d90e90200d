// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, LogLevel};
use crate::app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod markup_translator;
mod node_factory;
mod run_context;
mod text_utils;
mod tiddler;
mod title_registry;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a DokuWiki page tree to TiddlyWiki import JSON (default command)
    Export(ExportArgs),

    /// Generate shell completions for doku2tiddly
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug, Clone)]
struct ExportArgs {
    /// Folder to search in; by default the current folder
    #[arg(short = 'd', long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Table of contents tag name; by default "TOC"
    #[arg(short = 't', long, value_name = "NAME")]
    toc_name: Option<String>,

    /// Echo the action log to the console while exporting
    #[arg(short, long)]
    verbose: bool,

    /// Page name to ignore; by default "start.txt"
    #[arg(short, long, value_name = "FILENAME")]
    ignore: Option<String>,

    /// Capitalize page titles
    #[arg(long)]
    capitalize_titles: bool,

    /// Output filename (json)
    #[arg(short, long, value_name = "PATH")]
    outfile: Option<PathBuf>,

    /// Create a Table of Contents node
    #[arg(short, long)]
    create_toc: bool,

    /// Run a syntax test on one file and print the result
    #[arg(short = 'x', long, value_name = "FILE")]
    syntax_test: Option<PathBuf>,

    /// Create a node storing the run stats and action log
    #[arg(short, long)]
    save_stats: bool,

    /// Configuration file path (json); command line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// doku2tiddly - DokuWiki to TiddlyWiki exporter
///
/// Walks a DokuWiki pages directory, rewrites every page to TiddlyWiki
/// markup and writes one importable JSON file, with category and table of
/// contents records mirroring the directory structure.
#[derive(Parser, Debug)]
#[command(name = "doku2tiddly")]
#[command(version = "0.1.0")]
#[command(about = "Export dokuwiki data to importable tiddlywiki json")]
#[command(long_about = "doku2tiddly walks a DokuWiki pages directory, rewrites every page to \
TiddlyWiki markup and writes one importable JSON file.

EXAMPLES:
    doku2tiddly -d ./pages                          # Export with defaults
    doku2tiddly -d ./pages -c -s                    # Also emit TOC and stats nodes
    doku2tiddly -d ./pages -t Wiki --capitalize-titles
    doku2tiddly -x page.txt                         # Syntax-test one file
    doku2tiddly completions bash > doku2tiddly.bash # Generate bash completions

OUTPUT:
    A pretty-printed JSON array of tiddler records, written to
    tiddler_import.json by default. Import it through the TiddlyWiki
    import mechanism.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    export: ExportArgs,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "doku2tiddly", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Export(args)) => run_export(args),
        // Default behavior - use top-level args for backwards compatibility
        None => run_export(cli.export),
    }
}

fn run_export(options: ExportArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load base configuration from file when given, then apply CLI overrides
    let mut config = match &options.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &options.dir {
        config.search_dir = dir.clone();
    }
    if let Some(toc_name) = &options.toc_name {
        config.toc_name = toc_name.clone();
    }
    if let Some(ignore) = &options.ignore {
        config.ignore_file = ignore.clone();
    }
    if let Some(outfile) = &options.outfile {
        config.output_file = outfile.clone();
    }
    if options.verbose {
        config.verbose = true;
    }
    if options.capitalize_titles {
        config.capitalize_titles = true;
    }
    if options.create_toc {
        config.create_toc = true;
    }
    if options.save_stats {
        config.save_stats = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, apply it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let export_args = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let controller = Controller::with_config(config)?.with_export_args(export_args);

    // Syntax-test mode bypasses the whole export pipeline
    if let Some(file) = &options.syntax_test {
        let translated = controller.syntax_test(file)?;
        println!("{}", translated);
        return Ok(());
    }

    let report = controller.run()?;

    info!("OK: Export Complete. JSON file ready.");
    info!("--: {} Files Processed", report.files_processed);
    info!("--: {} Nodes Created", report.nodes_created);
    info!("--: {} Duplicate Titles Renamed", report.duplicates_renamed);
    info!(
        "--: {} Resolved Category Naming Collisions",
        report.category_collisions_resolved
    );

    Ok(())
}
