/*!
 * # doku2tiddly - DokuWiki to TiddlyWiki exporter
 *
 * A Rust library for converting a DokuWiki page tree into a single
 * TiddlyWiki-compatible JSON import file.
 *
 * ## Features
 *
 * - Ordered regex substitution table rewriting DokuWiki markup to
 *   TiddlyWiki markup (headings, lists, tables, code blocks, images)
 * - Case-insensitive title uniqueness with automatic collision renaming,
 *   category nodes taking naming priority over plain pages
 * - Synthetic hierarchy records mirroring the source directory structure:
 *   category nodes, an optional sidebar table of contents, an optional
 *   stats/report node
 * - Deterministic traversal order for reproducible output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `markup_translator`: The ordered substitution table and `translate`
 * - `title_registry`: Record arena and title collision resolution
 * - `node_factory`: Assembly of page, category, TOC and stats records
 * - `run_context`: Per-run counters and the action log
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `text_utils`: Title capitalization and timestamp helpers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod markup_translator;
pub mod node_factory;
pub mod run_context;
pub mod text_utils;
pub mod tiddler;
pub mod title_registry;

// Re-export main types for easier usage
pub use app_config::{Config, LogLevel};
pub use app_controller::{Controller, ExportReport};
pub use errors::AppError;
pub use markup_translator::MarkupTranslator;
pub use node_factory::TiddlerFactory;
pub use run_context::RunContext;
pub use tiddler::Tiddler;
pub use title_registry::TitleRegistry;
