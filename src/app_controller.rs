use anyhow::{Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::markup_translator::MarkupTranslator;
use crate::node_factory::TiddlerFactory;
use crate::run_context::RunContext;
use crate::text_utils;
use crate::title_registry::TitleRegistry;

// @module: Application controller for the export pipeline

/// Extension of candidate page files
const PAGE_EXTENSION: &str = "txt";

/// Final tallies of one export run
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportReport {
    /// Page files read and translated
    pub files_processed: usize,
    /// Records written, pages and synthetic nodes together
    pub nodes_created: usize,
    /// Duplicate titles renamed
    pub duplicates_renamed: usize,
    /// Category collisions resolved by renaming the earlier node
    pub category_collisions_resolved: usize,
}

/// Main application controller for the DokuWiki export
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Command line echoed into the stats node
    export_args: String,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            export_args: String::new(),
        })
    }

    /// Record the command line arguments reported by the stats node
    pub fn with_export_args(mut self, export_args: impl Into<String>) -> Self {
        self.export_args = export_args.into();
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the translator over one file and return the result, bypassing the
    /// export pipeline entirely.
    pub fn syntax_test<P: AsRef<Path>>(&self, file: P) -> Result<String> {
        let subject = FileManager::read_to_string(file)?;
        Ok(MarkupTranslator::translate(&subject))
    }

    /// Run the full export: walk the page tree, translate every page,
    /// synthesize the hierarchy nodes and write the JSON import file.
    ///
    /// Directories are visited depth-first in lexicographic name order, and
    /// the page files of a directory are processed before its subdirectories.
    /// That order decides collision-resolution precedence, so it is part of
    /// the output contract. Output is written once, after the whole walk
    /// succeeds; a fatal naming collision therefore leaves no partial file.
    pub fn run(&self) -> Result<ExportReport> {
        let search_root = self
            .config
            .search_dir
            .canonicalize()
            .with_context(|| format!("Search directory not found: {:?}", self.config.search_dir))?;

        let mut registry = TitleRegistry::new();
        let mut ctx = RunContext::new(self.config.verbose);
        let factory =
            TiddlerFactory::new(text_utils::export_timestamp(), self.config.toc_name.clone());

        if self.config.create_toc {
            let toc = factory.toc(&mut registry, &mut ctx)?;
            registry.push(toc);
        }

        for entry in WalkDir::new(&search_root).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.file_type().is_dir() {
                continue;
            }

            // a category record for the directory, then its pages
            let category = factory.category(&mut registry, &mut ctx, entry.path(), &search_root)?;
            registry.push(category);

            self.process_directory(entry.path(), &search_root, &factory, &mut registry, &mut ctx)?;
        }

        if self.config.save_stats {
            let stats = factory.stats(&mut registry, &mut ctx, &self.export_args)?;
            registry.push(stats);
        }

        let report = ExportReport {
            files_processed: ctx.file_count,
            nodes_created: ctx.node_count,
            duplicates_renamed: ctx.dupe_count,
            category_collisions_resolved: ctx.cat_collision_count,
        };

        self.write_output(&registry)?;
        Ok(report)
    }

    /// Translate and register every candidate page file directly under `dir`
    fn process_directory(
        &self,
        dir: &Path,
        search_root: &Path,
        factory: &TiddlerFactory,
        registry: &mut TitleRegistry,
        ctx: &mut RunContext,
    ) -> Result<()> {
        let parent_tag = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        for file in FileManager::list_page_files(dir, PAGE_EXTENSION)? {
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            if !self.config.ignore_file.is_empty() && file_name == self.config.ignore_file {
                debug!("Skipping ignored page file: {:?}", file);
                continue;
            }

            let mut page_title = file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.config.capitalize_titles {
                page_title = text_utils::capitalize_words(&page_title);
            }

            let display_path = file.strip_prefix(search_root).unwrap_or(&file);
            ctx.log_action(format!("Processing File: {}", display_path.display()));

            let page_data = FileManager::read_to_string(&file)?;
            let translated = MarkupTranslator::translate(&page_data);

            let page = factory.page(
                registry,
                ctx,
                &parent_tag,
                &page_title,
                &translated,
                BTreeMap::new(),
            )?;
            registry.push(page);

            ctx.file_count += 1;
        }

        Ok(())
    }

    /// Encode the finished record list and write it out, pretty-printed
    fn write_output(&self, registry: &TitleRegistry) -> Result<()> {
        let json = serde_json::to_string_pretty(registry.records())
            .context("Failed to serialize records to JSON")?;
        FileManager::write_to_file(&self.config.output_file, &json)?;

        debug!(
            "Wrote {} records to {:?}",
            registry.len(),
            self.config.output_file
        );
        Ok(())
    }
}
