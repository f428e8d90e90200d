use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::AppError;
use crate::run_context::RunContext;
use crate::tiddler::Tiddler;
use crate::title_registry::TitleRegistry;

// @module: Synthesis of page, category, TOC and stats records

/// Tag that places a record in the TiddlyWiki sidebar
const SIDEBAR_TAG: &str = "$:/tags/SideBar";

/// Sidebar ordering hint for the TOC node
const SIDEBAR_OPEN: &str = "$:/core/ui/SideBar/Open";

/// Tag of the stats node
const STATS_TAG: &str = "stats";

/// Builds the records of one export batch. Carries the batch timestamp and
/// the configured TOC tag name; title uniqueness is delegated to the
/// [`TitleRegistry`] and every created record bumps the node counter.
pub struct TiddlerFactory {
    created: String,
    toc_name: String,
}

impl TiddlerFactory {
    pub fn new(created: impl Into<String>, toc_name: impl Into<String>) -> Self {
        TiddlerFactory {
            created: created.into(),
            toc_name: toc_name.into(),
        }
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn toc_name(&self) -> &str {
        &self.toc_name
    }

    /// Assemble a page record from its components. `tag` is the parent
    /// category. The body is taken as-is, no validation.
    pub fn page(
        &self,
        registry: &mut TitleRegistry,
        ctx: &mut RunContext,
        tag: &str,
        title: &str,
        text: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<Tiddler, AppError> {
        let title = registry.resolve_title(ctx, title, tag, &self.toc_name)?;
        ctx.node_count += 1;

        let mut tiddler = Tiddler::new(self.created.clone(), tag, title, text);
        tiddler.fields = fields;
        Ok(tiddler)
    }

    /// Category record for a visited directory: titled after the directory,
    /// tagged with the parent directory name (the search root itself is
    /// tagged with the TOC name), body embedding a sorted table-of-contents
    /// widget. Marked non-clickable in the TOC tree.
    pub fn category(
        &self,
        registry: &mut TitleRegistry,
        ctx: &mut RunContext,
        dir: &Path,
        search_root: &Path,
    ) -> Result<Tiddler, AppError> {
        let dir_name = Self::base_name(dir);
        let parent_tag = if dir == search_root {
            self.toc_name.clone()
        } else {
            dir.parent()
                .map(Self::base_name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| self.toc_name.clone())
        };

        let text = format!(
            "<div class=\"tc-table-of-contents\">\n    <<toc \"{}\" \"sort[title]\">>\n</div>",
            dir_name
        );

        let mut fields = BTreeMap::new();
        fields.insert("toc-link".to_string(), "no".to_string());

        self.page(registry, ctx, &parent_tag, &dir_name, &text, fields)
    }

    /// Preloaded Table of Contents record for the sidebar.
    pub fn toc(
        &self,
        registry: &mut TitleRegistry,
        ctx: &mut RunContext,
    ) -> Result<Tiddler, AppError> {
        let text = format!(
            "<div class=\"tc-table-of-contents\">\n    <<toc-selective-expandable '{}' \"sort[title]\">>\n</div>",
            self.toc_name
        );

        let mut fields = BTreeMap::new();
        fields.insert("caption".to_string(), "Contents".to_string());
        fields.insert("list-after".to_string(), SIDEBAR_OPEN.to_string());

        self.page(registry, ctx, SIDEBAR_TAG, &self.toc_name, &text, fields)
    }

    /// Report record summarizing the run counters and the full action log.
    /// The node count shown includes the stats record itself.
    pub fn stats(
        &self,
        registry: &mut TitleRegistry,
        ctx: &mut RunContext,
        export_args: &str,
    ) -> Result<Tiddler, AppError> {
        let title = format!("Stats - Export: {}", self.created);
        let text = format!(
            "\"\"\" ''Date:'' {}\n\
             ''Files Processed:'' {}\n\
             ''Nodes Created:'' {}\n\
             ''Duplicate Titles Renamed:'' {}\n\
             ''Resolved Category Title Collisions:'' {}\n\
             ''Export Arguments:'' {}\"\"\"\n\n ''Action Log:''\n\n```\n{}\n```",
            self.created,
            ctx.file_count,
            ctx.node_count + 1,
            ctx.dupe_count,
            ctx.cat_collision_count,
            export_args,
            ctx.action_log.join("\n"),
        );

        self.page(registry, ctx, STATS_TAG, &title, &text, BTreeMap::new())
    }

    fn base_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
