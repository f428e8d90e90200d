use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// @module: TiddlyWiki page record data model

/// One importable TiddlyWiki page record.
///
/// TiddlyWiki keys records by title, so `title` must stay unique
/// (case-insensitively) across the whole export batch. All field values are
/// strings in the import format; synthetic nodes carry extra marker fields
/// (`toc-link`, `caption`, `list-after`) flattened into the JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tiddler {
    /// Batch creation timestamp, YYYYMMDDHHMMSS plus 3-digit milliseconds
    pub created: String,

    /// Parent category name used for hierarchical grouping
    pub tags: String,

    /// Unique record identifier
    pub title: String,

    /// Translated page body
    pub text: String,

    /// Optional marker fields, flattened into the record object
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Tiddler {
    /// Creates a record with no extra fields
    pub fn new(
        created: impl Into<String>,
        tags: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Tiddler {
            created: created.into(),
            tags: tags.into(),
            title: title.into(),
            text: text.into(),
            fields: BTreeMap::new(),
        }
    }
}
