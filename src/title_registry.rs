use crate::errors::AppError;
use crate::run_context::RunContext;
use crate::tiddler::Tiddler;

// @module: Title registry and collision resolution

/// Ordered collection of every record emitted so far in the current run.
///
/// TiddlyWiki uses the title as the unique record identifier; a duplicate
/// title on import silently overwrites the earlier record, so uniqueness is
/// enforced here incrementally, at registration time. Registration order is
/// semantically significant: the first record under a name keeps it, later
/// arrivals are renamed (except top-level categories, which take priority).
#[derive(Debug, Default)]
pub struct TitleRegistry {
    records: Vec<Tiddler>,
}

impl TitleRegistry {
    pub fn new() -> Self {
        TitleRegistry {
            records: Vec::new(),
        }
    }

    /// Append a finished record. Call only with a title returned by
    /// [`resolve_title`](Self::resolve_title) for the same record.
    pub fn push(&mut self, tiddler: Tiddler) {
        self.records.push(tiddler);
    }

    pub fn records(&self) -> &[Tiddler] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Tiddler> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve `candidate` against every record registered so far and return
    /// the title the new record must use.
    ///
    /// A case-insensitive match triggers the collision rules:
    /// - When the incoming record is a top-level category (`tag == toc_name`)
    ///   it takes naming priority, so pages tagged under it are not orphaned:
    ///   the *existing* record is renamed in place to
    ///   `"<title> (<its tag>)"`. If the existing record is itself a
    ///   top-level category neither side can move and the run fails with
    ///   [`AppError::NamingCollision`].
    /// - Otherwise the *incoming* title is renamed to
    ///   `"<candidate> (<tag>)"`.
    ///
    /// The scan keeps walking forward with the possibly-renamed candidate but
    /// never restarts, so a freshly computed rename is not re-checked against
    /// records already passed. Known limitation, kept for output parity.
    pub fn resolve_title(
        &mut self,
        ctx: &mut RunContext,
        candidate: &str,
        tag: &str,
        toc_name: &str,
    ) -> Result<String, AppError> {
        let mut title = candidate.to_string();

        for idx in 0..self.records.len() {
            if self.records[idx].title.to_lowercase() != title.to_lowercase() {
                continue;
            }
            ctx.dupe_count += 1;

            if tag == toc_name {
                // the incoming record is a main level category node
                ctx.cat_collision_count += 1;

                if self.records[idx].tags == toc_name {
                    return Err(AppError::NamingCollision {
                        existing: self.records[idx].title.clone(),
                        incoming: title,
                    });
                }

                // rename the existing node to make way for the category
                let renamed = format!("{} ({})", self.records[idx].title, self.records[idx].tags);
                self.records[idx].title = renamed.clone();
                ctx.log_action(format!(
                    "WARNING: Top Level Naming Failure on {}. Renaming previous node to {}",
                    title, renamed
                ));
            } else {
                title = format!("{} ({})", title, tag);
                ctx.log_action(format!(
                    "WARNING: duplicate title detected, renaming to {}",
                    title
                ));
            }
        }

        Ok(title)
    }
}
