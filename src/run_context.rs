use log::info;

// @module: Per-run counters and action log

/// Mutable state of one export run: event counters plus the chronological
/// action log. A fresh context is constructed per run and passed by `&mut`
/// into every component that records events.
#[derive(Debug, Default)]
pub struct RunContext {
    /// Page files processed
    pub file_count: usize,

    /// Records created (pages and synthetic nodes)
    pub node_count: usize,

    /// Duplicate titles renamed
    pub dupe_count: usize,

    /// Category title collisions resolved by renaming the earlier node
    pub cat_collision_count: usize,

    /// Human-readable log of everything the run did, in order
    pub action_log: Vec<String>,

    verbose: bool,
}

impl RunContext {
    pub fn new(verbose: bool) -> Self {
        RunContext {
            verbose,
            ..RunContext::default()
        }
    }

    /// Append an entry to the action log, echoing it to the console when
    /// verbose mode is on.
    pub fn log_action(&mut self, entry: String) {
        if self.verbose {
            info!("{}", entry);
        }
        self.action_log.push(entry);
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
