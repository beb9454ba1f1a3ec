use linkshelf_common::LinkRecord;

/// What happened to one candidate URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Added,
    SkippedInvalid,
    SkippedDuplicate,
    Failed(String),
}

impl std::fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemOutcome::Added => write!(f, "added"),
            ItemOutcome::SkippedInvalid => write!(f, "skipped: invalid URL"),
            ItemOutcome::SkippedDuplicate => write!(f, "skipped: duplicate"),
            ItemOutcome::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub url: String,
    pub outcome: ItemOutcome,
}

/// Tallies from an ingest run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub added: u32,
    pub skipped: u32,
    pub failed: u32,
}

impl IngestStats {
    pub fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Added => self.added += 1,
            ItemOutcome::SkippedInvalid | ItemOutcome::SkippedDuplicate => self.skipped += 1,
            ItemOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.added + self.skipped + self.failed
    }
}

impl std::fmt::Display for IngestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Ingest Complete ===")?;
        writeln!(f, "URLs processed: {}", self.total())?;
        writeln!(f, "Added:          {}", self.added)?;
        writeln!(f, "Skipped:        {}", self.skipped)?;
        write!(f, "Failed:         {}", self.failed)
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub stats: IngestStats,
    /// One entry per candidate, in input order.
    pub outcomes: Vec<ItemResult>,
    /// Records created by this run, in input order.
    pub new_records: Vec<LinkRecord>,
    /// Known records followed by `new_records`. This is what gets persisted.
    pub collection: Vec<LinkRecord>,
}

impl IngestReport {
    pub fn has_additions(&self) -> bool {
        self.stats.added > 0
    }
}
