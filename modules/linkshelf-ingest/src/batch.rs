// Plain-text batch file: one URL per line, `#` comments and blanks ignored.

use std::path::Path;

use tracing::info;

use crate::error::{IngestError, Result};

/// Read candidate URLs in file order, trimmed, without blanks or comments.
pub fn read_batch(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let urls = parse_batch(&raw);
    info!(path = %path.display(), count = urls.len(), "batch: read");
    Ok(urls)
}

fn parse_batch(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Empty the batch after a successful run, keeping its comment lines.
pub fn clear_batch(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let mut kept: String = raw
        .lines()
        .filter(|line| line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    if !kept.is_empty() {
        kept.push('\n');
    }
    std::fs::write(path, kept).map_err(|e| IngestError::io(path, e))?;
    info!(path = %path.display(), "batch: cleared");
    Ok(())
}
