//! JSON and CSV export of scraped results.

use crate::error::Result;
use shared::{AnimeRecord, SessionData};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write every in-memory result as pretty-printed JSON
pub fn export_json(path: &Path, data: &SessionData) -> Result<()> {
    create_parent(path)?;

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, data)?;

    info!(path = %path.display(), "Exported session data to JSON");
    Ok(())
}

/// Write title and URL columns of an anime list as CSV
pub fn export_csv(path: &Path, records: &[AnimeRecord]) -> Result<()> {
    create_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Title", "URL"])?;
    for record in records {
        writer.write_record([record.title.as_str(), record.url.as_str()])?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "Exported anime list to CSV");
    Ok(())
}
