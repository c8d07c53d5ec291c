//! Plain-text export of generated loot
//!
//! Renders the result list as a numbered document and hands it to an
//! [`ExportSink`] for saving.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::loot::ResultEntry;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no results to export")]
    Empty,

    #[error("file saving is unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for exported documents
pub trait ExportSink {
    /// Persist `contents` under `filename`, returning where it ended up
    fn save(&mut self, filename: &str, contents: &str) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory, never overwriting an existing file
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn free_path(&self, filename: &str) -> PathBuf {
        let candidate = self.dir.join(filename);
        if !candidate.exists() {
            return candidate;
        }
        let (stem, ext) = filename.rsplit_once('.').unwrap_or((filename, "txt"));
        let mut n = 1;
        loop {
            let candidate = self.dir.join(format!("{} ({}).{}", stem, n, ext));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, filename: &str, contents: &str) -> Result<PathBuf, ExportError> {
        if !self.dir.is_dir() {
            return Err(ExportError::Unavailable(format!(
                "export directory {} does not exist",
                self.dir.display()
            )));
        }
        let path = self.free_path(filename);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// A sink for hosts that cannot save files
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSink;

impl ExportSink for DisabledSink {
    fn save(&mut self, _filename: &str, _contents: &str) -> Result<PathBuf, ExportError> {
        Err(ExportError::Unavailable(
            "this host has no file-saving capability".to_string(),
        ))
    }
}

/// Rendered export document
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    /// Entries left out because they were malformed
    pub skipped: usize,
    /// Sum of quantities across all entries
    pub total_items: u64,
}

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub entries: usize,
    pub skipped: usize,
    pub total_items: u64,
}

/// Render results as a plain-text document
pub fn render_text(results: &[ResultEntry], title: &str, generated: DateTime<Local>) -> Document {
    let mut text = format!(
        "{}\nGenerated: {}\n\n",
        title,
        generated.format("%Y-%m-%d %H:%M:%S")
    );
    let mut skipped = 0;

    for (index, entry) in results.iter().enumerate() {
        if !entry.is_well_formed() {
            warn!("Skipping invalid result at index {}: {:?}", index, entry);
            skipped += 1;
            continue;
        }

        text.push_str(&format!(
            "{}. {} x{}\n",
            index + 1,
            entry.item_name,
            entry.quantity
        ));
        for value in &entry.values {
            text.push_str(&format!("   - {}¥\n", value));
        }
        text.push('\n');
    }

    let total_items: u64 = results.iter().map(|e| e.quantity).sum();
    text.push_str(&format!("Total Items: {}\n", total_items));

    Document {
        text,
        skipped,
        total_items,
    }
}

/// File name for an export created at `now`, e.g. `shadowrun-loot-2026-10-18T20-34-05.txt`
pub fn export_filename(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.txt", prefix, now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Render and save results
pub fn export_results(
    results: &[ResultEntry],
    config: &ExportConfig,
    sink: &mut dyn ExportSink,
) -> Result<ExportReceipt, ExportError> {
    if results.is_empty() {
        return Err(ExportError::Empty);
    }

    let now = Utc::now();
    let document = render_text(results, &config.title, now.with_timezone(&Local));
    let filename = export_filename(&config.file_prefix, now);
    let path = sink.save(&filename, &document.text)?;

    info!(
        "Exported {} results ({} items) to {}",
        results.len() - document.skipped,
        document.total_items,
        path.display()
    );

    Ok(ExportReceipt {
        path,
        entries: results.len() - document.skipped,
        skipped: document.skipped,
        total_items: document.total_items,
    })
}
