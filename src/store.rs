//! Filesystem-backed history store
//!
//! Every successful extraction job leaves two sibling artifacts in the output
//! directory: a JSON snapshot (`emails_<stamp>.json`) and its CSV rendering
//! (`emails_<stamp>.csv`). The JSON artifacts double as the history index.

use crate::csv::csv_document;
use crate::error::{ExtractError, Result};
use crate::types::{HistoryEntry, ResultFiles, StoredExtraction};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Most recent jobs returned by a listing
const HISTORY_LIMIT: usize = 20;

/// History store rooted at an output directory
#[derive(Debug, Clone)]
pub struct HistoryStore {
    output_dir: PathBuf,
}

impl HistoryStore {
    /// Open a store, creating the output directory if needed
    pub async fn open(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).await?;
        Ok(Self { output_dir })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist one extraction job as a JSON + CSV artifact pair
    pub async fn record(&self, snapshot: &StoredExtraction) -> Result<ResultFiles> {
        let stamp = snapshot
            .extraction_time
            .format("%Y%m%d_%H%M%S_%3f")
            .to_string();
        let files = self.unique_files(&stamp).await;

        let json = serde_json::to_vec_pretty(snapshot)?;
        fs::write(self.output_dir.join(&files.json), json).await?;

        let emails: Vec<String> = snapshot.emails.iter().map(|r| r.email.clone()).collect();
        fs::write(self.output_dir.join(&files.csv), csv_document(&emails)).await?;

        info!(
            source = %snapshot.source_file,
            total = snapshot.total_emails,
            artifact = %files.json,
            "Recorded extraction"
        );

        Ok(files)
    }

    /// Pick an artifact basename not already taken
    async fn unique_files(&self, stamp: &str) -> ResultFiles {
        let mut attempt = 0u32;
        loop {
            let base = if attempt == 0 {
                format!("emails_{stamp}")
            } else {
                format!("emails_{stamp}_{attempt}")
            };
            let files = ResultFiles {
                json: format!("{base}.json"),
                csv: format!("{base}.csv"),
            };
            if !fs::try_exists(self.output_dir.join(&files.json))
                .await
                .unwrap_or(false)
            {
                return files;
            }
            attempt += 1;
        }
    }

    /// List recorded jobs, most recent first, capped at 20
    ///
    /// Unreadable artifacts are skipped; an empty store is a non-error.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        let mut names = Vec::new();
        let mut dir = match fs::read_dir(&self.output_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") {
                names.push(name);
            }
        }

        // Stamped filenames sort chronologically
        names.sort_unstable_by(|a, b| b.cmp(a));

        let mut entries = Vec::new();
        for name in names.into_iter().take(HISTORY_LIMIT) {
            match self.read_entry(&name).await {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(artifact = %name, error = %e, "Skipping unreadable artifact"),
            }
        }

        debug!("Listed {} history entries", entries.len());
        Ok(entries)
    }

    async fn read_entry(&self, filename: &str) -> Result<HistoryEntry> {
        let raw = fs::read(self.output_dir.join(filename)).await?;
        let snapshot: StoredExtraction = serde_json::from_slice(&raw)?;
        Ok(HistoryEntry {
            filename: filename.to_string(),
            source: snapshot.source_file,
            total: snapshot.total_emails,
            time: snapshot.extraction_time,
        })
    }

    /// Remove every artifact; clearing an empty store succeeds
    pub async fn clear(&self) -> Result<()> {
        let mut dir = match fs::read_dir(&self.output_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0usize;
        while let Some(entry) = dir.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        info!(removed, "Cleared extraction history");
        Ok(())
    }

    /// Resolve a stored artifact for download
    ///
    /// Rejects filenames with path separators, parent references or dot
    /// names before touching the filesystem; only regular files resolve.
    pub async fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if filename.is_empty()
            || filename == "."
            || filename.contains(['/', '\\'])
            || filename.contains("..")
        {
            return Err(ExtractError::InvalidFilename(filename.to_string()));
        }

        let path = self.output_dir.join(filename);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(ExtractError::NotFound),
        }
    }
}
