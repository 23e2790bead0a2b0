//! # Knowledge Loader
//!
//! Reads every supported office document in a directory, extracts bounded text
//! from each, and caches the concatenation for the lifetime of the process.
//! The cache is populated at most once; later calls are plain reads, so
//! documents added or changed after the first load are not picked up.

use crate::ingest::DocumentKind;
use std::{
    fs,
    io,
    path::{Path, PathBuf},
};
use tokio::sync::OnceCell;
use tracing::{error, info, instrument, warn};

const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug)]
pub struct KnowledgeBase {
    directory: PathBuf,
    cache: OnceCell<String>,
}

impl KnowledgeBase {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            cache: OnceCell::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether the cache has been populated.
    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    /// Returns the cached knowledge text, building it on first use.
    ///
    /// Concurrent first callers wait for a single extraction pass.
    pub async fn load(&self) -> &str {
        self.cache
            .get_or_init(|| async {
                let directory = self.directory.clone();
                match tokio::task::spawn_blocking(move || build_knowledge(&directory)).await {
                    Ok(text) => text,
                    Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                    Err(e) => {
                        error!("Knowledge extraction task was cancelled: {e}");
                        String::new()
                    }
                }
            })
            .await
            .as_str()
    }

    /// Populates the cache ahead of the first request and returns its size in bytes.
    pub async fn warm(&self) -> usize {
        self.load().await.len()
    }
}

/// Lists the documents the loader will read, sorted by file name.
///
/// Office lock files (`~$report.docx`) are skipped.
pub fn list_documents(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| DocumentKind::from_path(path).is_some())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('~'))
        })
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Extracts one document, rendering a failure as an inline placeholder.
pub fn extract_or_placeholder(path: &Path) -> String {
    match crate::ingest::extract_document(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(file = %path.display(), "Failed to read document: {e}");
            format!("[읽기 오류: {e}]")
        }
    }
}

/// Renders the section for one file: a ruled header with the file name,
/// followed by its text.
pub fn render_section(file_name: &str, text: &str) -> String {
    let rule = "─".repeat(SEPARATOR_WIDTH);
    format!("\n{rule}\n📌 파일명: {file_name}\n{rule}\n{text}\n")
}

/// Builds the full knowledge text for `directory` without caching.
#[instrument]
pub fn build_knowledge(directory: &Path) -> String {
    info!("Loading knowledge files...");
    let files = match list_documents(directory) {
        Ok(files) => files,
        Err(e) => {
            warn!("Could not scan knowledge directory: {e}");
            Vec::new()
        }
    };

    let parts: Vec<String> = files
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("  📄 {name}");
            render_section(&name, &extract_or_placeholder(path))
        })
        .collect();

    let knowledge = parts.join("\n");
    info!(
        "Knowledge loaded ({:.0} KB, {} files)",
        knowledge.len() as f64 / 1024.0,
        files.len()
    );
    knowledge
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_has_ruled_header() {
        let rule = "─".repeat(60);
        assert_eq!(
            render_section("a.docx", "body"),
            format!("\n{rule}\n📌 파일명: a.docx\n{rule}\nbody\n")
        );
    }
}
