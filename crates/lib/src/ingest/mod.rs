//! # Document Text Extraction
//!
//! Dispatches to the format-specific extractors, each of which returns plain
//! text bounded by its own character cap. Word documents are read from their
//! zip parts directly; workbooks go through `calamine`.

pub mod docx;
pub mod xlsx;

use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};
use thiserror::Error;
use zip::{result::ZipError, ZipArchive};

/// A failure while reading a single document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Archive(#[from] ZipError),
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),
    #[error("{0}")]
    Spreadsheet(#[from] calamine::XlsxError),
    #[error("Missing archive part '{0}'")]
    MissingPart(String),
    #[error("Unsupported document type: {0}")]
    Unsupported(String),
}

impl From<quick_xml::events::attributes::AttrError> for ExtractError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ExtractError::Xml(err.into())
    }
}

/// The document formats the knowledge loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Xlsx,
}

impl DocumentKind {
    /// Recognizes a document by its (case-sensitive) extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("docx") => Some(DocumentKind::Docx),
            Some("xlsx") => Some(DocumentKind::Xlsx),
            _ => None,
        }
    }

    /// Extracts the bounded text of the document at `path`.
    pub fn extract(self, path: &Path) -> Result<String, ExtractError> {
        let reader = BufReader::new(File::open(path)?);
        match self {
            DocumentKind::Docx => {
                docx::extract_text(&mut ZipArchive::new(reader)?, docx::DOCX_CHAR_LIMIT)
            }
            DocumentKind::Xlsx => xlsx::extract_text(reader, xlsx::XLSX_CHAR_LIMIT),
        }
    }
}

/// Extracts a supported document, choosing the format from its extension.
pub fn extract_document(path: &Path) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| ExtractError::Unsupported(path.display().to_string()))?;
    kind.extract(path)
}

/// Reads an archive part as UTF-8 text. Returns `Ok(None)` if it does not exist.
pub(crate) fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, ExtractError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Keeps at most `limit` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("가나다라", 2), "가나");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn kind_is_recognized_by_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("interviews.docx")),
            Some(DocumentKind::Docx)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("survey.xlsx")),
            Some(DocumentKind::Xlsx)
        );
        assert_eq!(DocumentKind::from_path(Path::new("notes.DOCX")), None);
        assert_eq!(DocumentKind::from_path(Path::new("notes.txt")), None);
    }
}
