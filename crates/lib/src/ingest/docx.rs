//! Word (`.docx`) text extraction.
//!
//! Body paragraphs come first, one per line. Rows of top-level tables follow
//! under a `[표]` marker, one row per line with the non-empty cells joined by
//! ` | `. Nested tables and text boxes are skipped.

use super::{read_part, truncate_chars, ExtractError};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::io::{Read, Seek};
use zip::ZipArchive;

pub const DOCX_CHAR_LIMIT: usize = 15_000;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    max_chars: usize,
) -> Result<String, ExtractError> {
    let xml = read_part(archive, DOCUMENT_PART)?
        .ok_or_else(|| ExtractError::MissingPart(DOCUMENT_PART.to_string()))?;
    let body = parse_document(&xml)?;
    Ok(truncate_chars(&body.render(), max_chars))
}

#[derive(Debug, Default, PartialEq)]
struct DocumentBody {
    paragraphs: Vec<String>,
    table_rows: Vec<String>,
}

impl DocumentBody {
    fn render(&self) -> String {
        let mut full = self.paragraphs.join("\n");
        if !self.table_rows.is_empty() {
            full.push_str("\n\n[표]\n");
            full.push_str(&self.table_rows.join("\n"));
        }
        full
    }
}

fn parse_document(xml: &str) -> Result<DocumentBody, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut body = DocumentBody::default();

    // Paragraphs nested in a paragraph belong to text boxes and shapes.
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut table_depth = 0usize;
    let mut in_text = false;
    let mut paragraph = String::new();
    let mut cell_paragraphs: Vec<String> = Vec::new();
    let mut row_cells: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        paragraph.clear();
                    }
                }
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                b"w:tbl" if paragraph_depth == 0 => table_depth += 1,
                b"w:tr" if paragraph_depth == 0 && table_depth == 1 => row_cells.clear(),
                b"w:tc" if paragraph_depth == 0 && table_depth == 1 => cell_paragraphs.clear(),
                _ => {}
            },
            Event::Empty(e) if paragraph_depth == 1 && run_depth > 0 => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" if is_line_break(&e)? => paragraph.push('\n'),
                b"w:cr" => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text && paragraph_depth == 1 => {
                paragraph.push_str(&e.unescape()?)
            }
            Event::CData(e) if in_text && paragraph_depth == 1 => {
                paragraph.push_str(&String::from_utf8_lossy(&e.into_inner()))
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth > 0 {
                        continue;
                    }
                    match table_depth {
                        0 => {
                            let text = paragraph.trim();
                            if !text.is_empty() {
                                body.paragraphs.push(text.to_string());
                            }
                        }
                        1 => cell_paragraphs.push(std::mem::take(&mut paragraph)),
                        _ => {}
                    }
                }
                b"w:tc" if paragraph_depth == 0 && table_depth == 1 => {
                    row_cells.push(cell_paragraphs.join("\n"));
                }
                b"w:tr" if paragraph_depth == 0 && table_depth == 1 => {
                    let cells: Vec<&str> = row_cells
                        .iter()
                        .map(|cell| cell.trim())
                        .filter(|cell| !cell.is_empty())
                        .collect();
                    if !cells.is_empty() {
                        body.table_rows.push(cells.join(" | "));
                    }
                }
                b"w:tbl" if paragraph_depth == 0 => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            _ => {}
        }
    }

    Ok(body)
}

/// Page and column breaks carry no text; only text-wrapping breaks do.
fn is_line_break(element: &BytesStart<'_>) -> Result<bool, ExtractError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"w:type" {
            return Ok(attr.value.as_ref() == b"textWrapping");
        }
    }
    Ok(true)
}
