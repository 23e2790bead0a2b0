use anyhow::Result;
use async_trait::async_trait;
use cjm_builder::{
    errors::ProviderError,
    providers::ai::{AiProvider, Completion, GenerationOptions},
};
use quick_xml::escape::escape;
use std::{
    collections::VecDeque,
    fmt::Debug,
    fs::File,
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};
use zip::{write::FileOptions, ZipWriter};

// --- Mock AI Provider ---

/// A scripted reply for [`MockAiProvider`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// A single choice with this content and `finish_reason: "stop"`.
    Content(String),
    /// A single choice with empty content.
    Empty { finish_reason: String },
    /// A response with an empty `choices` array.
    NoChoices,
    BadCredential,
    RateLimited,
    QuotaExceeded,
    ServerError,
}

impl MockReply {
    fn into_result(self) -> Result<Option<Completion>, ProviderError> {
        match self {
            MockReply::Content(content) => Ok(Some(Completion {
                content,
                finish_reason: Some("stop".to_string()),
            })),
            MockReply::Empty { finish_reason } => Ok(Some(Completion {
                content: String::new(),
                finish_reason: Some(finish_reason),
            })),
            MockReply::NoChoices => Ok(None),
            MockReply::BadCredential => Err(ProviderError::Authentication(
                "Incorrect API key provided".to_string(),
            )),
            MockReply::RateLimited => Err(ProviderError::RateLimited(
                "Rate limit reached".to_string(),
            )),
            MockReply::QuotaExceeded => Err(ProviderError::QuotaExceeded(
                "You exceeded your current quota".to_string(),
            )),
            MockReply::ServerError => Err(ProviderError::Api {
                status: 500,
                message: "The server had an error".to_string(),
            }),
        }
    }
}

/// A recorded provider call.
#[derive(Clone, Debug)]
pub struct MockCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: GenerationOptions,
}

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply; replies are consumed in order.
    pub fn push_reply(&self, reply: MockReply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Retrieves the recorded calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Completion>, ProviderError> {
        self.calls.lock().unwrap().push(MockCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            options: *options,
        });

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.into_result(),
            None => Err(ProviderError::Api {
                status: 500,
                message: "MockAiProvider: no reply programmed".to_string(),
            }),
        }
    }
}

/// A minimal journey map the model could plausibly return.
pub fn sample_cjm_json() -> String {
    r#"{
  "cjm_list": [
    {
      "query": "{40대 여성}의 {대리점}에서 {번호 이동} 여정을 만드세요",
      "segment": "40대 여성",
      "channel": "대리점",
      "action": "번호 이동",
      "steps": [
        {"num": 1, "name": "요금제 비교", "phase": "탐색"},
        {"num": 2, "name": "대리점 방문", "phase": "실행"}
      ],
      "table": {
        "1": {
          "feeling": {
            "knowledge": [{"text": "\"어떤 요금제가 나한테 맞지?\"", "source": "interviews.docx | 요금제가 너무 많아요"}],
            "search": [{"text": "\"비교가 어렵네\""}]
          }
        }
      }
    }
  ]
}"#
    .to_string()
}

// --- Office Document Fixtures ---

const DOCX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const XLSX_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

fn write_archive(path: &Path, parts: &[(String, String)]) -> Result<()> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = FileOptions::default();
    for (name, content) in parts {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(content.as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}

fn docx_paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", escape(text))
}

/// Writes a `.docx` with the given body paragraphs followed by one table per
/// entry of `tables` (rows of cell texts).
pub fn write_docx(path: &Path, paragraphs: &[&str], tables: &[Vec<Vec<&str>>]) -> Result<()> {
    let mut body: String = paragraphs.iter().map(|p| docx_paragraph(p)).collect();
    for table in tables {
        body.push_str("<w:tbl>");
        for row in table {
            body.push_str("<w:tr>");
            for cell in row {
                body.push_str("<w:tc>");
                body.push_str(&docx_paragraph(cell));
                body.push_str("</w:tc>");
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    write_archive(
        path,
        &[
            ("[Content_Types].xml".to_string(), DOCX_CONTENT_TYPES.to_string()),
            ("word/document.xml".to_string(), document),
        ],
    )
}

fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

/// Writes an `.xlsx` with one worksheet per `(name, rows)` entry.
///
/// Numeric-looking values become number cells, empty strings are left out,
/// everything else goes through the shared string table.
pub fn write_xlsx(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) -> Result<()> {
    let mut shared: Vec<String> = Vec::new();
    let mut parts = vec![(
        "[Content_Types].xml".to_string(),
        XLSX_CONTENT_TYPES.to_string(),
    )];

    let mut sheet_entries = String::new();
    let mut relationships = String::new();
    for (index, (name, rows)) in sheets.iter().enumerate() {
        let number = index + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="{}" sheetId="{number}" r:id="rId{number}"/>"#,
            escape(*name)
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{number}.xml"/>"#
        ));

        let mut data = String::new();
        for (r, row) in rows.iter().enumerate() {
            data.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let reference = format!("{}{}", column_name(c), r + 1);
                if value.parse::<f64>().is_ok() {
                    data.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#));
                } else {
                    let id = shared.len();
                    shared.push(value.to_string());
                    data.push_str(&format!(r#"<c r="{reference}" t="s"><v>{id}</v></c>"#));
                }
            }
            data.push_str("</row>");
        }
        parts.push((
            format!("xl/worksheets/sheet{number}.xml"),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{data}</sheetData></worksheet>"#
            ),
        ));
    }

    parts.push((
        "xl/workbook.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheet_entries}</sheets></workbook>"#
        ),
    ));
    parts.push((
        "xl/_rels/workbook.xml.rels".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
        ),
    ));
    let strings: String = shared
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", escape(s.as_str())))
        .collect();
    parts.push((
        "xl/sharedStrings.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{strings}</sst>"#,
            shared.len()
        ),
    ));

    write_archive(path, &parts)
}
