//! # Knowledge Loader Tests
//!
//! These tests build real `.docx` and `.xlsx` files in a temporary directory
//! and check extraction, ordering, failure placeholders, and the load-once cache.

use anyhow::Result;
use cjm_builder::knowledge::{build_knowledge, list_documents, KnowledgeBase};
use cjm_builder_test_utils::{write_docx, write_xlsx};
use std::{fs, sync::Arc};
use tempfile::tempdir;

#[test]
fn documents_are_filtered_and_sorted_by_name() -> Result<()> {
    let dir = tempdir()?;
    write_docx(&dir.path().join("b_interviews.docx"), &["b"], &[])?;
    write_xlsx(&dir.path().join("a_survey.xlsx"), &[("Sheet1", vec![vec!["a"]])])?;
    write_docx(&dir.path().join("~$b_interviews.docx"), &["lock"], &[])?;
    fs::write(dir.path().join("notes.txt"), "not a document")?;
    fs::write(dir.path().join("upper.DOCX"), "wrong case")?;
    fs::create_dir(dir.path().join("folder.docx"))?;

    let names: Vec<String> = list_documents(dir.path())?
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["a_survey.xlsx", "b_interviews.docx"]);
    Ok(())
}

#[test]
fn knowledge_renders_headers_paragraphs_tables_and_sheets() -> Result<()> {
    let dir = tempdir()?;
    write_docx(
        &dir.path().join("interviews.docx"),
        &["요금제가 너무 많아요", "  ", "대리점 직원이 친절했어요"],
        &[vec![vec!["단계", "", "불편"], vec!["", ""], vec!["방문", "대기 시간"]]],
    )?;
    write_xlsx(
        &dir.path().join("survey.xlsx"),
        &[
            ("응답", vec![vec!["나이", "만족도"], vec!["42", ""], vec!["", ""]]),
            ("메모", vec![vec!["", "", "끝"]]),
        ],
    )?;

    let knowledge = build_knowledge(dir.path());
    let rule = "─".repeat(60);

    let expected_docx = format!(
        "\n{rule}\n📌 파일명: interviews.docx\n{rule}\n\
         요금제가 너무 많아요\n대리점 직원이 친절했어요\n\n[표]\n단계 | 불편\n방문 | 대기 시간\n"
    );
    let expected_xlsx = format!(
        "\n{rule}\n📌 파일명: survey.xlsx\n{rule}\n\
         [시트: 응답]\n나이 | 만족도\n42 |\n[시트: 메모]\n|  | 끝\n"
    );
    assert_eq!(knowledge, format!("{expected_docx}\n{expected_xlsx}"));
    Ok(())
}

#[test]
fn unreadable_documents_become_placeholders() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("broken.docx"), b"definitely not a zip archive")?;
    write_docx(&dir.path().join("good.docx"), &["fine"], &[])?;

    let knowledge = build_knowledge(dir.path());

    assert!(knowledge.contains("📌 파일명: broken.docx"));
    assert!(knowledge.contains("[읽기 오류: "));
    assert!(knowledge.contains("📌 파일명: good.docx"));
    assert!(knowledge.contains("\nfine\n"));
    Ok(())
}

#[test]
fn per_format_character_caps_apply() -> Result<()> {
    let dir = tempdir()?;
    let long = "가".repeat(20_000);
    write_docx(&dir.path().join("long.docx"), &[long.as_str()], &[])?;

    let knowledge = build_knowledge(dir.path());
    let body = knowledge.lines().find(|line| line.starts_with('가')).unwrap();
    assert_eq!(body.chars().count(), 15_000);
    Ok(())
}

#[test]
fn sheets_stop_after_the_row_limit() -> Result<()> {
    let dir = tempdir()?;
    let values: Vec<String> = (1..=600).map(|i| i.to_string()).collect();
    let rows: Vec<Vec<&str>> = values.iter().map(|v| vec![v.as_str()]).collect();
    write_xlsx(&dir.path().join("big.xlsx"), &[("Data", rows)])?;

    let knowledge = build_knowledge(dir.path());
    let lines: Vec<&str> = knowledge.lines().collect();

    assert!(lines.contains(&"501"));
    assert!(!lines.contains(&"502"));
    assert!(lines.contains(&"... (이하 생략)"));
    Ok(())
}

#[test]
fn missing_directory_yields_empty_knowledge() {
    let dir = tempdir().unwrap();
    let knowledge = build_knowledge(&dir.path().join("does-not-exist"));
    assert_eq!(knowledge, "");
}

#[tokio::test]
async fn knowledge_is_loaded_once_per_process() -> Result<()> {
    let dir = tempdir()?;
    write_docx(&dir.path().join("first.docx"), &["first"], &[])?;
    let base = KnowledgeBase::new(dir.path());

    assert!(!base.is_loaded());
    let first = base.load().await.to_string();
    assert!(base.is_loaded());
    assert!(first.contains("first.docx"));

    // Files added after the first load are never seen.
    write_docx(&dir.path().join("second.docx"), &["second"], &[])?;
    let second = base.load().await.to_string();

    assert_eq!(first, second);
    assert!(!second.contains("second.docx"));
    Ok(())
}

#[tokio::test]
async fn concurrent_first_loads_agree() -> Result<()> {
    let dir = tempdir()?;
    write_xlsx(&dir.path().join("s.xlsx"), &[("S", vec![vec!["x", "y"]])])?;
    let base = Arc::new(KnowledgeBase::new(dir.path()));

    let (a, b) = tokio::join!(base.load(), base.load());

    assert_eq!(a, b);
    assert!(a.contains("x | y"));
    Ok(())
}

#[tokio::test]
async fn warming_populates_the_cache() -> Result<()> {
    let dir = tempdir()?;
    write_docx(&dir.path().join("w.docx"), &["warm"], &[])?;
    let base = KnowledgeBase::new(dir.path());

    let size = base.warm().await;

    assert!(base.is_loaded());
    assert_eq!(size, base.load().await.len());
    assert_eq!(base.directory(), dir.path());
    Ok(())
}
