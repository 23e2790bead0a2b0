//! # Prompt Templates
//!
//! Templates are plain constants with `{placeholder}` markers, rendered by
//! string replacement.

pub mod cjm;

pub use cjm::{CJM_SYSTEM_PROMPT, CJM_USER_PROMPT};

/// Renders the four-agent system prompt around the knowledge text.
pub fn build_system_prompt(knowledge: &str) -> String {
    CJM_SYSTEM_PROMPT.replacen("{knowledge}", knowledge, 1)
}

/// Renders the user message for a keyword.
pub fn build_user_prompt(keyword: &str) -> String {
    CJM_USER_PROMPT.replacen("{keyword}", keyword, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knowledge_is_embedded_once_and_schema_survives() {
        let prompt = build_system_prompt("📌 파일명: interviews.docx\n{knowledge}");

        assert!(prompt.contains("📌 파일명: interviews.docx"));
        // A placeholder inside the knowledge itself is left alone.
        assert_eq!(prompt.matches("{knowledge}").count(), 1);
        assert!(prompt.contains(r#""cjm_list": ["#));
        assert!(prompt.contains("[에이전트 4: 검색 기반"));
    }

    #[test]
    fn user_prompt_carries_the_keyword() {
        let prompt = build_user_prompt("40대 여성 번호 이동");
        assert!(prompt.starts_with("#UserInput: 40대 여성 번호 이동\n\n"));
        assert!(prompt.contains("1→2→3→4"));
    }
}
