//! # Customer Journey Map Schema
//!
//! The typed shape of the model's output. Fields the prompt asks for but that
//! the UI can live without default to empty values; `cjm_list`, each
//! journey's `query` and `steps`, each step's `num` and `name`, and each
//! note's `text` are required.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CjmDocument {
    pub cjm_list: Vec<CustomerJourney>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerJourney {
    pub query: String,
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub action: String,
    pub steps: Vec<JourneyStep>,
    /// Cells keyed by step number, then by field (`user_action`, `feeling`,
    /// `painpoint`, `needs`, `insight`).
    #[serde(default)]
    pub table: BTreeMap<String, BTreeMap<String, JourneyCell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyStep {
    pub num: u32,
    pub name: String,
    #[serde(default)]
    pub phase: String,
}

/// One cell of the journey table: grounded notes and search-derived notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JourneyCell {
    #[serde(default)]
    pub knowledge: Vec<KnowledgeNote>,
    #[serde(default)]
    pub search: Vec<SearchNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNote {
    pub text: String,
    /// `"<file name> | <quoted source sentence>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchNote {
    pub text: String,
}
