//! # CJM Builder
//!
//! This crate builds customer journey maps (CJM) with a large language model.
//! It loads reference documents into a process-wide knowledge cache, renders a
//! four-agent instruction prompt around that knowledge, sends it to an AI
//! provider, and decodes the JSON reply into typed structures.
//!
//! The HTTP surface lives in the `cjm-builder-server` crate.

pub mod access;
pub mod errors;
pub mod generation;
pub mod ingest;
pub mod knowledge;
pub mod prompts;
pub mod providers;
pub mod types;

pub use access::{AccessError, AuthGate, Session};
pub use errors::{GenerationError, ProviderError};
pub use generation::{GenerationOutcome, GenerationService};
pub use knowledge::KnowledgeBase;
pub use types::CjmDocument;
