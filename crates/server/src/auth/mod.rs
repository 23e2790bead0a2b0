//! # Session Authentication
//!
//! Cookie transport for the shared-password session (`session`) and the
//! request extractor that exposes it to handlers (`middleware`).

pub mod middleware;
pub mod session;
