//! Core logic for the Transdesk translation and glossary client
//!
//! Everything here is independent of the browser:
//! - domain types and response normalization for the REST API
//! - the translation wizard state machine and its session persistence
//! - the job status poller
//! - glossary selection with term conflict detection
//! - the glossary editor and its save reconciliation
//!
//! The web crate implements [`api::GlossaryApi`], [`api::TranslationApi`],
//! [`api::Sleeper`] and [`wizard::SessionStore`] against browser APIs.

pub mod api;
pub mod config;
pub mod conflict;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod import;
pub mod poller;
pub mod reconciler;
pub mod types;
pub mod wizard;

pub use config::ClientConfig;
pub use error::{ApiError, AppError, SessionInconsistency, ValidationError};
pub use types::*;
