//! Scrape, rewrite and import one source article per operator request.
//!
//! `begin_import` produces a preview without persisting anything;
//! `resolve_import` either commits an (edited) preview as a draft article or
//! skips it. Both terminal actions consume the source URL in the ledger.

pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod orchestrator;


pub use dtos::{Preview, ResolveOutcome, ResolveRequest, RewrittenDraft};
pub use errors::ImportError;
pub use orchestrator::ImportPipeline;
