pub mod article;
pub mod candidates;
pub mod model;

#[cfg(test)]
mod tests;

pub use article::{ExtractionError, extract_article};
pub use candidates::{extract_candidate_urls, normalize_url};
pub use model::ScrapedRecord;
