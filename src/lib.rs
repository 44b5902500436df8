pub mod analytics;
pub mod app_state;
pub mod articles;
pub mod auth;
pub mod config;
pub mod entities;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod images;
pub mod importer;
pub mod openapi;
pub mod passwords;
pub mod repositories;
pub mod rewriter;
pub mod routes;
pub mod settings;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;
