pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{FETCH_TIMEOUT, api_endpoint, fetch_page};
pub use errors::FetchError;
pub use types::PageResponse;
