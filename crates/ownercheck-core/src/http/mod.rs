//! HTTP client for the GitHub search API

pub mod client;
pub mod search;

pub use client::SearchClient;
pub use search::SearchQuery;
