//! GATs trait definitions for the approval search seam

use crate::error::Result;
use crate::http::SearchQuery;
use std::future::Future;

/// Source of "approved, open pull request" search results.
///
/// [`crate::http::SearchClient`] queries GitHub; tests substitute canned
/// responses without a network.
pub trait ApprovalSearch {
    /// GAT for async search operation
    type SearchFuture<'a>: Future<Output = Result<Vec<u64>>> + Send + 'a
    where
        Self: 'a;

    /// Pull request numbers currently matching `query`
    fn approved_pulls<'a>(&'a self, query: &'a SearchQuery) -> Self::SearchFuture<'a>;
}
