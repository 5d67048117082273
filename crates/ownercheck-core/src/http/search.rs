//! Issue search query and response model

use serde::Deserialize;

/// A GitHub issue search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Open pull requests of `owner/name` with an approving review.
    ///
    /// Sent as `q={owner}/{name}+review:approved+is:open+is:pr`; GitHub
    /// only reports `review:approved` once required code owner reviews pass.
    pub fn approved_open_pulls(owner: &str, name: &str) -> Self {
        Self(format!("{}/{} review:approved is:open is:pr", owner, name))
    }

    /// Value of the `q` parameter
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// GitHub API response for `GET /search/issues`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) items: Vec<SearchItem>,
}

/// Issue or pull request in a search result
#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub(crate) number: u64,
}

impl SearchResponse {
    /// Pull request numbers in response order
    pub(crate) fn numbers(self) -> Vec<u64> {
        self.items.into_iter().map(|item| item.number).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_shape() {
        let query = SearchQuery::approved_open_pulls("acme", "infra");
        assert_eq!(query.as_str(), "acme/infra review:approved is:open is:pr");
        assert_eq!(query.to_string(), query.as_str());
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"number": 7, "title": "Add VPC", "state": "open"},
                {"number": 12, "title": "Bump provider"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.numbers(), vec![7, 12]);
    }

    #[test]
    fn test_response_without_items_is_empty() {
        let response: SearchResponse = serde_json::from_str(r#"{"total_count":0}"#).unwrap();
        assert!(response.numbers().is_empty());
    }

    #[test]
    fn test_response_rejects_non_numeric_number() {
        let result: Result<SearchResponse, _> =
            serde_json::from_str(r#"{"items":[{"number":"seven"}]}"#);
        assert!(result.is_err());
    }
}
