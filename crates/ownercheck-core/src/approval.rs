//! Code owner approval check
//!
//! Searches the base repository for open pull requests with an approving
//! review and looks for the run step's pull request among them, retrying
//! the search per [`RetryPolicy`] while it is not found yet.

use crate::error::Result;
use crate::http::SearchQuery;
use crate::retry::RetryPolicy;
use crate::run_step::RunStep;
use crate::traits::ApprovalSearch;

/// Printed before the first search
pub const CHECKING_MSG: &str = "Checking pull request for CODEOWNER approval";

/// Printed when the pull request is approved
pub const APPROVED_MSG: &str = "Pull request is approved by a CODEOWNER";

/// Printed when every attempt came back without the pull request
pub const NOT_APPROVED_MSG: &str = r#"Error: Pull request must be approved by a CODEOWNER

Note: If you are sure that this pull request is approved by a CODEOWNER, try running
"atlantis apply" again. This process checks for approval by querying the GitHub API,
which has delayed consistency with what is shown in the pull request UI. Wait a few
seconds and then try again."#;

/// Outcome of an approval check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    /// Found among approved pull requests on this attempt (1-based)
    Approved {
        /// Attempt that found the pull request
        attempt: u32,
    },
    /// Not found after every attempt
    NotApproved {
        /// Attempts made
        attempts: u32,
    },
}

impl Approval {
    /// Whether the pull request is approved
    #[inline]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Approval::Approved { .. })
    }

    /// Process exit code for this outcome
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Approval::Approved { .. } => 0,
            Approval::NotApproved { .. } => 1,
        }
    }

    /// User-facing message for this outcome
    #[inline]
    pub const fn message(&self) -> &'static str {
        match self {
            Approval::Approved { .. } => APPROVED_MSG,
            Approval::NotApproved { .. } => NOT_APPROVED_MSG,
        }
    }
}

/// Approval check over any [`ApprovalSearch`] backend
#[derive(Debug)]
pub struct ApprovalCheck<'s, S> {
    search: &'s S,
    policy: RetryPolicy,
}

impl<'s, S: ApprovalSearch> ApprovalCheck<'s, S> {
    /// Create a check that searches with `search`
    pub fn new(search: &'s S, policy: RetryPolicy) -> Self {
        Self { search, policy }
    }

    /// Decide whether `step`'s pull request is approved.
    ///
    /// Search errors abort the check immediately; only a search that
    /// succeeds without the pull request is retried.
    pub async fn run(&self, step: &RunStep) -> Result<Approval> {
        let query = SearchQuery::approved_open_pulls(&step.base_repo_owner, &step.base_repo_name);
        let attempts = self.policy.attempts();

        for attempt in 1..=attempts {
            self.policy.pause_before(attempt).await;

            let approved = self.search.approved_pulls(&query).await?;
            tracing::debug!(
                attempt,
                attempts,
                matches = approved.len(),
                query = %query,
                "approval search completed"
            );

            if approved.contains(&step.pull_num) {
                tracing::info!(pull = step.pull_num, attempt, "pull request approved");
                return Ok(Approval::Approved { attempt });
            }
        }

        tracing::info!(pull = step.pull_num, attempts, "pull request not approved");
        Ok(Approval::NotApproved { attempts })
    }
}
