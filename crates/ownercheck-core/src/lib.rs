//! # ownercheck core
//!
//! Atlantis custom run step check that passes only when the pull request has
//! been approved by a CODEOWNER.
//!
//! The pieces:
//! - [`CommentArgs`] decodes Atlantis' fully escaped `COMMENT_ARGS`
//! - [`RunStep`] holds the run step environment
//! - [`ApprovalCheck`] searches GitHub for the pull request among approved
//!   open pull requests, retrying per [`RetryPolicy`]
//!
//! ## Example
//!
//! ```no_run
//! use ownercheck_core::{check_approval, CheckConfig, RunStep};
//!
//! # async fn example() -> ownercheck_core::Result<()> {
//! let step = RunStep::from_env()?;
//! let config = CheckConfig::new(std::env::var("ATLANTIS_GH_TOKEN").ok())?;
//!
//! let outcome = check_approval(&step, &config).await?;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod approval;
pub mod comment_args;
pub mod config;
pub mod error;
pub mod http;
pub mod retry;
pub mod run_step;
pub mod traits;

pub use approval::{Approval, ApprovalCheck};
pub use comment_args::{CommentArgs, DecodeError};
pub use config::CheckConfig;
pub use error::{Error, ErrorKind, Result};
pub use retry::RetryPolicy;
pub use run_step::RunStep;

/// Check whether `step`'s pull request is approved by a CODEOWNER
///
/// Builds a [`http::SearchClient`] from `config` and runs an
/// [`ApprovalCheck`] with the configured retry policy.
pub async fn check_approval(step: &RunStep, config: &CheckConfig) -> Result<Approval> {
    let client = http::SearchClient::new(config)?;
    ApprovalCheck::new(&client, config.retry).run(step).await
}

/// Synchronous variant of `check_approval`
///
/// Runs the check on a single-threaded Tokio runtime.
pub fn check_approval_sync(step: &RunStep, config: &CheckConfig) -> Result<Approval> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(check_approval(step, config))
}
