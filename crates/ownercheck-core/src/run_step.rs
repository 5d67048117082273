//! Atlantis custom run step context
//!
//! Atlantis exports a fixed set of environment variables to every custom
//! `run` step. [`RunStep`] captures them once at process start.

use crate::comment_args::CommentArgs;
use crate::error::{Error, Result};

/// Environment variable names exported by Atlantis
pub mod vars {
    /// Terraform workspace
    pub const WORKSPACE: &str = "WORKSPACE";
    /// Terraform version
    pub const TERRAFORM_VERSION: &str = "ATLANTIS_TERRAFORM_VERSION";
    /// Absolute project directory
    pub const DIR: &str = "DIR";
    /// Plan file location
    pub const PLANFILE: &str = "PLANFILE";
    /// Base repository name
    pub const BASE_REPO_NAME: &str = "BASE_REPO_NAME";
    /// Base repository owner
    pub const BASE_REPO_OWNER: &str = "BASE_REPO_OWNER";
    /// Head repository name
    pub const HEAD_REPO_NAME: &str = "HEAD_REPO_NAME";
    /// Head repository owner
    pub const HEAD_REPO_OWNER: &str = "HEAD_REPO_OWNER";
    /// Head branch name
    pub const HEAD_BRANCH_NAME: &str = "HEAD_BRANCH_NAME";
    /// Base branch name
    pub const BASE_BRANCH_NAME: &str = "BASE_BRANCH_NAME";
    /// Project name from `atlantis.yaml` (optional)
    pub const PROJECT_NAME: &str = "PROJECT_NAME";
    /// Pull request number
    pub const PULL_NUM: &str = "PULL_NUM";
    /// Pull request author
    pub const PULL_AUTHOR: &str = "PULL_AUTHOR";
    /// Project path relative to the repository root
    pub const REPO_REL_DIR: &str = "REPO_REL_DIR";
    /// VCS user running the command
    pub const USER_NAME: &str = "USER_NAME";
    /// Escaped extra comment arguments (optional)
    pub const COMMENT_ARGS: &str = "COMMENT_ARGS";
}

/// Runtime variables of the current Atlantis custom run step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStep {
    /// Terraform workspace used for this project, ex. `default`
    pub terraform_workspace: String,
    /// Terraform version used for this project, ex. `1.5.7`
    pub terraform_version: String,
    /// Absolute path to the project directory
    pub absolute_project_dir: String,
    /// Where Atlantis expects the plan file
    pub planfile: String,
    /// Repository the pull request merges into, ex. `atlantis`
    pub base_repo_name: String,
    /// Owner of the base repository, ex. `runatlantis`
    pub base_repo_owner: String,
    /// Repository being merged, ex. `atlantis`
    pub head_repo_name: String,
    /// Owner of the head repository, ex. `acme-corp`
    pub head_repo_owner: String,
    /// Branch being merged
    pub head_branch_name: String,
    /// Branch merged into
    pub base_branch_name: String,
    /// Project name, empty when `atlantis.yaml` does not name one
    pub project_name: String,
    /// Pull request number
    pub pull_num: u64,
    /// Pull request author
    pub pull_author: String,
    /// Project path relative to the repository root, `.` at the root
    pub relative_project_dir: String,
    /// VCS user running the command
    pub username: String,
    /// Extra arguments from the pull request comment
    pub comment_args: CommentArgs,
}

impl RunStep {
    /// Build from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// A required variable that is present but empty is accepted. Only
    /// `PROJECT_NAME` and `COMMENT_ARGS` may be absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                Error::Config(format!("required environment variable {} is not set", key))
            })
        };

        let pull_num_raw = required(vars::PULL_NUM)?;
        let pull_num = pull_num_raw.trim().parse::<u64>().map_err(|_| {
            Error::Config(format!(
                "{} must be a pull request number, got {:?}",
                vars::PULL_NUM,
                pull_num_raw
            ))
        })?;

        let comment_args = match lookup(vars::COMMENT_ARGS) {
            Some(raw) => CommentArgs::decode(&raw)?,
            None => CommentArgs::default(),
        };

        Ok(Self {
            terraform_workspace: required(vars::WORKSPACE)?,
            terraform_version: required(vars::TERRAFORM_VERSION)?,
            absolute_project_dir: required(vars::DIR)?,
            planfile: required(vars::PLANFILE)?,
            base_repo_name: required(vars::BASE_REPO_NAME)?,
            base_repo_owner: required(vars::BASE_REPO_OWNER)?,
            head_repo_name: required(vars::HEAD_REPO_NAME)?,
            head_repo_owner: required(vars::HEAD_REPO_OWNER)?,
            head_branch_name: required(vars::HEAD_BRANCH_NAME)?,
            base_branch_name: required(vars::BASE_BRANCH_NAME)?,
            project_name: lookup(vars::PROJECT_NAME).unwrap_or_default(),
            pull_num,
            pull_author: required(vars::PULL_AUTHOR)?,
            relative_project_dir: required(vars::REPO_REL_DIR)?,
            username: required(vars::USER_NAME)?,
            comment_args,
        })
    }

    /// `owner/name` of the base repository
    pub fn base_repo_full_name(&self) -> String {
        format!("{}/{}", self.base_repo_owner, self.base_repo_name)
    }
}
