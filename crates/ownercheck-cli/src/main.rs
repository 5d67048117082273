#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{ArgAction, Parser};
use ownercheck_core::approval::CHECKING_MSG;
use ownercheck_core::config::DEFAULT_API_URL;
use ownercheck_core::retry::DEFAULT_ATTEMPTS;
use ownercheck_core::{check_approval, Approval, CheckConfig, Error, RetryPolicy, RunStep};
use std::io::Write;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ownercheck",
    version,
    about = "Atlantis custom run command to check if a GitHub PR is approved by a CODEOWNER",
    disable_version_flag = true
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// GitHub token for the search API
    #[arg(long, env = "ATLANTIS_GH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "ATLANTIS_GH_API_URL")]
    api_url: Option<String>,

    /// Search attempts before giving up
    #[arg(long, env = "OWNERCHECK_ATTEMPTS", default_value_t = DEFAULT_ATTEMPTS)]
    attempts: u32,

    /// Milliseconds to wait between search attempts
    #[arg(long, env = "OWNERCHECK_RETRY_DELAY_MS", default_value_t = 0)]
    retry_delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, env = "OWNERCHECK_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Extra arguments from the run step, ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    passthrough: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let stdout = std::io::stdout();
    let code = run(cli, |key| std::env::var(key).ok(), &mut stdout.lock());
    std::process::exit(code);
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Filter empty string from Option (Atlantis may export empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn build_config(cli: &Cli) -> Result<CheckConfig, Error> {
    let retry = RetryPolicy::new(cli.attempts, Duration::from_millis(cli.retry_delay_ms))?;
    let config = CheckConfig::new(clean_opt(&cli.token).map(str::to_string))?
        .with_api_url(clean_opt(&cli.api_url).unwrap_or(DEFAULT_API_URL))
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_retry(retry);
    Ok(config)
}

/// Run the check and map the outcome to an exit code.
///
/// Status lines go to `out`; fatal errors go to stderr.
fn run<F, W>(cli: Cli, lookup: F, out: &mut W) -> i32
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    match check(&cli, lookup, out) {
        Ok(outcome) => {
            let _ = writeln!(out, "{}", outcome.message());
            outcome.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn check<F, W>(cli: &Cli, lookup: F, out: &mut W) -> Result<Approval, Error>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    if !cli.passthrough.is_empty() {
        tracing::debug!(args = ?cli.passthrough, "ignoring extra arguments");
    }

    let step = RunStep::from_lookup(lookup)?;
    let config = build_config(cli)?;
    tracing::debug!(
        ?config,
        repo = %step.base_repo_full_name(),
        pull = step.pull_num,
        comment_args = ?step.comment_args,
        "run step loaded"
    );

    let _ = writeln!(out, "{}", CHECKING_MSG);
    let _ = out.flush();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(format!("failed to create runtime: {e}")))?;

    rt.block_on(check_approval(&step, &config))
}
