//! Comment command implementation
//!
//! Handles `asset-delta comment`: render the diff report and post it as a
//! pull-request comment. The target pull request comes from `--repo`/`--pr`
//! or, in a workflow, from the webhook event payload.

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use log::warn;

use crate::cmd::diff::load_diff;
use crate::error::AssetDeltaError;
use crate::fmt::{BALLOON, CHECKMARK};
use crate::github::{pull_request_from_event, GithubClient, PullRequestRef};
use crate::report::render_report;

fn parse_repo(repo: &str) -> Result<(String, String)> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => bail!("--repo must be OWNER/NAME, got '{repo}'"),
    }
}

/// Resolve the target pull request from flags or the event payload
///
/// Returns `Ok(None)` when the workflow event carries no pull request; the
/// original tool treats that as "nothing to do", not a failure.
fn resolve_pull_request(
    event: Option<&str>,
    repo: Option<&str>,
    pr: Option<u64>,
) -> Result<Option<PullRequestRef>> {
    if let (Some(repo), Some(number)) = (repo, pr) {
        let (owner, name) = parse_repo(repo)?;
        return Ok(Some(PullRequestRef {
            owner,
            repo: name,
            number,
        }));
    }

    let event_path = match event {
        Some(path) => path.to_string(),
        None => match env::var("GITHUB_EVENT_PATH") {
            Ok(path) => path,
            Err(_) => bail!("no pull request given: pass --repo and --pr, or --event"),
        },
    };

    let payload = std::fs::read_to_string(Path::new(&event_path))
        .with_context(|| format!("reading event payload {event_path}"))?;

    Ok(pull_request_from_event(&payload))
}

/// Render the size diff and post it on the pull request
///
/// # Errors
///
/// Returns an error if snapshots cannot be loaded, `GITHUB_TOKEN` is unset,
/// or the API rejects the request. A workflow event without a pull request
/// is not an error; the command logs and exits cleanly.
pub fn cmd_comment(
    base: &str,
    comparison: &str,
    event: Option<&str>,
    repo: Option<&str>,
    pr: Option<u64>,
) -> Result<()> {
    let diff = load_diff(base, comparison)?;
    let report = render_report(&diff);

    let Some(pr_ref) = resolve_pull_request(event, repo, pr)? else {
        warn!("no pull request in workflow context, skipping comment");
        return Ok(());
    };

    let token = env::var("GITHUB_TOKEN").map_err(|_| AssetDeltaError::MissingToken)?;
    let mut client = GithubClient::new(Some(token))?;
    if let Ok(api_base) = env::var("GITHUB_API_URL") {
        client = client.with_api_base(api_base);
    }

    let pull = client.get_pull_request(&pr_ref)?;
    eprintln!(
        "{} Commenting on {}/{}#{} ({} → {})",
        BALLOON,
        pr_ref.owner,
        pr_ref.repo,
        pull.number,
        style(&pull.base.name).cyan(),
        style(&pull.head.name).cyan(),
    );

    client.post_comment(&pr_ref, &report)?;
    eprintln!("{} Posted asset size report", CHECKMARK);

    Ok(())
}
