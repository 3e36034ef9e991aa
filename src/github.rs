//! GitHub pull-request lookup and comment posting
//!
//! The comment command runs inside a pull-request workflow, so the
//! owner/repo/number triple normally comes out of the webhook event payload
//! GitHub writes to `$GITHUB_EVENT_PATH`. Events without a pull request
//! (pushes, cron) are not an error; extraction just yields nothing and the
//! caller skips commenting.

use log::warn;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::AssetDeltaError;

/// Default GitHub REST API base
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Identity of the pull request being reported on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    pub number: u64,
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: u64,
    base: EventBase,
}

#[derive(Debug, Deserialize)]
struct EventBase {
    repo: EventRepo,
}

#[derive(Debug, Deserialize)]
struct EventRepo {
    name: String,
    owner: EventOwner,
}

#[derive(Debug, Deserialize)]
struct EventOwner {
    login: String,
}

/// Extract the pull-request identity from a webhook event payload
///
/// Returns `None`, with a logged diagnostic, when the payload has no pull
/// request or does not parse; callers handle absence.
///
/// # Examples
///
/// ```
/// use asset_delta::github::pull_request_from_event;
///
/// let payload = r#"{
///   "pull_request": {
///     "number": 41,
///     "base": { "repo": { "name": "web", "owner": { "login": "acme" } } }
///   }
/// }"#;
///
/// let pr = pull_request_from_event(payload).unwrap();
/// assert_eq!((pr.owner.as_str(), pr.repo.as_str(), pr.number), ("acme", "web", 41));
/// ```
pub fn pull_request_from_event(payload: &str) -> Option<PullRequestRef> {
    let event: EventPayload = match serde_json::from_str(payload) {
        Ok(event) => event,
        Err(err) => {
            warn!("Could not parse event payload: {err}");
            return None;
        }
    };

    match event.pull_request {
        Some(pr) => Some(PullRequestRef {
            owner: pr.base.repo.owner.login,
            repo: pr.base.repo.name,
            number: pr.number,
        }),
        None => {
            warn!("Could not get pull request number from context, exiting");
            None
        }
    }
}

/// A branch tip referenced by a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub name: String,
    /// Commit SHA at the tip
    pub sha: String,
}

/// The pull-request details this tool consumes
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Pull request title
    pub title: Option<String>,
    /// Comparison branch (the PR's head)
    pub head: BranchRef,
    /// Base branch (the PR's target)
    pub base: BranchRef,
}

/// Blocking GitHub REST client
pub struct GithubClient {
    api_base: String,
    token: Option<String>,
    client: Client,
}

impl GithubClient {
    /// Build a client, optionally authenticated with a bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(token: Option<String>) -> Result<Self, AssetDeltaError> {
        let client = Client::builder()
            .user_agent(concat!("asset-delta/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| AssetDeltaError::Http {
                context: "building HTTP client".to_string(),
                source,
            })?;

        Ok(Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token,
            client,
        })
    }

    /// Override the API base URL (for GitHub Enterprise Server)
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    fn request(
        &self,
        build: impl FnOnce(&Client, &str) -> reqwest::blocking::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::blocking::Response, AssetDeltaError> {
        let mut req = build(&self.client, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|source| AssetDeltaError::Http {
            context: url.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(AssetDeltaError::Api { status, body });
        }

        Ok(resp)
    }

    /// Fetch pull-request details
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success API status, or
    /// an unparseable response body.
    pub fn get_pull_request(&self, pr: &PullRequestRef) -> Result<PullRequest, AssetDeltaError> {
        let url = self.url(&format!(
            "/repos/{}/{}/pulls/{}",
            pr.owner, pr.repo, pr.number
        ));
        let resp = self.request(|client, url| client.get(url), &url)?;

        resp.json().map_err(|source| AssetDeltaError::Http {
            context: url,
            source,
        })
    }

    /// Post a comment on the pull request's conversation thread
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success API status.
    pub fn post_comment(&self, pr: &PullRequestRef, body: &str) -> Result<(), AssetDeltaError> {
        let url = self.url(&format!(
            "/repos/{}/{}/issues/{}/comments",
            pr.owner, pr.repo, pr.number
        ));
        self.request(
            |client, url| client.post(url).json(&json!({ "body": body })),
            &url,
        )?;

        Ok(())
    }
}
