//! Git-provider resource client
//!
//! Repository, branch, and microagent listings, keyed by `(owner, repo)`
//! pairs parsed from `owner/repo[/subpath]` full-name strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, check};

/// A parsed `owner/repo[/subpath]` full name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
    pub subpath: Option<String>,
}

impl FromStr for RepoName {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut parts = input.splitn(3, '/');
        let owner = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default();
        if owner.is_empty() || name.is_empty() {
            return Err(Error::InvalidRepoName(input.to_string()));
        }
        let subpath = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            subpath,
        })
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)?;
        if let Some(subpath) = &self.subpath {
            write!(f, "/{}", subpath)?;
        }
        Ok(())
    }
}

impl RepoName {
    /// The `owner/repo` pair without any subpath.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A repository visible to the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub git_provider: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub stargazers_count: Option<u32>,
    #[serde(default)]
    pub pushed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A branch of a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub protected: bool,
}

/// A repository-scoped knowledge snippet consumed by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Microagent {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Client for the Git-provider REST resource.
pub struct GitClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitClient {
    /// Create a new Git-provider client against an HTTP base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// List repositories visible to the authenticated user.
    pub async fn repositories(&self) -> Result<Vec<Repository>> {
        let url = format!("{}/api/user/repositories", self.base_url);
        tracing::debug!("listing repositories from {}", url);
        let response = check(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    /// List branches of one repository.
    pub async fn branches(&self, repo: &RepoName) -> Result<Vec<Branch>> {
        let url = format!("{}/api/user/repository/branches", self.base_url);
        let response = check(
            self.client
                .get(&url)
                .query(&[("repository", repo.full_name())])
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    /// List microagents attached to one repository.
    pub async fn microagents(&self, repo: &RepoName) -> Result<Vec<Microagent>> {
        let url = format!(
            "{}/api/user/repository/{}/{}/microagents",
            self.base_url, repo.owner, repo.name
        );
        let response = check(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }
}
