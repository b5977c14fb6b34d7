//! Link targets
//!
//! Relative URLs the view hands to its renderer. Workspace-scoped paths
//! live under `/locations/<repo address>`; asset pages under `/assets/`.

use std::fmt::{self, Display, Formatter};

use asset_model::{AssetKey, RepositoryRef};
use serde::{Deserialize, Serialize};
use urlencoding::encode;

/// Repository name used when a location hosts a single unnamed repository
pub const DEFAULT_REPOSITORY_NAME: &str = "__repository__";

/// Resolved repository address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoAddress {
    /// Repository name
    pub name: String,
    /// Code location name
    pub location: String,
}

impl RepoAddress {
    /// Build an address, `None` unless both parts are non-empty
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let location = location.into();
        if name.is_empty() || location.is_empty() {
            return None;
        }
        Some(Self { name, location })
    }

    /// Resolve the fetched repository, if any
    #[must_use]
    pub fn resolve(repository: Option<&RepositoryRef>) -> Option<Self> {
        repository.and_then(|repo| Self::new(repo.name.clone(), repo.location_name.clone()))
    }

    /// URL form: `name@location`, or just `location` for the default repository
    #[must_use]
    pub fn as_url_segment(&self) -> String {
        if self.name == DEFAULT_REPOSITORY_NAME {
            encode(&self.location).into_owned()
        } else {
            format!("{}@{}", encode(&self.name), encode(&self.location))
        }
    }

    /// Workspace-scoped path; `path` must start with `/`
    #[must_use]
    pub fn workspace_path(&self, path: &str) -> String {
        format!("/locations/{}{}", self.as_url_segment(), path)
    }
}

impl Display for RepoAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.location)
    }
}

/// Direction of a lineage view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineageScope {
    Upstream,
    Downstream,
}

impl LineageScope {
    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::Downstream => "downstream",
        }
    }
}

/// Asset detail page: `/assets/<seg>/<seg>`
#[must_use]
pub fn asset_path(key: &AssetKey) -> String {
    let mut path = String::from("/assets");
    for segment in key.iter() {
        path.push('/');
        path.push_str(&encode(segment));
    }
    path
}

/// Lineage view of an asset in one direction
#[must_use]
pub fn lineage_path(key: &AssetKey, scope: LineageScope) -> String {
    format!(
        "{}?view=lineage&lineageScope={}",
        asset_path(key),
        scope.as_str()
    )
}

/// Resource detail page in the owning repository
#[must_use]
pub fn resource_path(address: &RepoAddress, resource_key: &str) -> String {
    address.workspace_path(&format!("/resources/{}", encode(resource_key)))
}

/// Job page in the owning repository
#[must_use]
pub fn job_path(address: &RepoAddress, job_name: &str) -> String {
    address.workspace_path(&format!("/jobs/{}", encode(job_name)))
}
