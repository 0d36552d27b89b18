//! Remote reference commit lookup.
//!
//! Fetches the latest commit on the upstream `master` branch so a daily
//! channel install can tell whether it is behind. Connectivity problems are
//! expected and swallowed; a body that is not a JSON object is not, because
//! it means the API contract changed.

use reqwest::blocking::Client;
use serde_json::{Map, Value};

use crate::error::{Result, VersionError};

/// Update channel that enables the remote lookup.
pub const MASTER_CHANNEL: &str = "master";

/// Path appended to the API base URL.
pub const COMMITS_PATH: &str = "commits/master";

/// Remote commit payload, passed through unvalidated.
pub type RemoteCommit = Map<String, Value>;

/// Outcome of one remote request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The API answered with a JSON object.
    Success(RemoteCommit),
    /// The request or the body transfer failed.
    TransportFailure(reqwest::Error),
    /// The API answered with something that is not a JSON object.
    DecodeFailure(serde_json::Error),
}

impl FetchOutcome {
    /// Collapse to a result: transport failures become an empty commit,
    /// decode failures an error.
    pub fn into_commit(self, url: &str) -> Result<RemoteCommit> {
        match self {
            FetchOutcome::Success(commit) => Ok(commit),
            FetchOutcome::TransportFailure(e) => {
                tracing::warn!("Could not reach {}: {}", url, e);
                Ok(RemoteCommit::new())
            }
            FetchOutcome::DecodeFailure(source) => Err(VersionError::RemoteDecode {
                url: url.to_string(),
                source,
            }),
        }
    }
}

/// Client for the remote commits API.
///
/// # Example
///
/// ```no_run
/// use appversion::remote::RemoteCommitClient;
///
/// let client = RemoteCommitClient::new("https://api.github.com/repos/librenms/librenms/", None)?;
/// let commit = client.fetch().into_commit(client.url())?;
/// println!("{:?}", commit.get("sha"));
/// # Ok::<(), appversion::VersionError>(())
/// ```
pub struct RemoteCommitClient {
    client: Client,
    url: String,
}

impl RemoteCommitClient {
    /// Build a client for `<api_base>commits/master`, optionally through `proxy`.
    ///
    /// Without an explicit proxy the usual proxy environment variables apply.
    pub fn new(api_base: &str, proxy: Option<&str>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("appversion/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: builder.build()?,
            url: format!("{}{}", api_base, COMMITS_PATH),
        })
    }

    /// Full request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue the GET request.
    ///
    /// The HTTP status is not inspected: an error payload that is still a
    /// JSON object is passed through as-is.
    pub fn fetch(&self) -> FetchOutcome {
        tracing::debug!("Fetching remote commit from {}", self.url);

        let body = match self.client.get(&self.url).send().and_then(|r| r.text()) {
            Ok(body) => body,
            Err(e) => return FetchOutcome::TransportFailure(e),
        };

        match serde_json::from_str::<RemoteCommit>(&body) {
            Ok(commit) => FetchOutcome::Success(commit),
            Err(e) => FetchOutcome::DecodeFailure(e),
        }
    }
}
