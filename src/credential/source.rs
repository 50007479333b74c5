//! Token sources: where bearer tokens come from.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::error::{CredentialError, CredentialResult};

/// Timeout for a single identity service call.
const TOKEN_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Something that can mint a fresh bearer token.
///
/// One call is one attempt: implementations must not retry internally.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch a new token from the identity service.
    async fn fetch_token(&self) -> CredentialResult<String>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// OAuth client-credentials flow against the workspace token endpoint.
///
/// This is the machine-to-machine flow used by service principals:
/// `POST {host}/oidc/v1/token` with `grant_type=client_credentials` and
/// `scope=all-apis`, authenticated with the client id and secret.
pub struct WorkspaceOAuthSource {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl WorkspaceOAuthSource {
    /// Create a source for the given workspace host (with scheme).
    pub fn new(
        workspace_host: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> CredentialResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TOKEN_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token_url: format!("{}/oidc/v1/token", workspace_host.trim_end_matches('/')),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        })
    }

    /// Endpoint tokens are requested from.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

#[async_trait]
impl TokenSource for WorkspaceOAuthSource {
    async fn fetch_token(&self) -> CredentialResult<String> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "all-apis")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::rejected(status.as_u16(), body));
        }

        let token: TokenResponse = response.json().await?;
        if token.access_token.trim().is_empty() {
            return Err(CredentialError::EmptyToken);
        }
        Ok(token.access_token)
    }

    fn name(&self) -> &'static str {
        "workspace-oauth"
    }
}

/// A fixed token, such as a personal access token.
///
/// Refreshing returns the same value; the pool is still recycled on the
/// refresh schedule so long-lived connections get replaced.
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn fetch_token(&self) -> CredentialResult<String> {
        if self.token.trim().is_empty() {
            return Err(CredentialError::EmptyToken);
        }
        Ok(self.token.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Pick a token source from the environment.
///
/// `DATABRICKS_CLIENT_ID` + `DATABRICKS_CLIENT_SECRET` select the OAuth
/// flow; otherwise `DATABRICKS_TOKEN` is used as a static token.
pub fn token_source_from_env(workspace_host: &str) -> CredentialResult<Arc<dyn TokenSource>> {
    token_source_from_lookup(workspace_host, |name| {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    })
}

fn token_source_from_lookup<F>(
    workspace_host: &str,
    lookup: F,
) -> CredentialResult<Arc<dyn TokenSource>>
where
    F: Fn(&str) -> Option<String>,
{
    match (
        lookup("DATABRICKS_CLIENT_ID"),
        lookup("DATABRICKS_CLIENT_SECRET"),
    ) {
        (Some(id), Some(secret)) => Ok(Arc::new(WorkspaceOAuthSource::new(
            workspace_host,
            id,
            secret,
        )?)),
        _ => match lookup("DATABRICKS_TOKEN") {
            Some(token) => Ok(Arc::new(StaticTokenSource::new(token))),
            None => Err(CredentialError::NotConfigured),
        },
    }
}
