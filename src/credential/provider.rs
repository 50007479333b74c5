//! Cached bearer token with time-based refresh.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::clock::{Clock, SystemClock};
use super::error::CredentialResult;
use super::source::TokenSource;

/// Default refresh interval (15 minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(900);

/// A bearer token and when it was obtained.
#[derive(Clone)]
pub struct Credential {
    token: String,
    fetched_at: Instant,
    generation: u64,
}

impl Credential {
    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// When the token was fetched.
    pub fn fetched_at(&self) -> Instant {
        self.fetched_at
    }

    /// Refresh counter, starting at 1 for the first token.
    ///
    /// Anything built from a token (such as a connection pool) can compare
    /// generations to know whether it is out of date.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stale only once strictly more than `interval` has passed.
    pub fn is_stale(&self, now: Instant, interval: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) > interval
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("fetched_at", &self.fetched_at)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Hands out a currently valid token, refreshing it when it gets old.
///
/// Refreshes are serialized: callers that arrive while a refresh is in
/// flight wait for it and then reuse its result. A failed refresh is
/// returned to the caller and nothing is cached, so the next call tries
/// again.
pub struct CredentialProvider {
    source: Arc<dyn TokenSource>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    state: Mutex<ProviderState>,
}

#[derive(Default)]
struct ProviderState {
    current: Option<Credential>,
    /// Survives `invalidate()` so generations never repeat.
    generation: u64,
}

impl CredentialProvider {
    /// Create a provider using the system clock.
    pub fn new(source: Arc<dyn TokenSource>, interval: Duration) -> Self {
        Self::with_clock(source, interval, Arc::new(SystemClock))
    }

    /// Create a provider with an explicit clock.
    pub fn with_clock(
        source: Arc<dyn TokenSource>,
        interval: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            clock,
            interval,
            state: Mutex::new(ProviderState::default()),
        }
    }

    /// Refresh interval in use.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Return a fresh credential, fetching a new token when needed.
    pub async fn get_token(&self) -> CredentialResult<Credential> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(credential) = state.current.as_ref() {
            if !credential.is_stale(now, self.interval) {
                return Ok(credential.clone());
            }
        }

        let token = match self.source.fetch_token().await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(source = self.source.name(), error = %err, "token refresh failed");
                return Err(err);
            }
        };

        let credential = Credential {
            token,
            fetched_at: self.clock.now(),
            generation: state.generation + 1,
        };
        tracing::info!(
            source = self.source.name(),
            generation = credential.generation,
            "refreshed workspace token"
        );

        state.generation = credential.generation;
        state.current = Some(credential.clone());
        Ok(credential)
    }

    /// Shorthand for the token string alone.
    pub async fn token(&self) -> CredentialResult<String> {
        Ok(self.get_token().await?.token)
    }

    /// Drop the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        self.state.lock().await.current = None;
    }

    /// Generation of the cached credential, if any, without refreshing.
    pub async fn current_generation(&self) -> Option<u64> {
        self.state.lock().await.current.as_ref().map(|c| c.generation)
    }
}

impl fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("source", &self.source.name())
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
