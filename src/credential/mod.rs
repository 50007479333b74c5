//! Workspace credentials.
//!
//! The database password is a short-lived bearer token issued by the
//! workspace identity service. [`CredentialProvider`] caches the current
//! token and fetches a new one from its [`TokenSource`] once the refresh
//! interval has passed. Each refresh bumps the credential's generation,
//! which the connection pool uses to decide when to rebuild.

pub mod clock;
pub mod error;
pub mod provider;
pub mod source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CredentialError, CredentialResult};
pub use provider::{Credential, CredentialProvider, DEFAULT_REFRESH_INTERVAL};
pub use source::{token_source_from_env, StaticTokenSource, TokenSource, WorkspaceOAuthSource};
