//! Connection pool management.
//!
//! A pool is bound to the password it was built with, and the password is
//! a bearer token that rotates. [`PoolManager`] rebuilds the pool whenever
//! the [`CredentialProvider`](crate::credential::CredentialProvider) hands
//! out a new credential generation:
//!
//! ```text
//!   Unconnected ──build──▶ Connected{gen}
//!        ▲                     │ credential gen changed
//!        │ build failed        ▼
//!        └──────────────── Rotating ──build──▶ Connected{gen+1}
//! ```

mod error;
mod manager;
mod postgres;

pub use error::{PoolError, PoolResult};
pub use manager::{PoolFactory, PoolManager, PoolState};
pub use postgres::{PgPoolFactory, PgPoolManager};
