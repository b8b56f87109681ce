//! User persistence behind an explicit store interface.
//!
//! The pipeline never touches a connection directly; it receives a
//! [`UserStore`] and calls its batch operations. Two implementations:
//!
//! - [`PgUserStore`] - Postgres via sqlx, the production store
//! - [`MemoryUserStore`] - in-process store for tests and offline use
//!
//! Bulk insert is all-or-nothing: either the whole batch lands or none of
//! it does.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::models::{StoredUser, UserRecord};

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Batch persistence interface for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a batch as one unit, assigning sequential ids.
    /// Returns the number of inserted records.
    async fn bulk_insert(&self, records: Vec<UserRecord>) -> StorageResult<u64>;

    /// Read back the entire stored population, oldest first.
    async fn fetch_all(&self) -> StorageResult<Vec<StoredUser>>;

    /// Total number of stored users.
    async fn count(&self) -> StorageResult<i64>;
}
