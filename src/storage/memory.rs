//! In-process user store for tests and offline runs.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StorageResult;
use crate::models::{StoredUser, UserRecord};

use super::UserStore;

/// [`UserStore`] holding everything in a `RwLock`-guarded vector.
///
/// Ids are assigned sequentially from 1, matching the Postgres store's
/// SERIAL column.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<StoredUser>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn bulk_insert(&self, records: Vec<UserRecord>) -> StorageResult<u64> {
        let mut users = self.users.write().await;
        let now = Utc::now();
        let next_id = users.len() as i32 + 1;

        for (offset, record) in records.iter().enumerate() {
            users.push(StoredUser {
                id: next_id + offset as i32,
                name: record.name.clone(),
                age: record.age,
                address: record.address.clone(),
                additional_info: record.additional_info.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        Ok(records.len() as u64)
    }

    async fn fetch_all(&self) -> StorageResult<Vec<StoredUser>> {
        Ok(self.users.read().await.clone())
    }

    async fn count(&self) -> StorageResult<i64> {
        Ok(self.users.read().await.len() as i64)
    }
}
