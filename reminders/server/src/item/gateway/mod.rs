//! Persistence contract for reminder rows.
//!
//! The item service only talks to storage through [`TaskGateway`]. Two
//! backends implement it: [`DatabaseTaskGateway`] on top of sea-orm, and
//! [`MemoryTaskGateway`] for runs without a configured database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

mod database;
mod memory;

pub use database::DatabaseTaskGateway;
pub use memory::MemoryTaskGateway;

/// A row of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values supplied by the caller when inserting a row. The gateway assigns
/// `id` and the timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
}

/// Column changes for a filtered update. `None` leaves the column untouched;
/// `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl TaskPatch {
    /// Merges this patch onto `task`.
    pub fn apply(self, mut task: StoredTask) -> StoredTask {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        task.updated_at = self.updated_at;
        task
    }
}

/// Error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Represents a failure reported by the database driver.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Storage operations required by the item service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Returns every row, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<StoredTask>, GatewayError>;

    /// Inserts a row and returns it as stored.
    async fn insert(&self, new_task: NewTask) -> Result<StoredTask, GatewayError>;

    /// Applies `patch` to the row with `id`.
    ///
    /// # Returns
    ///
    /// The updated row, or `None` when no row matched.
    async fn update(&self, id: i32, patch: TaskPatch) -> Result<Option<StoredTask>, GatewayError>;

    /// Deletes the row with `id`. Deleting a missing row is not an error.
    async fn delete(&self, id: i32) -> Result<(), GatewayError>;
}
