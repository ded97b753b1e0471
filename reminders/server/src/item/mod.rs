use chrono::Utc;
use reminders_core::{Item, ItemPatch, PatchField};
use std::sync::Arc;

pub mod api;
pub mod gateway;
pub mod mapper;

use gateway::{GatewayError, NewTask, TaskGateway};

/// Shared state handed to the item routes.
#[derive(Clone)]
pub struct ItemState {
    pub gateway: Arc<dyn TaskGateway>,
}

impl ItemState {
    pub fn new(gateway: Arc<dyn TaskGateway>) -> Self {
        Self { gateway }
    }
}

/// Error type for ItemService operations.
#[derive(Debug, thiserror::Error)]
pub enum ItemServiceError {
    /// Represents missing or malformed input.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Represents an update aimed at an id with no matching row.
    #[error("Item with ID {0} not found")]
    NotFound(i32),
    /// Represents a failure inside the persistence gateway.
    #[error("Storage error: {0}")]
    Storage(#[from] GatewayError),
    /// Represents any fault not covered above.
    #[error("Internal error")]
    Internal,
}

/// Parses an item id taken from a request path.
///
/// Only plain positive integers are accepted.
pub fn parse_item_id(raw_id: &str) -> Result<i32, ItemServiceError> {
    match raw_id.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ItemServiceError::Validation("Invalid ID".to_string())),
    }
}

pub struct ItemService<'a> {
    gateway: &'a dyn TaskGateway,
}

impl ItemService<'_> {
    pub fn new(gateway: &dyn TaskGateway) -> ItemService<'_> {
        ItemService { gateway }
    }

    /// Retrieves all items, newest first.
    ///
    /// # Returns
    ///
    /// A `Result` containing the items if successful, or a storage error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ItemServiceError> {
        let items = self
            .gateway
            .list_newest_first()
            .await?
            .into_iter()
            .map(mapper::to_item)
            .collect();
        Ok(items)
    }

    /// Creates a new, not yet completed item.
    ///
    /// # Arguments
    ///
    /// * `text` - The label of the item. Surrounding whitespace is trimmed.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Item`, or a validation error when the
    /// trimmed text is empty. Nothing is written in that case.
    #[tracing::instrument(skip(self))]
    pub async fn create_item(&self, text: &str) -> Result<Item, ItemServiceError> {
        let title = text.trim();
        if title.is_empty() {
            return Err(ItemServiceError::Validation("text required".to_string()));
        }

        let created = self
            .gateway
            .insert(NewTask {
                title: title.to_string(),
                completed: false,
            })
            .await?;
        Ok(mapper::to_item(created))
    }

    /// Applies a partial update to an item.
    ///
    /// # Arguments
    ///
    /// * `raw_id` - The item id as it appeared in the request path.
    /// * `patch` - The fields to change. `text` is stored exactly as sent.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Item`, or `NotFound` if no item has that id.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(
        &self,
        raw_id: &str,
        patch: ItemPatch,
    ) -> Result<Item, ItemServiceError> {
        let id = parse_item_id(raw_id)?;
        if patch.text.is_null() {
            return Err(ItemServiceError::Validation(
                "text must be a string".to_string(),
            ));
        }
        if patch.completed.is_null() {
            return Err(ItemServiceError::Validation(
                "completed must be a boolean".to_string(),
            ));
        }
        if matches!(&patch.text, PatchField::Value(text) if text.trim().is_empty()) {
            // Unlike create, update stores blank text as sent.
            tracing::warn!("Storing blank text for item {}", id);
        }

        let task_patch = mapper::to_patch(patch, Utc::now());
        let updated = self
            .gateway
            .update(id, task_patch)
            .await?
            .ok_or(ItemServiceError::NotFound(id))?;
        Ok(mapper::to_item(updated))
    }

    /// Deletes an item. Deleting an id that does not exist still succeeds.
    ///
    /// # Arguments
    ///
    /// * `raw_id` - The item id as it appeared in the request path.
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(&self, raw_id: &str) -> Result<(), ItemServiceError> {
        let id = parse_item_id(raw_id)?;
        self.gateway.delete(id).await?;
        Ok(())
    }
}
