use crate::api::ItemApi;
use reminders_core::{ItemPatch, ItemsAction, ItemsState};

/// Keeps an [`ItemsState`] in step with the server.
///
/// Local state only changes once the server has answered: successes are
/// applied, failures become the error banner.
pub struct ClientStore<A: ItemApi> {
    api: A,
    state: ItemsState,
}

impl<A: ItemApi> ClientStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ItemsState::new(),
        }
    }

    pub fn state(&self) -> &ItemsState {
        &self.state
    }

    fn dispatch(&mut self, action: ItemsAction) {
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    /// Fetches the item list.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) {
        self.dispatch(ItemsAction::BeginLoad);
        match self.api.list_items().await {
            Ok(items) => self.dispatch(ItemsAction::LoadSucceeded(items)),
            Err(err) => {
                tracing::warn!("Loading items failed: {}", err);
                self.dispatch(ItemsAction::LoadFailed(format!(
                    "Failed to load items: {}",
                    err
                )));
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn add(&mut self, text: &str) {
        match self.api.create_item(text.to_string()).await {
            Ok(item) => self.dispatch(ItemsAction::ItemAdded(item)),
            Err(err) => self.dispatch(ItemsAction::MutationFailed(format!(
                "Failed to add item: {}",
                err
            ))),
        }
    }

    /// Flips the completion state of the item with `id`.
    ///
    /// Does nothing when the item is not in the local list.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&mut self, id: i32) {
        let Some(completed) = self.state.find(id).map(|item| item.completed) else {
            tracing::debug!("Skipping toggle of unknown item {}", id);
            return;
        };
        match self
            .api
            .update_item(id, ItemPatch::with_completed(!completed))
            .await
        {
            Ok(item) => self.dispatch(ItemsAction::ItemUpdated(item)),
            Err(err) => self.dispatch(ItemsAction::MutationFailed(format!(
                "Failed to update item: {}",
                err
            ))),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self, id: i32) {
        match self.api.delete_item(id).await {
            Ok(()) => self.dispatch(ItemsAction::ItemRemoved(id)),
            Err(err) => self.dispatch(ItemsAction::MutationFailed(format!(
                "Failed to delete item: {}",
                err
            ))),
        }
    }

    pub fn dismiss_error(&mut self) {
        self.dispatch(ItemsAction::DismissError);
    }
}
