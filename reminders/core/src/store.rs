//! Client-side mirror of the server's item list.
//!
//! `ItemsState` only changes through [`ItemsState::reduce`], so any front end
//! (terminal, browser, test harness) can drive it from the results of its own
//! network calls.

use crate::item::Item;

/// What a client currently knows about the item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsState {
    /// Items in server order, newest first
    pub items: Vec<Item>,
    /// True while the initial list request is in flight
    pub loading: bool,
    /// Banner message for the last failed request, if not yet dismissed
    pub error: Option<String>,
}

/// Transitions applied to [`ItemsState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsAction {
    BeginLoad,
    LoadSucceeded(Vec<Item>),
    LoadFailed(String),
    /// The server confirmed a newly created item.
    ItemAdded(Item),
    /// The server confirmed an update; the local copy with the same id is replaced.
    ItemUpdated(Item),
    /// The server confirmed a delete.
    ItemRemoved(i32),
    MutationFailed(String),
    DismissError,
}

impl ItemsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` and returns the resulting state.
    pub fn reduce(mut self, action: ItemsAction) -> Self {
        match action {
            ItemsAction::BeginLoad => {
                self.loading = true;
            }
            ItemsAction::LoadSucceeded(items) => {
                self.items = items;
                self.loading = false;
            }
            ItemsAction::LoadFailed(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            ItemsAction::ItemAdded(item) => {
                self.items.insert(0, item);
            }
            ItemsAction::ItemUpdated(item) => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                    *existing = item;
                }
            }
            ItemsAction::ItemRemoved(id) => {
                self.items.retain(|item| item.id != id);
            }
            ItemsAction::MutationFailed(message) => {
                self.error = Some(message);
            }
            ItemsAction::DismissError => {
                self.error = None;
            }
        }
        self
    }

    /// Looks up an item by id in the local list.
    pub fn find(&self, id: i32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}
