//! Shared types for the reminders service and its clients.
//!
//! `item` holds the public JSON shapes exchanged over HTTP; `store` holds the
//! client-side state container that mirrors the server's item list.

pub mod item;
pub mod store;

pub use item::{
    CreateItemRequest, ErrorResponse, Item, ItemPatch, ItemResponse, ItemsResponse,
    MessageResponse, PatchField,
};
pub use store::{ItemsAction, ItemsState};
