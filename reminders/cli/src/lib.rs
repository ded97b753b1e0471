pub mod api;
pub mod store;
pub mod view;

pub use api::{ClientError, HttpItemApi, ItemApi};
pub use store::ClientStore;
