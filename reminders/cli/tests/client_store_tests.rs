use reminders_cli::{ClientError, ClientStore, HttpItemApi, ItemApi};
use reminders_core::{Item, ItemPatch};
use reminders_server::item::gateway::MemoryTaskGateway;
use reminders_server::web::create_app;
use std::future::IntoFuture;
use std::sync::Arc;

/// Serves a fresh in-memory app on an ephemeral port and returns its base URL.
async fn spawn_server() -> String {
    let app = create_app(Arc::new(MemoryTaskGateway::new()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(axum::serve(listener, app).into_future());
    format!("http://{}", address)
}

#[tokio::test]
async fn store_follows_server_through_add_toggle_delete() {
    let base_url = spawn_server().await;
    let mut store = ClientStore::new(HttpItemApi::new(base_url));

    store.load().await;
    assert!(store.state().items.is_empty());

    store.add("  Buy milk ").await;
    store.add("Call mom").await;
    let ids: Vec<i32> = store.state().items.iter().map(|item| item.id).collect();
    assert_eq!(ids.len(), 2);
    assert_eq!(store.state().items[0].text, "Call mom");
    assert_eq!(store.state().items[1].text, "Buy milk");

    let milk = ids[1];
    store.toggle(milk).await;
    assert_eq!(store.state().find(milk), Some(&Item::new(milk, "Buy milk", true)));

    store.delete(ids[0]).await;
    assert_eq!(store.state().error, None);

    let local = store.state().items.clone();
    store.load().await;
    assert_eq!(store.state().items, local);
    assert_eq!(local, vec![Item::new(milk, "Buy milk", true)]);
}

#[tokio::test]
async fn store_surfaces_server_validation_message() {
    let base_url = spawn_server().await;
    let mut store = ClientStore::new(HttpItemApi::new(base_url));
    store.load().await;

    store.add("   ").await;

    assert!(store.state().items.is_empty());
    assert_eq!(
        store.state().error.as_deref(),
        Some("Failed to add item: text required")
    );
}

#[tokio::test]
async fn http_api_reports_status_and_message() {
    let base_url = spawn_server().await;
    let api = HttpItemApi::new(base_url);

    let result = api.update_item(999, ItemPatch::with_completed(true)).await;

    match result {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Item not found");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_server_sets_load_banner() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let mut store = ClientStore::new(HttpItemApi::new(format!("http://{}", address)));

    store.load().await;

    assert!(!store.state().loading);
    let error = store.state().error.clone().unwrap_or_default();
    assert!(error.starts_with("Failed to load items: Could not reach the server"));
}
