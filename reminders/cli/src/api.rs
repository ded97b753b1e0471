//! HTTP access to the reminders item endpoints.

use async_trait::async_trait;
use reminders_core::{
    CreateItemRequest, ErrorResponse, Item, ItemPatch, ItemResponse, ItemsResponse,
    MessageResponse,
};
use serde::de::DeserializeOwned;

/// Errors that can occur while talking to the item endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("Could not reach the server: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an error status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Operations the client store needs from the item service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemApi: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;
    async fn create_item(&self, text: String) -> Result<Item, ClientError>;
    async fn update_item(&self, id: i32, patch: ItemPatch) -> Result<Item, ClientError>;
    async fn delete_item(&self, id: i32) -> Result<(), ClientError>;
}

/// [`ItemApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpItemApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpItemApi {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decodes a success body, or turns an error status into [`ClientError::Api`]
/// carrying the server's message.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ItemApi for HttpItemApi {
    #[tracing::instrument(skip(self))]
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        let response = self.client.get(self.url("/items")).send().await?;
        let body: ItemsResponse = read_json(response).await?;
        Ok(body.items)
    }

    #[tracing::instrument(skip(self))]
    async fn create_item(&self, text: String) -> Result<Item, ClientError> {
        let response = self
            .client
            .post(self.url("/items"))
            .json(&CreateItemRequest { text })
            .send()
            .await?;
        let body: ItemResponse = read_json(response).await?;
        Ok(body.item)
    }

    #[tracing::instrument(skip(self))]
    async fn update_item(&self, id: i32, patch: ItemPatch) -> Result<Item, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/items/{}", id)))
            .json(&patch)
            .send()
            .await?;
        let body: ItemResponse = read_json(response).await?;
        Ok(body.item)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_item(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/items/{}", id)))
            .send()
            .await?;
        let body: MessageResponse = read_json(response).await?;
        tracing::debug!("{}", body.message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let api = HttpItemApi::new("http://localhost:8080/");

        assert_eq!(api.url("/items"), "http://localhost:8080/items");
    }

    #[test]
    fn api_errors_display_the_server_message() {
        let error = ClientError::Api {
            status: 400,
            message: "text required".to_string(),
        };

        assert_eq!(error.to_string(), "text required");
    }
}
