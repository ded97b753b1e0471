use crate::item::{ItemService, ItemServiceError, ItemState};
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use reminders_core::{
    CreateItemRequest, ErrorResponse, Item, ItemPatch, ItemResponse, ItemsResponse,
    MessageResponse,
};
use utoipa::OpenApi;

impl IntoResponse for ItemServiceError {
    fn into_response(self) -> Response {
        let (status_code, user_facing_error_message) = match &self {
            ItemServiceError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ItemServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            ItemServiceError::Storage(err) => {
                tracing::error!("Storage failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to access storage".to_string(),
                )
            }
            ItemServiceError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        };

        (
            status_code,
            Json(ErrorResponse::new(user_facing_error_message)),
        )
            .into_response()
    }
}

/// Unwraps a JSON body, turning any rejection into a validation error.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ItemServiceError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ItemServiceError::Validation("Invalid request body".to_string())
    })
}

/// Handler for GET /items - Returns all items, newest first.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "Successfully retrieved items", body = ItemsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn list_items_handler(
    State(state): State<ItemState>,
) -> Result<Json<ItemsResponse>, ItemServiceError> {
    let service = ItemService::new(state.gateway.as_ref());
    let items = service.list_items().await?;
    Ok(Json(ItemsResponse { items }))
}

/// Handler for POST /items - Creates a new item.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Blank text or malformed body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn create_item_handler(
    State(state): State<ItemState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ItemServiceError> {
    let request = json_body(payload)?;
    let service = ItemService::new(state.gateway.as_ref());
    let item = service.create_item(&request.text).await?;
    tracing::info!("Created item {}", item.id);
    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

/// Handler for PUT /items/{id} - Changes the text and/or completion of an item.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/items/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the item to update")
    ),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid ID or malformed body", body = ErrorResponse),
        (status = 404, description = "No item with this ID", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn update_item_handler(
    State(state): State<ItemState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Json<ItemResponse>, ItemServiceError> {
    let patch = json_body(payload)?;
    let service = ItemService::new(state.gateway.as_ref());
    let item = service.update_item(&id, patch).await?;
    Ok(Json(ItemResponse { item }))
}

/// Handler for DELETE /items/{id} - Removes an item if it exists.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the item to delete")
    ),
    responses(
        (status = 200, description = "Item deleted, or it did not exist", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn delete_item_handler(
    State(state): State<ItemState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ItemServiceError> {
    let service = ItemService::new(state.gateway.as_ref());
    service.delete_item(&id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted successfully".to_string(),
    }))
}

/// OpenAPI description of the item endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        list_items_handler,
        create_item_handler,
        update_item_handler,
        delete_item_handler
    ),
    components(schemas(
        Item,
        ItemPatch,
        CreateItemRequest,
        ItemsResponse,
        ItemResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags((name = "Items", description = "Reminder list management"))
)]
pub struct ItemsApiDoc;

/// Creates and returns the items API router.
pub fn create_api_router(state: ItemState) -> Router {
    Router::new()
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route(
            "/items/{id}",
            put(update_item_handler).delete(delete_item_handler),
        )
        .with_state(state)
}
