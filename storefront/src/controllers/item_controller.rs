use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::Message;
use crate::data::{Entity, Repository, SqlxRepository};
use crate::error::HttpError;
use crate::models::{Item, ItemIn};
use crate::params::PathParam;
use crate::state::AppState;
use crate::validation::Validated;

type Items = State<SqlxRepository<Item>>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list).post(create))
        .route("/items/{id}", get(get_by_id).put(update).delete(delete))
}

async fn list(State(items): Items) -> Result<Json<Vec<Item>>, HttpError> {
    Ok(Json(items.find_all().await?))
}

async fn get_by_id(
    State(items): Items,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Item>, HttpError> {
    items
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound("Item not found".into()))
}

async fn create(
    State(items): Items,
    Validated(body): Validated<ItemIn>,
) -> Result<Json<Item>, HttpError> {
    let item = items.insert(&body).await?;
    tracing::info!(id = item.id, "item created");
    Ok(Json(item))
}

async fn update(
    State(items): Items,
    PathParam(id): PathParam<i64>,
    Validated(body): Validated<ItemIn>,
) -> Result<Json<Item>, HttpError> {
    if !items.update(id, &body).await? {
        tracing::warn!(id, "update matched no item row");
    }
    Ok(Json(Item::from_record(id, &body)))
}

async fn delete(
    State(items): Items,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Message>, HttpError> {
    let removed = items.delete(id).await?;
    tracing::info!(id, removed, "item delete");
    Ok(Json(Message::new("Item deleted")))
}
