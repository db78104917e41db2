use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::Message;
use crate::data::{Entity, Repository, SqlxRepository};
use crate::error::HttpError;
use crate::models::{User, UserIn};
use crate::params::PathParam;
use crate::state::AppState;
use crate::validation::Validated;

type Users = State<SqlxRepository<User>>;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list).post(create))
        .route("/users/{id}", get(get_by_id).put(update).delete(delete))
}

async fn list(State(users): Users) -> Result<Json<Vec<User>>, HttpError> {
    Ok(Json(users.find_all().await?))
}

async fn get_by_id(
    State(users): Users,
    PathParam(id): PathParam<i64>,
) -> Result<Json<User>, HttpError> {
    users
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound("User not found".into()))
}

async fn create(
    State(users): Users,
    Validated(body): Validated<UserIn>,
) -> Result<Json<User>, HttpError> {
    let user = users.insert(&body).await?;
    tracing::info!(id = user.id, "user created");
    Ok(Json(user))
}

/// Replaces every field. A missing row is not an error; the submitted
/// representation is echoed back either way.
async fn update(
    State(users): Users,
    PathParam(id): PathParam<i64>,
    Validated(body): Validated<UserIn>,
) -> Result<Json<User>, HttpError> {
    if !users.update(id, &body).await? {
        tracing::warn!(id, "update matched no user row");
    }
    Ok(Json(User::from_record(id, &body)))
}

async fn delete(
    State(users): Users,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Message>, HttpError> {
    let removed = users.delete(id).await?;
    tracing::info!(id, removed, "user delete");
    Ok(Json(Message::new("User deleted")))
}
