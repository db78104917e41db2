use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::data::{Repository, SqlxRepository};
use crate::error::HttpError;
use crate::models::{User, UserIn};
use crate::params::PathParam;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seeded {
    pub created: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/fake_users/{count}", get(create_fake_users))
}

/// Insert `count` placeholder users one statement at a time.
async fn create_fake_users(
    State(users): State<SqlxRepository<User>>,
    PathParam(count): PathParam<u64>,
) -> Result<Json<Seeded>, HttpError> {
    for i in 0..count {
        users.insert(&UserIn::fake(i)).await?;
    }
    tracing::info!(count, "fake users created");
    Ok(Json(Seeded { created: count }))
}
