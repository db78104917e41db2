pub mod item_controller;
pub mod order_controller;
pub mod seed_controller;
pub mod user_controller;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Confirmation body returned by deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Every resource route, still awaiting state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(seed_controller::routes())
        .merge(user_controller::routes())
        .merge(item_controller::routes())
        .merge(order_controller::routes())
}
