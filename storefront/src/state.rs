use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::data::SqlxRepository;
use crate::models::{Item, Order, User};

/// Shared handler state. Every field is a cheap handle onto the same pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: SqlxRepository<User>,
    pub items: SqlxRepository<Item>,
    pub orders: SqlxRepository<Order>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: SqlxRepository::new(pool.clone()),
            items: SqlxRepository::new(pool.clone()),
            orders: SqlxRepository::new(pool.clone()),
            pool,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for SqlxRepository<User> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for SqlxRepository<Item> {
    fn from_ref(state: &AppState) -> Self {
        state.items.clone()
    }
}

impl FromRef<AppState> for SqlxRepository<Order> {
    fn from_ref(state: &AppState) -> Self {
        state.orders.clone()
    }
}
