//! # storefront
//!
//! CRUD HTTP service over three SQLite tables: users, items, and orders
//! referencing both. Built on axum and sqlx.
//!
//! | Method | Path | Effect |
//! |--------|------|--------|
//! | `GET` | `/fake_users/{count}` | insert `count` placeholder users |
//! | `GET` | `/users`, `/items`, `/orders` | list (orders take `user_id`, `item_id`) |
//! | `GET` | `/{resource}/{id}` | fetch one, 404 if absent |
//! | `POST` | `/{resource}` | create, returns the row with its id |
//! | `PUT` | `/{resource}/{id}` | replace every field |
//! | `DELETE` | `/users/{id}`, `/items/{id}` | delete |
//!
//! Trailing slashes are accepted on every path.

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod error;
pub mod health;
pub mod layers;
pub mod models;
pub mod params;
pub mod schema;
pub mod state;
pub mod validation;

pub use app::{connect, router, run};
pub use config::{AppConfig, ConfigError};
pub use error::HttpError;
pub use layers::init_tracing;
pub use state::AppState;
