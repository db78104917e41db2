//! SQLite data access: the [`Entity`]/[`Record`] mapping traits, a small
//! [`QueryBuilder`] for filtered selects, and the generic [`SqlxRepository`].

pub mod entity;
pub mod error;
pub mod query;
pub mod repository;

pub use entity::{Entity, Record, SqliteQuery};
pub use error::{DataError, SqlxErrorExt, SqlxResult};
pub use query::QueryBuilder;
pub use repository::{Repository, SqlxRepository};
