use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::data::{Entity, Record, SqliteQuery};

// ── Users ──────────────────────────────────────────────────

/// A row of the `users` table.
///
/// The password is stored and returned as plain text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct UserIn {
    #[garde(length(chars, max = 32))]
    pub first_name: String,
    #[garde(length(chars, max = 32))]
    pub last_name: String,
    #[garde(length(chars, max = 128))]
    pub email: String,
    #[garde(length(chars, max = 32))]
    pub password: String,
}

impl UserIn {
    /// The deterministic placeholder user number `i` used for seeding.
    pub fn fake(i: u64) -> Self {
        Self {
            first_name: format!("user{i}"),
            last_name: format!("test{i}"),
            email: format!("test{i}@mail.ru"),
            password: "123qwerty".to_string(),
        }
    }
}

impl Record for UserIn {
    fn columns() -> &'static [&'static str] {
        &["first_name", "last_name", "email", "password"]
    }

    fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.first_name.as_str())
            .bind(self.last_name.as_str())
            .bind(self.email.as_str())
            .bind(self.password.as_str())
    }
}

impl Entity for User {
    type Record = UserIn;

    fn table_name() -> &'static str {
        "users"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "first_name", "last_name", "email", "password"]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_record(id: i64, record: &UserIn) -> Self {
        User {
            id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            password: record.password.clone(),
        }
    }
}

// ── Items ──────────────────────────────────────────────────

/// A row of the `items` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct ItemIn {
    #[garde(length(chars, max = 32))]
    pub name: String,
    #[garde(length(chars, max = 256))]
    pub description: String,
    /// No lower bound; only finite values are stored.
    #[garde(custom(finite))]
    pub price: f64,
}

fn finite(value: &f64, _ctx: &()) -> garde::Result {
    if value.is_finite() {
        Ok(())
    } else {
        Err(garde::Error::new("must be a finite number"))
    }
}

impl Record for ItemIn {
    fn columns() -> &'static [&'static str] {
        &["name", "description", "price"]
    }

    fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.description.as_str())
            .bind(self.price)
    }
}

impl Entity for Item {
    type Record = ItemIn;

    fn table_name() -> &'static str {
        "items"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "description", "price"]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_record(id: i64, record: &ItemIn) -> Self {
        Item {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price,
        }
    }
}

// ── Orders ─────────────────────────────────────────────────

/// A row of the `orders` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub item_id: i64,
    pub order_date: DateTime<Utc>,
    pub status: String,
}

/// Client input for an order.
///
/// `order_date` is ignored on create (the insert time is stored) and
/// defaults to the current time on update.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct OrderIn {
    #[garde(skip)]
    pub user_id: i64,
    #[garde(skip)]
    pub item_id: i64,
    #[serde(default)]
    #[garde(skip)]
    pub order_date: Option<DateTime<Utc>>,
    #[garde(length(chars, max = 32))]
    pub status: String,
}

impl OrderIn {
    /// The record to insert: placed now, whatever the client sent.
    pub fn placed_now(self) -> OrderRecord {
        self.with_date(Utc::now())
    }

    /// The record for a full-row update.
    pub fn for_update(self) -> OrderRecord {
        let date = self.order_date.unwrap_or_else(Utc::now);
        self.with_date(date)
    }

    fn with_date(self, order_date: DateTime<Utc>) -> OrderRecord {
        OrderRecord {
            user_id: self.user_id,
            item_id: self.item_id,
            order_date,
            status: self.status,
        }
    }
}

/// Fully-resolved column values of an order.
#[derive(Clone, Debug)]
pub struct OrderRecord {
    pub user_id: i64,
    pub item_id: i64,
    pub order_date: DateTime<Utc>,
    pub status: String,
}

impl Record for OrderRecord {
    fn columns() -> &'static [&'static str] {
        &["user_id", "item_id", "order_date", "status"]
    }

    fn bind<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.user_id)
            .bind(self.item_id)
            .bind(self.order_date)
            .bind(self.status.as_str())
    }
}

impl Entity for Order {
    type Record = OrderRecord;

    fn table_name() -> &'static str {
        "orders"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "user_id", "item_id", "order_date", "status"]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_record(id: i64, record: &OrderRecord) -> Self {
        Order {
            id,
            user_id: record.user_id,
            item_id: record.item_id,
            order_date: record.order_date,
            status: record.status.clone(),
        }
    }
}

/// Query parameters of `GET /orders`.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    pub user_id: Option<i64>,
    pub item_id: Option<i64>,
}
