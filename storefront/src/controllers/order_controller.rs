use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::data::{Entity, Repository, SqlxRepository};
use crate::error::HttpError;
use crate::models::{Order, OrderFilter, OrderIn};
use crate::params::{PathParam, QueryParams};
use crate::state::AppState;
use crate::validation::Validated;

type Orders = State<SqlxRepository<Order>>;

/// Orders have no delete route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/{id}", get(get_by_id).put(update))
}

/// `user_id` and `item_id` are optional and combine with AND.
async fn list(
    State(orders): Orders,
    QueryParams(filter): QueryParams<OrderFilter>,
) -> Result<Json<Vec<Order>>, HttpError> {
    let query = orders
        .filter()
        .where_eq_opt("user_id", filter.user_id)
        .where_eq_opt("item_id", filter.item_id);
    Ok(Json(orders.find_where(query).await?))
}

async fn get_by_id(
    State(orders): Orders,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Order>, HttpError> {
    orders
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound("Order not found".into()))
}

async fn create(
    State(orders): Orders,
    Validated(body): Validated<OrderIn>,
) -> Result<Json<Order>, HttpError> {
    if body.order_date.is_some() {
        tracing::debug!("client order_date ignored on create");
    }
    let order = orders.insert(&body.placed_now()).await?;
    tracing::info!(id = order.id, user_id = order.user_id, item_id = order.item_id, "order created");
    Ok(Json(order))
}

async fn update(
    State(orders): Orders,
    PathParam(id): PathParam<i64>,
    Validated(body): Validated<OrderIn>,
) -> Result<Json<Order>, HttpError> {
    let record = body.for_update();
    if !orders.update(id, &record).await? {
        tracing::warn!(id, "update matched no order row");
    }
    Ok(Json(Order::from_record(id, &record)))
}
