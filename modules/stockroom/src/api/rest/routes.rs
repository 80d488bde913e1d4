use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount both resources on `router`.
///
/// Static segments (`filter`, `aggregation`) take precedence over `{id}`.
#[allow(clippy::needless_pass_by_value)]
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/items", post(handlers::create_item))
        .route("/items/filter", get(handlers::filter_items))
        .route("/items/aggregation", get(handlers::count_items_by_email))
        .route(
            "/items/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/clock-in", post(handlers::create_clock_in))
        .route("/clock-in/filter", get(handlers::filter_clock_ins))
        .route(
            "/clock-in/{id}",
            get(handlers::get_clock_in)
                .put(handlers::update_clock_in)
                .delete(handlers::delete_clock_in),
        )
        .layer(Extension(service))
}
