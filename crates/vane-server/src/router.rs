use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use vane_protocol::RECORD_PATH;

use crate::context::AggregatorContext;
use crate::handler;

/// Build the axum router for the aggregation endpoint.
///
/// One logical endpoint: GET and PUT on [`RECORD_PATH`]. Every other method
/// on that path, and every other path, falls back to the unsupported
/// handler so the clock still advances before the 400.
pub fn build_router(ctx: Arc<AggregatorContext>) -> Router {
    Router::new()
        .route(
            RECORD_PATH,
            get(handler::get_record)
                .put(handler::put_record)
                .fallback(handler::unsupported),
        )
        .fallback(handler::unsupported)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
