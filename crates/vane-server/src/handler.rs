use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response as HttpResponse;

use vane_protocol::{parse_clock_header, Request, Response, Status, LAMPORT_CLOCK_HEADER};

use crate::context::AggregatorContext;
use crate::coordinator;

static CLOCK_HEADER: HeaderName = HeaderName::from_static("lamport-clock");

/// GET on the record endpoint: a Read request.
pub async fn get_record(
    State(ctx): State<Arc<AggregatorContext>>,
    headers: HeaderMap,
) -> HttpResponse {
    respond(&ctx, Request::read(caller_clock(&headers)))
}

/// PUT on the record endpoint: a Write request.
pub async fn put_record(
    State(ctx): State<Arc<AggregatorContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> HttpResponse {
    respond(&ctx, Request::write(caller_clock(&headers), body.to_vec()))
}

/// Any other method or path. Still routed through the coordinator so the
/// clock advances before the request is rejected.
pub async fn unsupported(
    State(ctx): State<Arc<AggregatorContext>>,
    headers: HeaderMap,
) -> HttpResponse {
    respond(&ctx, Request::unsupported(caller_clock(&headers)))
}

fn caller_clock(headers: &HeaderMap) -> Option<u64> {
    parse_clock_header(
        headers
            .get(LAMPORT_CLOCK_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
}

fn respond(ctx: &AggregatorContext, request: Request) -> HttpResponse {
    let response = match coordinator::dispatch(ctx, &request) {
        Ok(response) => response,
        Err(e) => {
            // Backend failure (e.g. file I/O). The caller still gets the
            // current clock so it can re-synchronize.
            tracing::error!(error = %e, kind = ?request.kind, "request failed");
            Response::empty(Status::InvalidPayload, ctx.clock.current())
        }
    };
    into_http(response)
}

fn into_http(response: Response) -> HttpResponse {
    let has_body = response.payload.is_some();
    let mut http = HttpResponse::new(Body::from(response.payload.unwrap_or_default()));
    *http.status_mut() = http_status(response.status);
    http.headers_mut()
        .insert(CLOCK_HEADER.clone(), HeaderValue::from(response.server_clock));
    if has_body {
        http.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    http
}

fn http_status(status: Status) -> StatusCode {
    match status {
        Status::Ok | Status::OkEmptyBody => StatusCode::OK,
        Status::NoContent => StatusCode::NO_CONTENT,
        Status::BadRequest => StatusCode::BAD_REQUEST,
        Status::InvalidPayload => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
