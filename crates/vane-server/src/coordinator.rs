use vane_protocol::{Request, RequestKind, Response, Status};
use vane_store::{ReadOutcome, StoreError};

use crate::context::AggregatorContext;
use crate::error::ServerResult;

/// Drive one request through the synchronization kernel.
///
/// Stateless across requests: all carried state lives in the shared
/// [`AggregatorContext`]. The clock advances first, for every request --
/// including unsupported ones -- because clock advancement reflects "a
/// message was received", independent of whether it was understood. The
/// response always carries the post-dispatch clock value.
pub fn dispatch(ctx: &AggregatorContext, request: &Request) -> ServerResult<Response> {
    let observed = match request.caller_clock {
        Some(received) => ctx.clock.observe(received),
        None => ctx.clock.tick(),
    };
    tracing::debug!(kind = ?request.kind, clock = observed, "dispatching request");

    let (status, payload) = match request.kind {
        RequestKind::Read => match ctx.store.read(observed)? {
            ReadOutcome::Fresh(record) => (Status::Ok, Some(record.to_bytes()?)),
            ReadOutcome::Empty => (Status::NoContent, None),
        },
        RequestKind::Write => {
            // An absent body is malformed, same as non-object JSON.
            let body = request.payload.as_deref().unwrap_or_default();
            match ctx.store.write(body, observed) {
                Ok(()) => (Status::OkEmptyBody, None),
                Err(StoreError::InvalidPayload(reason)) => {
                    tracing::warn!(%reason, "rejected malformed write");
                    (Status::InvalidPayload, None)
                }
                Err(e) => return Err(e.into()),
            }
        }
        RequestKind::Unsupported => (Status::BadRequest, None),
    };

    Ok(Response {
        status,
        payload,
        server_clock: ctx.clock.current(),
    })
}
