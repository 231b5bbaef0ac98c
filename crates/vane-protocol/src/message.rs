use serde::{Deserialize, Serialize};

/// Header carrying a logical clock value, on every request and response.
pub const LAMPORT_CLOCK_HEADER: &str = "Lamport-Clock";

/// The single logical endpoint the aggregator exposes.
pub const RECORD_PATH: &str = "/weather";

/// Abstract request kind: the only two recognized operations, plus a
/// catch-all for everything else.
///
/// Unsupported requests still advance the server's clock -- the clock
/// reflects "a message was received", independent of whether it was
/// understood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Read,
    Write,
    Unsupported,
}

/// A transport-independent request, owned by the coordinator for the
/// duration of one call.
#[derive(Clone, Debug)]
pub struct Request {
    pub kind: RequestKind,
    /// Caller's clock value, if the request carried one.
    pub caller_clock: Option<u64>,
    /// Request body, present on writes.
    pub payload: Option<Vec<u8>>,
}

impl Request {
    pub fn read(caller_clock: Option<u64>) -> Self {
        Self {
            kind: RequestKind::Read,
            caller_clock,
            payload: None,
        }
    }

    pub fn write(caller_clock: Option<u64>, payload: Vec<u8>) -> Self {
        Self {
            kind: RequestKind::Write,
            caller_clock,
            payload: Some(payload),
        }
    }

    pub fn unsupported(caller_clock: Option<u64>) -> Self {
        Self {
            kind: RequestKind::Unsupported,
            caller_clock,
            payload: None,
        }
    }
}

/// Outcome vocabulary for a coordinated request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Success with a body (a fresh record on read).
    Ok,
    /// Success with no body (an accepted write).
    OkEmptyBody,
    /// No record stored, or the stored record was stale and evicted.
    NoContent,
    /// Unrecognized request kind.
    BadRequest,
    /// The write payload was not a well-formed JSON object.
    InvalidPayload,
}

impl Status {
    /// Transport status code for this outcome.
    pub fn http_code(&self) -> u16 {
        match self {
            Status::Ok | Status::OkEmptyBody => 200,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::InvalidPayload => 500,
        }
    }
}

/// A transport-independent response.
///
/// Every response, success or failure, carries the server's post-request
/// clock value so a caller can never be left unsynchronized.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: Status,
    pub payload: Option<Vec<u8>>,
    pub server_clock: u64,
}

impl Response {
    pub fn empty(status: Status, server_clock: u64) -> Self {
        Self {
            status,
            payload: None,
            server_clock,
        }
    }

    pub fn with_payload(status: Status, payload: Vec<u8>, server_clock: u64) -> Self {
        Self {
            status,
            payload: Some(payload),
            server_clock,
        }
    }
}

/// Parse a `Lamport-Clock` header value.
///
/// A missing or unparsable header is treated as absent: garbage at the
/// transport boundary must not take the server down, and the coordinator
/// falls back to a plain tick.
pub fn parse_clock_header(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse().ok())
}
