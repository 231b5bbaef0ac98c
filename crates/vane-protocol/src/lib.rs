//! Wire model for the vane aggregation service.
//!
//! Defines the transport-independent request/response shapes exchanged
//! between the aggregator's coordinator and its HTTP boundary, the status
//! vocabulary with its HTTP mapping, and the `Lamport-Clock` header both
//! sides use to synchronize their logical clocks.

pub mod message;

pub use message::{
    parse_clock_header, Request, RequestKind, Response, Status, LAMPORT_CLOCK_HEADER, RECORD_PATH,
};
