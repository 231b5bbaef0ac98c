//! Client roles for the vane aggregation service.
//!
//! Both roles -- the content publisher that uploads a record and the
//! consumer that reads it back -- use the same [`AggregatorClient`]: each
//! client process mirrors the aggregator's Lamport clock locally, sending
//! its current value on every request and folding the server's response
//! value back in, so every round-trip advances both sides consistently.

pub mod client;
pub mod error;
pub mod feed;

pub use client::{AggregatorClient, FetchOutcome, PublishReceipt};
pub use error::{ClientError, ClientResult};
pub use feed::{load_feed, parse_feed};
