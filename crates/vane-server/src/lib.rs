//! Aggregation server for vane.
//!
//! The synchronization kernel of the service: a Lamport-clocked request
//! coordinator over a single-slot record store, exposed through one HTTP
//! endpoint. Publishers PUT a record, consumers GET it back, and every
//! round-trip carries a `Lamport-Clock` header so both sides stay causally
//! ordered without synchronized wall clocks.

pub mod config;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use context::AggregatorContext;
pub use error::{ServerError, ServerResult};
pub use server::AggregationServer;
