use serde_json::{Map, Value};

use vane_clock::LamportClock;
use vane_protocol::{parse_clock_header, LAMPORT_CLOCK_HEADER, RECORD_PATH};

use crate::error::{ClientError, ClientResult};

/// Acknowledgement of an accepted publish.
#[derive(Clone, Copy, Debug)]
pub struct PublishReceipt {
    /// The client's clock after folding in the server's response value.
    pub clock: u64,
}

/// Outcome of a fetch against the aggregator.
#[derive(Clone, Debug)]
pub enum FetchOutcome {
    /// A fresh record, including its stamped clock field.
    Record {
        fields: Map<String, Value>,
        clock: u64,
    },
    /// The aggregator holds no record (empty, or stale and just evicted).
    Empty { clock: u64 },
}

/// HTTP client for the aggregation server, shared by both peer roles.
///
/// Owns the process's [`LamportClock`]. Every outbound request carries the
/// clock's current value in the `Lamport-Clock` header; every response --
/// success or failure -- is folded back in with `observe`, or a plain
/// `tick` if the server somehow omitted the header.
pub struct AggregatorClient {
    http: reqwest::Client,
    record_url: String,
    clock: LamportClock,
}

impl AggregatorClient {
    /// Create a client for an aggregator at `base_url`
    /// (e.g. `http://127.0.0.1:4567`).
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let record_url = format!("{}{RECORD_PATH}", base_url.as_ref().trim_end_matches('/'));
        Self {
            http: reqwest::Client::new(),
            record_url,
            clock: LamportClock::new(),
        }
    }

    /// This peer's Lamport clock.
    pub fn clock(&self) -> &LamportClock {
        &self.clock
    }

    /// Publish a record, fully replacing whatever the aggregator holds.
    pub async fn publish(&self, fields: &Map<String, Value>) -> ClientResult<PublishReceipt> {
        let response = self
            .http
            .put(&self.record_url)
            .header(LAMPORT_CLOCK_HEADER, self.clock.current())
            .json(fields)
            .send()
            .await?;
        let clock = self.synchronize(&response);

        match response.status().as_u16() {
            200 | 201 => {
                tracing::debug!(clock, "record published");
                Ok(PublishReceipt { clock })
            }
            500 => Err(ClientError::RejectedPayload),
            other => Err(ClientError::UnexpectedStatus(other)),
        }
    }

    /// Fetch the aggregator's current record, if it holds a fresh one.
    pub async fn fetch(&self) -> ClientResult<FetchOutcome> {
        let response = self
            .http
            .get(&self.record_url)
            .header(LAMPORT_CLOCK_HEADER, self.clock.current())
            .send()
            .await?;
        let clock = self.synchronize(&response);

        match response.status().as_u16() {
            200 => {
                let fields: Map<String, Value> = response.json().await?;
                Ok(FetchOutcome::Record { fields, clock })
            }
            204 => Ok(FetchOutcome::Empty { clock }),
            other => Err(ClientError::UnexpectedStatus(other)),
        }
    }

    /// Fold the server's response clock into this peer's clock, returning
    /// the new local value.
    fn synchronize(&self, response: &reqwest::Response) -> u64 {
        let server_clock = parse_clock_header(
            response
                .headers()
                .get(LAMPORT_CLOCK_HEADER)
                .and_then(|value| value.to_str().ok()),
        );
        match server_clock {
            Some(received) => self.clock.observe(received),
            None => self.clock.tick(),
        }
    }
}

impl std::fmt::Debug for AggregatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatorClient")
            .field("record_url", &self.record_url)
            .field("clock", &self.clock.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_url_joins_base_and_path() {
        let client = AggregatorClient::new("http://127.0.0.1:4567");
        assert_eq!(client.record_url, "http://127.0.0.1:4567/weather");

        // A trailing slash on the base must not double up.
        let client = AggregatorClient::new("http://127.0.0.1:4567/");
        assert_eq!(client.record_url, "http://127.0.0.1:4567/weather");
    }

    #[test]
    fn client_clock_starts_at_zero() {
        let client = AggregatorClient::new("http://localhost:4567");
        assert_eq!(client.clock().current(), 0);
    }
}
