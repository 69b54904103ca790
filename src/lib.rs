//! Exchange client SDK.
//!
//! # Overview
//!
//! Builds and submits order-lifecycle actions (create, edit, cancel, retire,
//! settle) against an on-chain order-book exchange contract, and queries the
//! contract's public order table.
//!
//! Use [`types::CreateOrder`] and friends to prepare action payloads, then
//! hand them to [`client::Client`] together with an
//! [`client::ActionDispatcher`] implementation that owns signing and
//! broadcast.
//!
//! The crate also exposes the ledger-native encodings the payloads are built
//! from:
//!
//! * [`name::AccountName`] — 5-bit packed account names.
//! * [`symbol::SymbolCode`] — 8-bit packed currency codes.
//! * [`types::OrderKey`] — the 64-bit order identifier derived at creation.
//! * [`num::Formatter`] — exact truncating decimal quantity rendering.
//!
//! See `./tests` for end-to-end payload examples.
//!
//! # Limitations/follow-ups
//!
//! * Transaction signing and broadcast are delegated entirely to the
//!   [`client::ActionDispatcher`] implementation; no signer ships with the
//!   crate.
//!
//! * The order-table query fetches the whole table and filters client-side,
//!   matching the contract's public API. Server-side bounds could cut
//!   transfer size for large books.

pub mod client;
pub mod error;
pub mod name;
pub mod num;
pub mod symbol;
pub mod types;

use url::Url;

/// Node endpoint the exchange contract is reachable through.
#[derive(Clone, Debug)]
pub struct Network {
    protocol: String,
    host: String,
    port: Option<u16>,
}

impl Network {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port,
        }
    }

    /// Plain HTTPS endpoint on the default port.
    pub fn https(host: impl Into<String>) -> Self {
        Self::new("https", host, None)
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// URL of the node's table-row query endpoint.
    pub fn table_rows_url(&self) -> Result<Url, url::ParseError> {
        let base = match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
            None => format!("{}://{}", self.protocol, self.host),
        };
        Url::parse(&base)?.join("/v1/chain/get_table_rows")
    }
}
