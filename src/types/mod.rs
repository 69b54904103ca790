mod action;
mod request;

pub use action::*;
pub use request::*;

use serde::{Serialize, Serializer};

use crate::{name::AccountName, symbol::SymbolCode};

/// Milliseconds since the Unix epoch, as the contract stores timestamps.
pub type TimestampMillis = u64;

/// 64-bit identifier of an order on the exchange contract.
///
/// Derived exactly once, at creation time, from the packed user name, the
/// packed base symbol and the creation timestamp. Every later lifecycle
/// action references the key; nothing ever recomputes or mutates it.
///
/// The three addends wrap modulo 2^64, matching the ledger's native key
/// arithmetic. Uniqueness leans on the millisecond timestamp, not on any
/// collision-freedom of the sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct OrderKey(u64);

impl OrderKey {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Derive the key for a new order.
    pub fn derive(user: AccountName, base: SymbolCode, timestamp: TimestampMillis) -> Self {
        Self(
            user.raw()
                .wrapping_add(base.raw())
                .wrapping_add(timestamp),
        )
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Zero is the contract's null key; no live order carries it.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for OrderKey {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// The node's JSON API exchanges 64-bit integers as decimal strings.
impl Serialize for OrderKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
