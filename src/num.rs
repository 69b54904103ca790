//! Exact decimal quantity rendering.

use fastnum::{
    UD128,
    decimal::{Context, RoundingMode},
};

/// The amount is missing, not numeric, or not finite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a finite decimal amount")]
pub struct InvalidAmount(pub String);

/// Renders quantities with a fixed number of decimal places, truncating
/// toward zero.
///
/// The contract compares quantities as exact strings, so digits beyond the
/// asset's precision are dropped (never rounded up) and shorter amounts are
/// padded with trailing zeros. Math runs on 128-bit decimals, keeping
/// magnitudes well past what binary floating point represents exactly.
///
/// The precision is an explicit per-call parameter of the conversion; there
/// is no shared formatting state.
#[derive(Clone, Copy, Debug)]
pub struct Formatter {
    decimals: i16,
}

impl Formatter {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals: decimals as i16,
        }
    }

    /// Parse `raw` and render it with exactly `decimals` places.
    ///
    /// `format("1.999")` at 2 places is `"1.99"`; `format("2")` at 3 places
    /// is `"2.000"`.
    pub fn format(&self, raw: &str) -> Result<String, InvalidAmount> {
        let ctx = Context::default().with_rounding_mode(RoundingMode::Down);
        let value = UD128::from_str(raw.trim(), ctx)
            .map_err(|_| InvalidAmount(raw.to_string()))?;
        if !value.is_finite() {
            return Err(InvalidAmount(raw.to_string()));
        }
        Ok(value.rescale(self.decimals).to_string())
    }

    /// Render `raw` as the ledger's asset string, `"<decimal> <SYMBOL>"`.
    pub fn quantity(&self, raw: &str, symbol: &str) -> Result<String, InvalidAmount> {
        Ok(format!("{} {}", self.format(raw)?, symbol))
    }
}
