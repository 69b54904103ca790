//! Ledger-native packed currency symbol codes.

/// Error raised while packing a symbol code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("symbol is {0} characters long, symbol codes can be at most 7 characters")]
    TooLong(usize),

    #[error("character `{0}` is not allowed in symbol codes (allowed: `A`-`Z`)")]
    InvalidCharacter(char),
}

/// Currency code packed into the ledger's native 64-bit representation.
///
/// Up to 7 uppercase ASCII letters, one byte of raw ASCII per character,
/// with the first character of the string in the least significant byte
/// ("EOS" packs to 0x53_4F_45).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct SymbolCode(u64);

impl SymbolCode {
    /// Pack `symbol` into its 64-bit representation.
    pub fn new(symbol: &str) -> Result<Self, SymbolError> {
        let bytes = symbol.as_bytes();
        if bytes.len() > 7 {
            return Err(SymbolError::TooLong(bytes.len()));
        }
        let mut value: u64 = 0;
        for &c in bytes.iter().rev() {
            if !c.is_ascii_uppercase() {
                return Err(SymbolError::InvalidCharacter(c as char));
            }
            value = (value << 8) | c as u64;
        }
        Ok(Self(value))
    }

    /// The packed 64-bit value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}
