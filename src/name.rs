//! Ledger-native packed account names.

/// Error raised while packing an account name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("character `{0}` is not allowed in account names (allowed: `.`, `1`-`5`, `a`-`z`)")]
    InvalidCharacter(char),

    #[error("name is {0} characters long, names can be at most 13 characters")]
    TooLong(usize),

    #[error("thirteenth character `{0}` must be one of `.`, `1`-`5`, `a`-`j`")]
    InvalidThirteenthCharacter(char),
}

/// Account name packed into the ledger's native 64-bit representation.
///
/// Names are up to 13 characters from the alphabet `.`, `1`-`5`, `a`-`z`,
/// stored 5 bits per character, most significant character first, left
/// aligned within the word. The 4 low bits hold the optional thirteenth
/// character, which is therefore restricted to values 0..=15.
///
/// The encoding is one-way here; the SDK never needs to recover the textual
/// name from a packed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct AccountName(u64);

impl AccountName {
    /// Pack `name` into its 64-bit representation.
    ///
    /// The empty string packs to zero; that is the ledger's null name, not
    /// an error.
    pub fn new(name: &str) -> Result<Self, NameError> {
        let bytes = name.as_bytes();
        if bytes.len() > 13 {
            return Err(NameError::TooLong(bytes.len()));
        }
        if bytes.is_empty() {
            return Ok(Self(0));
        }

        let n = bytes.len().min(12);
        let mut value: u64 = 0;
        for &c in &bytes[..n] {
            value = (value << 5) | char_to_value(c)?;
        }
        // Left-align the packed characters, leaving the 4 low bits for a
        // possible thirteenth character.
        value <<= 4 + 5 * (12 - n as u32);

        if bytes.len() == 13 {
            let v = char_to_value(bytes[12])?;
            if v > 15 {
                return Err(NameError::InvalidThirteenthCharacter(bytes[12] as char));
            }
            value |= v;
        }
        Ok(Self(value))
    }

    /// The packed 64-bit value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

fn char_to_value(c: u8) -> Result<u64, NameError> {
    match c {
        b'.' => Ok(0),
        b'1'..=b'5' => Ok((c - b'0') as u64),
        b'a'..=b'z' => Ok((c - b'a') as u64 + 6),
        _ => Err(NameError::InvalidCharacter(c as char)),
    }
}
