use crate::{name::NameError, num::InvalidAmount, symbol::SymbolError};

pub type Result<T> = std::result::Result<T, Error>;

/// Error surfaced by payload construction or by the exchange client.
///
/// Validation and encoding failures indicate malformed caller input and are
/// detected before anything leaves the process; none of them are retried.
/// Transport failures come back from the node untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid account name: {0}")]
    Name(#[from] NameError),

    #[error("invalid symbol: {0}")]
    Symbol(#[from] SymbolError),

    #[error("invalid amount: {0}")]
    Amount(#[from] InvalidAmount),

    #[error("missing field `{field}`: {message}")]
    MissingField {
        field: &'static str,
        message: &'static str,
    },

    #[error("invalid node URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node rejected request: {0}")]
    Node(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),
}

impl Error {
    pub(crate) fn missing(field: &'static str, message: &'static str) -> Self {
        Self::MissingField { field, message }
    }

    /// Field name carried by a [`Error::MissingField`], if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. } => Some(field),
            _ => None,
        }
    }
}
