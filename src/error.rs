use thiserror::Error;

/// Failures surfaced by the parsing and conversion layers.
///
/// Search and evaluation are total on any well-formed `Position` and never
/// return these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid FEN, {field} field: {message}")]
    InvalidFen {
        field: &'static str,
        message: String,
    },

    #[error("invalid UCI move '{0}'")]
    InvalidUci(String),

    #[error("invalid SAN move '{0}'")]
    InvalidSan(String),

    #[error("ambiguous move '{0}': more than one legal move matches")]
    AmbiguousMove(String),

    #[error("illegal move '{0}': no legal move matches")]
    IllegalMove(String),

    #[error("invalid PGN: {0}")]
    InvalidPgn(String),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl ChessError {
    pub(crate) fn fen(field: &'static str, message: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            field,
            message: message.into(),
        }
    }
}
