use crate::DecodeError;

/// Errors raised while packing or unpacking a value against a [`Profile`](crate::Profile).
///
/// Every variant except [`CodecError::Rlp`] carries the dotted path of the offending field, e.g.
/// `clauses.#1.value`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The value or byte tree does not have the shape the profile expects.
    #[error("{ctx}: {reason}")]
    SchemaMismatch { ctx: String, reason: String },
    /// The bytes are not the unique canonical form of the value.
    #[error("{ctx}: {reason}")]
    NonCanonical { ctx: String, reason: String },
    /// A string is not a well-formed `0x`-prefixed hex string.
    #[error("{ctx}: {reason}")]
    InvalidHex { ctx: String, reason: String },
    /// The byte layer rejected the input.
    #[error("rlp: {0}")]
    Rlp(#[from] DecodeError),
}

impl CodecError {
    /// Shorthand for [`CodecError::SchemaMismatch`].
    pub fn schema(ctx: &str, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch { ctx: ctx.to_string(), reason: reason.into() }
    }

    /// Shorthand for [`CodecError::NonCanonical`].
    pub fn non_canonical(ctx: &str, reason: impl Into<String>) -> Self {
        Self::NonCanonical { ctx: ctx.to_string(), reason: reason.into() }
    }

    /// Shorthand for [`CodecError::InvalidHex`].
    pub fn invalid_hex(ctx: &str, reason: impl Into<String>) -> Self {
        Self::InvalidHex { ctx: ctx.to_string(), reason: reason.into() }
    }

    /// Returns the field path the error was raised at, if any.
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { ctx, .. } |
            Self::NonCanonical { ctx, .. } |
            Self::InvalidHex { ctx, .. } => Some(ctx),
            Self::Rlp(_) => None,
        }
    }
}
