use thor_rlp::CodecError;

/// Errors raised while encoding, decoding, hashing or signing a
/// [Transaction](crate::Transaction).
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// The body or the raw bytes do not fit the transaction layout.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// The raw input to decode is empty.
    #[error("typed transaction too short")]
    EmptyInput,
    /// The first byte of the raw input is neither a list prefix nor a known type tag.
    #[error("transaction type not supported: {0}")]
    UnsupportedTransactionType(u8),
    /// A signature has the wrong length or an invalid recovery id.
    #[error("invalid signature")]
    InvalidSignature,
    /// The address to compute a delegator signing hash for is not a 20-byte hex address.
    #[error("delegateFor expected address type, got {0:?}")]
    InvalidDelegateAddress(String),
    /// The signing method does not match the delegation flag of the body.
    #[error("transaction is {}delegated", if *delegated { "" } else { "not " })]
    DelegationMismatch { delegated: bool },
    /// The secp256k1 library rejected a key, message or signature.
    #[error(transparent)]
    Secp256k1(#[from] secp256k1::Error),
}
