use crate::constants::{DELEGATED_SIGNATURE_LENGTH, SIGNATURE_LENGTH};

/// Where a transaction stands in its signing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureState {
    /// No signature attached.
    Unsigned,
    /// A 65-byte origin signature on a transaction without fee delegation.
    Signed,
    /// A 130-byte origin and delegator signature on a fee delegated transaction.
    SignedDelegated,
    /// A signature whose length does not match the delegation flag.
    Malformed,
}

impl SignatureState {
    /// Classifies `signature` against the delegation flag of the body.
    pub(crate) fn of(signature: Option<&[u8]>, delegated: bool) -> Self {
        match (signature.map(<[u8]>::len), delegated) {
            (None, _) => Self::Unsigned,
            (Some(SIGNATURE_LENGTH), false) => Self::Signed,
            (Some(DELEGATED_SIGNATURE_LENGTH), true) => Self::SignedDelegated,
            _ => Self::Malformed,
        }
    }

    /// Returns `true` if the signature has the length the delegation flag requires.
    pub const fn is_well_formed(&self) -> bool {
        matches!(self, Self::Signed | Self::SignedDelegated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_length_and_flag() {
        assert_eq!(SignatureState::of(None, true), SignatureState::Unsigned);
        assert_eq!(SignatureState::of(Some(&[0u8; 65][..]), false), SignatureState::Signed);
        assert_eq!(SignatureState::of(Some(&[0u8; 130][..]), true), SignatureState::SignedDelegated);
        assert_eq!(SignatureState::of(Some(&[0u8; 130][..]), false), SignatureState::Malformed);
        assert_eq!(SignatureState::of(Some(&[0u8; 65][..]), true), SignatureState::Malformed);
        assert_eq!(SignatureState::of(Some(&[][..]), false), SignatureState::Malformed);
    }
}
