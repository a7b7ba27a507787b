//! Protocol constants of Thor transactions.

/// Identifier for legacy transactions, which are sent without a type prefix.
pub const LEGACY_TX_TYPE_ID: u8 = 0;

/// Identifier for dynamic fee transactions, sent as this byte followed by the RLP list.
pub const DYNAMIC_FEE_TX_TYPE_ID: u8 = 0x51;

/// Bit of [`Reserved::features`](crate::Reserved::features) marking a fee delegated transaction.
pub const DELEGATED_MASK: u32 = 1;

/// Length of a single secp256k1 recoverable signature: `r ‖ s ‖ recovery id`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Length of a delegated signature: the origin signature followed by the delegator signature.
pub const DELEGATED_SIGNATURE_LENGTH: usize = SIGNATURE_LENGTH * 2;

/// Base gas charged for every transaction.
pub const TX_GAS: u64 = 5_000;

/// Gas charged for every clause that calls an existing account, and for a transaction without
/// clauses.
pub const CLAUSE_GAS: u64 = 16_000;

/// Gas charged for every clause that creates a contract.
pub const CLAUSE_GAS_CONTRACT_CREATION: u64 = 48_000;

/// Gas charged for every zero byte of clause data.
pub const TX_DATA_ZERO_GAS: u64 = 4;

/// Gas charged for every non-zero byte of clause data.
pub const TX_DATA_NON_ZERO_GAS: u64 = 68;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_clause_totals() {
        assert_eq!(TX_GAS + CLAUSE_GAS, 21_000);
        assert_eq!(TX_GAS + CLAUSE_GAS_CONTRACT_CREATION, 53_000);
        assert_eq!(DELEGATED_SIGNATURE_LENGTH, 130);
    }
}
