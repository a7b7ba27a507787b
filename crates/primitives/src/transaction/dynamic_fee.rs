use super::{Clause, Reserved};
use alloy_primitives::{B256, B64, U256};

/// Dynamic fee transaction, priced by a fee cap and a priority fee.
///
/// Shares every field with [`TxLegacy`](super::TxLegacy) except the pricing, which replaces
/// `gas_price_coef`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxDynamicFee {
    /// Last byte of the genesis block id of the target chain.
    pub chain_tag: u8,
    /// First 8 bytes of the id of the block this transaction refers to.
    pub block_ref: B64,
    /// Number of blocks after `block_ref` the transaction stays valid.
    pub expiration: u32,
    /// Calls and contract creations, executed in order.
    pub clauses: Vec<Clause>,
    /// Max Priority fee that transaction is paying
    ///
    /// This is also known as `GasTipCap`
    pub max_priority_fee_per_gas: U256,
    /// A maximum of the fee per gas the sender is willing to pay.
    ///
    /// This is also known as `GasFeeCap`
    pub max_fee_per_gas: U256,
    /// Gas limit.
    pub gas: u64,
    /// Id of a transaction that must be executed first.
    pub depends_on: Option<B256>,
    /// Arbitrary value chosen by the sender.
    pub nonce: u64,
    /// Feature bits and extension entries.
    pub reserved: Reserved,
}
