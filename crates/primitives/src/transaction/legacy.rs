use super::{Clause, Reserved};
use alloy_primitives::{B256, B64};

/// Legacy transaction, priced by a coefficient over the chain's base gas price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxLegacy {
    /// Last byte of the genesis block id of the target chain.
    pub chain_tag: u8,
    /// First 8 bytes of the id of the block this transaction refers to.
    pub block_ref: B64,
    /// Number of blocks after `block_ref` the transaction stays valid.
    pub expiration: u32,
    /// Calls and contract creations, executed in order.
    pub clauses: Vec<Clause>,
    /// Coefficient applied to the base gas price, in units of 1/255.
    pub gas_price_coef: u8,
    /// Gas limit.
    pub gas: u64,
    /// Id of a transaction that must be executed first.
    pub depends_on: Option<B256>,
    /// Arbitrary value chosen by the sender.
    pub nonce: u64,
    /// Feature bits and extension entries.
    pub reserved: Reserved,
}
