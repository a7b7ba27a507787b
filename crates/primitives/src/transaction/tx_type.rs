use crate::{
    constants::{DYNAMIC_FEE_TX_TYPE_ID, LEGACY_TX_TYPE_ID},
    TransactionError,
};

/// Transaction Type
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TxType {
    /// Transaction priced by a gas price coefficient, encoded as a bare RLP list.
    #[default]
    Legacy = LEGACY_TX_TYPE_ID as isize,
    /// Transaction priced by a fee cap and a priority fee, encoded with a type prefix byte.
    DynamicFee = DYNAMIC_FEE_TX_TYPE_ID as isize,
}

impl TxType {
    /// Returns `true` for [`TxType::DynamicFee`].
    pub const fn is_dynamic_fee(&self) -> bool {
        matches!(self, Self::DynamicFee)
    }
}

impl From<TxType> for u8 {
    fn from(value: TxType) -> Self {
        match value {
            TxType::Legacy => LEGACY_TX_TYPE_ID,
            TxType::DynamicFee => DYNAMIC_FEE_TX_TYPE_ID,
        }
    }
}

impl TryFrom<u8> for TxType {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            LEGACY_TX_TYPE_ID => Ok(Self::Legacy),
            DYNAMIC_FEE_TX_TYPE_ID => Ok(Self::DynamicFee),
            other => Err(TransactionError::UnsupportedTransactionType(other)),
        }
    }
}
