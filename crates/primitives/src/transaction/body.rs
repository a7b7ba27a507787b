use super::{
    fields::{nullable_value, u256_value, Fields},
    Clause, Reserved, TxDynamicFee, TxLegacy, TxType,
};
use alloy_primitives::{B256, B64};
use std::collections::BTreeMap;
use thor_rlp::{CodecError, Value};

/// The signed content of a transaction, one variant per [`TxType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Body {
    /// Legacy body, see [`TxLegacy`].
    Legacy(TxLegacy),
    /// Dynamic fee body, see [`TxDynamicFee`].
    DynamicFee(TxDynamicFee),
}

impl Default for Body {
    fn default() -> Self {
        Self::Legacy(TxLegacy::default())
    }
}

impl From<TxLegacy> for Body {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxDynamicFee> for Body {
    fn from(tx: TxDynamicFee) -> Self {
        Self::DynamicFee(tx)
    }
}

impl Body {
    /// Returns the type of this body.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxType::Legacy,
            Self::DynamicFee(_) => TxType::DynamicFee,
        }
    }

    /// Returns the last byte of the genesis block id of the target chain.
    pub const fn chain_tag(&self) -> u8 {
        match self {
            Self::Legacy(tx) => tx.chain_tag,
            Self::DynamicFee(tx) => tx.chain_tag,
        }
    }

    /// Returns the reference block prefix.
    pub const fn block_ref(&self) -> B64 {
        match self {
            Self::Legacy(tx) => tx.block_ref,
            Self::DynamicFee(tx) => tx.block_ref,
        }
    }

    /// Returns the expiration, in blocks after the reference block.
    pub const fn expiration(&self) -> u32 {
        match self {
            Self::Legacy(tx) => tx.expiration,
            Self::DynamicFee(tx) => tx.expiration,
        }
    }

    /// Returns the clauses.
    pub fn clauses(&self) -> &[Clause] {
        match self {
            Self::Legacy(tx) => &tx.clauses,
            Self::DynamicFee(tx) => &tx.clauses,
        }
    }

    /// Returns the gas limit.
    pub const fn gas(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas,
            Self::DynamicFee(tx) => tx.gas,
        }
    }

    /// Returns the id of the transaction this one depends on.
    pub const fn depends_on(&self) -> Option<B256> {
        match self {
            Self::Legacy(tx) => tx.depends_on,
            Self::DynamicFee(tx) => tx.depends_on,
        }
    }

    /// Returns the nonce.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::DynamicFee(tx) => tx.nonce,
        }
    }

    /// Returns the reserved fields.
    pub const fn reserved(&self) -> &Reserved {
        match self {
            Self::Legacy(tx) => &tx.reserved,
            Self::DynamicFee(tx) => &tx.reserved,
        }
    }

    /// Returns `true` if the fee delegation bit is set.
    pub const fn is_delegated(&self) -> bool {
        self.reserved().is_delegated()
    }

    /// Converts the body into the field map of its unsigned profile.
    pub(crate) fn to_fields(&self) -> Result<BTreeMap<String, Value>, CodecError> {
        let reserved = self.reserved().encode()?;
        let mut fields = BTreeMap::from([
            ("chainTag".to_string(), Value::Number(self.chain_tag().into())),
            ("blockRef".to_string(), Value::hex(self.block_ref())),
            ("expiration".to_string(), Value::Number(self.expiration().into())),
            (
                "clauses".to_string(),
                Value::List(self.clauses().iter().map(Clause::to_value).collect()),
            ),
            ("gas".to_string(), Value::Number(self.gas())),
            ("dependsOn".to_string(), nullable_value(self.depends_on())),
            ("nonce".to_string(), Value::Number(self.nonce())),
            (
                "reserved".to_string(),
                Value::List(reserved.into_iter().map(|entry| Value::Bytes(entry.0)).collect()),
            ),
        ]);

        match self {
            Self::Legacy(tx) => {
                fields.insert("gasPriceCoef".to_string(), Value::Number(tx.gas_price_coef.into()));
            }
            Self::DynamicFee(tx) => {
                fields.insert(
                    "maxPriorityFeePerGas".to_string(),
                    u256_value(tx.max_priority_fee_per_gas),
                );
                fields.insert("maxFeePerGas".to_string(), u256_value(tx.max_fee_per_gas));
            }
        }
        Ok(fields)
    }

    /// Reads a body of `tx_type` from decoded fields.
    pub(crate) fn from_fields(tx_type: TxType, fields: &mut Fields) -> Result<Self, CodecError> {
        let chain_tag = fields.uint("chainTag")?;
        let block_ref = fields.fixed::<8>("blockRef")?;
        let expiration = fields.uint("expiration")?;
        let clauses = {
            let (items, ctx) = fields.list("clauses")?;
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Clause::from_value(item, &format!("{ctx}.#{i}")))
                .collect::<Result<Vec<_>, _>>()?
        };
        let gas = fields.uint("gas")?;
        let depends_on = fields.nullable_fixed::<32>("dependsOn")?;
        let nonce = fields.uint("nonce")?;
        let reserved = Reserved::decode(fields.buffers("reserved")?)?;

        Ok(match tx_type {
            TxType::Legacy => Self::Legacy(TxLegacy {
                chain_tag,
                block_ref,
                expiration,
                clauses,
                gas_price_coef: fields.uint("gasPriceCoef")?,
                gas,
                depends_on,
                nonce,
                reserved,
            }),
            TxType::DynamicFee => Self::DynamicFee(TxDynamicFee {
                chain_tag,
                block_ref,
                expiration,
                clauses,
                max_priority_fee_per_gas: fields.uint("maxPriorityFeePerGas")?,
                max_fee_per_gas: fields.uint("maxFeePerGas")?,
                gas,
                depends_on,
                nonce,
                reserved,
            }),
        })
    }
}
