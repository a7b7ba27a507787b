use super::fields::{nullable_value, u256_value, Fields};
use alloy_primitives::{Address, Bytes, U256};
use thor_rlp::{CodecError, Value};

/// A single call or contract creation carried by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Clause {
    /// Recipient of the call, `None` to create a contract.
    pub to: Option<Address>,
    /// Amount of VET transferred, in wei.
    pub value: U256,
    /// Call data, or the init code when creating a contract.
    pub data: Bytes,
}

impl Clause {
    /// Creates a clause calling `to`.
    pub fn call(to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self { to: Some(to), value, data: data.into() }
    }

    /// Creates a clause deploying `code`.
    pub fn create(value: U256, code: impl Into<Bytes>) -> Self {
        Self { to: None, value, data: code.into() }
    }

    /// Returns `true` if this clause creates a contract.
    pub const fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::structure([
            ("to", nullable_value(self.to.map(|to| to.0))),
            ("value", u256_value(self.value)),
            ("data", Value::hex(&self.data)),
        ])
    }

    pub(crate) fn from_value(value: Value, ctx: &str) -> Result<Self, CodecError> {
        let mut fields = Fields::new(value, ctx)?;
        Ok(Self {
            to: fields.nullable_fixed::<20>("to")?.map(Address::from),
            value: fields.uint("value")?,
            data: fields.blob("data")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn value_round_trip() {
        let clause = Clause::call(
            address!("7567d83b7b8d80addcb281a71d54fc7b3364ffed"),
            U256::from(10_000),
            vec![0u8, 0, 0, 0x60, 0x60, 0x60],
        );
        let value = clause.to_value();
        assert_eq!(
            value.as_struct().unwrap()["to"],
            Value::from("0x7567d83b7b8d80addcb281a71d54fc7b3364ffed")
        );
        assert_eq!(Clause::from_value(value, "clauses.#0").unwrap(), clause);
    }

    #[test]
    fn creation_has_null_recipient() {
        let clause = Clause::create(U256::ZERO, Bytes::new());
        assert!(clause.is_contract_creation());
        assert!(clause.to_value().as_struct().unwrap()["to"].is_null());
    }
}
