//! Wire layouts of the transaction bodies.

use super::TxType;
use once_cell::sync::Lazy;
use thor_rlp::{Codec, Profile, ProfileKind, ScalarKind};

fn clause() -> ProfileKind {
    ProfileKind::Struct(vec![
        Profile::scalar("to", ScalarKind::nullable_fixed_blob(20)),
        Profile::scalar("value", ScalarKind::numeric(Some(32))),
        Profile::scalar("data", ScalarKind::variable_blob(None)),
    ])
}

/// Fields shared by both bodies, with the pricing fields of one body type spliced in after the
/// clauses.
fn body(pricing: Vec<Profile>) -> Profile {
    let mut fields = vec![
        Profile::scalar("chainTag", ScalarKind::numeric(Some(1))),
        Profile::scalar("blockRef", ScalarKind::compact_fixed_blob(8)),
        Profile::scalar("expiration", ScalarKind::numeric(Some(4))),
        Profile::array("clauses", clause()),
    ];
    fields.extend(pricing);
    fields.extend([
        Profile::scalar("gas", ScalarKind::numeric(Some(8))),
        Profile::scalar("dependsOn", ScalarKind::nullable_fixed_blob(32)),
        Profile::scalar("nonce", ScalarKind::numeric(Some(8))),
        Profile::array("reserved", ProfileKind::Scalar(ScalarKind::buffer(None))),
    ]);
    Profile::structure("", fields)
}

fn signature() -> Profile {
    Profile::scalar("signature", ScalarKind::buffer(None))
}

static UNSIGNED_LEGACY: Lazy<Codec> = Lazy::new(|| {
    Codec::new(body(vec![Profile::scalar("gasPriceCoef", ScalarKind::numeric(Some(1)))]))
});

static UNSIGNED_DYNAMIC_FEE: Lazy<Codec> = Lazy::new(|| {
    Codec::new(body(vec![
        Profile::scalar("maxPriorityFeePerGas", ScalarKind::numeric(Some(32))),
        Profile::scalar("maxFeePerGas", ScalarKind::numeric(Some(32))),
    ]))
});

static SIGNED_LEGACY: Lazy<Codec> =
    Lazy::new(|| Codec::new(UNSIGNED_LEGACY.profile().with_field(signature())));

static SIGNED_DYNAMIC_FEE: Lazy<Codec> =
    Lazy::new(|| Codec::new(UNSIGNED_DYNAMIC_FEE.profile().with_field(signature())));

/// Returns the codec of a body of `tx_type`, with or without the trailing signature field.
pub(crate) fn codec(tx_type: TxType, signed: bool) -> &'static Codec {
    match (tx_type, signed) {
        (TxType::Legacy, false) => &UNSIGNED_LEGACY,
        (TxType::Legacy, true) => &SIGNED_LEGACY,
        (TxType::DynamicFee, false) => &UNSIGNED_DYNAMIC_FEE,
        (TxType::DynamicFee, true) => &SIGNED_DYNAMIC_FEE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(codec: &Codec) -> Vec<&str> {
        let ProfileKind::Struct(fields) = &codec.profile().kind else { panic!("expected struct") };
        fields.iter().map(|field| field.name.as_str()).collect()
    }

    #[test]
    fn legacy_field_order() {
        assert_eq!(
            field_names(codec(TxType::Legacy, true)),
            [
                "chainTag",
                "blockRef",
                "expiration",
                "clauses",
                "gasPriceCoef",
                "gas",
                "dependsOn",
                "nonce",
                "reserved",
                "signature"
            ]
        );
    }

    #[test]
    fn dynamic_fee_field_order() {
        assert_eq!(
            field_names(codec(TxType::DynamicFee, false)),
            [
                "chainTag",
                "blockRef",
                "expiration",
                "clauses",
                "maxPriorityFeePerGas",
                "maxFeePerGas",
                "gas",
                "dependsOn",
                "nonce",
                "reserved"
            ]
        );
    }
}
