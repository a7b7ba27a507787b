//! Signing, recovery and fee delegation of whole transactions.

use alloy_primitives::{address, b256, b64, Address, Bytes, U256};
use assert_matches::assert_matches;
use hex_literal::hex;
use thor_primitives::{
    derive_public_key, generate_secret_key, public_key_to_address, sign_message, Clause, Reserved,
    SecretKey, SignatureState, Transaction, TransactionError, TxDynamicFee, TxLegacy,
};
use thor_tracing::init_test_tracing;

const TO: Address = address!("7567d83b7b8d80addcb281a71d54fc7b3364ffed");

fn secret() -> SecretKey {
    SecretKey::from_slice(&hex!("7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a"))
        .unwrap()
}

fn legacy(reserved: Reserved) -> TxLegacy {
    TxLegacy {
        chain_tag: 1,
        block_ref: b64!("00000000aabbccdd"),
        expiration: 32,
        clauses: vec![
            Clause::call(TO, U256::from(10_000), hex!("000000606060").to_vec()),
            Clause::call(TO, U256::from(20_000), hex!("000000606060").to_vec()),
        ],
        gas_price_coef: 128,
        gas: 21_000,
        depends_on: None,
        nonce: 12_345_678,
        reserved,
    }
}

fn address_of(secret: &SecretKey) -> Address {
    public_key_to_address(derive_public_key(secret))
}

#[test]
fn signed_legacy_golden() {
    init_test_tracing();
    let tx = Transaction::new(legacy(Reserved::default())).sign(&secret()).unwrap();

    let signature = hex!("f76f3c91a834165872aa9464fc55b03a13f46ea8d3b858e528fcceaf371ad6884193c3f313ff8effbb57fe4d1adc13dceb933bedbf9dbb528d2936203d5511df00");
    assert_eq!(tx.signature, Some(Bytes::copy_from_slice(&signature)));
    assert_eq!(tx.signature_state(), SignatureState::Signed);

    let encoded = tx.encode().unwrap();
    assert_eq!(
        encoded,
        [
            hex!("f8970184aabbccdd20f840df947567d83b7b8d80addcb281a71d54fc7b3364ffed82271086000000606060df947567d83b7b8d80addcb281a71d54fc7b3364ffed824e208600000060606081808252088083bc614ec0b841").as_slice(),
            signature.as_slice(),
        ]
        .concat()
    );

    let origin = address_of(&secret());
    assert_eq!(tx.origin(), Some(origin));
    assert_eq!(tx.delegator(), None);
    assert_eq!(
        tx.id(),
        Some(b256!("da90eaea52980bc4bb8d40cb2ff84d78433b3b4a6e7d50b75736c5e3e77b71ec"))
    );
    assert_eq!(tx.id(), Some(tx.signing_hash(Some(origin)).unwrap()));

    let decoded = Transaction::decode(&encoded, false).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.origin(), Some(origin));
}

#[test]
fn tampered_signature_changes_or_loses_origin() {
    init_test_tracing();
    let tx = Transaction::new(legacy(Reserved::default())).sign(&secret()).unwrap();
    let origin = tx.origin();

    let mut signature = tx.signature.clone().unwrap().to_vec();
    signature[10] ^= 0xff;
    let tampered = tx.clone().with_signature(signature);
    assert_ne!(tampered.origin(), origin);

    let mut signature = tx.signature.clone().unwrap().to_vec();
    signature[64] = 2;
    let tampered = tx.with_signature(signature);
    assert_eq!(tampered.origin(), None);
    assert_eq!(tampered.id(), None);
}

#[test]
fn fee_delegation() {
    init_test_tracing();
    let origin = generate_secret_key();
    let delegator = generate_secret_key();
    let tx = Transaction::new(legacy(Reserved::delegated()));

    let signed = tx.clone().sign_delegated(&origin, &delegator).unwrap();
    assert_eq!(signed.signature_state(), SignatureState::SignedDelegated);
    assert_eq!(signed.origin(), Some(address_of(&origin)));
    assert_eq!(signed.delegator(), Some(address_of(&delegator)));

    // the delegator co-signs the hash it is handed for the origin's address
    let origin_sig = sign_message(&origin, &tx.signing_hash(None).unwrap()).unwrap();
    let delegator_hash = tx.signing_hash_for(&format!("{:#x}", address_of(&origin))).unwrap();
    let delegator_sig = sign_message(&delegator, &delegator_hash).unwrap();
    let cosigned = tx.with_signature([origin_sig, delegator_sig].concat());
    assert_eq!(cosigned, signed);

    let decoded = Transaction::decode(&signed.encode().unwrap(), false).unwrap();
    assert_eq!(decoded.delegator(), Some(address_of(&delegator)));
    assert_eq!(decoded.id(), signed.id());
}

#[test]
fn delegation_flag_is_part_of_the_signed_content() {
    let origin = generate_secret_key();
    let delegator = generate_secret_key();
    let signed = Transaction::new(legacy(Reserved::delegated()))
        .sign_delegated(&origin, &delegator)
        .unwrap();

    // flipping the flag off makes the 130-byte signature malformed
    let mut stripped = signed.clone();
    stripped.body = legacy(Reserved::default()).into();
    assert_eq!(stripped.signature_state(), SignatureState::Malformed);
    assert_eq!(stripped.origin(), None);

    // keeping only the origin half is malformed for a delegated body
    let half = signed.signature.clone().unwrap().slice(..65);
    let truncated = signed.with_signature(half);
    assert_eq!(truncated.signature_state(), SignatureState::Malformed);
    assert_eq!(truncated.delegator(), None);
}

#[test]
fn dynamic_fee_sign_and_decode() {
    init_test_tracing();
    let body = TxDynamicFee {
        chain_tag: 0x27,
        block_ref: b64!("00ffecb8ac3142c4"),
        expiration: 720,
        clauses: vec![Clause::create(U256::ZERO, hex!("6080604052").to_vec())],
        max_priority_fee_per_gas: U256::from(1_000_000_000u64),
        max_fee_per_gas: U256::from(10_000_000_000_000u64),
        gas: 90_000,
        depends_on: Some(b256!("a0b1c2d3e4f5a0b1c2d3e4f5a0b1c2d3e4f5a0b1c2d3e4f5a0b1c2d3e4f5a0b1")),
        nonce: 7,
        reserved: Reserved { features: 0, unused: vec![Bytes::from_static(b"ext")] },
    };
    let tx = Transaction::new(body).sign(&secret()).unwrap();
    assert_eq!(tx.intrinsic_gas(), 5_000 + 48_000 + 5 * 68);

    let encoded = tx.encode().unwrap();
    assert_eq!(encoded[0], 0x51);
    let decoded = Transaction::decode(&encoded, false).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.origin(), Some(address_of(&secret())));

    // the unsigned layout drops the trailing signature field
    let unsigned = Transaction { signature: None, ..tx };
    assert_eq!(Transaction::decode(&unsigned.encode().unwrap(), true).unwrap(), unsigned);
    assert_matches!(Transaction::decode(&encoded, true), Err(TransactionError::Codec(_)));
}
