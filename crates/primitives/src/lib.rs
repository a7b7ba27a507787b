//! Thor transaction primitives.
//!
//! This crate contains the multi-clause transaction model of the Thor chain: the legacy and
//! dynamic fee bodies, their canonical RLP layouts, signing hashes, signer recovery, fee
//! delegation and intrinsic gas.
//!
//! Encoding goes through the typed profiles of [`thor_rlp`], so every rejected input reports the
//! dotted path of the offending field.
//!
//! ```
//! use thor_primitives::{generate_secret_key, Address, Bytes, Clause, Transaction, TxLegacy, U256};
//!
//! let body = TxLegacy {
//!     chain_tag: 0x27,
//!     clauses: vec![Clause::call(Address::ZERO, U256::from(1), Bytes::new())],
//!     gas: 21_000,
//!     ..Default::default()
//! };
//! let tx = Transaction::new(body).sign(&generate_secret_key()).unwrap();
//!
//! let raw = tx.encode().unwrap();
//! assert_eq!(Transaction::decode(&raw, false).unwrap().origin(), tx.origin());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Derives `serde` support for the body types using camelCase field names.

#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;
mod hash;
mod transaction;

pub use hash::blake2b256;
pub use transaction::{
    intrinsic_gas,
    util::secp256k1::{
        derive_public_key, generate_secret_key, public_key_to_address, recover_public_key,
        recover_signer, sign_message,
    },
    Body, Clause, Reserved, SignatureState, Transaction, TransactionError, TxDynamicFee, TxLegacy,
    TxType,
};

// Re-exports
pub use alloy_primitives::{self, keccak256, Address, Bytes, B256, B64, U256};
pub use secp256k1::{PublicKey, SecretKey};
pub use thor_rlp::{self as rlp, CodecError};
