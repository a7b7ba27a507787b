//! Transaction types.

use crate::{
    blake2b256,
    constants::{DYNAMIC_FEE_TX_TYPE_ID, SIGNATURE_LENGTH},
};
use alloy_primitives::{hex, Address, Bytes, B256};
use secp256k1::SecretKey;
use thor_rlp::{Value, EMPTY_LIST_CODE};
use tracing::{debug, trace};
use util::secp256k1::{derive_public_key, public_key_to_address, recover_signer, sign_message};

pub use body::Body;
pub use clause::Clause;
pub use dynamic_fee::TxDynamicFee;
pub use error::TransactionError;
pub use gas::intrinsic_gas;
pub use legacy::TxLegacy;
pub use reserved::Reserved;
pub use signature::SignatureState;
pub use tx_type::TxType;

/// secp256k1 signing and recovery helpers.
pub(crate) mod util;

mod body;
mod clause;
mod dynamic_fee;
mod error;
mod fields;
mod gas;
mod legacy;
mod profiles;
mod reserved;
mod signature;
mod tx_type;

/// A transaction body together with its optional signature.
///
/// The signature is opaque bytes: 65 bytes for a regular transaction, and for a fee delegated
/// one the origin signature followed by the delegator signature. Recovery only trusts a
/// signature whose length matches the delegation flag, see [`Transaction::signature_state`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Transaction {
    /// The signed content.
    pub body: Body,
    /// Signature over the signing hash, absent until signed.
    pub signature: Option<Bytes>,
}

impl Transaction {
    /// Creates an unsigned transaction.
    pub fn new(body: impl Into<Body>) -> Self {
        Self { body: body.into(), signature: None }
    }

    /// Returns the type of the body.
    pub const fn tx_type(&self) -> TxType {
        self.body.tx_type()
    }

    /// Returns `true` if the body has the fee delegation bit set.
    pub const fn is_delegated(&self) -> bool {
        self.body.is_delegated()
    }

    /// Gas consumed by the body before any execution.
    pub fn intrinsic_gas(&self) -> u64 {
        intrinsic_gas(self.body.clauses())
    }

    /// Returns the state of the attached signature.
    pub fn signature_state(&self) -> SignatureState {
        SignatureState::of(self.signature.as_ref().map(|sig| &sig[..]), self.is_delegated())
    }

    /// Replaces the signature.
    pub fn set_signature(&mut self, signature: impl Into<Bytes>) {
        self.signature = Some(signature.into());
    }

    /// Returns the transaction with `signature` attached.
    pub fn with_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.set_signature(signature);
        self
    }

    /// Hash the origin signs, or with `delegate_for` set, the hash the delegator signs on behalf
    /// of that origin.
    pub fn signing_hash(&self, delegate_for: Option<Address>) -> Result<B256, TransactionError> {
        let hash = blake2b256([self.encode_with(None)?]);
        Ok(match delegate_for {
            Some(origin) => blake2b256([hash.as_slice(), origin.as_slice()]),
            None => hash,
        })
    }

    /// As [`Transaction::signing_hash`], taking the origin as a `0x`-prefixed hex address.
    pub fn signing_hash_for(&self, delegate_for: &str) -> Result<B256, TransactionError> {
        let origin = delegate_for
            .strip_prefix("0x")
            .or_else(|| delegate_for.strip_prefix("0X"))
            .filter(|digits| digits.len() == 40)
            .and_then(|digits| hex::decode(digits).ok())
            .map(|bytes| Address::from_slice(&bytes))
            .ok_or_else(|| TransactionError::InvalidDelegateAddress(delegate_for.to_string()))?;
        self.signing_hash(Some(origin))
    }

    /// Recovers the address that signed the transaction.
    ///
    /// Returns `None` without a well formed signature or if recovery fails.
    pub fn origin(&self) -> Option<Address> {
        let signature = self.well_formed_signature()?;
        self.signing_hash(None)
            .and_then(|hash| recover_signer(&signature[..SIGNATURE_LENGTH], &hash))
            .inspect_err(|err| trace!(target: "thor::tx", %err, "Failed to recover origin"))
            .ok()
    }

    /// Recovers the address that paid for a fee delegated transaction.
    ///
    /// Returns `None` for a transaction without fee delegation, without a well formed signature,
    /// or if recovery fails.
    pub fn delegator(&self) -> Option<Address> {
        if !self.is_delegated() {
            return None
        }
        let signature = self.well_formed_signature()?;
        let origin = self.origin()?;
        self.signing_hash(Some(origin))
            .and_then(|hash| recover_signer(&signature[SIGNATURE_LENGTH..], &hash))
            .inspect_err(|err| trace!(target: "thor::tx", %err, "Failed to recover delegator"))
            .ok()
    }

    /// Transaction id: the hash of the signing hash and the origin.
    ///
    /// Returns `None` whenever [`Transaction::origin`] does.
    pub fn id(&self) -> Option<B256> {
        let origin = self.origin()?;
        let hash = self.signing_hash(None).ok()?;
        Some(blake2b256([hash.as_slice(), origin.as_slice()]))
    }

    /// Signs a transaction without fee delegation with the origin key.
    pub fn sign(self, secret: &SecretKey) -> Result<Self, TransactionError> {
        if self.is_delegated() {
            return Err(TransactionError::DelegationMismatch { delegated: true })
        }
        let signature = sign_message(secret, &self.signing_hash(None)?)?;
        Ok(self.with_signature(signature.to_vec()))
    }

    /// Signs a fee delegated transaction with both the origin and the delegator key.
    pub fn sign_delegated(
        self,
        origin: &SecretKey,
        delegator: &SecretKey,
    ) -> Result<Self, TransactionError> {
        if !self.is_delegated() {
            return Err(TransactionError::DelegationMismatch { delegated: false })
        }
        let origin_address = public_key_to_address(derive_public_key(origin));

        let mut signature = sign_message(origin, &self.signing_hash(None)?)?.to_vec();
        signature.extend(sign_message(delegator, &self.signing_hash(Some(origin_address))?)?);
        Ok(self.with_signature(signature))
    }

    /// Encodes the transaction, including the signature when one is attached.
    ///
    /// Legacy transactions encode as a bare RLP list, dynamic fee transactions as the type byte
    /// followed by the list.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        self.encode_with(self.signature.as_ref())
    }

    /// Decodes a transaction, with `unsigned` telling whether `raw` lacks the signature field.
    ///
    /// The type is told apart by the first byte: an RLP list prefix is a legacy transaction,
    /// [`DYNAMIC_FEE_TX_TYPE_ID`] a dynamic fee one.
    pub fn decode(raw: &[u8], unsigned: bool) -> Result<Self, TransactionError> {
        let (tx_type, payload) = match raw.first() {
            None => return Err(TransactionError::EmptyInput),
            Some(&first) if first >= EMPTY_LIST_CODE => (TxType::Legacy, raw),
            Some(&DYNAMIC_FEE_TX_TYPE_ID) => (TxType::DynamicFee, &raw[1..]),
            Some(&other) => return Err(TransactionError::UnsupportedTransactionType(other)),
        };
        trace!(target: "thor::tx", ?tx_type, unsigned, len = raw.len(), "Decoding transaction");

        Self::decode_payload(tx_type, payload, unsigned).inspect_err(|err| {
            debug!(target: "thor::tx", ?tx_type, %err, "Failed to decode transaction")
        })
    }

    fn decode_payload(
        tx_type: TxType,
        payload: &[u8],
        unsigned: bool,
    ) -> Result<Self, TransactionError> {
        let value = profiles::codec(tx_type, !unsigned).decode(payload)?;
        let mut fields = fields::Fields::new(value, "")?;
        let signature = if unsigned { None } else { Some(fields.buffer("signature")?) };
        let body = Body::from_fields(tx_type, &mut fields)?;
        Ok(Self { body, signature })
    }

    fn encode_with(&self, signature: Option<&Bytes>) -> Result<Vec<u8>, TransactionError> {
        let mut fields = self.body.to_fields()?;
        if let Some(signature) = signature {
            fields.insert("signature".to_string(), Value::Bytes(signature.0.clone()));
        }
        let rlp = profiles::codec(self.tx_type(), signature.is_some())
            .encode(&Value::Struct(fields))?;

        Ok(match self.tx_type() {
            TxType::Legacy => rlp,
            TxType::DynamicFee => {
                let mut out = Vec::with_capacity(1 + rlp.len());
                out.push(DYNAMIC_FEE_TX_TYPE_ID);
                out.extend_from_slice(&rlp);
                out
            }
        })
    }

    fn well_formed_signature(&self) -> Option<&Bytes> {
        self.signature.as_ref().filter(|_| self.signature_state().is_well_formed())
    }
}

impl From<Body> for Transaction {
    fn from(body: Body) -> Self {
        Self::new(body)
    }
}
