pub(crate) mod secp256k1 {
    use crate::{constants::SIGNATURE_LENGTH, TransactionError};
    use ::secp256k1::{
        ecdsa::{RecoverableSignature, RecoveryId},
        Message, PublicKey, SecretKey, SECP256K1,
    };
    use alloy_primitives::{keccak256, Address, B256};

    /// Recovers the public key that produced the 65-byte recoverable signature `sig` over `msg`.
    ///
    /// Fails with [`TransactionError::InvalidSignature`] if the signature is not 65 bytes long or
    /// its recovery id is neither 0 nor 1.
    pub fn recover_public_key(sig: &[u8], msg: &B256) -> Result<PublicKey, TransactionError> {
        let sig: &[u8; SIGNATURE_LENGTH] =
            sig.try_into().map_err(|_| TransactionError::InvalidSignature)?;
        if sig[64] > 1 {
            return Err(TransactionError::InvalidSignature)
        }

        let sig =
            RecoverableSignature::from_compact(&sig[0..64], RecoveryId::from_i32(sig[64] as i32)?)?;
        Ok(SECP256K1.recover_ecdsa(&Message::from_digest_slice(msg.as_slice())?, &sig)?)
    }

    /// Recovers the address of the signer using secp256k1 pubkey recovery.
    ///
    /// Converts the public key into an address by hashing the public key with keccak256.
    pub fn recover_signer(sig: &[u8], msg: &B256) -> Result<Address, TransactionError> {
        recover_public_key(sig, msg).map(public_key_to_address)
    }

    /// Signs message with the given secret key.
    /// Returns the 65-byte recoverable signature `r ‖ s ‖ recovery id`.
    pub fn sign_message(
        secret: &SecretKey,
        message: &B256,
    ) -> Result<[u8; SIGNATURE_LENGTH], TransactionError> {
        let s = SECP256K1
            .sign_ecdsa_recoverable(&Message::from_digest_slice(message.as_slice())?, secret);
        let (rec_id, data) = s.serialize_compact();

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature[..64].copy_from_slice(&data);
        signature[64] = rec_id.to_i32() as u8;
        Ok(signature)
    }

    /// Converts a public key into an address by hashing the encoded public key with keccak256.
    pub fn public_key_to_address(public: PublicKey) -> Address {
        // strip out the first byte because that should be the SECP256K1_TAG_PUBKEY_UNCOMPRESSED
        // tag returned by libsecp's uncompressed pubkey serialization
        let hash = keccak256(&public.serialize_uncompressed()[1..]);
        Address::from_slice(&hash[12..])
    }

    /// Derives the public key of `secret`.
    pub fn derive_public_key(secret: &SecretKey) -> PublicKey {
        PublicKey::from_secret_key(SECP256K1, secret)
    }

    /// Generates a random secret key from the thread local RNG.
    pub fn generate_secret_key() -> SecretKey {
        SecretKey::new(&mut ::secp256k1::rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::secp256k1;
    use crate::TransactionError;
    use alloy_primitives::{Address, B256};
    use assert_matches::assert_matches;
    use hex_literal::hex;

    #[test]
    fn sanity_ecrecover_call() {
        let sig = hex!("650acf9d3f5f0a2c799776a1254355d5f4061762a237396a99a0e0e3fc2bcd6729514a0dacb2e623ac4abd157cb18163ff942280db4d5caad66ddf941ba12e0300");
        let hash = B256::new(hex!(
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad"
        ));
        let out = Address::new(hex!("c08b5542d177ac6686946920409741463a15dddb"));

        assert_eq!(secp256k1::recover_signer(&sig, &hash), Ok(out));
    }

    #[test]
    fn sign_then_recover() {
        let secret = secp256k1::generate_secret_key();
        let msg = B256::repeat_byte(0x42);
        let sig = secp256k1::sign_message(&secret, &msg).unwrap();

        assert!(sig[64] <= 1);
        assert_eq!(
            secp256k1::recover_public_key(&sig, &msg).unwrap(),
            secp256k1::derive_public_key(&secret)
        );
    }

    #[test]
    fn rejects_bad_length_and_recovery_id() {
        let secret = secp256k1::generate_secret_key();
        let msg = B256::repeat_byte(0x01);
        let mut sig = secp256k1::sign_message(&secret, &msg).unwrap();

        assert_matches!(
            secp256k1::recover_signer(&sig[..64], &msg),
            Err(TransactionError::InvalidSignature)
        );
        sig[64] = 2;
        assert_matches!(
            secp256k1::recover_signer(&sig, &msg),
            Err(TransactionError::InvalidSignature)
        );
    }
}
