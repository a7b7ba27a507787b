use alloy_primitives::B256;
use blake2::{digest::consts::U32, Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Computes the 32-byte BLAKE2b digest of the concatenation of `parts`.
///
/// ```
/// use thor_primitives::blake2b256;
///
/// assert_eq!(blake2b256([b"hello ".as_slice(), b"world"]), blake2b256([b"hello world"]));
/// ```
pub fn blake2b256<I, T>(parts: I) -> B256
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part.as_ref());
    }
    B256::from_slice(&hasher.finalize())
}
