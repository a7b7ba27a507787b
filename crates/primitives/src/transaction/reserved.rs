use crate::constants::DELEGATED_MASK;
use alloy_primitives::Bytes;
use thor_rlp::{CodecError, ScalarKind, Value};

/// Layout of the leading features entry of the reserved list.
const FEATURES: ScalarKind = ScalarKind::numeric(Some(4));

/// Reserved trailer of a transaction body: a feature bit set and opaque extension entries.
///
/// On the wire this is a list whose first entry is the features number and whose remaining
/// entries are `unused`, with trailing empty entries removed. A body without features and
/// extensions is an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Reserved {
    /// Feature bits, see [`DELEGATED_MASK`].
    pub features: u32,
    /// Extension entries not understood by this implementation.
    pub unused: Vec<Bytes>,
}

impl Reserved {
    /// Returns reserved fields with the fee delegation bit set.
    pub const fn delegated() -> Self {
        Self { features: DELEGATED_MASK, unused: Vec::new() }
    }

    /// Returns `true` if the fee delegation bit is set.
    pub const fn is_delegated(&self) -> bool {
        self.features & DELEGATED_MASK == DELEGATED_MASK
    }

    /// Returns the trimmed wire list.
    pub(crate) fn encode(&self) -> Result<Vec<Bytes>, CodecError> {
        let features =
            FEATURES.encode_bytes(&Value::Number(self.features.into()), "reserved.features")?;

        let mut list = Vec::with_capacity(1 + self.unused.len());
        list.push(Bytes::from(features));
        list.extend(self.unused.iter().cloned());
        while list.last().is_some_and(|entry| entry.is_empty()) {
            list.pop();
        }
        Ok(list)
    }

    /// Parses a wire list, rejecting one with a trailing empty entry.
    pub(crate) fn decode(list: Vec<Bytes>) -> Result<Self, CodecError> {
        let Some((features, unused)) = list.split_first() else { return Ok(Self::default()) };
        if list.last().is_some_and(|entry| entry.is_empty()) {
            return Err(CodecError::non_canonical(
                "reserved",
                "invalid reserved fields: not trimmed",
            ))
        }

        let features = match FEATURES.decode_bytes(features, "reserved.features")? {
            Value::Number(n) => u32::try_from(n)
                .map_err(|_| CodecError::schema("reserved.features", "number out of range"))?,
            other => {
                return Err(CodecError::schema(
                    "reserved.features",
                    format!("expected number, got {}", other.type_name()),
                ))
            }
        };
        Ok(Self { features, unused: unused.to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn encode_trims_trailing_empty_entries() {
        assert_eq!(Reserved::default().encode().unwrap(), Vec::<Bytes>::new());
        assert_eq!(Reserved::delegated().encode().unwrap(), vec![Bytes::from(vec![1u8])]);

        let reserved =
            Reserved { features: 0, unused: vec![Bytes::from(vec![2u8]), Bytes::new(), Bytes::new()] };
        assert_eq!(reserved.encode().unwrap(), vec![Bytes::new(), Bytes::from(vec![2u8])]);

        let padded = Reserved { features: 0, unused: vec![Bytes::new(), Bytes::new()] };
        assert_eq!(padded.encode().unwrap(), Reserved::default().encode().unwrap());
    }

    #[test]
    fn decode_rejects_untrimmed_list() {
        assert_matches!(
            Reserved::decode(vec![Bytes::from(vec![1u8]), Bytes::new()]),
            Err(CodecError::NonCanonical { .. })
        );
        assert_matches!(Reserved::decode(vec![Bytes::new()]), Err(CodecError::NonCanonical { .. }));
    }

    #[test]
    fn decode_features_and_unused() {
        assert_eq!(Reserved::decode(vec![]).unwrap(), Reserved::default());

        let reserved = Reserved::decode(vec![Bytes::from(vec![1u8]), Bytes::from(vec![9u8])]).unwrap();
        assert!(reserved.is_delegated());
        assert_eq!(reserved.unused, vec![Bytes::from(vec![9u8])]);

        assert_matches!(
            Reserved::decode(vec![Bytes::from(vec![0u8, 1])]),
            Err(CodecError::NonCanonical { ctx, .. }) if ctx == "reserved.features"
        );
        assert_matches!(
            Reserved::decode(vec![Bytes::from(vec![1u8, 2, 3, 4, 5])]),
            Err(CodecError::NonCanonical { .. })
        );
    }
}
