use crate::types::{Header, Item};
use bytes::{Buf, Bytes};

/// Deepest list nesting [`Item::decode`] will follow before giving up.
pub const MAX_DEPTH: usize = 128;

/// A type that can be read back from a single RLP item.
pub trait Decodable: Sized {
    /// Decodes one item from the front of `buf`, advancing it past the consumed bytes.
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError>;
}

/// Errors raised by the byte level decoder.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    LeadingZero,
    InputTooShort,
    NonCanonicalSingleByte,
    NonCanonicalSize,
    DepthLimitExceeded,
    TrailingBytes,
    Custom(&'static str),
}

impl std::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::LeadingZero => write!(f, "leading zero"),
            DecodeError::InputTooShort => write!(f, "input too short"),
            DecodeError::NonCanonicalSingleByte => write!(f, "non-canonical single byte"),
            DecodeError::NonCanonicalSize => write!(f, "non-canonical size"),
            DecodeError::DepthLimitExceeded => write!(f, "max depth exceeded"),
            DecodeError::TrailingBytes => write!(f, "invalid remainder"),
            DecodeError::Custom(err) => write!(f, "{err}"),
        }
    }
}

impl Header {
    /// Returns the decoded header.
    ///
    /// Returns an error if the given `buf`'s len is less than the expected payload.
    pub fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        if !buf.has_remaining() {
            return Err(DecodeError::InputTooShort)
        }

        let b = buf[0];
        let h: Self = {
            if b < 0x80 {
                Self { list: false, payload_length: 1 }
            } else if b < 0xB8 {
                buf.advance(1);
                let h = Self { list: false, payload_length: b as usize - 0x80 };

                if h.payload_length == 1 {
                    if !buf.has_remaining() {
                        return Err(DecodeError::InputTooShort)
                    }
                    if buf[0] < 0x80 {
                        return Err(DecodeError::NonCanonicalSingleByte)
                    }
                }

                h
            } else if b < 0xC0 {
                buf.advance(1);
                let payload_length = decode_long_length(buf, b as usize - 0xB7)?;
                Self { list: false, payload_length }
            } else if b < 0xF8 {
                buf.advance(1);
                Self { list: true, payload_length: b as usize - 0xC0 }
            } else {
                buf.advance(1);
                let payload_length = decode_long_length(buf, b as usize - 0xF7)?;
                Self { list: true, payload_length }
            }
        };

        if buf.remaining() < h.payload_length {
            return Err(DecodeError::InputTooShort)
        }

        Ok(h)
    }
}

fn decode_long_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize, DecodeError> {
    if buf.len() < len_of_len {
        return Err(DecodeError::InputTooShort)
    }
    let payload_length = usize::try_from(u64::from_be_bytes(
        static_left_pad(&buf[..len_of_len]).ok_or(DecodeError::LeadingZero)?,
    ))
    .map_err(|_| DecodeError::Custom("Input too big"))?;
    buf.advance(len_of_len);
    if payload_length < 56 {
        return Err(DecodeError::NonCanonicalSize)
    }
    Ok(payload_length)
}

fn static_left_pad<const LEN: usize>(data: &[u8]) -> Option<[u8; LEN]> {
    if data.len() > LEN {
        return None
    }

    let mut v = [0; LEN];

    if data.is_empty() {
        return Some(v)
    }

    if data[0] == 0 {
        return None
    }

    v[LEN - data.len()..].copy_from_slice(data);
    Some(v)
}

impl Decodable for Item {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        decode_item(buf, 0)
    }
}

fn decode_item(buf: &mut &[u8], depth: usize) -> Result<Item, DecodeError> {
    let h = Header::decode(buf)?;
    if !h.list {
        let to = Bytes::copy_from_slice(&buf[..h.payload_length]);
        buf.advance(h.payload_length);
        return Ok(Item::Bytes(to))
    }

    if depth >= MAX_DEPTH {
        return Err(DecodeError::DepthLimitExceeded)
    }

    let payload_view = &mut &buf[..h.payload_length];
    let mut items = Vec::new();
    while !payload_view.is_empty() {
        items.push(decode_item(payload_view, depth + 1)?);
    }
    buf.advance(h.payload_length);

    Ok(Item::List(items))
}

/// Decodes `data` as exactly one item; any bytes left after it are an error.
pub fn decode<T: Decodable>(data: &[u8]) -> Result<T, DecodeError> {
    let mut buf = data;
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(DecodeError::TrailingBytes)
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode;
    use core::fmt::Debug;
    use hex_literal::hex;

    fn check_decode<'a, T, IT>(fixtures: IT)
    where
        T: Decodable + PartialEq + Debug,
        IT: IntoIterator<Item = (Result<T, DecodeError>, &'a [u8])>,
    {
        for (expected, mut input) in fixtures {
            assert_eq!(T::decode(&mut input), expected);
            if expected.is_ok() {
                assert_eq!(input, &[]);
            }
        }
    }

    fn leaf(bytes: &[u8]) -> Item {
        Item::from(bytes)
    }

    /// `depth` list headers wrapped around an empty list.
    fn nested_lists(depth: usize) -> Vec<u8> {
        let mut headers = Vec::with_capacity(depth);
        let mut payload_length = 1;
        for _ in 0..depth {
            let header = Header { list: true, payload_length };
            payload_length += header.length();
            headers.push(header);
        }

        let mut out = Vec::with_capacity(payload_length);
        for header in headers.iter().rev() {
            header.encode(&mut out);
        }
        out.push(0xC0);
        out
    }

    #[test]
    fn rlp_items() {
        check_decode(vec![
            (Ok(leaf(&[])), &hex!("80")[..]),
            (Ok(leaf(&hex!("7B"))), &hex!("7B")[..]),
            (Ok(Item::List(vec![])), &hex!("C0")[..]),
            (Ok(Item::List(vec![leaf(&hex!("00")), leaf(&hex!("ABBA"))])), &hex!("C40082ABBA")[..]),
            (
                Ok(Item::List(vec![Item::List(vec![]), Item::List(vec![Item::List(vec![])])])),
                &hex!("C3C0C1C0")[..],
            ),
            (Err(DecodeError::NonCanonicalSingleByte), &hex!("8105")[..]),
            (Err(DecodeError::NonCanonicalSize), &hex!("B8020004")[..]),
            (Err(DecodeError::InputTooShort), &hex!("8BFFFFFFFFFFFFFFFFFF7C")[..]),
            (Err(DecodeError::InputTooShort), &hex!("C3C0C1")[..]),
            (Err(DecodeError::LeadingZero), &hex!("B900F4")[..]),
            (Err(DecodeError::InputTooShort), &hex!("")[..]),
        ])
    }

    #[test]
    fn nested_item_must_fit_its_list() {
        // the inner list claims 2 bytes but the outer list only has room for 1
        assert_eq!(decode::<Item>(&hex!("C2C2C0")), Err(DecodeError::InputTooShort));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(decode::<Item>(&hex!("C000")), Err(DecodeError::TrailingBytes));
        assert_eq!(decode::<Item>(&hex!("8180")), Ok(leaf(&hex!("80"))));
    }

    #[test]
    fn long_payload_roundtrip() {
        let item = Item::List(vec![leaf(&[0x42; 100]), Item::List(vec![leaf(&[0x01; 60]); 10])]);
        let encoded = encode(&item);
        assert_eq!(decode::<Item>(&encoded), Ok(item));
    }

    #[test]
    fn nesting_up_to_max_depth_decodes() {
        let input = nested_lists(MAX_DEPTH - 1);
        let mut item = decode::<Item>(&input).unwrap();
        for _ in 0..MAX_DEPTH - 1 {
            item = item.as_list().unwrap()[0].clone();
        }
        assert_eq!(item, Item::List(vec![]));

        let input = nested_lists(MAX_DEPTH);
        assert_eq!(decode::<Item>(&input), Err(DecodeError::DepthLimitExceeded));
    }

    #[test]
    fn deeply_nested_list_is_rejected() {
        let input = nested_lists(20_000);
        assert_eq!(decode::<Item>(&input), Err(DecodeError::DepthLimitExceeded));
    }
}
