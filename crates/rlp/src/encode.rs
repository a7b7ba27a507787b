use crate::types::*;
use auto_impl::auto_impl;
use bytes::{BufMut, Bytes};

fn zeroless_view(v: &impl AsRef<[u8]>) -> &[u8] {
    let v = v.as_ref();
    &v[v.iter().take_while(|&&b| b == 0).count()..]
}

impl Header {
    /// Encodes the header into the `out` buffer.
    pub fn encode(&self, out: &mut dyn BufMut) {
        if self.payload_length < 56 {
            let code = if self.list { EMPTY_LIST_CODE } else { EMPTY_STRING_CODE };
            out.put_u8(code + self.payload_length as u8);
        } else {
            let len_be = self.payload_length.to_be_bytes();
            let len_be = zeroless_view(&len_be);
            let code = if self.list { 0xF7 } else { 0xB7 };
            out.put_u8(code + len_be.len() as u8);
            out.put_slice(len_be);
        }
    }

    /// Returns the length of the encoded header
    pub const fn length(&self) -> usize {
        length_of_length(self.payload_length)
    }
}

/// Returns the number of bytes a header takes for the given payload length.
pub const fn length_of_length(payload_length: usize) -> usize {
    if payload_length < 56 {
        1
    } else {
        1 + 8 - payload_length.leading_zeros() as usize / 8
    }
}

/// A type that can be written out as a single RLP item.
#[auto_impl(&)]
pub trait Encodable {
    /// Appends the encoding of `self` to `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// Returns the length of the encoding in bytes.
    fn length(&self) -> usize {
        let mut out = Vec::new();
        self.encode(&mut out);
        out.len()
    }
}

impl Encodable for [u8] {
    fn length(&self) -> usize {
        let mut len = self.len();
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            len += length_of_length(self.len());
        }
        len
    }

    fn encode(&self, out: &mut dyn BufMut) {
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            Header { list: false, payload_length: self.len() }.encode(out);
        }
        out.put_slice(self);
    }
}

impl<const LEN: usize> Encodable for [u8; LEN] {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

impl Encodable for Bytes {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

impl Encodable for Item {
    fn length(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.length(),
            Self::List(items) => {
                let payload_length = list_payload_length(items);
                length_of_length(payload_length) + payload_length
            }
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(bytes) => bytes.encode(out),
            Self::List(items) => encode_list(items, out),
        }
    }
}

fn list_payload_length<E: Encodable>(items: &[E]) -> usize {
    items.iter().map(Encodable::length).sum()
}

/// Encodes `items` as one RLP list.
pub fn encode_list<E: Encodable>(items: &[E], out: &mut dyn BufMut) {
    Header { list: true, payload_length: list_payload_length(items) }.encode(out);
    for item in items {
        item.encode(out);
    }
}

/// Encodes a single item into a freshly allocated buffer.
pub fn encode<E: Encodable + ?Sized>(value: &E) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn encoded(item: Item) -> Vec<u8> {
        let out = encode(&item);
        assert_eq!(out.len(), item.length(), "length() disagrees with encode()");
        out
    }

    fn leaf(bytes: &[u8]) -> Item {
        Item::from(bytes)
    }

    #[test]
    fn rlp_strings() {
        assert_eq!(encoded(leaf(&hex!(""))), &hex!("80")[..]);
        assert_eq!(encoded(leaf(&hex!("00"))), &hex!("00")[..]);
        assert_eq!(encoded(leaf(&hex!("7B"))), &hex!("7B")[..]);
        assert_eq!(encoded(leaf(&hex!("80"))), &hex!("8180")[..]);
        assert_eq!(encoded(leaf(&hex!("ABBA"))), &hex!("82ABBA")[..]);
    }

    #[test]
    fn rlp_long_string() {
        let payload = [0xAAu8; 60];
        let out = encoded(leaf(&payload));
        assert_eq!(&out[..2], &hex!("B83C")[..]);
        assert_eq!(&out[2..], &payload[..]);

        let payload = vec![0x01u8; 1024];
        let out = encoded(leaf(&payload));
        assert_eq!(&out[..3], &hex!("B90400")[..]);
        assert_eq!(out.len(), 1027);
    }

    #[test]
    fn rlp_lists() {
        assert_eq!(encoded(Item::List(vec![])), &hex!("C0")[..]);
        assert_eq!(
            encoded(Item::List(vec![leaf(&hex!("00")), leaf(&hex!("ABBA"))])),
            &hex!("C40082ABBA")[..]
        );
        assert_eq!(
            encoded(Item::List(vec![Item::List(vec![]), Item::List(vec![Item::List(vec![])])])),
            &hex!("C3C0C1C0")[..]
        );
    }

    #[test]
    fn rlp_long_list() {
        let items = vec![leaf(&[0xFFu8; 20]); 3];
        let out = encoded(Item::List(items));
        assert_eq!(&out[..2], &hex!("F83F")[..]);
    }

    #[test]
    fn header_length_matches_encoding() {
        for payload_length in [0usize, 1, 55, 56, 255, 256, 65_535, 65_536, 1 << 24] {
            let header = Header { list: false, payload_length };
            let mut out = Vec::new();
            header.encode(&mut out);
            assert_eq!(out.len(), header.length(), "payload length {payload_length}");
        }
    }
}
