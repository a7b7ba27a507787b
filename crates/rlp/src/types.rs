use bytes::Bytes;

/// Prefix of an RLP item: whether it is a list, and how many payload bytes follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// `true` for a list, `false` for a byte string.
    pub list: bool,
    /// Length of the payload following the prefix.
    pub payload_length: usize,
}

/// Prefix of the empty byte string, and the base code of short strings.
pub const EMPTY_STRING_CODE: u8 = 0x80;
/// Prefix of the empty list, and the base code of short lists.
pub const EMPTY_LIST_CODE: u8 = 0xC0;

/// A node of an RLP byte tree.
///
/// This is what the typed codec packs values into before handing them to the byte encoder, and
/// what the byte decoder hands back for unpacking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A byte string leaf.
    Bytes(Bytes),
    /// An ordered list of nested items.
    List(Vec<Item>),
}

impl Item {
    /// Returns the leaf bytes, or `None` for a list.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    /// Returns the nested items, or `None` for a leaf.
    pub fn as_list(&self) -> Option<&[Item]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// Returns `true` if this is a list node.
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<Bytes> for Item {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Item {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl From<&[u8]> for Item {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Self::List(items)
    }
}
