use crate::Item;
use bytes::Bytes;
use std::collections::BTreeMap;

/// A dynamically shaped value, as accepted by [`pack`](crate::pack) and produced by
/// [`unpack`](crate::unpack).
///
/// Which variants a given field accepts is decided by its [`ScalarKind`](crate::ScalarKind):
/// numbers are `Number` or hex `String`, blobs are hex `String`, nullable blobs may be `Null`,
/// buffers are `Bytes`, and raw fields carry an [`Item`] through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Absent value of a nullable field.
    Null,
    /// Non-negative integer.
    Number(u64),
    /// `0x`-prefixed hex string.
    String(String),
    /// Opaque byte buffer.
    Bytes(Bytes),
    /// Items of an array profile.
    List(Vec<Value>),
    /// Named fields of a struct profile.
    Struct(BTreeMap<String, Value>),
    /// An untouched byte tree node.
    Raw(Item),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
            Self::Raw(_) => "raw",
        }
    }

    /// Builds a struct value from `(name, value)` pairs.
    pub fn structure<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Formats `bytes` as a lowercase `0x`-prefixed hex string value.
    pub fn hex(bytes: impl AsRef<[u8]>) -> Self {
        Self::String(format!("0x{}", hex::encode(bytes)))
    }

    /// Returns the field map of a struct value.
    pub fn as_struct(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the items of a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
