//! Encoding rules for single fields.

use crate::{CodecError, Item, Value};
use bytes::Bytes;

/// Largest integer [`ScalarKind::Numeric`] decodes to [`Value::Number`]; anything above comes
/// back as a hex string.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// How a single leaf field is turned into bytes and back.
///
/// Each encode produces the unique canonical byte form of the logical value, and each decode
/// rejects byte forms that no encode would have produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Passes the value through untouched, without validation.
    Raw,
    /// A non-negative integer as minimal big-endian bytes, empty for zero.
    Numeric {
        /// Upper bound on the encoded width.
        max_bytes: Option<usize>,
    },
    /// A hex string of exactly `bytes` bytes.
    FixedBlob {
        /// Exact width.
        bytes: usize,
    },
    /// As [`ScalarKind::FixedBlob`], with the empty byte string standing for [`Value::Null`].
    NullableFixedBlob {
        /// Exact width when present.
        bytes: usize,
    },
    /// A fixed width blob stored with its leading zero bytes stripped.
    CompactFixedBlob {
        /// Width after zero padding.
        bytes: usize,
    },
    /// An arbitrary even length hex string.
    VariableBlob {
        /// Upper bound on the width.
        max_bytes: Option<usize>,
    },
    /// An opaque byte buffer, same wire form as [`ScalarKind::VariableBlob`].
    Buffer {
        /// Upper bound on the width.
        max_bytes: Option<usize>,
    },
}

impl ScalarKind {
    /// Integer kind, optionally capped at `max_bytes`.
    pub const fn numeric(max_bytes: Option<usize>) -> Self {
        Self::Numeric { max_bytes }
    }

    /// Fixed width blob kind.
    pub const fn fixed_blob(bytes: usize) -> Self {
        Self::FixedBlob { bytes }
    }

    /// Nullable fixed width blob kind.
    pub const fn nullable_fixed_blob(bytes: usize) -> Self {
        Self::NullableFixedBlob { bytes }
    }

    /// Zero-trimmed fixed width blob kind.
    pub const fn compact_fixed_blob(bytes: usize) -> Self {
        Self::CompactFixedBlob { bytes }
    }

    /// Variable width hex blob kind.
    pub const fn variable_blob(max_bytes: Option<usize>) -> Self {
        Self::VariableBlob { max_bytes }
    }

    /// Byte buffer kind.
    pub const fn buffer(max_bytes: Option<usize>) -> Self {
        Self::Buffer { max_bytes }
    }

    /// Encodes `value` into a byte tree node. Only [`ScalarKind::Raw`] may produce a list.
    pub fn encode(&self, value: &Value, ctx: &str) -> Result<Item, CodecError> {
        let bytes = match *self {
            Self::Raw => {
                return match value {
                    Value::Raw(item) => Ok(item.clone()),
                    Value::Bytes(bytes) => Ok(Item::Bytes(bytes.clone())),
                    other => Err(CodecError::schema(
                        ctx,
                        format!("expected raw item, got {}", other.type_name()),
                    )),
                }
            }
            Self::Numeric { max_bytes } => encode_numeric(value, max_bytes, ctx)?,
            Self::FixedBlob { bytes } => encode_fixed(value, bytes, ctx)?,
            Self::NullableFixedBlob { bytes } => match value {
                Value::Null => Bytes::new(),
                value => encode_fixed(value, bytes, ctx)?,
            },
            Self::CompactFixedBlob { bytes } => {
                let buf = encode_fixed(value, bytes, ctx)?;
                let zeros = buf.iter().take_while(|&&b| b == 0).count();
                buf.slice(zeros..)
            }
            Self::VariableBlob { max_bytes } => {
                let digits = hex_digits(expect_string(value, ctx)?, ctx)?;
                if digits.len() % 2 != 0 {
                    return Err(CodecError::invalid_hex(ctx, "expected even length hex"))
                }
                let buf = decode_hex(digits, ctx)?;
                check_max(buf.len(), max_bytes).map_err(|reason| CodecError::schema(ctx, reason))?;
                buf
            }
            Self::Buffer { max_bytes } => match value {
                Value::Bytes(buf) => {
                    check_max(buf.len(), max_bytes)
                        .map_err(|reason| CodecError::schema(ctx, reason))?;
                    buf.clone()
                }
                other => {
                    return Err(CodecError::schema(
                        ctx,
                        format!("expected bytes, got {}", other.type_name()),
                    ))
                }
            },
        };
        Ok(Item::Bytes(bytes))
    }

    /// Decodes a byte tree node. Every kind except [`ScalarKind::Raw`] requires a leaf.
    pub fn decode(&self, item: &Item, ctx: &str) -> Result<Value, CodecError> {
        let buf = match item {
            Item::Bytes(buf) => buf,
            Item::List(_) if *self == Self::Raw => return Ok(Value::Raw(item.clone())),
            Item::List(_) => return Err(CodecError::schema(ctx, "expected bytes, got list")),
        };

        match *self {
            Self::Raw => Ok(Value::Raw(item.clone())),
            Self::Numeric { max_bytes } => decode_numeric(buf, max_bytes, ctx),
            Self::FixedBlob { bytes } => decode_fixed(buf, bytes, ctx),
            Self::NullableFixedBlob { bytes } => {
                if buf.is_empty() {
                    Ok(Value::Null)
                } else {
                    decode_fixed(buf, bytes, ctx)
                }
            }
            Self::CompactFixedBlob { bytes } => {
                if buf.len() > bytes {
                    return Err(CodecError::non_canonical(
                        ctx,
                        format!("expected less than {bytes} bytes"),
                    ))
                }
                if buf.first() == Some(&0) {
                    return Err(CodecError::non_canonical(
                        ctx,
                        "expected compact blob (no leading zero bytes)",
                    ))
                }
                let mut padded = vec![0u8; bytes - buf.len()];
                padded.extend_from_slice(buf);
                Ok(Value::hex(padded))
            }
            Self::VariableBlob { max_bytes } => {
                check_max(buf.len(), max_bytes)
                    .map_err(|reason| CodecError::non_canonical(ctx, reason))?;
                Ok(Value::hex(buf))
            }
            Self::Buffer { max_bytes } => {
                check_max(buf.len(), max_bytes)
                    .map_err(|reason| CodecError::non_canonical(ctx, reason))?;
                Ok(Value::Bytes(buf.clone()))
            }
        }
    }

    /// Encodes `value` and requires the result to be a leaf.
    pub fn encode_bytes(&self, value: &Value, ctx: &str) -> Result<Bytes, CodecError> {
        match self.encode(value, ctx)? {
            Item::Bytes(bytes) => Ok(bytes),
            Item::List(_) => Err(CodecError::schema(ctx, "expected bytes, got list")),
        }
    }

    /// Decodes a leaf given as plain bytes.
    pub fn decode_bytes(&self, buf: &[u8], ctx: &str) -> Result<Value, CodecError> {
        self.decode(&Item::from(buf), ctx)
    }
}

fn encode_numeric(value: &Value, max_bytes: Option<usize>, ctx: &str) -> Result<Bytes, CodecError> {
    let buf = match value {
        Value::Number(n) => {
            let be = n.to_be_bytes();
            let zeros = be.iter().take_while(|&&b| b == 0).count();
            Bytes::copy_from_slice(&be[zeros..])
        }
        Value::String(s) => {
            let digits = hex_digits(s, ctx).map_err(|_| {
                CodecError::invalid_hex(ctx, "expected non-negative integer in hex string")
            })?;
            if digits.is_empty() {
                return Err(CodecError::invalid_hex(ctx, "expected valid hex string"))
            }
            let digits = digits.trim_start_matches('0');
            if digits.len() % 2 != 0 {
                decode_hex(&format!("0{digits}"), ctx)?
            } else {
                decode_hex(digits, ctx)?
            }
        }
        other => {
            return Err(CodecError::schema(
                ctx,
                format!("expected string or number, got {}", other.type_name()),
            ))
        }
    };
    if let Some(max) = max_bytes {
        if buf.len() > max {
            return Err(CodecError::schema(ctx, format!("expected number in {max} bytes")))
        }
    }
    Ok(buf)
}

fn decode_numeric(buf: &[u8], max_bytes: Option<usize>, ctx: &str) -> Result<Value, CodecError> {
    check_max(buf.len(), max_bytes).map_err(|reason| CodecError::non_canonical(ctx, reason))?;
    if buf.first() == Some(&0) {
        return Err(CodecError::non_canonical(
            ctx,
            "expected canonical integer (no leading zero bytes)",
        ))
    }
    if buf.len() <= 8 {
        let mut be = [0u8; 8];
        be[8 - buf.len()..].copy_from_slice(buf);
        let n = u64::from_be_bytes(be);
        if n <= MAX_SAFE_INTEGER {
            return Ok(Value::Number(n))
        }
    }
    let digits = hex::encode(buf);
    Ok(Value::String(format!("0x{}", digits.trim_start_matches('0'))))
}

fn encode_fixed(value: &Value, bytes: usize, ctx: &str) -> Result<Bytes, CodecError> {
    let digits = hex_digits(expect_string(value, ctx)?, ctx)?;
    if digits.len() != bytes * 2 {
        return Err(CodecError::schema(ctx, format!("expected hex string presents {bytes} bytes")))
    }
    decode_hex(digits, ctx)
}

fn decode_fixed(buf: &[u8], bytes: usize, ctx: &str) -> Result<Value, CodecError> {
    if buf.len() != bytes {
        return Err(CodecError::non_canonical(ctx, format!("expected {bytes} bytes")))
    }
    Ok(Value::hex(buf))
}

fn expect_string<'a>(value: &'a Value, ctx: &str) -> Result<&'a str, CodecError> {
    match value {
        Value::String(s) => Ok(s),
        other => {
            Err(CodecError::schema(ctx, format!("expected hex string, got {}", other.type_name())))
        }
    }
}

/// Strips the `0x` prefix and checks the remainder is made of hex digits only.
fn hex_digits<'a>(s: &'a str, ctx: &str) -> Result<&'a str, CodecError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| CodecError::invalid_hex(ctx, "expected hex string"))?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CodecError::invalid_hex(ctx, "expected hex string"))
    }
    Ok(digits)
}

fn decode_hex(digits: &str, ctx: &str) -> Result<Bytes, CodecError> {
    hex::decode(digits).map(Bytes::from).map_err(|err| CodecError::invalid_hex(ctx, err.to_string()))
}

fn check_max(len: usize, max_bytes: Option<usize>) -> Result<(), String> {
    match max_bytes {
        Some(max) if len > max => Err(format!("expected less than {max} bytes")),
        _ => Ok(()),
    }
}
