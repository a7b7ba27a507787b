//! Conversions between typed transaction fields and the dynamic [`Value`] tree the codec works on.

use alloy_primitives::{hex, Bytes, FixedBytes, U256};
use std::collections::BTreeMap;
use thor_rlp::{CodecError, Value};

/// Formats an unsigned integer as a numeric value.
pub(crate) fn u256_value(n: U256) -> Value {
    Value::hex(n.to_be_bytes::<32>())
}

/// Formats an optional fixed blob, `None` becoming [`Value::Null`].
pub(crate) fn nullable_value<const N: usize>(blob: Option<FixedBytes<N>>) -> Value {
    blob.map_or(Value::Null, Value::hex)
}

/// Named fields of a decoded struct value, consumed field by field.
#[derive(Debug)]
pub(crate) struct Fields {
    ctx: String,
    map: BTreeMap<String, Value>,
}

impl Fields {
    pub(crate) fn new(value: Value, ctx: &str) -> Result<Self, CodecError> {
        match value {
            Value::Struct(map) => Ok(Self { ctx: ctx.to_string(), map }),
            other => Err(CodecError::schema(
                ctx,
                format!("expected struct, got {}", other.type_name()),
            )),
        }
    }

    fn take(&mut self, name: &str) -> Result<(Value, String), CodecError> {
        let ctx = if self.ctx.is_empty() { name.to_string() } else { format!("{}.{name}", self.ctx) };
        match self.map.remove(name) {
            Some(value) => Ok((value, ctx)),
            None => Err(CodecError::schema(&ctx, "missing field")),
        }
    }

    pub(crate) fn uint<T: TryFrom<U256>>(&mut self, name: &str) -> Result<T, CodecError> {
        let (value, ctx) = self.take(name)?;
        let n = match value {
            Value::Number(n) => U256::from(n),
            Value::String(s) => {
                let digits = s.strip_prefix("0x").ok_or_else(|| {
                    CodecError::invalid_hex(&ctx, "expected hex string")
                })?;
                U256::from_str_radix(digits, 16)
                    .map_err(|err| CodecError::invalid_hex(&ctx, err.to_string()))?
            }
            other => {
                return Err(CodecError::schema(
                    &ctx,
                    format!("expected number, got {}", other.type_name()),
                ))
            }
        };
        T::try_from(n).map_err(|_| CodecError::schema(&ctx, "number out of range"))
    }

    pub(crate) fn fixed<const N: usize>(&mut self, name: &str) -> Result<FixedBytes<N>, CodecError> {
        let (value, ctx) = self.take(name)?;
        fixed_from(value, &ctx)
    }

    pub(crate) fn nullable_fixed<const N: usize>(
        &mut self,
        name: &str,
    ) -> Result<Option<FixedBytes<N>>, CodecError> {
        match self.take(name)? {
            (Value::Null, _) => Ok(None),
            (value, ctx) => fixed_from(value, &ctx).map(Some),
        }
    }

    /// Reads a hex string blob.
    pub(crate) fn blob(&mut self, name: &str) -> Result<Bytes, CodecError> {
        let (value, ctx) = self.take(name)?;
        hex_from(value, &ctx).map(Bytes::from)
    }

    /// Reads an opaque buffer.
    pub(crate) fn buffer(&mut self, name: &str) -> Result<Bytes, CodecError> {
        let (value, ctx) = self.take(name)?;
        buffer_from(value, &ctx)
    }

    /// Reads a list of opaque buffers.
    pub(crate) fn buffers(&mut self, name: &str) -> Result<Vec<Bytes>, CodecError> {
        let (items, ctx) = self.list(name)?;
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| buffer_from(item, &format!("{ctx}.#{i}")))
            .collect()
    }

    /// Reads a list, returning its items and the path of the list field.
    pub(crate) fn list(&mut self, name: &str) -> Result<(Vec<Value>, String), CodecError> {
        match self.take(name)? {
            (Value::List(items), ctx) => Ok((items, ctx)),
            (other, ctx) => {
                Err(CodecError::schema(&ctx, format!("expected array, got {}", other.type_name())))
            }
        }
    }
}

fn hex_from(value: Value, ctx: &str) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::String(s) if s.starts_with("0x") => {
            hex::decode(&s).map_err(|err| CodecError::invalid_hex(ctx, err.to_string()))
        }
        Value::String(_) => Err(CodecError::invalid_hex(ctx, "expected hex string")),
        other => Err(CodecError::schema(ctx, format!("expected string, got {}", other.type_name()))),
    }
}

fn fixed_from<const N: usize>(value: Value, ctx: &str) -> Result<FixedBytes<N>, CodecError> {
    let bytes = hex_from(value, ctx)?;
    FixedBytes::try_from(bytes.as_slice())
        .map_err(|_| CodecError::schema(ctx, format!("expected {N} bytes, got {}", bytes.len())))
}

fn buffer_from(value: Value, ctx: &str) -> Result<Bytes, CodecError> {
    match value {
        Value::Bytes(bytes) => Ok(bytes.into()),
        other => Err(CodecError::schema(ctx, format!("expected bytes, got {}", other.type_name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b64;
    use assert_matches::assert_matches;

    fn fields(value: Value) -> Fields {
        Fields::new(value, "tx").unwrap()
    }

    #[test]
    fn reads_numbers_from_both_forms() {
        let mut f = fields(Value::structure([
            ("a", Value::Number(7)),
            ("b", Value::from("0x0100")),
            ("c", Value::hex([0xff; 32])),
        ]));
        assert_eq!(f.uint::<u8>("a"), Ok(7));
        assert_eq!(f.uint::<u64>("b"), Ok(256));
        assert_eq!(f.uint::<U256>("c"), Ok(U256::MAX));
    }

    #[test]
    fn number_out_of_range_reports_path() {
        let mut f = fields(Value::structure([("gasPriceCoef", Value::Number(256))]));
        assert_matches!(
            f.uint::<u8>("gasPriceCoef"),
            Err(CodecError::SchemaMismatch { ctx, .. }) if ctx == "tx.gasPriceCoef"
        );
    }

    #[test]
    fn missing_field() {
        let mut f = fields(Value::structure::<&str, _>([]));
        assert_matches!(f.fixed::<8>("blockRef"), Err(CodecError::SchemaMismatch { .. }));
    }

    #[test]
    fn fixed_and_nullable_blobs() {
        let mut f = fields(Value::structure([
            ("blockRef", Value::from("0x00000000aabbccdd")),
            ("dependsOn", Value::Null),
            ("short", Value::from("0xaabb")),
        ]));
        assert_eq!(f.fixed::<8>("blockRef"), Ok(b64!("00000000aabbccdd")));
        assert_eq!(f.nullable_fixed::<32>("dependsOn"), Ok(None));
        assert_matches!(f.fixed::<8>("short"), Err(CodecError::SchemaMismatch { .. }));
    }

    #[test]
    fn buffers_report_item_path() {
        let mut f = fields(Value::structure([(
            "reserved",
            Value::List(vec![Value::Bytes(vec![1u8].into()), Value::Number(1)]),
        )]));
        assert_matches!(
            f.buffers("reserved"),
            Err(CodecError::SchemaMismatch { ctx, .. }) if ctx == "tx.reserved.#1"
        );
    }
}
