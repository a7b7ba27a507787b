//! Declarative layouts and the typed codec that drives them.

use crate::{decode, encode, CodecError, Item, ScalarKind, Value};
use std::collections::BTreeMap;

/// Shape of a profile node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileKind {
    /// A single leaf field.
    Scalar(ScalarKind),
    /// An ordered list of named fields.
    Struct(Vec<Profile>),
    /// A list of items sharing one shape.
    Array(Box<ProfileKind>),
}

/// A named node of a layout schema.
///
/// Profiles are built once and reused for every encode and decode; they hold no per call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Field name, used to look the value up in its parent struct and in error paths.
    pub name: String,
    /// Shape of the field.
    pub kind: ProfileKind,
}

impl Profile {
    /// Creates a profile node.
    pub fn new(name: impl Into<String>, kind: ProfileKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// Creates a leaf field.
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, ProfileKind::Scalar(kind))
    }

    /// Creates a struct node from its ordered fields.
    pub fn structure(name: impl Into<String>, fields: Vec<Profile>) -> Self {
        Self::new(name, ProfileKind::Struct(fields))
    }

    /// Creates an array node whose items have shape `item`.
    pub fn array(name: impl Into<String>, item: ProfileKind) -> Self {
        Self::new(name, ProfileKind::Array(Box::new(item)))
    }

    /// Returns a copy of this struct profile with `field` appended.
    ///
    /// On a non-struct profile this returns an unchanged copy.
    pub fn with_field(&self, field: Profile) -> Self {
        let mut out = self.clone();
        if let ProfileKind::Struct(fields) = &mut out.kind {
            fields.push(field);
        }
        out
    }
}

fn child_ctx(ctx: &str, name: &str) -> String {
    if ctx.is_empty() {
        name.to_string()
    } else {
        format!("{ctx}.{name}")
    }
}

/// Packs `value` into a byte tree following `profile`.
pub fn pack(value: &Value, profile: &Profile, ctx: &str) -> Result<Item, CodecError> {
    let ctx = child_ctx(ctx, &profile.name);
    pack_kind(value, &profile.kind, &ctx)
}

fn pack_kind(value: &Value, kind: &ProfileKind, ctx: &str) -> Result<Item, CodecError> {
    match kind {
        ProfileKind::Scalar(kind) => kind.encode(value, ctx),
        ProfileKind::Struct(fields) => {
            let Value::Struct(obj) = value else {
                return Err(CodecError::schema(
                    ctx,
                    format!("expected struct, got {}", value.type_name()),
                ))
            };
            fields
                .iter()
                .map(|field| match obj.get(&field.name) {
                    Some(v) => pack(v, field, ctx),
                    None => Err(CodecError::schema(
                        &child_ctx(ctx, &field.name),
                        "missing field",
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Item::List)
        }
        ProfileKind::Array(item) => {
            let Value::List(items) = value else {
                return Err(CodecError::schema(
                    ctx,
                    format!("expected array, got {}", value.type_name()),
                ))
            };
            items
                .iter()
                .enumerate()
                .map(|(i, v)| pack_kind(v, item, &child_ctx(ctx, &format!("#{i}"))))
                .collect::<Result<Vec<_>, _>>()
                .map(Item::List)
        }
    }
}

/// Unpacks a byte tree into a value following `profile`, validating its shape.
pub fn unpack(item: &Item, profile: &Profile, ctx: &str) -> Result<Value, CodecError> {
    let ctx = child_ctx(ctx, &profile.name);
    unpack_kind(item, &profile.kind, &ctx)
}

fn unpack_kind(item: &Item, kind: &ProfileKind, ctx: &str) -> Result<Value, CodecError> {
    match kind {
        ProfileKind::Scalar(kind) => kind.decode(item, ctx),
        ProfileKind::Struct(fields) => {
            let Item::List(parts) = item else {
                return Err(CodecError::schema(ctx, "expected array"))
            };
            if parts.len() != fields.len() {
                return Err(CodecError::schema(
                    ctx,
                    format!("expected {} items, but got {}", fields.len(), parts.len()),
                ))
            }
            let obj = fields
                .iter()
                .zip(parts)
                .map(|(field, part)| Ok((field.name.clone(), unpack(part, field, ctx)?)))
                .collect::<Result<BTreeMap<_, _>, CodecError>>()?;
            Ok(Value::Struct(obj))
        }
        ProfileKind::Array(kind) => {
            let Item::List(parts) = item else {
                return Err(CodecError::schema(ctx, "expected array"))
            };
            parts
                .iter()
                .enumerate()
                .map(|(i, part)| unpack_kind(part, kind, &child_ctx(ctx, &format!("#{i}"))))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
    }
}

/// Encodes and decodes values of one [`Profile`] to and from RLP bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    profile: Profile,
}

impl Codec {
    /// Creates a codec for `profile`.
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Returns the profile this codec follows.
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Packs `value` and RLP encodes the resulting byte tree.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let packed = pack(value, &self.profile, "")?;
        Ok(encode(&packed))
    }

    /// RLP decodes `data` and unpacks the byte tree.
    pub fn decode(&self, data: &[u8]) -> Result<Value, CodecError> {
        let packed: Item = decode(data)?;
        unpack(&packed, &self.profile, "")
    }
}
