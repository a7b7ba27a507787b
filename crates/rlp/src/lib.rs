//! Recursive length prefix codec for thor transactions.
//!
//! Two layers live here:
//!
//! - the byte layer ([`Item`], [`Header`], [`Encodable`], [`Decodable`]) which turns nested byte
//!   strings into RLP bytes and back, enforcing minimal length prefixes;
//! - the typed layer ([`ScalarKind`], [`Profile`], [`Codec`]) which packs a dynamically shaped
//!   [`Value`] into a byte tree field by field, and validates the inverse.
//!
//! ```
//! use thor_rlp::{Codec, Profile, ScalarKind, Value};
//!
//! let codec = Codec::new(Profile::structure(
//!     "",
//!     vec![
//!         Profile::scalar("nonce", ScalarKind::numeric(Some(8))),
//!         Profile::scalar("to", ScalarKind::nullable_fixed_blob(20)),
//!     ],
//! ));
//! let value = Value::structure([("nonce", Value::Number(1)), ("to", Value::Null)]);
//! let encoded = codec.encode(&value).unwrap();
//! assert_eq!(encoded, vec![0xc2, 0x01, 0x80]);
//! assert_eq!(codec.decode(&encoded).unwrap(), value);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod decode;
mod encode;
mod error;
pub mod kind;
mod profile;
mod types;
mod value;

pub use decode::{decode, DecodeError, Decodable, MAX_DEPTH};
pub use encode::{encode, encode_list, length_of_length, Encodable};
pub use error::CodecError;
pub use kind::{ScalarKind, MAX_SAFE_INTEGER};
pub use profile::{pack, unpack, Codec, Profile, ProfileKind};
pub use types::{Header, Item, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
pub use value::Value;
