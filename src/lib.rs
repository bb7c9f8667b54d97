//! Bramble - schema-driven codec for the Bincode binary wire format
//!
//! Bramble encodes and decodes dynamic [`Value`]s against [`TypeDesc`]
//! type descriptors, producing byte streams compatible with the
//! canonical Bincode encoding: little-endian, non-self-describing, with
//! length-prefixed strings and collections and tag-prefixed options and
//! enum variants. A single [`Options`] record switches every length
//! prefix, wide integer and enum discriminant between fixed-width and
//! variable-length form.
//!
//! # Example
//!
//! ```rust
//! use bramble::{decode, encode, Options, Registry, Result, TypeDesc, Value};
//!
//! fn main() -> Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register_enum(
//!         "IpAddr",
//!         [
//!             ("V4", vec![
//!                 ("a", TypeDesc::U8),
//!                 ("b", TypeDesc::U8),
//!                 ("c", TypeDesc::U8),
//!                 ("d", TypeDesc::U8),
//!             ]),
//!             ("V6", vec![("segments", TypeDesc::seq(TypeDesc::U16))]),
//!         ],
//!     );
//!
//!     let home = Value::variant("IpAddr", "V4", [
//!         ("a", Value::from(127u8)),
//!         ("b", Value::from(0u8)),
//!         ("c", Value::from(0u8)),
//!         ("d", Value::from(1u8)),
//!     ]);
//!
//!     let desc = TypeDesc::user("IpAddr");
//!     let bytes = encode(&home, &desc, &registry, Options::fixed())?;
//!     assert_eq!(bytes, [0, 0, 0, 0, 127, 0, 0, 1]);
//!
//!     let (decoded, rest) = decode(&bytes, &desc, &registry, Options::fixed())?;
//!     assert_eq!(decoded, home);
//!     assert!(rest.is_empty());
//!     Ok(())
//! }
//! ```

mod codec;
mod error;
mod reader;
mod registry;
mod types;
mod value;
mod writer;

pub use error::{Error, Result};
pub use reader::Reader;
pub use registry::{
    EnumDef, FieldDef, Prefix, Registry, StructDef, TypeDef, VariantDef, DEFAULT_MAX_TUPLE_SIZE,
};
pub use types::{zigzag_decode, zigzag_encode, Options, TypeDesc};
pub use value::Value;
pub use writer::Writer;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Encodes `value` against the descriptor `desc`.
///
/// Returns the complete byte image or an error; no partial output is
/// ever observable. User-defined descriptors resolve through `registry`.
pub fn encode(
    value: &Value,
    desc: &TypeDesc,
    registry: &Registry,
    opts: Options,
) -> Result<Vec<u8>> {
    let mut writer = Writer::new();
    codec::encode_value(&mut writer, value, desc, registry, opts)?;
    Ok(writer.into_bytes())
}

/// Decodes one value of the descriptor `desc` from the front of `bytes`.
///
/// Returns the value and the unconsumed tail. The input is never
/// mutated; on error nothing is returned.
pub fn decode<'a>(
    bytes: &'a [u8],
    desc: &TypeDesc,
    registry: &Registry,
    opts: Options,
) -> Result<(Value, &'a [u8])> {
    let mut reader = Reader::new(bytes);
    let value = codec::decode_value(&mut reader, desc, registry, opts)?;
    Ok((value, reader.rest()))
}

/// Encodes `value` against `desc`, panicking on error.
///
/// # Panics
///
/// Panics with the error's display message if [`encode`] fails.
pub fn encode_strict(value: &Value, desc: &TypeDesc, registry: &Registry, opts: Options) -> Vec<u8> {
    match encode(value, desc, registry, opts) {
        Ok(bytes) => bytes,
        Err(e) => panic!("encode failed: {e}"),
    }
}

/// Decodes one value of `desc` from `bytes`, panicking on error.
///
/// # Panics
///
/// Panics with the error's display message if [`decode`] fails.
pub fn decode_strict<'a>(
    bytes: &'a [u8],
    desc: &TypeDesc,
    registry: &Registry,
    opts: Options,
) -> (Value, &'a [u8]) {
    match decode(bytes, desc, registry, opts) {
        Ok(result) => result,
        Err(e) => panic!("decode failed: {e}"),
    }
}
