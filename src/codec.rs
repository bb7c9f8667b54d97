//! Type-directed encode/decode dispatcher.
//!
//! One recursive interpreter per direction walks a [`TypeDesc`] tree,
//! delegating primitives to [`Writer`]/[`Reader`], recursing into
//! composites, and routing [`TypeDesc::User`] through the [`Registry`].
//! The [`Options`] record threads through every call; nothing here reads
//! ambient state.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::registry::{EnumDef, FieldDef, Registry, StructDef, TypeDef};
use crate::types::{Options, TypeDesc};
use crate::value::Value;
use crate::writer::Writer;

fn mismatch<T>(desc: &TypeDesc, value: &Value) -> Result<T> {
    Err(Error::type_mismatch(desc.to_string(), value.kind()))
}

fn out_of_range(desc: &TypeDesc, value: impl std::fmt::Display) -> Error {
    Error::type_mismatch(desc.to_string(), format!("integer {value}"))
}

/// Extracts an unsigned magnitude no larger than `max` from `value`.
fn unsigned_of(value: &Value, desc: &TypeDesc, max: u128) -> Result<u128> {
    let magnitude = match value {
        Value::Int(n) if *n < 0 => {
            return Err(Error::NegativeUnsigned {
                value: *n,
                descriptor: desc.to_string(),
            })
        }
        Value::Int(n) => *n as u128,
        Value::UInt(u) => *u,
        other => return mismatch(desc, other),
    };
    if magnitude > max {
        return Err(out_of_range(desc, magnitude));
    }
    Ok(magnitude)
}

/// Extracts a signed value within `min..=max` from `value`.
fn signed_of(value: &Value, desc: &TypeDesc, min: i128, max: i128) -> Result<i128> {
    let n = match value {
        Value::Int(n) => *n,
        Value::UInt(u) => i128::try_from(*u).map_err(|_| out_of_range(desc, u))?,
        other => return mismatch(desc, other),
    };
    if n < min || n > max {
        return Err(out_of_range(desc, n));
    }
    Ok(n)
}

fn check_tuple_arity(arity: usize, reg: &Registry) -> Result<()> {
    let max = reg.max_tuple_size();
    if arity == 0 || arity > max {
        return Err(Error::UnsupportedTupleArity { arity, max });
    }
    Ok(())
}

pub(crate) fn encode_value(
    w: &mut Writer,
    value: &Value,
    desc: &TypeDesc,
    reg: &Registry,
    opts: Options,
) -> Result<()> {
    match desc {
        // U8 is a single byte in both modes.
        TypeDesc::U8 => w.write_byte(unsigned_of(value, desc, u8::MAX as u128)? as u8),
        TypeDesc::U16 => {
            let v = unsigned_of(value, desc, u16::MAX as u128)?;
            if opts.varint {
                w.write_varint(v)
            } else {
                w.write_u16(v as u16)
            }
        }
        TypeDesc::U32 => {
            let v = unsigned_of(value, desc, u32::MAX as u128)?;
            if opts.varint {
                w.write_varint(v)
            } else {
                w.write_u32(v as u32)
            }
        }
        TypeDesc::U64 => {
            let v = unsigned_of(value, desc, u64::MAX as u128)?;
            if opts.varint {
                w.write_varint(v)
            } else {
                w.write_u64(v as u64)
            }
        }
        TypeDesc::U128 => {
            let v = unsigned_of(value, desc, u128::MAX)?;
            if opts.varint {
                w.write_varint(v)
            } else {
                w.write_u128(v)
            }
        }
        // I8 is a single byte in both modes.
        TypeDesc::I8 => w.write_i8(signed_of(value, desc, i8::MIN as i128, i8::MAX as i128)? as i8),
        TypeDesc::I16 => {
            let v = signed_of(value, desc, i16::MIN as i128, i16::MAX as i128)?;
            if opts.varint {
                w.write_svarint(v)
            } else {
                w.write_i16(v as i16)
            }
        }
        TypeDesc::I32 => {
            let v = signed_of(value, desc, i32::MIN as i128, i32::MAX as i128)?;
            if opts.varint {
                w.write_svarint(v)
            } else {
                w.write_i32(v as i32)
            }
        }
        TypeDesc::I64 => {
            let v = signed_of(value, desc, i64::MIN as i128, i64::MAX as i128)?;
            if opts.varint {
                w.write_svarint(v)
            } else {
                w.write_i64(v as i64)
            }
        }
        TypeDesc::I128 => {
            let v = signed_of(value, desc, i128::MIN, i128::MAX)?;
            if opts.varint {
                w.write_svarint(v)
            } else {
                w.write_i128(v)
            }
        }
        TypeDesc::F32 => match value {
            Value::F32(f) => w.write_f32(*f),
            other => mismatch(desc, other),
        },
        TypeDesc::F64 => match value {
            Value::F64(f) => w.write_f64(*f),
            other => mismatch(desc, other),
        },
        TypeDesc::Bool => match value {
            Value::Bool(b) => w.write_bool(*b),
            other => mismatch(desc, other),
        },
        TypeDesc::Str => match value {
            Value::Str(s) => {
                w.write_len(s.len(), opts)?;
                w.write_bytes(s.as_bytes())
            }
            other => mismatch(desc, other),
        },
        TypeDesc::Opt(inner) => match value {
            Value::Opt(None) => w.write_byte(0),
            Value::Opt(Some(payload)) => {
                w.write_byte(1)?;
                encode_value(w, payload, inner, reg, opts)
            }
            other => mismatch(desc, other),
        },
        TypeDesc::Seq(elem) => match value {
            Value::Seq(items) => {
                w.write_len(items.len(), opts)?;
                for item in items {
                    encode_value(w, item, elem, reg, opts)?;
                }
                Ok(())
            }
            other => mismatch(desc, other),
        },
        TypeDesc::Map(key_desc, value_desc) => match value {
            Value::Map(map) => {
                w.write_len(map.len(), opts)?;
                for (k, v) in map {
                    encode_value(w, k, key_desc, reg, opts)?;
                    encode_value(w, v, value_desc, reg, opts)?;
                }
                Ok(())
            }
            other => mismatch(desc, other),
        },
        // Sets are sequences on the wire.
        TypeDesc::Set(elem) => match value {
            Value::Set(items) => {
                w.write_len(items.len(), opts)?;
                for item in items {
                    encode_value(w, item, elem, reg, opts)?;
                }
                Ok(())
            }
            other => mismatch(desc, other),
        },
        TypeDesc::Tup(components) => {
            check_tuple_arity(components.len(), reg)?;
            match value {
                Value::Tuple(items) => {
                    if items.len() != components.len() {
                        return Err(Error::ArityMismatch {
                            expected: components.len(),
                            found: items.len(),
                        });
                    }
                    for (item, component) in items.iter().zip(components) {
                        encode_value(w, item, component, reg, opts)?;
                    }
                    Ok(())
                }
                other => mismatch(desc, other),
            }
        }
        TypeDesc::User(name) => match reg.get(name)? {
            TypeDef::Struct(def) => encode_struct(w, value, name, def, reg, opts),
            TypeDef::Enum(def) => encode_enum(w, value, name, def, reg, opts),
        },
    }
}

fn encode_struct(
    w: &mut Writer,
    value: &Value,
    name: &str,
    def: &StructDef,
    reg: &Registry,
    opts: Options,
) -> Result<()> {
    let fields = match value {
        Value::Struct { name: vname, fields } if vname == name => fields,
        Value::Struct { name: vname, .. } => {
            return Err(Error::schema_mismatch(format!(
                "value of type {vname} supplied for struct {name}"
            )))
        }
        other => {
            return Err(Error::schema_mismatch(format!(
                "expected struct {name}, found {}",
                other.kind()
            )))
        }
    };
    if let Some(prefix) = &def.prefix {
        encode_value(w, &prefix.value, &prefix.ty, reg, opts)?;
    }
    encode_fields(w, fields, &def.fields, name, reg, opts)
}

fn encode_enum(
    w: &mut Writer,
    value: &Value,
    name: &str,
    def: &EnumDef,
    reg: &Registry,
    opts: Options,
) -> Result<()> {
    let (variant, fields) = match value {
        Value::Variant { enum_name, variant, fields } if enum_name == name => (variant, fields),
        Value::Variant { enum_name, .. } => {
            return Err(Error::schema_mismatch(format!(
                "value of enum {enum_name} supplied for enum {name}"
            )))
        }
        other => {
            return Err(Error::schema_mismatch(format!(
                "expected enum {name}, found {}",
                other.kind()
            )))
        }
    };
    let (index, variant_def) = def
        .variants
        .iter()
        .enumerate()
        .find(|(_, v)| &v.name == variant)
        .ok_or_else(|| Error::schema_mismatch(format!("enum {name} has no variant {variant}")))?;
    let index = u32::try_from(index)
        .map_err(|_| Error::schema_mismatch(format!("enum {name} variant index overflow")))?;
    w.write_discriminant(index, opts)?;
    encode_fields(w, fields, &variant_def.fields, name, reg, opts)
}

/// Encodes supplied fields in declared order, matching them by name.
fn encode_fields(
    w: &mut Writer,
    supplied: &[(String, Value)],
    declared: &[FieldDef],
    type_name: &str,
    reg: &Registry,
    opts: Options,
) -> Result<()> {
    if supplied.len() != declared.len() {
        return Err(Error::ArityMismatch {
            expected: declared.len(),
            found: supplied.len(),
        });
    }
    for field in declared {
        let value = supplied
            .iter()
            .find(|(n, _)| n == &field.name)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                Error::schema_mismatch(format!("missing field {} for {type_name}", field.name))
            })?;
        encode_value(w, value, &field.ty, reg, opts)?;
    }
    Ok(())
}

fn decode_unsigned(
    r: &mut Reader<'_>,
    desc: &TypeDesc,
    opts: Options,
    max: u128,
    fixed: impl FnOnce(&mut Reader<'_>) -> Result<u128>,
) -> Result<Value> {
    let v = if opts.varint {
        let v = r.read_varint()?;
        if v > max {
            return Err(out_of_range(desc, v));
        }
        v
    } else {
        fixed(r)?
    };
    Ok(Value::UInt(v))
}

fn decode_signed(
    r: &mut Reader<'_>,
    desc: &TypeDesc,
    opts: Options,
    min: i128,
    max: i128,
    fixed: impl FnOnce(&mut Reader<'_>) -> Result<i128>,
) -> Result<Value> {
    let v = if opts.varint {
        let v = r.read_svarint()?;
        if v < min || v > max {
            return Err(out_of_range(desc, v));
        }
        v
    } else {
        fixed(r)?
    };
    Ok(Value::Int(v))
}

pub(crate) fn decode_value(
    r: &mut Reader<'_>,
    desc: &TypeDesc,
    reg: &Registry,
    opts: Options,
) -> Result<Value> {
    match desc {
        TypeDesc::U8 => Ok(Value::UInt(r.read_byte()? as u128)),
        TypeDesc::U16 => {
            decode_unsigned(r, desc, opts, u16::MAX as u128, |r| Ok(r.read_u16()? as u128))
        }
        TypeDesc::U32 => {
            decode_unsigned(r, desc, opts, u32::MAX as u128, |r| Ok(r.read_u32()? as u128))
        }
        TypeDesc::U64 => {
            decode_unsigned(r, desc, opts, u64::MAX as u128, |r| Ok(r.read_u64()? as u128))
        }
        TypeDesc::U128 => decode_unsigned(r, desc, opts, u128::MAX, |r| r.read_u128()),
        TypeDesc::I8 => Ok(Value::Int(r.read_i8()? as i128)),
        TypeDesc::I16 => decode_signed(r, desc, opts, i16::MIN as i128, i16::MAX as i128, |r| {
            Ok(r.read_i16()? as i128)
        }),
        TypeDesc::I32 => decode_signed(r, desc, opts, i32::MIN as i128, i32::MAX as i128, |r| {
            Ok(r.read_i32()? as i128)
        }),
        TypeDesc::I64 => decode_signed(r, desc, opts, i64::MIN as i128, i64::MAX as i128, |r| {
            Ok(r.read_i64()? as i128)
        }),
        TypeDesc::I128 => decode_signed(r, desc, opts, i128::MIN, i128::MAX, |r| r.read_i128()),
        TypeDesc::F32 => Ok(Value::F32(r.read_f32()?)),
        TypeDesc::F64 => Ok(Value::F64(r.read_f64()?)),
        TypeDesc::Bool => Ok(Value::Bool(r.read_bool()?)),
        TypeDesc::Str => {
            let len = r.read_len(opts)?;
            let bytes = r.read_bytes(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
            Ok(Value::Str(s.to_string()))
        }
        TypeDesc::Opt(inner) => match r.read_byte()? {
            0 => Ok(Value::Opt(None)),
            1 => Ok(Value::some(decode_value(r, inner, reg, opts)?)),
            other => Err(Error::InvalidOption(other)),
        },
        TypeDesc::Seq(elem) => {
            let len = r.read_len(opts)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(decode_value(r, elem, reg, opts)?);
            }
            Ok(Value::Seq(items))
        }
        TypeDesc::Map(key_desc, value_desc) => {
            let len = r.read_len(opts)?;
            let mut map = IndexMap::with_capacity(len);
            for _ in 0..len {
                let key = decode_value(r, key_desc, reg, opts)?;
                let value = decode_value(r, value_desc, reg, opts)?;
                // Duplicate keys: the later value wins.
                map.insert(key, value);
            }
            Ok(Value::Map(map))
        }
        TypeDesc::Set(elem) => {
            let len = r.read_len(opts)?;
            let mut items = BTreeSet::new();
            for _ in 0..len {
                items.insert(decode_value(r, elem, reg, opts)?);
            }
            Ok(Value::Set(items))
        }
        TypeDesc::Tup(components) => {
            check_tuple_arity(components.len(), reg)?;
            let mut items = Vec::with_capacity(components.len());
            for component in components {
                items.push(decode_value(r, component, reg, opts)?);
            }
            Ok(Value::Tuple(items))
        }
        TypeDesc::User(name) => match reg.get(name)? {
            TypeDef::Struct(def) => decode_struct(r, name, def, reg, opts),
            TypeDef::Enum(def) => decode_enum(r, name, def, reg, opts),
        },
    }
}

fn decode_struct(
    r: &mut Reader<'_>,
    name: &str,
    def: &StructDef,
    reg: &Registry,
    opts: Options,
) -> Result<Value> {
    if let Some(prefix) = &def.prefix {
        let seen = decode_value(r, &prefix.ty, reg, opts)?;
        if seen != prefix.value {
            return Err(Error::schema_mismatch(format!(
                "struct {name} prefix mismatch"
            )));
        }
    }
    let fields = decode_fields(r, &def.fields, reg, opts)?;
    Ok(Value::Struct {
        name: name.to_string(),
        fields,
    })
}

/// Enum decoding: read the discriminant once, dispatch on the variant
/// index, then decode the variant body. The body never re-reads the
/// discriminant.
fn decode_enum(
    r: &mut Reader<'_>,
    name: &str,
    def: &EnumDef,
    reg: &Registry,
    opts: Options,
) -> Result<Value> {
    let discriminant = r.read_discriminant(opts)?;
    let index = usize::try_from(discriminant)
        .ok()
        .filter(|i| *i < def.variants.len())
        .ok_or_else(|| Error::UnknownVariant {
            name: name.to_string(),
            discriminant,
        })?;
    let variant_def = &def.variants[index];
    let fields = decode_fields(r, &variant_def.fields, reg, opts)?;
    Ok(Value::Variant {
        enum_name: name.to_string(),
        variant: variant_def.name.clone(),
        fields,
    })
}

fn decode_fields(
    r: &mut Reader<'_>,
    declared: &[FieldDef],
    reg: &Registry,
    opts: Options,
) -> Result<Vec<(String, Value)>> {
    let mut fields = Vec::with_capacity(declared.len());
    for field in declared {
        let value = decode_value(r, &field.ty, reg, opts)?;
        fields.push((field.name.clone(), value));
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &Value, desc: &TypeDesc, reg: &Registry, opts: Options) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        encode_value(&mut writer, value, desc, reg, opts)?;
        Ok(writer.into_bytes())
    }

    fn decode(bytes: &[u8], desc: &TypeDesc, reg: &Registry, opts: Options) -> Result<Value> {
        let mut reader = Reader::new(bytes);
        decode_value(&mut reader, desc, reg, opts)
    }

    #[test]
    fn test_option_tags() {
        let reg = Registry::new();
        let desc = TypeDesc::opt(TypeDesc::U16);

        let bytes = encode(&Value::none(), &desc, &reg, Options::fixed()).unwrap();
        assert_eq!(bytes, [0]);

        let bytes = encode(
            &Value::some(Value::from(5u16)),
            &desc,
            &reg,
            Options::fixed(),
        )
        .unwrap();
        assert_eq!(bytes, [1, 5, 0]);

        assert!(matches!(
            decode(&[2], &desc, &reg, Options::fixed()),
            Err(Error::InvalidOption(2))
        ));
    }

    #[test]
    fn test_nested_lengths_honor_varint_mode() {
        let reg = Registry::new();
        let desc = TypeDesc::seq(TypeDesc::seq(TypeDesc::U8));
        let value = Value::seq([Value::seq([Value::from(9u8)])]);

        let bytes = encode(&value, &desc, &reg, Options::varint()).unwrap();
        // Outer length, inner length and the element are all single bytes.
        assert_eq!(bytes, [1, 1, 9]);

        let bytes = encode(&value, &desc, &reg, Options::fixed()).unwrap();
        assert_eq!(bytes, [1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 9]);
    }

    #[test]
    fn test_eight_bit_types_ignore_varint_mode() {
        let reg = Registry::new();
        for opts in [Options::fixed(), Options::varint()] {
            let bytes = encode(&Value::from(255u8), &TypeDesc::U8, &reg, opts).unwrap();
            assert_eq!(bytes, [255]);

            let bytes = encode(&Value::from(-1i8), &TypeDesc::I8, &reg, opts).unwrap();
            assert_eq!(bytes, [0xff]);
        }
    }

    #[test]
    fn test_negative_into_unsigned() {
        let reg = Registry::new();
        assert!(matches!(
            encode(&Value::Int(-1), &TypeDesc::U32, &reg, Options::fixed()),
            Err(Error::NegativeUnsigned { value: -1, .. })
        ));
    }

    #[test]
    fn test_integer_out_of_range() {
        let reg = Registry::new();
        assert!(matches!(
            encode(&Value::from(300u16), &TypeDesc::U8, &reg, Options::fixed()),
            Err(Error::TypeMismatch { .. })
        ));
        // Varint mode decodes a value too wide for the descriptor.
        assert!(matches!(
            decode(&[0xfc, 0, 0, 1, 0], &TypeDesc::U16, &reg, Options::varint()),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_tuple_arity() {
        let reg = Registry::new();
        let desc = TypeDesc::tup([TypeDesc::U8, TypeDesc::Bool]);
        let value = Value::tuple([Value::from(1u8)]);
        assert!(matches!(
            encode(&value, &desc, &reg, Options::fixed()),
            Err(Error::ArityMismatch { expected: 2, found: 1 })
        ));

        let wide = TypeDesc::tup(std::iter::repeat(TypeDesc::U8).take(13));
        let value = Value::tuple(std::iter::repeat(Value::from(0u8)).take(13));
        assert!(matches!(
            encode(&value, &wide, &reg, Options::fixed()),
            Err(Error::UnsupportedTupleArity { arity: 13, max: 12 })
        ));
    }

    #[test]
    fn test_struct_prefix_emitted_and_checked() {
        let mut reg = Registry::new();
        reg.register_struct(
            "Framed",
            [("n", TypeDesc::U8)],
            Some((Value::from(0xabu8), TypeDesc::U8)),
        );
        let desc = TypeDesc::user("Framed");
        let value = Value::record("Framed", [("n", Value::from(7u8))]);

        let bytes = encode(&value, &desc, &reg, Options::fixed()).unwrap();
        assert_eq!(bytes, [0xab, 7]);

        assert_eq!(decode(&bytes, &desc, &reg, Options::fixed()).unwrap(), value);
        assert!(matches!(
            decode(&[0xac, 7], &desc, &reg, Options::fixed()),
            Err(Error::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_enum_discriminant_consumed_once() {
        let mut reg = Registry::new();
        reg.register_enum(
            "E",
            [("A", vec![("x", TypeDesc::U8)]), ("B", vec![("y", TypeDesc::U8)])],
        );
        let desc = TypeDesc::user("E");

        // Varint mode: one byte of discriminant, one byte of body.
        let value = Value::variant("E", "B", [("y", Value::from(9u8))]);
        let bytes = encode(&value, &desc, &reg, Options::varint()).unwrap();
        assert_eq!(bytes, [1, 9]);
        assert_eq!(decode(&bytes, &desc, &reg, Options::varint()).unwrap(), value);
    }

    #[test]
    fn test_enum_unknown_discriminant() {
        let mut reg = Registry::new();
        reg.register_enum("E", [("A", Vec::<(&str, TypeDesc)>::new())]);
        let desc = TypeDesc::user("E");

        assert!(matches!(
            decode(&[5, 0, 0, 0], &desc, &reg, Options::fixed()),
            Err(Error::UnknownVariant { discriminant: 5, .. })
        ));
    }

    #[test]
    fn test_map_duplicate_keys_later_wins() {
        let reg = Registry::new();
        let desc = TypeDesc::map(TypeDesc::U8, TypeDesc::U8);
        // Two pairs with the same key.
        let decoded = decode(
            &[2, 1, 10, 1, 20],
            &desc,
            &reg,
            Options::varint(),
        )
        .unwrap();
        assert_eq!(
            decoded,
            Value::map([(Value::from(1u8), Value::from(20u8))])
        );
    }

    #[test]
    fn test_set_decode_collapses_duplicates() {
        let reg = Registry::new();
        let desc = TypeDesc::set(TypeDesc::U8);
        let decoded = decode(&[3, 7, 7, 8], &desc, &reg, Options::varint()).unwrap();
        assert_eq!(decoded, Value::set([Value::from(7u8), Value::from(8u8)]));
    }

    #[test]
    fn test_unknown_type() {
        let reg = Registry::new();
        assert!(matches!(
            encode(
                &Value::record("Ghost", Vec::<(&str, Value)>::new()),
                &TypeDesc::user("Ghost"),
                &reg,
                Options::fixed()
            ),
            Err(Error::UnknownType(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_wrong_shape_for_struct() {
        let mut reg = Registry::new();
        reg.register_struct("S", [("n", TypeDesc::U8)], None);
        assert!(matches!(
            encode(&Value::from(1u8), &TypeDesc::user("S"), &reg, Options::fixed()),
            Err(Error::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_struct_field_count_mismatch() {
        let mut reg = Registry::new();
        reg.register_struct("Pair", [("x", TypeDesc::U8), ("y", TypeDesc::U8)], None);
        let value = Value::record("Pair", [("x", Value::from(1u8))]);
        assert!(matches!(
            encode(&value, &TypeDesc::user("Pair"), &reg, Options::fixed()),
            Err(Error::ArityMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_struct_missing_named_field() {
        let mut reg = Registry::new();
        reg.register_struct("Pair", [("x", TypeDesc::U8), ("y", TypeDesc::U8)], None);
        // Right count, but "z" is not a declared field.
        let value = Value::record(
            "Pair",
            [("x", Value::from(1u8)), ("z", Value::from(2u8))],
        );
        assert!(matches!(
            encode(&value, &TypeDesc::user("Pair"), &reg, Options::fixed()),
            Err(Error::SchemaMismatch(msg)) if msg.contains("y")
        ));
    }

    #[test]
    fn test_struct_wrong_type_name() {
        let mut reg = Registry::new();
        reg.register_struct("Pair", [("x", TypeDesc::U8)], None);
        let value = Value::record("Other", [("x", Value::from(1u8))]);
        assert!(matches!(
            encode(&value, &TypeDesc::user("Pair"), &reg, Options::fixed()),
            Err(Error::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_variant_field_count_mismatch() {
        let mut reg = Registry::new();
        reg.register_enum(
            "E",
            [("A", vec![("x", TypeDesc::U8), ("y", TypeDesc::U8)])],
        );
        let value = Value::variant("E", "A", [("x", Value::from(1u8))]);
        assert!(matches!(
            encode(&value, &TypeDesc::user("E"), &reg, Options::fixed()),
            Err(Error::ArityMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_enum_unknown_variant_name_on_encode() {
        let mut reg = Registry::new();
        reg.register_enum("E", [("A", vec![("x", TypeDesc::U8)])]);
        let value = Value::variant("E", "B", [("x", Value::from(1u8))]);
        assert!(matches!(
            encode(&value, &TypeDesc::user("E"), &reg, Options::fixed()),
            Err(Error::SchemaMismatch(msg)) if msg.contains("B")
        ));
    }

    #[test]
    fn test_enum_wrong_enum_name() {
        let mut reg = Registry::new();
        reg.register_enum("E", [("A", vec![("x", TypeDesc::U8)])]);
        let value = Value::variant("Other", "A", [("x", Value::from(1u8))]);
        assert!(matches!(
            encode(&value, &TypeDesc::user("E"), &reg, Options::fixed()),
            Err(Error::SchemaMismatch(_))
        ));
    }
}
