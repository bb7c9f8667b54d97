//! Schema registry for user-defined structs and enums.

use std::collections::HashMap;

use tracing::trace;

use crate::codec;
use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::types::{Options, TypeDesc};
use crate::value::Value;
use crate::writer::Writer;

/// Default upper bound on tuple descriptor arity.
pub const DEFAULT_MAX_TUPLE_SIZE: usize = 12;

/// A named, typed struct field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name, unique within its struct or variant.
    pub name: String,
    /// Descriptor of the field's wire image.
    pub ty: TypeDesc,
}

/// Bytes emitted before a struct body.
///
/// Enum variants are tagged this way internally; hosts may also declare
/// a prefix directly, e.g. for a magic constant.
#[derive(Debug, Clone)]
pub struct Prefix {
    /// The constant value emitted and checked on decode.
    pub value: Value,
    /// Descriptor the prefix is encoded with.
    pub ty: TypeDesc,
}

/// Declaration of a product type: ordered fields, optional prefix.
#[derive(Debug, Clone)]
pub struct StructDef {
    /// Fields in declaration (wire) order.
    pub fields: Vec<FieldDef>,
    /// Optional prefix emitted before the fields.
    pub prefix: Option<Prefix>,
}

/// Declaration of one enum variant.
#[derive(Debug, Clone)]
pub struct VariantDef {
    /// Variant name, unique within its enum.
    pub name: String,
    /// Variant fields in declaration order.
    pub fields: Vec<FieldDef>,
}

/// Declaration of a sum type.
///
/// Discriminants are positional: variant `i` is tagged `i` on the wire.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Variants in declaration order.
    pub variants: Vec<VariantDef>,
}

/// A registered type definition.
#[derive(Debug, Clone)]
pub enum TypeDef {
    /// Product type.
    Struct(StructDef),
    /// Sum type.
    Enum(EnumDef),
}

/// Registry of user-defined types, resolved by name at codec time.
///
/// Definitions may reference names registered later (forward and
/// mutually-recursive schemas); lookup happens when a [`TypeDesc::User`]
/// descriptor is interpreted. Build the registry once at startup and
/// share it immutably afterwards.
pub struct Registry {
    types: HashMap<String, TypeDef>,
    max_tuple_size: usize,
}

impl Registry {
    /// Creates an empty registry with the default tuple arity limit.
    pub fn new() -> Self {
        Self::with_max_tuple_size(DEFAULT_MAX_TUPLE_SIZE)
    }

    /// Creates an empty registry with a custom tuple arity limit.
    pub fn with_max_tuple_size(max_tuple_size: usize) -> Self {
        Self {
            types: HashMap::new(),
            max_tuple_size,
        }
    }

    /// Largest tuple arity this registry's codec calls accept.
    pub fn max_tuple_size(&self) -> usize {
        self.max_tuple_size
    }

    /// Registers a product type under `name`.
    ///
    /// `fields` are `(name, descriptor)` pairs in wire order; `prefix`,
    /// when given, is a constant emitted before the fields and checked
    /// on decode. Re-registering a name replaces the earlier entry.
    pub fn register_struct<N, F>(
        &mut self,
        name: N,
        fields: impl IntoIterator<Item = (F, TypeDesc)>,
        prefix: Option<(Value, TypeDesc)>,
    ) where
        N: Into<String>,
        F: Into<String>,
    {
        let name = name.into();
        let def = StructDef {
            fields: fields
                .into_iter()
                .map(|(n, ty)| FieldDef { name: n.into(), ty })
                .collect(),
            prefix: prefix.map(|(value, ty)| Prefix { value, ty }),
        };
        trace!(name = %name, field_count = def.fields.len(), "registered struct");
        self.types.insert(name, TypeDef::Struct(def));
    }

    /// Registers a sum type under `name`.
    ///
    /// `variants` are `(name, fields)` pairs in declaration order; the
    /// i-th variant's wire discriminant is `i`.
    pub fn register_enum<N, V, F, I>(
        &mut self,
        name: N,
        variants: impl IntoIterator<Item = (V, I)>,
    ) where
        N: Into<String>,
        V: Into<String>,
        F: Into<String>,
        I: IntoIterator<Item = (F, TypeDesc)>,
    {
        let name = name.into();
        let def = EnumDef {
            variants: variants
                .into_iter()
                .map(|(vname, fields)| VariantDef {
                    name: vname.into(),
                    fields: fields
                        .into_iter()
                        .map(|(n, ty)| FieldDef { name: n.into(), ty })
                        .collect(),
                })
                .collect(),
        };
        trace!(name = %name, variant_count = def.variants.len(), "registered enum");
        self.types.insert(name, TypeDef::Enum(def));
    }

    /// Looks up a registered definition.
    pub fn get(&self, name: &str) -> Result<&TypeDef> {
        self.types
            .get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    /// Checks if a type name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Encodes `value` as the registered type `name`.
    ///
    /// Thin adapter over the crate façade, bound to `TypeDesc::user(name)`.
    pub fn encode_named(&self, name: &str, value: &Value, opts: Options) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        codec::encode_value(&mut writer, value, &TypeDesc::user(name), self, opts)?;
        Ok(writer.into_bytes())
    }

    /// Decodes a value of the registered type `name`, returning the
    /// value and the unconsumed tail.
    pub fn decode_named<'a>(
        &self,
        name: &str,
        bytes: &'a [u8],
        opts: Options,
    ) -> Result<(Value, &'a [u8])> {
        let mut reader = Reader::new(bytes);
        let value = codec::decode_value(&mut reader, &TypeDesc::user(name), self, opts)?;
        Ok((value, reader.rest()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
