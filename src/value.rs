//! Dynamic values carried through the codec.
//!
//! The codec is driven by [`TypeDesc`] descriptors rather than by static
//! Rust types, so values are a dynamic tree. Integers are held as either
//! [`Value::Int`] or [`Value::UInt`]; the two compare, order and hash by
//! numeric value, so a host may hand `Int(5)` to a `U64` descriptor and
//! round-trip back an equal value.
//!
//! [`TypeDesc`]: crate::TypeDesc

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

/// A dynamic value the codec can encode or decode.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed integer. Accepted by any integer descriptor it fits.
    Int(i128),
    /// Unsigned integer. Accepted by any integer descriptor it fits.
    UInt(u128),
    /// IEEE-754 binary32 float.
    F32(f32),
    /// IEEE-754 binary64 float.
    F64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Str(String),
    /// Optional value.
    Opt(Option<Box<Value>>),
    /// Ordered sequence.
    Seq(Vec<Value>),
    /// Key/value mapping; iteration order is insertion order.
    Map(IndexMap<Value, Value>),
    /// Set with structural equality.
    Set(BTreeSet<Value>),
    /// Fixed-arity heterogeneous tuple.
    Tuple(Vec<Value>),
    /// Instance of a registered struct, fields in any order.
    Struct {
        /// Registered type name.
        name: String,
        /// Field name/value pairs.
        fields: Vec<(String, Value)>,
    },
    /// Instance of a registered enum variant.
    Variant {
        /// Registered enum name.
        enum_name: String,
        /// Variant name within the enum.
        variant: String,
        /// Field name/value pairs.
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Absent optional.
    pub fn none() -> Self {
        Value::Opt(None)
    }

    /// Present optional wrapping `inner`.
    pub fn some(inner: Value) -> Self {
        Value::Opt(Some(Box::new(inner)))
    }

    /// Sequence from an iterator of values.
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(items.into_iter().collect())
    }

    /// Mapping from an iterator of key/value pairs, in iteration order.
    pub fn map(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(pairs.into_iter().collect())
    }

    /// Set from an iterator of values; duplicates collapse.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(items.into_iter().collect())
    }

    /// Tuple from an iterator of values.
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Struct instance for the registered type `name`.
    pub fn record<N, F>(name: N, fields: impl IntoIterator<Item = (F, Value)>) -> Self
    where
        N: Into<String>,
        F: Into<String>,
    {
        Value::Struct {
            name: name.into(),
            fields: fields.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Variant instance for the registered enum `enum_name`.
    pub fn variant<N, V, F>(
        enum_name: N,
        variant: V,
        fields: impl IntoIterator<Item = (F, Value)>,
    ) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        F: Into<String>,
    {
        Value::Variant {
            enum_name: enum_name.into(),
            variant: variant.into(),
            fields: fields.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Short name of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::UInt(_) => "UInt",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "Str",
            Value::Opt(_) => "Opt",
            Value::Seq(_) => "Seq",
            Value::Map(_) => "Map",
            Value::Set(_) => "Set",
            Value::Tuple(_) => "Tuple",
            Value::Struct { .. } => "Struct",
            Value::Variant { .. } => "Variant",
        }
    }

    /// Numeric key shared by `Int` and `UInt`: sign flag plus magnitude.
    fn int_key(&self) -> Option<(bool, u128)> {
        match self {
            Value::Int(n) if *n < 0 => Some((true, n.unsigned_abs())),
            Value::Int(n) => Some((false, *n as u128)),
            Value::UInt(u) => Some((false, *u)),
            _ => None,
        }
    }

    /// Rank for cross-kind ordering. `Int` and `UInt` share a rank.
    fn rank(&self) -> u8 {
        match self {
            Value::Int(_) | Value::UInt(_) => 0,
            Value::F32(_) => 1,
            Value::F64(_) => 2,
            Value::Bool(_) => 3,
            Value::Str(_) => 4,
            Value::Opt(_) => 5,
            Value::Seq(_) => 6,
            Value::Map(_) => 7,
            Value::Set(_) => 8,
            Value::Tuple(_) => 9,
            Value::Struct { .. } => 10,
            Value::Variant { .. } => 11,
        }
    }
}

fn cmp_int_keys(a: (bool, u128), b: (bool, u128)) -> Ordering {
    match (a.0, b.0) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        // Among negatives the larger magnitude is the smaller number.
        (true, true) => b.1.cmp(&a.1),
        (false, false) => a.1.cmp(&b.1),
    }
}

fn cmp_maps(a: &IndexMap<Value, Value>, b: &IndexMap<Value, Value>) -> Ordering {
    // Mapping equality is order-insensitive: compare as sorted pair lists.
    let mut av: Vec<_> = a.iter().collect();
    let mut bv: Vec<_> = b.iter().collect();
    av.sort_by(|x, y| x.0.cmp(y.0));
    bv.sort_by(|x, y| x.0.cmp(y.0));
    av.cmp(&bv)
}

// Struct and variant fields compare by name, not by supplied order:
// encoding matches fields by name and decoding yields declaration
// order, so two orderings of the same fields denote the same value.
fn cmp_fields(a: &[(String, Value)], b: &[(String, Value)]) -> Ordering {
    let mut av: Vec<_> = a.iter().collect();
    let mut bv: Vec<_> = b.iter().collect();
    av.sort_by(|x, y| x.0.cmp(&y.0));
    bv.sort_by(|x, y| x.0.cmp(&y.0));
    av.cmp(&bv)
}

fn hash_fields<H: Hasher>(fields: &[(String, Value)], state: &mut H) {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by(|x, y| x.0.cmp(&y.0));
    sorted.hash(state);
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(_) | Value::UInt(_), Value::Int(_) | Value::UInt(_)) => {
                let a = self.int_key().unwrap();
                let b = other.int_key().unwrap();
                cmp_int_keys(a, b)
            }
            (Value::F32(a), Value::F32(b)) => a.total_cmp(b),
            (Value::F64(a), Value::F64(b)) => a.total_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Opt(a), Value::Opt(b)) => match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.cmp(y),
            },
            (Value::Seq(a), Value::Seq(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => cmp_maps(a, b),
            (Value::Set(a), Value::Set(b)) => a.cmp(b),
            (Value::Tuple(a), Value::Tuple(b)) => a.cmp(b),
            (
                Value::Struct { name: an, fields: af },
                Value::Struct { name: bn, fields: bf },
            ) => an.cmp(bn).then_with(|| cmp_fields(af, bf)),
            (
                Value::Variant { enum_name: ae, variant: av, fields: af },
                Value::Variant { enum_name: be, variant: bv, fields: bf },
            ) => ae
                .cmp(be)
                .then_with(|| av.cmp(bv))
                .then_with(|| cmp_fields(af, bf)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Int(_) | Value::UInt(_) => {
                let (neg, mag) = self.int_key().unwrap();
                neg.hash(state);
                mag.hash(state);
            }
            Value::F32(v) => v.to_bits().hash(state),
            Value::F64(v) => v.to_bits().hash(state),
            Value::Bool(v) => v.hash(state),
            Value::Str(v) => v.hash(state),
            Value::Opt(v) => match v {
                None => false.hash(state),
                Some(inner) => {
                    true.hash(state);
                    inner.hash(state);
                }
            },
            Value::Seq(items) | Value::Tuple(items) => items.hash(state),
            Value::Map(map) => {
                // Equality ignores order, so fold per-pair hashes commutatively.
                map.len().hash(state);
                let mut acc = 0u64;
                for pair in map {
                    let mut pair_hasher = DefaultHasher::new();
                    pair.hash(&mut pair_hasher);
                    acc = acc.wrapping_add(pair_hasher.finish());
                }
                acc.hash(state);
            }
            Value::Set(items) => {
                // BTreeSet iterates in sorted order, which is deterministic.
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
            Value::Struct { name, fields } => {
                name.hash(state);
                hash_fields(fields, state);
            }
            Value::Variant { enum_name, variant, fields } => {
                enum_name.hash(state);
                variant.hash(state);
                hash_fields(fields, state);
            }
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::UInt(v as u128)
            }
        })*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Int(v as i128)
            }
        })*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
