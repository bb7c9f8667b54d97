//! Error types for Bramble operations.

use thiserror::Error;

/// Result type for Bramble operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Bramble operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Value does not match the shape the descriptor expects.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Negative value supplied for an unsigned descriptor.
    #[error("negative value {value} cannot be encoded as {descriptor}")]
    NegativeUnsigned { value: i128, descriptor: String },

    /// Decode ran out of bytes.
    #[error("truncated input: needed {needed} bytes, only {available} available")]
    TruncatedInput { needed: usize, available: usize },

    /// Boolean byte other than 0x00 or 0x01.
    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    /// Option tag byte other than 0x00 or 0x01.
    #[error("invalid option tag byte: {0:#04x}")]
    InvalidOption(u8),

    /// Varint first byte outside the recognized set.
    #[error("invalid varint tag byte: {0:#04x}")]
    InvalidVarint(u8),

    /// Tuple or struct has the wrong number of components.
    #[error("arity mismatch: expected {expected} components, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Value's declared type does not match the target struct or enum.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Enum discriminant outside the declared variant range.
    #[error("unknown variant discriminant {discriminant} for enum {name}")]
    UnknownVariant { name: String, discriminant: u128 },

    /// Reference to a name the registry has no entry for.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Decoded string bytes are not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Decoded length prefix exceeds the platform word size.
    #[error("length prefix {0} does not fit in usize")]
    LengthOverflow(u128),

    /// Tuple descriptor arity outside the supported range.
    #[error("tuple arity {arity} outside supported range 1..={max}")]
    UnsupportedTupleArity { arity: usize, max: usize },
}

impl Error {
    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a truncated input error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::TruncatedInput { needed, available }
    }

    /// Creates a schema mismatch error.
    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }
}
