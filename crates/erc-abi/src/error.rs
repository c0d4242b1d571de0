//! ABI error types

use thiserror::Error;

use crate::types::OutputType;

/// ABI codec error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Address text is not 20 bytes of hex
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Fixed array element count differs from its declared length
    #[error("Fixed array length mismatch: declared {declared}, got {actual}")]
    FixedArrayLength {
        /// Declared length
        declared: usize,
        /// Elements supplied
        actual: usize,
    },

    /// `bytesN` with an unusable width
    #[error("Invalid fixed bytes width: {0}")]
    InvalidWidth(usize),

    /// Extraction index past the last slot
    #[error("Index {index} out of bounds for {len} slots")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of decoded slots
        len: usize,
    },

    /// Nothing was decoded
    #[error("Empty return data")]
    EmptyReturn,

    /// Requested host type does not fit the declared output type
    #[error("Type mismatch: slot is {declared}, requested {requested}")]
    TypeMismatch {
        /// Declared output type of the slot
        declared: OutputType,
        /// Requested host type
        requested: &'static str,
    },

    /// String payload is not UTF-8
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Integer does not fit the requested host type
    #[error("Integer overflow: {0}")]
    Overflow(String),

    /// Unrecognized type name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Value text could not be parsed for its type
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_address() {
        let err = AbiError::InvalidAddress("expected 40 hex characters, got 4".into());
        assert_eq!(
            err.to_string(),
            "Invalid address: expected 40 hex characters, got 4"
        );
    }

    #[test]
    fn test_display_index_out_of_bounds() {
        let err = AbiError::IndexOutOfBounds { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Index 3 out of bounds for 2 slots");
    }

    #[test]
    fn test_display_type_mismatch() {
        let err = AbiError::TypeMismatch {
            declared: OutputType::Address,
            requested: "bool",
        };
        assert_eq!(err.to_string(), "Type mismatch: slot is address, requested bool");
    }
}
