//! ABI type catalog

use std::fmt;

use primitive_types::U256;

/// Size of one ABI word in bytes
pub const WORD_SIZE: usize = 32;

/// Declared bit width of an unsigned integer.
///
/// The width only changes the canonical type descriptor; every integer
/// still occupies one full word on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UintWidth {
    /// uint8
    U8,
    /// uint32
    U32,
    /// uint128
    U128,
    /// uint256
    #[default]
    U256,
}

impl UintWidth {
    /// Number of bits
    pub fn bits(self) -> usize {
        match self {
            UintWidth::U8 => 8,
            UintWidth::U32 => 32,
            UintWidth::U128 => 128,
            UintWidth::U256 => 256,
        }
    }

    /// Map a bit count back to a supported width
    pub fn from_bits(bits: usize) -> Option<Self> {
        match bits {
            8 => Some(UintWidth::U8),
            32 => Some(UintWidth::U32),
            128 => Some(UintWidth::U128),
            256 => Some(UintWidth::U256),
            _ => None,
        }
    }
}

/// Signed 256-bit integer kept as sign and magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256. A negative zero is normalized to zero.
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        I256::from_i128(value as i128)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.abs)
        } else {
            write!(f, "{}", self.abs)
        }
    }
}

/// One call argument.
///
/// Arguments are flat: arrays only carry scalar elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolidityValue {
    /// 20-byte address as hex text, `0x` prefix optional
    Address(String),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// `bytesN`; the width is clamped to 32
    FixedBytes(usize, Vec<u8>),
    /// Boolean
    Bool(bool),
    /// UTF-8 string
    String(String),
    /// int256
    SignedInt(I256),
    /// Unsigned integer with its declared width
    UnsignedInt(U256, UintWidth),
    /// Dynamic array of unsigned integers
    UnsignedIntArray(Vec<U256>, UintWidth),
    /// Dynamic array of addresses
    AddressArray(Vec<String>),
    /// `uint256[N]`, static
    FixedUnsignedIntArray(usize, Vec<U256>),
    /// `int256[N]`, static
    FixedSignedIntArray(usize, Vec<I256>),
}

impl SolidityValue {
    /// Create an address argument
    pub fn address(addr: impl Into<String>) -> Self {
        SolidityValue::Address(addr.into())
    }

    /// Create a uint256 argument
    pub fn uint256(value: impl Into<U256>) -> Self {
        SolidityValue::UnsignedInt(value.into(), UintWidth::U256)
    }

    /// Create a uint8 argument
    pub fn uint8(value: u8) -> Self {
        SolidityValue::UnsignedInt(U256::from(value), UintWidth::U8)
    }

    /// Create an int256 argument
    pub fn int256(value: i128) -> Self {
        SolidityValue::SignedInt(I256::from_i128(value))
    }

    /// Create a string argument
    pub fn string(s: impl Into<String>) -> Self {
        SolidityValue::String(s.into())
    }

    /// Create a dynamic bytes argument
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        SolidityValue::Bytes(data.into())
    }

    /// True for values referenced through a tail offset
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            SolidityValue::Bytes(_)
                | SolidityValue::String(_)
                | SolidityValue::UnsignedIntArray(..)
                | SolidityValue::AddressArray(_)
        )
    }

    /// Words this argument occupies in the head.
    ///
    /// Fixed arrays are static and sit inline, one word per declared element.
    pub fn head_word_count(&self) -> usize {
        match self {
            SolidityValue::FixedUnsignedIntArray(len, _)
            | SolidityValue::FixedSignedIntArray(len, _) => *len,
            _ => 1,
        }
    }

    /// Payload words, excluding the length word of dynamic values
    pub fn data_word_count(&self) -> usize {
        match self {
            SolidityValue::Bytes(data) => data.len().div_ceil(WORD_SIZE),
            SolidityValue::String(s) => s.len().div_ceil(WORD_SIZE),
            SolidityValue::UnsignedIntArray(values, _) => values.len(),
            SolidityValue::AddressArray(values) => values.len(),
            SolidityValue::FixedUnsignedIntArray(len, _)
            | SolidityValue::FixedSignedIntArray(len, _) => *len,
            _ => 1,
        }
    }

    /// Value of the tail length word (element or byte count)
    pub fn type_length(&self) -> usize {
        match self {
            SolidityValue::Bytes(data) => data.len(),
            SolidityValue::String(s) => s.len(),
            SolidityValue::UnsignedIntArray(values, _) => values.len(),
            SolidityValue::AddressArray(values) => values.len(),
            _ => 0,
        }
    }

    /// Canonical type name used in the function signature
    pub fn type_descriptor(&self) -> String {
        match self {
            SolidityValue::Address(_) => "address".to_string(),
            SolidityValue::Bytes(_) => "bytes".to_string(),
            SolidityValue::FixedBytes(width, _) => format!("bytes{}", fixed_width(*width)),
            SolidityValue::Bool(_) => "bool".to_string(),
            SolidityValue::String(_) => "string".to_string(),
            SolidityValue::SignedInt(_) => "int256".to_string(),
            SolidityValue::UnsignedInt(_, width) => format!("uint{}", width.bits()),
            SolidityValue::UnsignedIntArray(_, width) => format!("uint{}[]", width.bits()),
            SolidityValue::AddressArray(_) => "address[]".to_string(),
            SolidityValue::FixedUnsignedIntArray(len, _) => format!("uint256[{}]", len),
            SolidityValue::FixedSignedIntArray(len, _) => format!("int256[{}]", len),
        }
    }
}

/// Effective `bytesN` width: at least 1, at most one word
pub(crate) fn fixed_width(width: usize) -> usize {
    width.clamp(1, WORD_SIZE)
}

/// Declared type of one return slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Dynamic UTF-8 string
    String,
    /// Dynamic bytes
    Bytes,
    /// `bytesN`, left-aligned in its word
    FixedBytes(usize),
    /// Boolean
    Bool,
    /// Any integer, read as a big-endian unsigned word
    Int,
    /// 20-byte address in the low end of its word
    Address,
}

impl OutputType {
    /// True for slots holding an offset into the tail
    pub fn is_dynamic(&self) -> bool {
        matches!(self, OutputType::String | OutputType::Bytes)
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputType::String => write!(f, "string"),
            OutputType::Bytes => write!(f, "bytes"),
            OutputType::FixedBytes(width) => write!(f, "bytes{}", fixed_width(*width)),
            OutputType::Bool => write!(f, "bool"),
            OutputType::Int => write!(f, "uint256"),
            OutputType::Address => write!(f, "address"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Dynamism ====================

    #[test]
    fn test_is_dynamic() {
        assert!(SolidityValue::bytes(vec![1, 2]).is_dynamic());
        assert!(SolidityValue::string("hi").is_dynamic());
        assert!(SolidityValue::UnsignedIntArray(vec![], UintWidth::U8).is_dynamic());
        assert!(SolidityValue::AddressArray(vec![]).is_dynamic());

        assert!(!SolidityValue::address("0x00").is_dynamic());
        assert!(!SolidityValue::Bool(true).is_dynamic());
        assert!(!SolidityValue::uint256(1u64).is_dynamic());
        assert!(!SolidityValue::int256(-1).is_dynamic());
        assert!(!SolidityValue::FixedBytes(4, vec![]).is_dynamic());
        assert!(!SolidityValue::FixedUnsignedIntArray(3, vec![]).is_dynamic());
        assert!(!SolidityValue::FixedSignedIntArray(2, vec![]).is_dynamic());
    }

    // ==================== Word counts ====================

    #[test]
    fn test_data_word_count_rounds_up() {
        assert_eq!(SolidityValue::bytes(vec![]).data_word_count(), 0);
        assert_eq!(SolidityValue::bytes(vec![0u8; 1]).data_word_count(), 1);
        assert_eq!(SolidityValue::bytes(vec![0u8; 32]).data_word_count(), 1);
        assert_eq!(SolidityValue::bytes(vec![0u8; 33]).data_word_count(), 2);
        assert_eq!(SolidityValue::string("hello").data_word_count(), 1);
    }

    #[test]
    fn test_data_word_count_counts_utf8_bytes() {
        // 11 characters, 33 bytes
        let s = "ééééééééééé".to_string() + "abcdefghijk";
        assert_eq!(s.len(), 33);
        assert_eq!(SolidityValue::String(s).data_word_count(), 2);
    }

    #[test]
    fn test_data_word_count_arrays() {
        let values = vec![U256::from(1), U256::from(2), U256::from(3)];
        assert_eq!(
            SolidityValue::UnsignedIntArray(values, UintWidth::U256).data_word_count(),
            3
        );
        assert_eq!(
            SolidityValue::AddressArray(vec!["0x01".into(), "0x02".into()]).data_word_count(),
            2
        );
    }

    #[test]
    fn test_head_word_count() {
        assert_eq!(SolidityValue::string("a long string that spans words").head_word_count(), 1);
        assert_eq!(SolidityValue::uint256(7u64).head_word_count(), 1);
        assert_eq!(SolidityValue::FixedUnsignedIntArray(4, vec![]).head_word_count(), 4);
    }

    #[test]
    fn test_type_length() {
        assert_eq!(SolidityValue::string("hello").type_length(), 5);
        assert_eq!(SolidityValue::bytes(vec![1, 2, 3]).type_length(), 3);
        assert_eq!(SolidityValue::AddressArray(vec!["0x01".into()]).type_length(), 1);
        assert_eq!(SolidityValue::Bool(true).type_length(), 0);
    }

    // ==================== Descriptors ====================

    #[test]
    fn test_type_descriptor_scalars() {
        assert_eq!(SolidityValue::address("0x00").type_descriptor(), "address");
        assert_eq!(SolidityValue::bytes(vec![]).type_descriptor(), "bytes");
        assert_eq!(SolidityValue::Bool(false).type_descriptor(), "bool");
        assert_eq!(SolidityValue::string("").type_descriptor(), "string");
        assert_eq!(SolidityValue::int256(5).type_descriptor(), "int256");
        assert_eq!(SolidityValue::uint8(5).type_descriptor(), "uint8");
        assert_eq!(
            SolidityValue::UnsignedInt(U256::one(), UintWidth::U32).type_descriptor(),
            "uint32"
        );
        assert_eq!(
            SolidityValue::UnsignedInt(U256::one(), UintWidth::U128).type_descriptor(),
            "uint128"
        );
        assert_eq!(SolidityValue::uint256(5u64).type_descriptor(), "uint256");
    }

    #[test]
    fn test_type_descriptor_fixed_bytes_clamped() {
        assert_eq!(SolidityValue::FixedBytes(4, vec![]).type_descriptor(), "bytes4");
        assert_eq!(SolidityValue::FixedBytes(32, vec![]).type_descriptor(), "bytes32");
        assert_eq!(SolidityValue::FixedBytes(64, vec![]).type_descriptor(), "bytes32");
    }

    #[test]
    fn test_type_descriptor_arrays() {
        assert_eq!(
            SolidityValue::UnsignedIntArray(vec![], UintWidth::U8).type_descriptor(),
            "uint8[]"
        );
        assert_eq!(
            SolidityValue::UnsignedIntArray(vec![], UintWidth::U256).type_descriptor(),
            "uint256[]"
        );
        assert_eq!(SolidityValue::AddressArray(vec![]).type_descriptor(), "address[]");
        assert_eq!(
            SolidityValue::FixedUnsignedIntArray(4, vec![]).type_descriptor(),
            "uint256[4]"
        );
        assert_eq!(
            SolidityValue::FixedSignedIntArray(2, vec![]).type_descriptor(),
            "int256[2]"
        );
    }

    #[test]
    fn test_output_type_display() {
        assert_eq!(OutputType::Int.to_string(), "uint256");
        assert_eq!(OutputType::FixedBytes(8).to_string(), "bytes8");
        assert!(OutputType::String.is_dynamic());
        assert!(!OutputType::Address.is_dynamic());
    }

    // ==================== I256 ====================

    #[test]
    fn test_i256_from_i128() {
        let positive = I256::from_i128(100);
        assert!(!positive.negative);
        assert_eq!(positive.abs, U256::from(100));

        let negative = I256::from_i128(-100);
        assert!(negative.negative);
        assert_eq!(negative.abs, U256::from(100));
        assert_eq!(negative.to_string(), "-100");

        let min = I256::from_i128(i128::MIN);
        assert_eq!(min.abs, U256::from(i128::MIN.unsigned_abs()));
    }

    #[test]
    fn test_i256_negative_zero_normalized() {
        let zero = I256::new(U256::zero(), true);
        assert!(zero.is_zero());
        assert!(!zero.negative);
    }

    #[test]
    fn test_uint_width_roundtrip() {
        for width in [UintWidth::U8, UintWidth::U32, UintWidth::U128, UintWidth::U256] {
            assert_eq!(UintWidth::from_bits(width.bits()), Some(width));
        }
        assert_eq!(UintWidth::from_bits(16), None);
    }
}
