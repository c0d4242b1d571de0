//! Typed extraction of decoded return slots

use primitive_types::U256;
use std::fmt;
use tracing::debug;

use crate::config::BoundsPolicy;
use crate::decode::DecodedReturn;
use crate::types::OutputType;
use crate::AbiError;

/// A return slot converted according to its declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnValue {
    /// UTF-8 text
    String(String),
    /// Big-endian unsigned integer
    Int(U256),
    /// Boolean, true iff the word is nonzero
    Bool(bool),
    /// Raw bytes (dynamic or fixed)
    Bytes(Vec<u8>),
    /// `0x`-prefixed lowercase hex address
    Address(String),
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnValue::String(s) => f.write_str(s),
            ReturnValue::Int(v) => write!(f, "{}", v),
            ReturnValue::Bool(b) => write!(f, "{}", b),
            ReturnValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            ReturnValue::Address(a) => f.write_str(a),
        }
    }
}

/// Convert a raw slot payload according to its declared type
pub fn extract_value(raw: &[u8], declared: &OutputType) -> Result<ReturnValue, AbiError> {
    let value = match declared {
        OutputType::String => ReturnValue::String(
            String::from_utf8(raw.to_vec()).map_err(|e| AbiError::InvalidUtf8(e.to_string()))?,
        ),
        OutputType::Int => ReturnValue::Int(word_to_u256(raw)?),
        OutputType::Bool => ReturnValue::Bool(raw.iter().any(|b| *b != 0)),
        OutputType::Bytes | OutputType::FixedBytes(_) => ReturnValue::Bytes(raw.to_vec()),
        OutputType::Address => ReturnValue::Address(format!("0x{}", hex::encode(raw))),
    };
    Ok(value)
}

fn word_to_u256(raw: &[u8]) -> Result<U256, AbiError> {
    if raw.len() > 32 {
        return Err(AbiError::Overflow(format!("{} byte integer", raw.len())));
    }
    Ok(U256::from_big_endian(raw))
}

impl DecodedReturn {
    fn resolve_index(&self, index: usize) -> Result<usize, AbiError> {
        if self.is_empty() {
            return Err(AbiError::EmptyReturn);
        }
        let last = self.len() - 1;
        if index <= last {
            return Ok(index);
        }
        match self.bounds() {
            BoundsPolicy::Strict => Err(AbiError::IndexOutOfBounds {
                index,
                len: self.len(),
            }),
            BoundsPolicy::Clamp => {
                debug!(index, last, "clamping return slot index");
                Ok(last)
            }
        }
    }

    /// Convert slot `index` according to its declared type
    pub fn get(&self, index: usize) -> Result<ReturnValue, AbiError> {
        let index = self.resolve_index(index)?;
        let raw = self.slot(index).ok_or(AbiError::EmptyReturn)?;
        extract_value(raw, &self.types()[index])
    }

    /// Convert slot `index` into a host type
    pub fn extract<T: FromReturnValue>(&self, index: usize) -> Result<T, AbiError> {
        let index = self.resolve_index(index)?;
        let declared = self.types()[index];
        T::from_return_value(self.get(index)?).map_err(|e| match e {
            AbiError::TypeMismatch { requested, .. } => AbiError::TypeMismatch { declared, requested },
            other => other,
        })
    }

    /// Assemble all slots into a record type
    pub fn model<T: SolidityModel>(&self) -> Result<T, AbiError> {
        T::from_decoded(self)
    }
}

/// Host types a [`ReturnValue`] can be converted into
pub trait FromReturnValue: Sized {
    /// Convert, or fail with [`AbiError::TypeMismatch`] / [`AbiError::Overflow`]
    fn from_return_value(value: ReturnValue) -> Result<Self, AbiError>;
}

/// A record assembled positionally from a [`DecodedReturn`].
///
/// ```rust
/// use erc_abi::{decode, AbiError, DecodedReturn, OutputType, SolidityModel, U256};
///
/// struct Balance {
///     owner: String,
///     amount: U256,
/// }
///
/// impl SolidityModel for Balance {
///     fn from_decoded(decoded: &DecodedReturn) -> Result<Self, AbiError> {
///         Ok(Balance {
///             owner: decoded.extract(0)?,
///             amount: decoded.extract(1)?,
///         })
///     }
/// }
///
/// let data = format!("0x{}{}", "00".repeat(31) + "01", "00".repeat(31) + "02");
/// let balance: Balance = decode(&data, &[OutputType::Address, OutputType::Int]).model().unwrap();
/// assert_eq!(balance.owner, "0x0000000000000000000000000000000000000001");
/// assert_eq!(balance.amount, U256::from(2));
/// ```
pub trait SolidityModel: Sized {
    /// Build the record, one extraction per field in declaration order
    fn from_decoded(decoded: &DecodedReturn) -> Result<Self, AbiError>;
}

fn mismatch<T>(value: &ReturnValue, requested: &'static str) -> Result<T, AbiError> {
    let declared = match value {
        ReturnValue::String(_) => OutputType::String,
        ReturnValue::Int(_) => OutputType::Int,
        ReturnValue::Bool(_) => OutputType::Bool,
        ReturnValue::Bytes(_) => OutputType::Bytes,
        ReturnValue::Address(_) => OutputType::Address,
    };
    Err(AbiError::TypeMismatch { declared, requested })
}

impl FromReturnValue for ReturnValue {
    fn from_return_value(value: ReturnValue) -> Result<Self, AbiError> {
        Ok(value)
    }
}

impl FromReturnValue for String {
    fn from_return_value(value: ReturnValue) -> Result<Self, AbiError> {
        match value {
            ReturnValue::String(s) | ReturnValue::Address(s) => Ok(s),
            other => mismatch(&other, "String"),
        }
    }
}

impl FromReturnValue for U256 {
    fn from_return_value(value: ReturnValue) -> Result<Self, AbiError> {
        match value {
            ReturnValue::Int(v) => Ok(v),
            ReturnValue::Bool(b) => Ok(U256::from(b as u8)),
            other => mismatch(&other, "U256"),
        }
    }
}

macro_rules! impl_from_return_value_uint {
    ($($ty:ty),*) => {
        $(
            impl FromReturnValue for $ty {
                fn from_return_value(value: ReturnValue) -> Result<Self, AbiError> {
                    let v = U256::from_return_value(value)?;
                    if v > U256::from(<$ty>::MAX) {
                        return Err(AbiError::Overflow(format!(
                            "{} does not fit in {}",
                            v,
                            stringify!($ty)
                        )));
                    }
                    Ok(v.low_u128() as $ty)
                }
            }
        )*
    };
}

impl_from_return_value_uint!(u8, u16, u32, u64, u128, usize);

impl FromReturnValue for bool {
    fn from_return_value(value: ReturnValue) -> Result<Self, AbiError> {
        match value {
            ReturnValue::Bool(b) => Ok(b),
            ReturnValue::Int(v) => Ok(!v.is_zero()),
            other => mismatch(&other, "bool"),
        }
    }
}

impl FromReturnValue for Vec<u8> {
    fn from_return_value(value: ReturnValue) -> Result<Self, AbiError> {
        match value {
            ReturnValue::Bytes(b) => Ok(b),
            other => mismatch(&other, "Vec<u8>"),
        }
    }
}
