//! Parsing of textual type names and `type:value` arguments

use primitive_types::U256;

use crate::types::{OutputType, SolidityValue, UintWidth, I256};
use crate::AbiError;

/// Parse an output type name (e.g. `uint256`, `address`, `bytes32`)
pub fn parse_output_type(s: &str) -> Result<OutputType, AbiError> {
    let s = s.trim();
    match s {
        "string" => return Ok(OutputType::String),
        "bytes" => return Ok(OutputType::Bytes),
        "bool" => return Ok(OutputType::Bool),
        "address" => return Ok(OutputType::Address),
        _ => {}
    }

    if s.strip_prefix("uint").or_else(|| s.strip_prefix("int")).is_some_and(is_bits) {
        return Ok(OutputType::Int);
    }

    if let Some(rest) = s.strip_prefix("bytes") {
        return parse_width(rest).map(OutputType::FixedBytes);
    }

    Err(AbiError::UnknownType(s.to_string()))
}

/// Parse a `type:value` argument, e.g. `uint256:100` or `address[]:0x..,0x..`.
///
/// Array elements are comma-separated; `bytes` and `bytesN` values are hex.
pub fn parse_value(arg: &str) -> Result<SolidityValue, AbiError> {
    let (ty, value) = arg
        .split_once(':')
        .ok_or_else(|| AbiError::InvalidValue(format!("expected type:value, got {}", arg)))?;
    let ty = ty.trim();

    if let Some(inner) = ty.strip_suffix("[]") {
        let items = split_items(value);
        if inner == "address" {
            return Ok(SolidityValue::AddressArray(
                items.into_iter().map(str::to_string).collect(),
            ));
        }
        let width = parse_uint_width(inner)?;
        let values = items.into_iter().map(parse_uint).collect::<Result<_, _>>()?;
        return Ok(SolidityValue::UnsignedIntArray(values, width));
    }

    if let Some((inner, len)) = ty.strip_suffix(']').and_then(|t| t.split_once('[')) {
        let len: usize = len
            .parse()
            .map_err(|_| AbiError::UnknownType(ty.to_string()))?;
        let items = split_items(value);
        return match inner {
            "uint" | "uint256" => Ok(SolidityValue::FixedUnsignedIntArray(
                len,
                items.into_iter().map(parse_uint).collect::<Result<_, _>>()?,
            )),
            "int" | "int256" => Ok(SolidityValue::FixedSignedIntArray(
                len,
                items.into_iter().map(parse_int).collect::<Result<_, _>>()?,
            )),
            _ => Err(AbiError::UnknownType(ty.to_string())),
        };
    }

    match ty {
        "address" => Ok(SolidityValue::Address(value.trim().to_string())),
        "bool" => match value.trim() {
            "true" | "1" => Ok(SolidityValue::Bool(true)),
            "false" | "0" => Ok(SolidityValue::Bool(false)),
            other => Err(AbiError::InvalidValue(format!("bool: {}", other))),
        },
        "string" => Ok(SolidityValue::String(value.to_string())),
        "bytes" => Ok(SolidityValue::Bytes(parse_hex(value)?)),
        "int" | "int256" => Ok(SolidityValue::SignedInt(parse_int(value)?)),
        _ => {
            if ty.starts_with("uint") {
                let width = parse_uint_width(ty)?;
                return Ok(SolidityValue::UnsignedInt(parse_uint(value)?, width));
            }
            if let Some(rest) = ty.strip_prefix("bytes") {
                return Ok(SolidityValue::FixedBytes(parse_width(rest)?, parse_hex(value)?));
            }
            Err(AbiError::UnknownType(ty.to_string()))
        }
    }
}

/// Validate a type name and return its canonical form.
///
/// `uint` and `int` expand to `uint256` and `int256`; arrays (`T[]`, `T[N]`)
/// must hold a scalar element type.
pub fn parse_type_name(s: &str) -> Result<String, AbiError> {
    let s = s.trim();
    if let Some(inner) = s.strip_suffix("[]") {
        return Ok(format!("{}[]", scalar_type_name(inner)?));
    }
    if let Some((inner, len)) = s.strip_suffix(']').and_then(|t| t.split_once('[')) {
        let len: usize = len
            .parse()
            .map_err(|_| AbiError::UnknownType(s.to_string()))?;
        return Ok(format!("{}[{}]", scalar_type_name(inner)?, len));
    }
    scalar_type_name(s)
}

fn scalar_type_name(s: &str) -> Result<String, AbiError> {
    match s {
        "address" | "bool" | "string" | "bytes" => return Ok(s.to_string()),
        "uint" => return Ok("uint256".to_string()),
        "int" => return Ok("int256".to_string()),
        _ => {}
    }
    if s.strip_prefix("uint").or_else(|| s.strip_prefix("int")).is_some_and(is_bits) {
        return Ok(s.to_string());
    }
    if let Some(rest) = s.strip_prefix("bytes") {
        parse_width(rest)?;
        return Ok(s.to_string());
    }
    Err(AbiError::UnknownType(s.to_string()))
}

fn is_bits(rest: &str) -> bool {
    rest.is_empty() || rest.parse::<usize>().is_ok_and(|b| b % 8 == 0 && (8..=256).contains(&b))
}

fn parse_width(rest: &str) -> Result<usize, AbiError> {
    match rest.parse::<usize>() {
        Ok(width) if (1..=32).contains(&width) => Ok(width),
        _ => Err(AbiError::UnknownType(format!("bytes{}", rest))),
    }
}

fn parse_uint_width(ty: &str) -> Result<UintWidth, AbiError> {
    let rest = ty
        .strip_prefix("uint")
        .ok_or_else(|| AbiError::UnknownType(ty.to_string()))?;
    if rest.is_empty() {
        return Ok(UintWidth::U256);
    }
    rest.parse::<usize>()
        .ok()
        .and_then(UintWidth::from_bits)
        .ok_or_else(|| AbiError::UnknownType(ty.to_string()))
}

fn split_items(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_hex(value: &str) -> Result<Vec<u8>, AbiError> {
    let value = value.trim();
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|e| AbiError::InvalidValue(format!("hex {}: {}", value, e)))
}

/// Parse a decimal or `0x` hex unsigned integer
pub fn parse_uint(value: &str) -> Result<U256, AbiError> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x") {
        Some("") => None,
        Some(digits) => U256::from_str_radix(digits, 16).ok(),
        None if value.is_empty() => None,
        None => U256::from_dec_str(value).ok(),
    };
    parsed.ok_or_else(|| AbiError::InvalidValue(format!("uint: {}", value)))
}

/// Parse a decimal signed integer, optionally negative
pub fn parse_int(value: &str) -> Result<I256, AbiError> {
    let value = value.trim();
    match value.strip_prefix('-') {
        Some(abs) => Ok(I256::new(parse_uint(abs)?, true)),
        None => Ok(I256::new(parse_uint(value)?, false)),
    }
}
