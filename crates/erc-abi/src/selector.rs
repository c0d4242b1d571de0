//! Function selector derivation

use sha3::{Digest, Keccak256};

use crate::parse::parse_type_name;
use crate::types::SolidityValue;
use crate::AbiError;

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Canonical signature, e.g. `transfer(address,uint256)`
pub fn signature(name: &str, args: &[SolidityValue]) -> String {
    let descriptors: Vec<String> = args.iter().map(SolidityValue::type_descriptor).collect();
    format!("{}({})", name, descriptors.join(","))
}

/// Canonical signature from textual type names, validating each one
pub fn signature_from_types(name: &str, types: &[&str]) -> Result<String, AbiError> {
    let descriptors = types
        .iter()
        .map(|ty| parse_type_name(ty))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{}({})", name, descriptors.join(",")))
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Render a selector as `0x` + 8 hex chars
pub fn selector_hex(selector: [u8; 4]) -> String {
    format!("0x{}", hex::encode(selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UintWidth;
    use primitive_types::U256;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_function_selector() {
        // transfer(address,uint256)
        let selector = function_selector("transfer(address,uint256)");
        assert_eq!(selector, [0xa9, 0x05, 0x9c, 0xbb]);

        // balanceOf(address)
        let selector = function_selector("balanceOf(address)");
        assert_eq!(selector, [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_selector_hex() {
        assert_eq!(
            selector_hex(function_selector("approve(address,uint256)")),
            "0x095ea7b3"
        );
        assert_eq!(selector_hex(function_selector("totalSupply()")), "0x18160ddd");
    }

    #[test]
    fn test_signature_from_args() {
        let args = [
            SolidityValue::address("0x000000000000000000000000000000000000dEaD"),
            SolidityValue::uint256(1u64),
        ];
        assert_eq!(signature("transfer", &args), "transfer(address,uint256)");
    }

    #[test]
    fn test_signature_no_args() {
        assert_eq!(signature("name", &[]), "name()");
    }

    #[test]
    fn test_signature_mixed() {
        let args = [
            SolidityValue::string("x"),
            SolidityValue::UnsignedIntArray(vec![U256::one()], UintWidth::U8),
            SolidityValue::FixedBytes(4, vec![]),
            SolidityValue::FixedUnsignedIntArray(3, vec![]),
        ];
        assert_eq!(
            signature("f", &args),
            "f(string,uint8[],bytes4,uint256[3])"
        );
    }

    #[test]
    fn test_signature_from_types() {
        let sig = signature_from_types("transfer", &["address", "uint"]).unwrap();
        assert_eq!(sig, "transfer(address,uint256)");
        assert_eq!(selector_hex(function_selector(&sig)), "0xa9059cbb");
        assert_eq!(signature_from_types("f", &[]).unwrap(), "f()");
    }

    #[test]
    fn test_signature_from_types_rejects_unknown() {
        assert!(matches!(
            signature_from_types("f", &["foo"]),
            Err(AbiError::UnknownType(_))
        ));
    }
}
