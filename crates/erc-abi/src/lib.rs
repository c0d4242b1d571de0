//! # erc-abi
//!
//! Ethereum contract ABI codec.
//!
//! - Encoding named function calls into `0x` hex call data
//! - Computing function selectors
//! - Decoding hex return data into raw slots
//! - Extracting typed values (and whole records) from those slots
//!
//! # Example
//!
//! ```rust
//! use erc_abi::{decode, FunctionCall, OutputType, SolidityValue, U256};
//!
//! // Encode a transfer call
//! let call = FunctionCall::new(
//!     "transfer",
//!     vec![
//!         SolidityValue::address("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d"),
//!         SolidityValue::uint256(1000u64),
//!     ],
//! );
//! let data = call.encode().unwrap();
//! assert!(data.starts_with("0xa9059cbb"));
//!
//! // Decode a balance response
//! let result = format!("0x{}", "00".repeat(31) + "64"); // From eth_call
//! let balance: U256 = decode(&result, &[OutputType::Int]).extract(0).unwrap();
//! assert_eq!(balance, U256::from(100));
//! ```
//!
//! All operations are pure functions of their inputs; nothing here blocks,
//! performs I/O or keeps state between calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod decode;
mod encode;
mod error;
mod extract;
mod parse;
mod selector;
mod types;

pub use config::{AddressPolicy, BoundsPolicy, CodecConfig, SignedEncoding};
pub use decode::{decode, decode_bytes, decode_with, DecodedReturn};
pub use encode::{
    address_word, encode_params, fixed_bytes_word, int_word, uint_word, FunctionCall,
};
pub use error::AbiError;
pub use extract::{extract_value, FromReturnValue, ReturnValue, SolidityModel};
pub use parse::{parse_int, parse_output_type, parse_type_name, parse_uint, parse_value};
pub use selector::{function_selector, keccak256, selector_hex, signature, signature_from_types};
pub use types::{OutputType, SolidityValue, UintWidth, I256, WORD_SIZE};

// Re-export primitive-types for U256
pub use primitive_types::U256;
