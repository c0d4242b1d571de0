//! ABI encoding

use primitive_types::U256;
use tracing::{debug, warn};

use crate::config::{AddressPolicy, BoundsPolicy, CodecConfig, SignedEncoding};
use crate::selector::{function_selector, selector_hex, signature};
use crate::types::{fixed_width, SolidityValue, I256, WORD_SIZE};
use crate::AbiError;

/// A named function call with its ordered arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    name: String,
    args: Vec<SolidityValue>,
}

impl FunctionCall {
    /// Create a call
    pub fn new(name: impl Into<String>, args: Vec<SolidityValue>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered arguments
    pub fn args(&self) -> &[SolidityValue] {
        &self.args
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        signature(&self.name, &self.args)
    }

    /// 4-byte selector
    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.signature())
    }

    /// Selector as `0x` + 8 hex chars
    pub fn selector_hex(&self) -> String {
        selector_hex(self.selector())
    }

    /// Encode with the default (strict) policies into a `0x` hex payload
    pub fn encode(&self) -> Result<String, AbiError> {
        self.encode_with(&CodecConfig::default())
    }

    /// Encode into a `0x` hex payload
    pub fn encode_with(&self, config: &CodecConfig) -> Result<String, AbiError> {
        Ok(format!("0x{}", hex::encode(self.encode_bytes_with(config)?)))
    }

    /// Encode into raw bytes: selector ∥ head ∥ tail
    pub fn encode_bytes_with(&self, config: &CodecConfig) -> Result<Vec<u8>, AbiError> {
        let signature = self.signature();
        let params = encode_params(&self.args, config)?;

        let mut data = Vec::with_capacity(4 + params.len());
        data.extend_from_slice(&function_selector(&signature));
        data.extend(params);

        debug!(
            signature = %signature,
            args = self.args.len(),
            bytes = data.len(),
            "encoded function call"
        );
        Ok(data)
    }
}

/// Encode arguments without a selector.
///
/// The head holds one word per static value (fixed arrays inline) and one
/// offset word per dynamic value; the tail holds length-prefixed dynamic
/// payloads in argument order.
pub fn encode_params(args: &[SolidityValue], config: &CodecConfig) -> Result<Vec<u8>, AbiError> {
    let head_words: usize = args.iter().map(SolidityValue::head_word_count).sum();
    let mut cursor = head_words * WORD_SIZE;

    let mut head = Vec::with_capacity(cursor);
    let mut tail = Vec::new();

    for arg in args {
        if arg.is_dynamic() {
            head.extend_from_slice(&usize_word(cursor));
            cursor += (1 + arg.data_word_count()) * WORD_SIZE;
            encode_tail(arg, config, &mut tail)?;
        } else {
            encode_static(arg, config, &mut head)?;
        }
    }

    debug_assert_eq!(head.len(), head_words * WORD_SIZE);
    debug_assert_eq!(head.len() + tail.len(), cursor);

    head.extend(tail);
    Ok(head)
}

/// Append the head word(s) of a static value
fn encode_static(
    value: &SolidityValue,
    config: &CodecConfig,
    out: &mut Vec<u8>,
) -> Result<(), AbiError> {
    match value {
        SolidityValue::Address(text) => out.extend_from_slice(&address_word(text, config.addresses)?),
        SolidityValue::FixedBytes(width, data) => {
            out.extend_from_slice(&fixed_bytes_word(*width, data, config.bounds)?)
        }
        SolidityValue::Bool(b) => out.extend_from_slice(&usize_word(*b as usize)),
        SolidityValue::SignedInt(value) => out.extend_from_slice(&int_word(value, config.signed)),
        SolidityValue::UnsignedInt(value, _) => out.extend_from_slice(&uint_word(value)),
        SolidityValue::FixedUnsignedIntArray(len, values) => {
            check_fixed_len(*len, values.len(), config.bounds)?;
            for i in 0..*len {
                let value = values.get(i).copied().unwrap_or_default();
                out.extend_from_slice(&uint_word(&value));
            }
        }
        SolidityValue::FixedSignedIntArray(len, values) => {
            check_fixed_len(*len, values.len(), config.bounds)?;
            for i in 0..*len {
                let value = values.get(i).copied().unwrap_or_default();
                out.extend_from_slice(&int_word(&value, config.signed));
            }
        }
        SolidityValue::Bytes(_)
        | SolidityValue::String(_)
        | SolidityValue::UnsignedIntArray(..)
        | SolidityValue::AddressArray(_) => unreachable!("dynamic value in head"),
    }
    Ok(())
}

/// Append `[length word][data words]` of a dynamic value
fn encode_tail(
    value: &SolidityValue,
    config: &CodecConfig,
    out: &mut Vec<u8>,
) -> Result<(), AbiError> {
    out.extend_from_slice(&usize_word(value.type_length()));
    match value {
        SolidityValue::Bytes(data) => append_padded(data, out),
        SolidityValue::String(s) => append_padded(s.as_bytes(), out),
        SolidityValue::UnsignedIntArray(values, _) => {
            for value in values {
                out.extend_from_slice(&uint_word(value));
            }
        }
        SolidityValue::AddressArray(addresses) => {
            for text in addresses {
                out.extend_from_slice(&address_word(text, config.addresses)?);
            }
        }
        _ => unreachable!("static value in tail"),
    }
    Ok(())
}

fn check_fixed_len(declared: usize, actual: usize, bounds: BoundsPolicy) -> Result<(), AbiError> {
    if declared == actual {
        return Ok(());
    }
    match bounds {
        BoundsPolicy::Strict => Err(AbiError::FixedArrayLength { declared, actual }),
        BoundsPolicy::Clamp => {
            warn!(declared, actual, "fixed array length mismatch, padding/truncating");
            Ok(())
        }
    }
}

/// Right-pad raw content with zeros to the next word boundary
fn append_padded(data: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(data);
    let padded_len = data.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    out.resize(out.len() + padded_len - data.len(), 0);
}

/// Convert U256 to a 32-byte big-endian word
pub fn uint_word(value: &U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

fn usize_word(value: usize) -> [u8; 32] {
    uint_word(&U256::from(value))
}

/// Encode a signed integer according to the configured mode
pub fn int_word(value: &I256, mode: SignedEncoding) -> [u8; 32] {
    match mode {
        SignedEncoding::Unsigned => {
            if value.negative {
                warn!(value = %value, "signed value written through unsigned path, sign dropped");
            }
            uint_word(&value.abs)
        }
        SignedEncoding::TwosComplement if value.negative => {
            let (negated, _) = (!value.abs).overflowing_add(U256::one());
            uint_word(&negated)
        }
        SignedEncoding::TwosComplement => uint_word(&value.abs),
    }
}

/// Encode address text: 12 zero bytes followed by the 20 address bytes
pub fn address_word(text: &str, policy: AddressPolicy) -> Result<[u8; 32], AbiError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
        .to_ascii_lowercase();

    let mut word = [0u8; 32];
    match policy {
        AddressPolicy::Strict => {
            if digits.len() != 40 {
                return Err(AbiError::InvalidAddress(format!(
                    "expected 40 hex characters, got {}",
                    digits.len()
                )));
            }
            let bytes = hex::decode(&digits)
                .map_err(|e| AbiError::InvalidAddress(format!("invalid hex: {e}")))?;
            word[12..].copy_from_slice(&bytes);
        }
        AddressPolicy::Permissive => {
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(AbiError::InvalidAddress(format!("invalid hex: {}", text)));
            }
            if digits.len() != 40 {
                warn!(address = %text, "address is not 40 hex characters, padding");
            }
            let padded = format!("{:0>64}", digits);
            let bytes = hex::decode(&padded[padded.len() - 64..])
                .map_err(|e| AbiError::InvalidAddress(format!("invalid hex: {e}")))?;
            word.copy_from_slice(&bytes);
        }
    }
    Ok(word)
}

/// Encode `bytesN`: content left-aligned, zero-padded on the right
pub fn fixed_bytes_word(
    width: usize,
    data: &[u8],
    bounds: BoundsPolicy,
) -> Result<[u8; 32], AbiError> {
    if width == 0 && bounds == BoundsPolicy::Strict {
        return Err(AbiError::InvalidWidth(width));
    }
    let mut word = [0u8; 32];
    let len = data.len().min(fixed_width(width));
    word[..len].copy_from_slice(&data[..len]);
    Ok(word)
}
