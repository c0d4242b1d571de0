//! ABI decoding of return data

use primitive_types::U256;
use tracing::{debug, warn};

use crate::config::{BoundsPolicy, CodecConfig};
use crate::types::{OutputType, WORD_SIZE};

/// Raw return slots, paired positionally with their declared types
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedReturn {
    slots: Vec<Vec<u8>>,
    types: Vec<OutputType>,
    bounds: BoundsPolicy,
}

impl DecodedReturn {
    pub(crate) fn empty(bounds: BoundsPolicy) -> Self {
        Self {
            slots: Vec::new(),
            types: Vec::new(),
            bounds,
        }
    }

    /// Number of decoded slots (zero for malformed return data)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw payload of one slot
    pub fn slot(&self, index: usize) -> Option<&[u8]> {
        self.slots.get(index).map(Vec::as_slice)
    }

    /// All raw payloads in declaration order
    pub fn slots(&self) -> &[Vec<u8>] {
        &self.slots
    }

    /// Declared output types
    pub fn types(&self) -> &[OutputType] {
        &self.types
    }

    /// Index policy used by extraction
    pub fn bounds(&self) -> BoundsPolicy {
        self.bounds
    }
}

/// Decode hex return data with the default policies
pub fn decode(data: &str, outputs: &[OutputType]) -> DecodedReturn {
    decode_with(data, outputs, &CodecConfig::default())
}

/// Decode hex return data (`0x` prefix optional).
///
/// Malformed data (not hex, empty, or not a whole number of words) yields an
/// empty result.
pub fn decode_with(data: &str, outputs: &[OutputType], config: &CodecConfig) -> DecodedReturn {
    let digits = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);

    match hex::decode(digits) {
        Ok(bytes) => decode_bytes(&bytes, outputs, config),
        Err(e) => {
            warn!(error = %e, "return data is not valid hex");
            DecodedReturn::empty(config.bounds)
        }
    }
}

/// Decode raw return bytes
pub fn decode_bytes(data: &[u8], outputs: &[OutputType], config: &CodecConfig) -> DecodedReturn {
    if data.is_empty() || data.len() % WORD_SIZE != 0 {
        debug!(len = data.len(), "malformed return data");
        return DecodedReturn::empty(config.bounds);
    }

    let slots = outputs
        .iter()
        .enumerate()
        .map(|(index, output)| resolve_slot(data, index, output))
        .collect();

    DecodedReturn {
        slots,
        types: outputs.to_vec(),
        bounds: config.bounds,
    }
}

/// Resolve one slot to its raw payload; unresolvable slots are empty
fn resolve_slot(data: &[u8], index: usize, output: &OutputType) -> Vec<u8> {
    let start = index * WORD_SIZE;
    let slice = match output {
        OutputType::Bool | OutputType::Int => data.get(start..start + WORD_SIZE),
        OutputType::FixedBytes(width) => data.get(start..start + (*width).min(WORD_SIZE)),
        OutputType::Address => data.get(start + 12..start + WORD_SIZE),
        OutputType::String | OutputType::Bytes => dynamic_payload(data, start),
    };

    match slice {
        Some(bytes) => bytes.to_vec(),
        None => {
            warn!(index, output = %output, "unresolved return slot");
            Vec::new()
        }
    }
}

/// Follow the offset word at `start` to a length-prefixed payload
fn dynamic_payload(data: &[u8], start: usize) -> Option<&[u8]> {
    let offset = read_usize(data, start)?;
    let len = read_usize(data, offset)?;
    if len == 0 {
        return Some(&data[..0]);
    }
    let begin = offset.checked_add(WORD_SIZE)?;
    data.get(begin..begin.checked_add(len)?)
}

/// Read a big-endian word as usize, if it fits
fn read_usize(data: &[u8], at: usize) -> Option<usize> {
    let word = data.get(at..at.checked_add(WORD_SIZE)?)?;
    let value = U256::from_big_endian(word);
    if value > U256::from(usize::MAX) {
        return None;
    }
    Some(value.as_usize())
}
