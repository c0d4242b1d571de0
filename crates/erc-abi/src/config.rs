//! Codec policies

use serde::{Deserialize, Serialize};

/// How out-of-range indices and mismatched fixed-array lengths are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Report an error
    #[default]
    Strict,
    /// Clamp the index to the last slot; pad or truncate fixed arrays
    Clamp,
}

/// How address text of the wrong length is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressPolicy {
    /// Reject anything that is not exactly 20 bytes of hex
    #[default]
    Strict,
    /// Left-pad (or keep the rightmost 32 bytes of) whatever hex is given
    Permissive,
}

/// How `int256` values are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignedEncoding {
    /// Write the magnitude through the unsigned path; the sign is dropped
    #[default]
    Unsigned,
    /// Write negative values as two's complement
    TwosComplement,
}

/// Policy set shared by the encoder, decoder and extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Index and fixed-array bounds handling
    pub bounds: BoundsPolicy,
    /// Address text handling
    pub addresses: AddressPolicy,
    /// Signed integer encoding
    pub signed: SignedEncoding,
}

impl CodecConfig {
    /// Strict bounds, strict addresses, unsigned-path signed integers
    pub fn strict() -> Self {
        Self::default()
    }

    /// The permissive behaviour of the legacy ERC tools codec: clamped
    /// indices, padded addresses, unsigned-path signed integers
    pub fn compat() -> Self {
        Self {
            bounds: BoundsPolicy::Clamp,
            addresses: AddressPolicy::Permissive,
            signed: SignedEncoding::Unsigned,
        }
    }

    /// Builder: set the signed integer encoding
    pub fn with_signed(mut self, signed: SignedEncoding) -> Self {
        self.signed = signed;
        self
    }

    /// Builder: set the bounds policy
    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Builder: set the address policy
    pub fn with_addresses(mut self, addresses: AddressPolicy) -> Self {
        self.addresses = addresses;
        self
    }
}
