//! Base64 encoding helpers.
//!
//! All binary-to-text conversion on the wire (digests, signature values,
//! member keys in the default signer) uses the standard base64 alphabet.

use base64::Engine;
use std::fmt;

/// Trait for types that can be converted to base64 strings
pub trait ToBase64 {
    /// Convert to base64 string representation
    fn to_base64(&self) -> String;
}

/// Trait for types that can be created from base64 strings
pub trait FromBase64: Sized {
    /// Error type for base64 decoding
    type Error: fmt::Display;

    /// Create from base64 string representation
    fn from_base64(b64_str: &str) -> Result<Self, Self::Error>;
}

impl ToBase64 for Vec<u8> {
    fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self)
    }
}

impl FromBase64 for Vec<u8> {
    type Error = base64::DecodeError;

    fn from_base64(b64_str: &str) -> Result<Self, Self::Error> {
        base64::engine::general_purpose::STANDARD.decode(b64_str)
    }
}

impl ToBase64 for [u8] {
    fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self)
    }
}

impl ToBase64 for &[u8] {
    fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self)
    }
}

impl<const N: usize> ToBase64 for [u8; N] {
    fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self)
    }
}
