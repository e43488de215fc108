// File: src/encoding.rs
// Purpose: Charset-aware percent-encoding of single URL components

use crate::error::{BridgeError, Result};

/// Whether `charset` names UTF-8, the only charset components are encoded in
pub fn is_utf8(charset: &str) -> bool {
    matches!(
        charset.trim().to_ascii_lowercase().as_str(),
        "utf-8" | "utf8"
    )
}

/// Percent-encodes `value` as a single URL component
pub fn encode_component(value: &str, charset: &str) -> Result<String> {
    if !is_utf8(charset) {
        return Err(BridgeError::UnsupportedCharset(charset.to_string()));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Reverses [`encode_component`]; invalid input is a malformed target
pub fn decode_component(value: &str) -> Result<String> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| BridgeError::MalformedTarget(e.to_string()))
}
