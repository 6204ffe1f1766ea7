use crate::error::*;

use ct_codecs::{Base64, Decoder, Encoder, Hex};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but `A-Z a-z 0-9 - _ . ~` is escaped.
const URL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The `encodeURIComponent()` set: the URI unreserved marks are left alone.
const URI_COMPONENT_ENCODE_SET: &AsciiSet = &URL_ENCODE_SET
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The `encodeURI()` set: reserved characters and `#` are also left alone.
const URI_ENCODE_SET: &AsciiSet = &URI_COMPONENT_ENCODE_SET
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

fn utf8(bin: Vec<u8>) -> Result<String, ShimError> {
    String::from_utf8(bin).map_err(|_| ShimError::DecodeError("decoded data is not UTF-8".to_string()))
}

pub(crate) fn hex_bytes(bin: impl AsRef<[u8]>) -> Result<String, ShimError> {
    Hex::encode_to_string(bin).map_err(|e| ShimError::InternalError(e.to_string()))
}

pub(crate) fn base64_encode(input: &str) -> Result<String, ShimError> {
    Base64::encode_to_string(input).map_err(|e| ShimError::InternalError(e.to_string()))
}

pub(crate) fn base64_decode(input: &str) -> Result<String, ShimError> {
    let bin = Base64::decode_to_vec(input, None)
        .map_err(|e| ShimError::DecodeError(format!("base64: {}", e)))?;
    utf8(bin)
}

pub(crate) fn hex_encode(input: &str) -> Result<String, ShimError> {
    hex_bytes(input)
}

pub(crate) fn hex_decode(input: &str) -> Result<String, ShimError> {
    let bin =
        Hex::decode_to_vec(input, None).map_err(|e| ShimError::DecodeError(format!("hex: {}", e)))?;
    utf8(bin)
}

fn percent_encode(input: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, set).to_string()
}

fn percent_decode(input: &str) -> Result<String, ShimError> {
    let bytes = input.as_bytes();
    for (i, &c) in bytes.iter().enumerate() {
        if c != b'%' {
            continue;
        }
        let escape = bytes.get(i + 1..i + 3);
        if !matches!(escape, Some([h, l]) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()) {
            return Err(ShimError::DecodeError(format!(
                "malformed escape sequence at offset {}",
                i
            )));
        }
    }
    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ShimError::DecodeError("decoded data is not UTF-8".to_string()))
}

pub(crate) fn url_encode(input: &str) -> String {
    percent_encode(input, URL_ENCODE_SET)
}

pub(crate) fn url_decode(input: &str) -> Result<String, ShimError> {
    percent_decode(input)
}

pub(crate) fn encode_uri_component(input: &str) -> String {
    percent_encode(input, URI_COMPONENT_ENCODE_SET)
}

pub(crate) fn decode_uri_component(input: &str) -> Result<String, ShimError> {
    percent_decode(input)
}

pub(crate) fn encode_uri(input: &str) -> String {
    percent_encode(input, URI_ENCODE_SET)
}
