mod codec;
mod digest;
mod random;

use crate::algorithm::*;
use crate::error::*;

/// The host op table.
///
/// Every Web-API-shaped function in this crate is a thin layer over one of these primitives.
/// Text goes in, text comes out; decoders fail with `ShimError::DecodeError` on malformed input.
///
/// `NativeOps` is the implementation used by default. Embedders backed by another runtime can
/// supply their own; host-specific failures can be surfaced through `ShimError::HostError`.
pub trait HostOps {
    /// Lowercase hex digest of `input`.
    fn digest(&self, algorithm: HashAlgorithm, input: &str) -> Result<String, ShimError>;

    /// Lowercase hex HMAC of `input` under `key`.
    fn hmac(&self, algorithm: HmacAlgorithm, key: &str, input: &str) -> Result<String, ShimError>;

    fn base64_encode(&self, input: &str) -> Result<String, ShimError>;

    fn base64_decode(&self, input: &str) -> Result<String, ShimError>;

    fn hex_encode(&self, input: &str) -> Result<String, ShimError>;

    fn hex_decode(&self, input: &str) -> Result<String, ShimError>;

    /// Percent-encode everything except `A-Z a-z 0-9 - _ . ~`.
    fn url_encode(&self, input: &str) -> Result<String, ShimError>;

    fn url_decode(&self, input: &str) -> Result<String, ShimError>;

    fn encode_uri_component(&self, input: &str) -> Result<String, ShimError>;

    fn decode_uri_component(&self, input: &str) -> Result<String, ShimError>;

    fn encode_uri(&self, input: &str) -> Result<String, ShimError>;

    /// There is no dedicated native op for `decodeURI()`: the component decoder is used.
    fn decode_uri(&self, input: &str) -> Result<String, ShimError> {
        self.decode_uri_component(input)
    }

    /// A random (v4) UUID.
    fn random_uuid(&self) -> Result<String, ShimError>;

    /// `len` random bytes, as a hex string.
    fn random_bytes(&self, len: usize) -> Result<String, ShimError>;

    /// A random number in `[0, 1)`.
    fn random_scalar(&self) -> Result<f64, ShimError>;
}

/// The native op table.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOps;

impl HostOps for NativeOps {
    fn digest(&self, algorithm: HashAlgorithm, input: &str) -> Result<String, ShimError> {
        codec::hex_bytes(digest::digest(algorithm, input.as_bytes()))
    }

    fn hmac(&self, algorithm: HmacAlgorithm, key: &str, input: &str) -> Result<String, ShimError> {
        codec::hex_bytes(digest::hmac(algorithm, key.as_bytes(), input.as_bytes())?)
    }

    fn base64_encode(&self, input: &str) -> Result<String, ShimError> {
        codec::base64_encode(input)
    }

    fn base64_decode(&self, input: &str) -> Result<String, ShimError> {
        codec::base64_decode(input)
    }

    fn hex_encode(&self, input: &str) -> Result<String, ShimError> {
        codec::hex_encode(input)
    }

    fn hex_decode(&self, input: &str) -> Result<String, ShimError> {
        codec::hex_decode(input)
    }

    fn url_encode(&self, input: &str) -> Result<String, ShimError> {
        Ok(codec::url_encode(input))
    }

    fn url_decode(&self, input: &str) -> Result<String, ShimError> {
        codec::url_decode(input)
    }

    fn encode_uri_component(&self, input: &str) -> Result<String, ShimError> {
        Ok(codec::encode_uri_component(input))
    }

    fn decode_uri_component(&self, input: &str) -> Result<String, ShimError> {
        codec::decode_uri_component(input)
    }

    fn encode_uri(&self, input: &str) -> Result<String, ShimError> {
        Ok(codec::encode_uri(input))
    }

    fn random_uuid(&self) -> Result<String, ShimError> {
        Ok(random::random_uuid())
    }

    fn random_bytes(&self, len: usize) -> Result<String, ShimError> {
        codec::hex_bytes(random::random_bytes(len)?)
    }

    fn random_scalar(&self) -> Result<f64, ShimError> {
        random::random_scalar()
    }
}
