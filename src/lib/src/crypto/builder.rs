use crate::algorithm::*;
use crate::error::*;
use crate::ops::HostOps;

use std::fmt;

fn encode_digest(
    ops: &dyn HostOps,
    hex: String,
    encoding: DigestEncoding,
) -> Result<String, ShimError> {
    match encoding {
        DigestEncoding::Hex => Ok(hex),
        DigestEncoding::Base64 => ops.base64_encode(&hex),
    }
}

/// A streaming hash, as returned by `createHash()`.
///
/// Input is accumulated as text, and hashed in one go by the op table when the digest is requested.
/// Finalizing doesn't reset the accumulated input: `digest()` can be called multiple times.
pub struct HashBuilder<'o> {
    ops: &'o dyn HostOps,
    algorithm: String,
    buffer: String,
}

impl<'o> HashBuilder<'o> {
    pub(crate) fn new(ops: &'o dyn HostOps, algorithm: &str) -> Self {
        HashBuilder {
            ops,
            algorithm: algorithm.to_string(),
            buffer: String::new(),
        }
    }

    /// Return the algorithm name, as requested.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Append the textual representation of `input`.
    pub fn update(&mut self, input: impl fmt::Display) -> &mut Self {
        self.buffer.push_str(&input.to_string());
        self
    }

    /// Hash everything accumulated so far, and return the digest as a hex string.
    pub fn digest(&self) -> Result<String, ShimError> {
        self.digest_encoded(DigestEncoding::Hex)
    }

    /// Hash everything accumulated so far, and return the digest using `encoding`.
    ///
    /// Fails with `ShimError::UnsupportedAlgorithm` if the algorithm is unknown.
    pub fn digest_encoded(&self, encoding: DigestEncoding) -> Result<String, ShimError> {
        let algorithm: HashAlgorithm = self.algorithm.parse()?;
        let hex = self.ops.digest(algorithm, &self.buffer)?;
        encode_digest(self.ops, hex, encoding)
    }
}

impl fmt::Debug for HashBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HashBuilder {{ algorithm: {:?}, buffered: {} }}",
            self.algorithm,
            self.buffer.len()
        )
    }
}

/// A streaming HMAC, as returned by `createHmac()`.
///
/// The key is bound at creation time.
pub struct HmacBuilder<'o> {
    ops: &'o dyn HostOps,
    algorithm: String,
    key: String,
    buffer: String,
}

impl<'o> HmacBuilder<'o> {
    pub(crate) fn new(ops: &'o dyn HostOps, algorithm: &str, key: impl fmt::Display) -> Self {
        HmacBuilder {
            ops,
            algorithm: algorithm.to_string(),
            key: key.to_string(),
            buffer: String::new(),
        }
    }

    /// Return the algorithm name, as requested.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Append the textual representation of `input`.
    pub fn update(&mut self, input: impl fmt::Display) -> &mut Self {
        self.buffer.push_str(&input.to_string());
        self
    }

    /// Authenticate everything accumulated so far, and return the tag as a hex string.
    pub fn digest(&self) -> Result<String, ShimError> {
        self.digest_encoded(DigestEncoding::Hex)
    }

    /// Authenticate everything accumulated so far, and return the tag using `encoding`.
    ///
    /// Fails with `ShimError::UnsupportedAlgorithm` if the algorithm is unknown.
    pub fn digest_encoded(&self, encoding: DigestEncoding) -> Result<String, ShimError> {
        let algorithm: HmacAlgorithm = self.algorithm.parse()?;
        let hex = self.ops.hmac(algorithm, &self.key, &self.buffer)?;
        encode_digest(self.ops, hex, encoding)
    }
}

impl fmt::Debug for HmacBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HmacBuilder {{ algorithm: {:?}, buffered: {} }}",
            self.algorithm,
            self.buffer.len()
        )
    }
}
