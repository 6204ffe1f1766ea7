mod builder;
mod random;

pub use builder::*;
pub use random::*;

use crate::algorithm::*;
use crate::error::*;
use crate::ops::HostOps;

use std::fmt;

/// The `CryptoUtils` namespace.
///
/// Every function coerces its arguments to text before handing them to the op table.
#[derive(Clone, Copy)]
pub struct CryptoUtils<'o> {
    ops: &'o dyn HostOps,
}

impl<'o> CryptoUtils<'o> {
    pub(crate) fn new(ops: &'o dyn HostOps) -> Self {
        CryptoUtils { ops }
    }

    pub fn md5(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Md5, &input.to_string())
    }

    pub fn sha1(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Sha1, &input.to_string())
    }

    pub fn sha256(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Sha256, &input.to_string())
    }

    pub fn sha512(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.digest(HashAlgorithm::Sha512, &input.to_string())
    }

    pub fn hmac_md5(
        &self,
        key: impl fmt::Display,
        input: impl fmt::Display,
    ) -> Result<String, ShimError> {
        self.ops
            .hmac(HmacAlgorithm::Md5, &key.to_string(), &input.to_string())
    }

    pub fn hmac_sha1(
        &self,
        key: impl fmt::Display,
        input: impl fmt::Display,
    ) -> Result<String, ShimError> {
        self.ops
            .hmac(HmacAlgorithm::Sha1, &key.to_string(), &input.to_string())
    }

    pub fn hmac_sha256(
        &self,
        key: impl fmt::Display,
        input: impl fmt::Display,
    ) -> Result<String, ShimError> {
        self.ops
            .hmac(HmacAlgorithm::Sha256, &key.to_string(), &input.to_string())
    }

    /// Same as `btoa()`.
    pub fn base64_encode(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.base64_encode(&input.to_string())
    }

    /// Same as `atob()`.
    pub fn base64_decode(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.base64_decode(&input.to_string())
    }

    pub fn hex_encode(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.hex_encode(&input.to_string())
    }

    pub fn hex_decode(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.hex_decode(&input.to_string())
    }

    pub fn url_encode(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.url_encode(&input.to_string())
    }

    pub fn url_decode(&self, input: impl fmt::Display) -> Result<String, ShimError> {
        self.ops.url_decode(&input.to_string())
    }

    /// Create a streaming hash. The algorithm name is only checked when the digest is computed.
    pub fn create_hash(&self, algorithm: &str) -> HashBuilder<'o> {
        HashBuilder::new(self.ops, algorithm)
    }

    /// Create a streaming HMAC. The algorithm name is only checked when the digest is computed.
    pub fn create_hmac(&self, algorithm: &str, key: impl fmt::Display) -> HmacBuilder<'o> {
        HmacBuilder::new(self.ops, algorithm, key)
    }
}

impl fmt::Debug for CryptoUtils<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CryptoUtils").finish_non_exhaustive()
    }
}
