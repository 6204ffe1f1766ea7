use crate::error::*;

use std::fmt;
use std::str::FromStr;

/// A digest algorithm supported by `createHash()` and the global hash shortcuts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Canonical (lowercase) name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ShimError;

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(ShimError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An HMAC algorithm supported by `createHmac()`.
///
/// There is no SHA-512 variant: the op table only exposes HMAC over MD5, SHA-1 and SHA-256.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HmacAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HmacAlgorithm {
    /// Canonical (lowercase) name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            HmacAlgorithm::Md5 => "md5",
            HmacAlgorithm::Sha1 => "sha1",
            HmacAlgorithm::Sha256 => "sha256",
        }
    }
}

impl FromStr for HmacAlgorithm {
    type Err = ShimError;

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HmacAlgorithm::Md5),
            "sha1" => Ok(HmacAlgorithm::Sha1),
            "sha256" => Ok(HmacAlgorithm::Sha256),
            _ => Err(ShimError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Output encoding of a finalized digest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DigestEncoding {
    /// Lowercase hexadecimal.
    #[default]
    Hex,
    /// Base64 of the *hex string*, not of the raw digest bytes.
    Base64,
}

impl DigestEncoding {
    /// Map an encoding name to an encoding.
    ///
    /// Only `"base64"` selects base64; every other name falls back to hex.
    pub fn from_name(name: &str) -> Self {
        match name {
            "base64" => DigestEncoding::Base64,
            _ => DigestEncoding::Hex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_lookup_is_case_insensitive() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("Md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("sha512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
    }

    #[test]
    fn unknown_names_are_rejected() {
        match "whirlpool".parse::<HashAlgorithm>() {
            Err(ShimError::UnsupportedAlgorithm(name)) => assert_eq!(name, "whirlpool"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            "sha512".parse::<HmacAlgorithm>(),
            Err(ShimError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn encoding_names() {
        assert_eq!(DigestEncoding::from_name("base64"), DigestEncoding::Base64);
        assert_eq!(DigestEncoding::from_name("hex"), DigestEncoding::Hex);
        assert_eq!(DigestEncoding::from_name("latin1"), DigestEncoding::Hex);
        assert_eq!(DigestEncoding::from_name("BASE64"), DigestEncoding::Hex);
    }
}
