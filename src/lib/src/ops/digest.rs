use crate::algorithm::*;
use crate::error::*;

/// One-shot digest of `input`.
pub(crate) fn digest(algorithm: HashAlgorithm, input: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Md5 => {
            use md5::{Digest, Md5};
            Md5::digest(input).to_vec()
        }
        HashAlgorithm::Sha1 => hmac_sha1_compact::Hash::hash(input).to_vec(),
        HashAlgorithm::Sha256 => hmac_sha256::Hash::hash(input).to_vec(),
        HashAlgorithm::Sha512 => hmac_sha512::Hash::hash(input).to_vec(),
    }
}

/// One-shot HMAC of `input` under `key`.
pub(crate) fn hmac(algorithm: HmacAlgorithm, key: &[u8], input: &[u8]) -> Result<Vec<u8>, ShimError> {
    let mac = match algorithm {
        HmacAlgorithm::Md5 => {
            use hmac::{Hmac, Mac};
            let mut mac = Hmac::<md5::Md5>::new_from_slice(key)
                .map_err(|e| ShimError::InternalError(e.to_string()))?;
            mac.update(input);
            mac.finalize().into_bytes().to_vec()
        }
        HmacAlgorithm::Sha1 => hmac_sha1_compact::HMAC::mac(input, key).to_vec(),
        HmacAlgorithm::Sha256 => hmac_sha256::HMAC::mac(input, key).to_vec(),
    };
    Ok(mac)
}
