use crate::env::*;
use crate::error::*;

use ct_codecs::{Decoder, Hex};

/// The polyfilled parts of the `crypto` global.
///
/// Each function fails with `ShimError::ProvidedByHost` if the host already defines it.
#[derive(Debug, Clone, Copy)]
pub struct Crypto<'e> {
    env: &'e Environment,
}

impl<'e> Crypto<'e> {
    pub(crate) fn new(env: &'e Environment) -> Self {
        Crypto { env }
    }

    fn check(&self, capability: Capability) -> Result<(), ShimError> {
        if self.env.is_installed(capability) {
            Ok(())
        } else {
            Err(ShimError::ProvidedByHost(capability))
        }
    }

    /// `crypto.randomUUID()`
    pub fn random_uuid(&self) -> Result<String, ShimError> {
        self.check(Capability::RandomUuid)?;
        self.env.ops().random_uuid()
    }

    /// `crypto.getRandomValues()`
    ///
    /// Every element receives a single random byte, whatever its width. The filled slice is returned.
    pub fn get_random_values<'a, T: From<u8>>(
        &self,
        array: &'a mut [T],
    ) -> Result<&'a mut [T], ShimError> {
        self.check(Capability::GetRandomValues)?;
        let hex = self.env.ops().random_bytes(array.len())?;
        let bytes = Hex::decode_to_vec(&hex, None)
            .map_err(|_| ShimError::InternalError("malformed random bytes".to_string()))?;
        if bytes.len() != array.len() {
            return Err(ShimError::InternalError(format!(
                "expected {} random bytes, got {}",
                array.len(),
                bytes.len()
            )));
        }
        for (slot, byte) in array.iter_mut().zip(bytes) {
            *slot = T::from(byte);
        }
        Ok(array)
    }
}
