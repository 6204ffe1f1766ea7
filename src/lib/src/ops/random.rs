use crate::error::*;

fn fill(buf: &mut [u8]) -> Result<(), ShimError> {
    getrandom::getrandom(buf).map_err(|e| ShimError::InternalError(e.to_string()))
}

pub(crate) fn random_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn random_bytes(len: usize) -> Result<Vec<u8>, ShimError> {
    let mut bytes = vec![0u8; len];
    fill(&mut bytes)?;
    Ok(bytes)
}

/// Uniform `f64` in `[0, 1)`, built from 53 random bits.
pub(crate) fn random_scalar() -> Result<f64, ShimError> {
    let mut bytes = [0u8; 8];
    fill(&mut bytes)?;
    let bits = u64::from_le_bytes(bytes) >> 11;
    Ok(bits as f64 / (1u64 << 53) as f64)
}
