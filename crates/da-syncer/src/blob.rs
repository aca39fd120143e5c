use crate::DaSyncError;

use alloy_eips::eip4844::{env_settings::EnvKzgSettings, kzg_to_versioned_hash, Blob};
use alloy_primitives::B256;

/// Computes the KZG commitment of the blob and returns its EIP-4844 versioned hash.
pub fn compute_blob_versioned_hash(blob: &Blob) -> Result<B256, DaSyncError> {
    let settings = EnvKzgSettings::Default.get();
    let blob = c_kzg::Blob::from_bytes(blob.as_slice()).map_err(DaSyncError::Kzg)?;
    let commitment = settings.blob_to_kzg_commitment(&blob).map_err(DaSyncError::Kzg)?;
    Ok(kzg_to_versioned_hash(&commitment.to_bytes().into_inner()))
}

/// Verifies that the blob hashes to the expected versioned hash.
pub fn verify_blob(blob: &Blob, expected: B256) -> Result<(), DaSyncError> {
    let computed = compute_blob_versioned_hash(blob)?;
    if computed != expected {
        return Err(DaSyncError::BlobHashMismatch { expected, computed })
    }
    Ok(())
}
