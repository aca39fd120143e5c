use alloy_eips::eip4844::{Blob, USABLE_BYTES_PER_BLOB};
use core::slice::Iter;

/// An iterator over a blob. The structure implements the iterator trait and will skip a byte every
/// 32 bytes. This byte is wasted due to the use of 32 bytes per field element in the blob,
/// but every field element needing to be smaller than the BLS modulus.
#[derive(Debug, Clone)]
pub struct BlobSliceIter<'a> {
    iterator: Iter<'a, u8>,
    count: usize,
}

impl<'a> BlobSliceIter<'a> {
    /// Returns a [`BlobSliceIter`] from the provided iterator.
    pub fn from_blob_slice(blob: &'a [u8]) -> Self {
        Self { iterator: blob.iter(), count: 0 }
    }
}

impl<'a> Iterator for BlobSliceIter<'a> {
    type Item = &'a u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.count % 32 == 0 {
            let _ = self.iterator.next();
            self.count += 1;
        }
        self.count += 1;
        self.iterator.next()
    }
}

/// Returns the canonical bytes of the blob, i.e. the 31 usable bytes of each field element.
pub fn canonical_bytes(blob: &Blob) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(USABLE_BYTES_PER_BLOB);
    bytes.extend(BlobSliceIter::from_blob_slice(blob.as_slice()).copied());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_skip_unused_blob_bytes() {
        let blob = (0..96u8).collect::<Vec<_>>();
        let iterator = BlobSliceIter::from_blob_slice(&blob);

        let expected = (1..32u8).chain(33..64).chain(65..96).collect::<Vec<_>>();
        assert_eq!(iterator.copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_should_extract_canonical_bytes() {
        let mut blob = Blob::ZERO;
        blob[1] = 0xaa;
        blob[33] = 0xbb;

        let bytes = canonical_bytes(&blob);
        assert_eq!(bytes.len(), USABLE_BYTES_PER_BLOB);
        assert_eq!(bytes[0], 0xaa);
        assert_eq!(bytes[31], 0xbb);
    }
}
