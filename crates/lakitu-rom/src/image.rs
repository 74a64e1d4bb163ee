//! A loaded game image: raw PRG bytes plus a content digest.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::RomError;

/// NES PRG addresses are wrapped to 14 bits when mapped into the image.
const ADDRESS_MASK: usize = 0x3FFF;

pub struct RomImage {
    bytes: Vec<u8>,
    digest: String,
}

impl RomImage {
    /// Load an image from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, RomError> {
        let bytes = std::fs::read(path).map_err(|e| RomError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = format!("{:x}", hasher.finalize());
        Self { bytes, digest }
    }

    /// SHA-256 hex digest of the whole image.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The byte at an absolute offset.
    ///
    /// # Errors
    /// Fails when the offset is past the end of the image.
    pub fn byte_at(&self, offset: usize) -> Result<u8, RomError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(RomError::OutOfBounds {
                offset,
                len: self.bytes.len(),
            })
    }

    /// A run of `count` bytes starting at `offset`.
    ///
    /// # Errors
    /// Fails when the run extends past the end of the image.
    pub fn slice_at(&self, offset: usize, count: usize) -> Result<&[u8], RomError> {
        self.bytes
            .get(offset..offset + count)
            .ok_or(RomError::OutOfBounds {
                offset,
                len: self.bytes.len(),
            })
    }

    /// The bytes from `offset` up to and including the first `sentinel`.
    ///
    /// # Errors
    /// Fails when the offset is out of bounds or no sentinel follows it.
    pub fn file_at(&self, offset: usize, sentinel: u8) -> Result<&[u8], RomError> {
        let tail = self.bytes.get(offset..).ok_or(RomError::OutOfBounds {
            offset,
            len: self.bytes.len(),
        })?;
        let end = tail
            .iter()
            .position(|&b| b == sentinel)
            .ok_or(RomError::UnterminatedStream { offset, sentinel })?;
        tail.get(..=end).ok_or(RomError::UnterminatedStream {
            offset,
            sentinel,
        })
    }

    /// Read entry `position` of a split LSB/MSB address table and map the
    /// 16-bit address into the image.
    ///
    /// # Errors
    /// Fails when either table byte is out of bounds.
    pub fn address_at(
        &self,
        lsb_table: usize,
        msb_table: usize,
        position: usize,
    ) -> Result<usize, RomError> {
        let lsb = usize::from(self.byte_at(lsb_table + position)?);
        let msb = usize::from(self.byte_at(msb_table + position)?);
        Ok(((msb << 8) | lsb) & ADDRESS_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_hex_of_the_content() {
        let image = RomImage::from_bytes(Vec::new());
        assert_eq!(
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            image.digest()
        );
        assert!(image.is_empty());
    }

    #[test]
    fn file_at_includes_the_sentinel() {
        let image = RomImage::from_bytes(vec![0x00, 0x50, 0x21, 0xFD, 0x99]);
        let file = image.file_at(1, 0xFD).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(&[0x50, 0x21, 0xFD], file);
    }

    #[test]
    fn missing_sentinel_is_an_error() {
        let image = RomImage::from_bytes(vec![0x50, 0x21]);
        assert!(matches!(
            image.file_at(0, 0xFD),
            Err(RomError::UnterminatedStream {
                offset: 0,
                sentinel: 0xFD
            })
        ));
    }

    #[test]
    fn addresses_wrap_to_fourteen_bits() {
        // lsb table at 0, msb table at 2.
        let image = RomImage::from_bytes(vec![0x34, 0x00, 0x92, 0x00]);
        let address = image.address_at(0, 2, 0).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(0x1234, address);
    }

    #[test]
    fn out_of_bounds_reads_fail() {
        let image = RomImage::from_bytes(vec![0x00]);
        assert!(matches!(
            image.byte_at(1),
            Err(RomError::OutOfBounds { offset: 1, len: 1 })
        ));
        assert!(image.slice_at(0, 2).is_err());
    }
}
