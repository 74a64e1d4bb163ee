//! An offset-tracking byte reader, so parse errors can name where in the
//! stream they arose.

use crate::error::BytecodeError;

pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// The offset of the next unread byte.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Consume and return the next byte.
    ///
    /// # Errors
    /// Fails when the stream is exhausted.
    pub(crate) fn next(&mut self) -> Result<u8, BytecodeError> {
        let byte = self
            .bytes
            .get(self.offset)
            .copied()
            .ok_or(BytecodeError::UnexpectedEnd {
                offset: self.offset,
            })?;
        self.offset += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_in_order_then_errors() {
        let mut reader = Reader::new(&[0xAA, 0xBB]);
        assert_eq!(0, reader.offset());
        assert_eq!(0xAA, reader.next().unwrap_or_else(|e| panic!("{e}")));
        assert_eq!(0xBB, reader.next().unwrap_or_else(|e| panic!("{e}")));
        assert!(matches!(
            reader.next(),
            Err(BytecodeError::UnexpectedEnd { offset: 2 })
        ));
    }
}
