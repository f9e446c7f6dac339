use bytes::Bytes;
use shulker_common::DecodeError;

/// Read cursor over one record's bytes.
///
/// Every read names the parse step it belongs to so a short buffer reports
/// where decoding stopped. Slices are handed out as `Bytes` sharing the
/// record's allocation.
#[derive(Debug, Clone)]
pub struct RecordBuffer {
    buffer: Bytes,
    cursor: usize,
}

impl RecordBuffer {
    pub fn new(buffer: Bytes) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.buffer.get(self.cursor).copied()
    }

    /// Fails unless at least `needed` bytes are left.
    pub fn require(&self, needed: usize, step: &'static str) -> Result<(), DecodeError> {
        let available = self.remaining();
        if available < needed {
            return Err(DecodeError::TruncatedRecord {
                step,
                needed,
                available,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self, step: &'static str) -> Result<u8, DecodeError> {
        self.require(1, step)?;
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    pub fn read_array<const N: usize>(
        &mut self,
        step: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        self.require(N, step)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.cursor..self.cursor + N]);
        self.cursor += N;
        Ok(out)
    }

    /// Takes the next `len` bytes without copying.
    pub fn read_bytes(&mut self, len: usize, step: &'static str) -> Result<Bytes, DecodeError> {
        self.require(len, step)?;
        let slice = self.buffer.slice(self.cursor..self.cursor + len);
        self.cursor += len;
        Ok(slice)
    }

    /// Takes everything after the cursor. Never fails; may be empty.
    pub fn read_rest(&mut self) -> Bytes {
        let slice = self.buffer.slice(self.cursor..);
        self.cursor = self.buffer.len();
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_record_buffer_reads_advance_cursor() {
        let mut buffer = RecordBuffer::from_slice(&[8, 1, 2, 3, 4, 5, 6]);
        assert_eq!(buffer.peek_byte(), Some(8));
        assert_eq!(buffer.read_u8("version").unwrap(), 8);
        assert_eq!(buffer.read_array::<2>("header").unwrap(), [1, 2]);
        assert_eq!(buffer.read_bytes(2, "data").unwrap(), Bytes::from_static(&[3, 4]));
        assert_eq!(buffer.cursor(), 5);
        assert_eq!(buffer.remaining(), 2);
        assert_eq!(buffer.read_rest(), Bytes::from_static(&[5, 6]));
        assert_eq!(buffer.remaining(), 0);
        assert!(buffer.read_rest().is_empty());
        assert_eq!(buffer.peek_byte(), None);
    }

    #[test]
    fn test_record_buffer_truncation_reports_step() {
        let mut buffer = RecordBuffer::from_slice(&[1, 2]);
        assert_matches!(
            buffer.read_bytes(4, "palette header"),
            Err(DecodeError::TruncatedRecord {
                step: "palette header",
                needed: 4,
                available: 2
            })
        );
        // failed reads leave the cursor alone
        assert_eq!(buffer.cursor(), 0);

        let mut empty = RecordBuffer::from_slice(&[]);
        assert_matches!(
            empty.read_u8("version"),
            Err(DecodeError::TruncatedRecord { needed: 1, available: 0, .. })
        );
    }
}
