use crate::errors::{DecodeError, Result};

/// A read position into a borrowed byte buffer.  All reads are bounds checked and a failed read
/// leaves the position untouched.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The bytes between `start` and the current position.
    pub fn consumed_since(&self, start: usize) -> &'a [u8] {
        &self.data[start.min(self.position)..self.position]
    }

    pub fn peek(&self) -> Result<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(DecodeError::OutOfBounds {
                position: self.position,
            })
    }

    pub fn take_u8(&mut self) -> Result<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a little endian word.
    pub fn take_u16_le(&mut self) -> Result<u16> {
        if self.remaining() < 2 {
            return Err(DecodeError::OutOfBounds {
                position: self.data.len(),
            });
        }

        let word = u16::from_le_bytes([self.data[self.position], self.data[self.position + 1]]);
        self.position += 2;
        Ok(word)
    }

    /// Read a byte and sign extend it to a word, so `0xFF` becomes `0xFFFF`.
    pub fn take_i8_sign_extended_u16(&mut self) -> Result<u16> {
        Ok(self.take_u8()? as i8 as i16 as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_advance_the_position() {
        let mut cursor = ByteCursor::new(&[0x01, 0x82, 0x0D, 0xFF]);

        assert_eq!(cursor.peek(), Ok(0x01));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.take_u8(), Ok(0x01));
        assert_eq!(cursor.take_u16_le(), Ok(0x0D82));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.take_i8_sign_extended_u16(), Ok(0xFFFF));
        assert!(cursor.is_empty());
    }

    #[test]
    fn sign_extension() {
        let mut cursor = ByteCursor::new(&[0x7F, 0x80, 0x02]);

        assert_eq!(cursor.take_i8_sign_extended_u16(), Ok(0x007F));
        assert_eq!(cursor.take_i8_sign_extended_u16(), Ok(0xFF80));
        assert_eq!(cursor.take_i8_sign_extended_u16(), Ok(0x0002));
    }

    #[test]
    fn out_of_bounds() {
        let mut cursor = ByteCursor::new(&[]);
        assert_eq!(cursor.peek(), Err(DecodeError::OutOfBounds { position: 0 }));
        assert_eq!(cursor.take_u8(), Err(DecodeError::OutOfBounds { position: 0 }));

        let mut cursor = ByteCursor::new(&[0xAA]);
        assert_eq!(
            cursor.take_u16_le(),
            Err(DecodeError::OutOfBounds { position: 1 })
        );
        // A failed read does not consume anything.
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.take_u8(), Ok(0xAA));
        assert_eq!(
            cursor.take_i8_sign_extended_u16(),
            Err(DecodeError::OutOfBounds { position: 1 })
        );
    }

    #[test]
    fn consumed_since() {
        let mut cursor = ByteCursor::new(&[0x89, 0xD9, 0x75]);
        cursor.take_u8().unwrap();
        cursor.take_u8().unwrap();

        assert_eq!(cursor.consumed_since(0), &[0x89, 0xD9]);
        assert_eq!(cursor.consumed_since(1), &[0xD9]);
        assert_eq!(cursor.consumed_since(2), &[] as &[u8]);
    }
}
