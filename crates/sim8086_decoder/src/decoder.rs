use crate::cursor::ByteCursor;
use crate::decode::decode_instruction;
use crate::errors::Result;
use sim8086_instruction::Instruction;
use std::iter::FusedIterator;
use tracing::debug;

/// An instruction together with where it was found in the byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
    pub instruction: Instruction,
}

/// Decodes a buffer one instruction at a time.
///
/// The decoder stops at the end of the buffer or after the first error; it never tries to skip
/// over bytes it could not decode.
pub struct Decoder<'a> {
    cursor: ByteCursor<'a>,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            failed: false,
        }
    }

    /// Offset of the next instruction to decode.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn decode_next(&mut self) -> Option<Result<Decoded<'a>>> {
        if self.failed || self.cursor.is_empty() {
            return None;
        }

        let offset = self.cursor.position();

        match decode_instruction(&mut self.cursor) {
            Ok(instruction) => {
                let bytes = self.cursor.consumed_since(offset);
                debug!("{:04X}  {:02X?}  {}", offset, bytes, instruction);
                Some(Ok(Decoded {
                    offset,
                    bytes,
                    instruction,
                }))
            }
            Err(err) => {
                debug!("decoding stopped: {}", err);
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode_next()
            .map(|decoded| decoded.map(|decoded| decoded.instruction))
    }
}

impl FusedIterator for Decoder<'_> {}

/// Decode the whole buffer, stopping at the first error.
pub fn decode_all(data: &[u8]) -> Result<Vec<Instruction>> {
    Decoder::new(data).collect()
}
