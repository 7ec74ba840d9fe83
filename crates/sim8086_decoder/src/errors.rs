use thiserror::Error;

/// Reasons an instruction could not be decoded.  Every error is terminal for the instruction
/// being decoded and carries the offset into the byte stream where it was detected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The instruction is truncated: a read was attempted past the end of the buffer.
    #[error("instruction truncated, could not read past end of input at offset {position}")]
    OutOfBounds { position: usize },

    /// The leading byte does not match any known op code family.
    #[error("unknown op code ({op_code:#04x}) at offset {position}")]
    UnknownOpcode { op_code: u8, position: usize },

    /// The reg field of a mod/reg/rm byte does not select a known operation for this op code.
    #[error("unknown op code extension ({extension:#05b}) at offset {position}")]
    UnknownExtensionOpcode { extension: u8, position: usize },
}

impl DecodeError {
    /// The offset into the byte stream where the error was detected.
    pub fn position(&self) -> usize {
        match *self {
            DecodeError::OutOfBounds { position }
            | DecodeError::UnknownOpcode { position, .. }
            | DecodeError::UnknownExtensionOpcode { position, .. } => position,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
