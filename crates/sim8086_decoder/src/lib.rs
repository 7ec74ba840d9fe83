//! Decodes 8086 machine code into [Instruction]s.
//!
//! ```rust
//! use sim8086_decoder::Decoder;
//!
//! let lines: Vec<String> = Decoder::new(&[0x89, 0xD9, 0x75, 0xFE])
//!     .map(|instruction| instruction.map(|i| i.to_string()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(lines, ["mov cx, bx", "jne -2"]);
//! ```

mod common;
mod cursor;
mod decode;
mod decoder;
mod errors;
mod immediate;
mod mrrm;
mod traits;

pub use cursor::ByteCursor;
pub use decode::{decode_instruction, find_family, DecodeFn, OpCodeFamily, OP_CODE_FAMILIES};
pub use decoder::{decode_all, Decoded, Decoder};
pub use errors::{DecodeError, Result};
pub use immediate::{read_immediate, ImmediateRule};
pub use mrrm::{ModRegRM, RegisterOrMemory};
pub use sim8086_instruction::Instruction;
pub use traits::OpCodeExt;
