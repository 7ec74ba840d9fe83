//! This crate holds all the structs and constants to represent a decoded instruction for the 8086
//! microprocessor, as well as the rules to print it as assembly.

mod display;
mod instruction;
mod operand;
mod operation;
mod register;

pub use display::At;
pub use instruction::{Instruction, OperandSet};
pub use operand::{
    accumulator, AddressingMode, Displacement, Immediate, Operand, OperandSize,
    EFFECTIVE_ADDRESSES,
};
pub use operation::{Condition, LoopKind, Operation};
pub use register::{Register, SizedRegister, BYTE_REGISTERS, WORD_REGISTERS};
