use crate::display::At;
use crate::{Operand, Operation};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSet {
    None,
    Destination(Operand),
    DestinationAndSource(Operand, Operand),
}

impl Display for OperandSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        At {
            item: self,
            addr: None,
        }
        .fmt(f)
    }
}

/// Representation of a decoded 8086 instruction.
///
/// ```rust
/// use sim8086_instruction::*;
///
/// // mov cx, bx
/// let i = Instruction::new(
///     Operation::Mov,
///     OperandSet::DestinationAndSource(
///         Operand::Register(SizedRegister(Register::ClCx, OperandSize::Word)),
///         Operand::Register(SizedRegister(Register::BlBx, OperandSize::Word)),
///     ),
/// );
///
/// assert_eq!(i.to_string(), "mov cx, bx");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub operands: OperandSet,
}

impl Instruction {
    /// Create a new instruction with the given [Operation] and [OperandSet].
    pub fn new(operation: Operation, operands: OperandSet) -> Self {
        Self {
            operation,
            operands,
        }
    }

    /// Render the instruction as if it was located just before `next_offset`, so that relative
    /// jump operands are printed as the absolute offset they target.
    pub fn at(&self, next_offset: u16) -> At<'_, Instruction> {
        At {
            item: self,
            addr: Some(next_offset),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        At {
            item: self,
            addr: None,
        }
        .fmt(f)
    }
}
