use crate::{Instruction, Operand, OperandSet};
use std::fmt::{Display, Formatter};

/// Renders an item with an optional address of the instruction that follows it.  Without an
/// address, relative jump operands print as their raw signed displacement.
pub struct At<'a, I> {
    pub item: &'a I,
    pub addr: Option<u16>,
}

impl Display for At<'_, Instruction> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.item.operands {
            OperandSet::None => self.item.operation.fmt(f),
            _ => write!(
                f,
                "{} {}",
                self.item.operation,
                At {
                    item: &self.item.operands,
                    addr: self.addr,
                }
            ),
        }
    }
}

impl Display for At<'_, OperandSet> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.item {
            OperandSet::None => Ok(()),
            OperandSet::Destination(destination) => At {
                item: destination,
                addr: self.addr,
            }
            .fmt(f),
            OperandSet::DestinationAndSource(destination, source) => {
                write!(
                    f,
                    "{}, {}",
                    At {
                        item: destination,
                        addr: self.addr,
                    },
                    At {
                        item: source,
                        addr: self.addr,
                    }
                )
            }
        }
    }
}

impl Display for At<'_, Operand> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.item {
            Operand::Register(register) => register.fmt(f),

            Operand::Memory(addressing_mode, displacement) => {
                write!(f, "[{}{}]", addressing_mode, displacement)
            }

            Operand::Direct(address) => write!(f, "[{}]", address),

            Operand::Immediate(immediate) => immediate.fmt(f),

            Operand::Relative(displacement) => match self.addr {
                Some(next) => write!(f, "{}", next.wrapping_add(*displacement as i16 as u16)),
                None => write!(f, "{}", displacement),
            },
        }
    }
}
