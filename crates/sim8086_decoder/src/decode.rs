use crate::common::{
    immediate_to_accumulator, immediate_to_register, immediate_to_register_or_memory,
    register_or_memory_and_register, short_jump,
};
use crate::cursor::ByteCursor;
use crate::errors::{DecodeError, Result};
use crate::immediate::ImmediateRule;
use crate::traits::OpCodeExt;
use sim8086_instruction::{Condition, Instruction, LoopKind, Operation};

/// Decodes the rest of an instruction.  Receives the op code, which was already consumed from
/// the cursor.
pub type DecodeFn = fn(u8, &mut ByteCursor) -> Result<Instruction>;

/// A group of op codes that share an encoding: every byte where `op_code & mask == value`.
pub struct OpCodeFamily {
    pub name: &'static str,
    pub mask: u8,
    pub value: u8,
    pub decode: DecodeFn,
}

impl OpCodeFamily {
    pub fn matches(&self, op_code: u8) -> bool {
        op_code & self.mask == self.value
    }
}

fn arithmetic_extension(extension: u8) -> Option<Operation> {
    match extension {
        0b000 => Some(Operation::Add),
        0b101 => Some(Operation::Sub),
        0b111 => Some(Operation::Cmp),
        _ => None,
    }
}

fn mov_extension(extension: u8) -> Option<Operation> {
    match extension {
        0b000 => Some(Operation::Mov),
        _ => None,
    }
}

/// Known op code families, in priority order.  The first family that matches the op code
/// decodes the instruction.
pub static OP_CODE_FAMILIES: [OpCodeFamily; 12] = [
    // 1 0 0 0 1 0 d w
    OpCodeFamily {
        name: "mov register/memory to/from register",
        mask: 0b1111_1100,
        value: 0b1000_1000,
        decode: |op_code, cursor| {
            register_or_memory_and_register(Operation::Mov, op_code, cursor)
        },
    },
    // 1 1 0 0 0 1 1 w
    OpCodeFamily {
        name: "mov immediate to register/memory",
        mask: 0b1111_1110,
        value: 0b1100_0110,
        decode: |op_code, cursor| {
            immediate_to_register_or_memory(mov_extension, ImmediateRule::Full, op_code, cursor)
        },
    },
    // 1 0 1 1 w r e g
    OpCodeFamily {
        name: "mov immediate to register",
        mask: 0b1111_0000,
        value: 0b1011_0000,
        decode: |op_code, cursor| immediate_to_register(Operation::Mov, op_code, cursor),
    },
    // 0 0 0 0 0 0 d w
    OpCodeFamily {
        name: "add register/memory with register to either",
        mask: 0b1111_1100,
        value: 0b0000_0000,
        decode: |op_code, cursor| {
            register_or_memory_and_register(Operation::Add, op_code, cursor)
        },
    },
    // 0 0 1 0 1 0 d w
    OpCodeFamily {
        name: "sub register/memory and register to either",
        mask: 0b1111_1100,
        value: 0b0010_1000,
        decode: |op_code, cursor| {
            register_or_memory_and_register(Operation::Sub, op_code, cursor)
        },
    },
    // 0 0 1 1 1 0 d w
    OpCodeFamily {
        name: "cmp register/memory and register",
        mask: 0b1111_1100,
        value: 0b0011_1000,
        decode: |op_code, cursor| {
            register_or_memory_and_register(Operation::Cmp, op_code, cursor)
        },
    },
    // 1 0 0 0 0 0 s w
    OpCodeFamily {
        name: "add/sub/cmp immediate to register/memory",
        mask: 0b1111_1100,
        value: 0b1000_0000,
        decode: |op_code, cursor| {
            immediate_to_register_or_memory(
                arithmetic_extension,
                ImmediateRule::SignExtend(op_code.sign_extend()),
                op_code,
                cursor,
            )
        },
    },
    // 0 0 0 0 0 1 0 w
    OpCodeFamily {
        name: "add immediate to accumulator",
        mask: 0b1111_1110,
        value: 0b0000_0100,
        decode: |op_code, cursor| immediate_to_accumulator(Operation::Add, op_code, cursor),
    },
    // 0 0 1 0 1 1 0 w
    OpCodeFamily {
        name: "sub immediate from accumulator",
        mask: 0b1111_1110,
        value: 0b0010_1100,
        decode: |op_code, cursor| immediate_to_accumulator(Operation::Sub, op_code, cursor),
    },
    // 0 0 1 1 1 1 0 w
    OpCodeFamily {
        name: "cmp immediate with accumulator",
        mask: 0b1111_1110,
        value: 0b0011_1100,
        decode: |op_code, cursor| immediate_to_accumulator(Operation::Cmp, op_code, cursor),
    },
    // 0 1 1 1 c c c c
    OpCodeFamily {
        name: "conditional jump",
        mask: 0b1111_0000,
        value: 0b0111_0000,
        decode: |op_code, cursor| {
            short_jump(Operation::Jcc(Condition::from_encoding(op_code)), cursor)
        },
    },
    // 1 1 1 0 0 0 k k
    OpCodeFamily {
        name: "loop/jcxz",
        mask: 0b1111_1100,
        value: 0b1110_0000,
        decode: |op_code, cursor| {
            short_jump(Operation::Loop(LoopKind::from_encoding(op_code)), cursor)
        },
    },
];

/// Find the first family in [OP_CODE_FAMILIES] that matches `op_code`.
pub fn find_family(op_code: u8) -> Option<&'static OpCodeFamily> {
    OP_CODE_FAMILIES.iter().find(|family| family.matches(op_code))
}

/// Decode a single instruction at the cursor's position.
///
/// On success the cursor is left one byte past the last byte of the instruction.  On failure the
/// cursor is not moved.
pub fn decode_instruction(cursor: &mut ByteCursor) -> Result<Instruction> {
    let position = cursor.position();
    let op_code = cursor.peek()?;

    let family = find_family(op_code).ok_or(DecodeError::UnknownOpcode { op_code, position })?;

    let mut it = cursor.clone();
    it.take_u8()?;
    let instruction = (family.decode)(op_code, &mut it)?;
    *cursor = it;

    Ok(instruction)
}

#[cfg(test)]
#[path = "_tests/decode.rs"]
mod tests;
