use crate::cursor::ByteCursor;
use crate::errors::{DecodeError, Result};
use crate::immediate::{read_immediate, ImmediateRule};
use crate::mrrm::ModRegRM;
use crate::traits::OpCodeExt;
use sim8086_instruction::{
    accumulator, Instruction, Operand, OperandSet, Operation, Register, SizedRegister,
};

fn read_mrrm(cursor: &mut ByteCursor) -> Result<ModRegRM> {
    let mrrm_byte = cursor.take_u8()?;
    ModRegRM::try_from_byte(mrrm_byte, cursor)
}

// x x x x x x d w | mod reg r/m
pub(crate) fn register_or_memory_and_register(
    operation: Operation,
    op_code: u8,
    cursor: &mut ByteCursor,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();

    let (reg, reg_mem) = read_mrrm(cursor)?.into_operands(operand_size);

    Ok(Instruction::new(
        operation,
        if op_code.reg_is_destination() {
            OperandSet::DestinationAndSource(reg, reg_mem)
        } else {
            OperandSet::DestinationAndSource(reg_mem, reg)
        },
    ))
}

// x x x x x x s w | mod ext r/m | data | data if s:w = 01
//
// The ext field selects the operation.  It is checked before any displacement is read.
pub(crate) fn immediate_to_register_or_memory(
    operation: impl Fn(u8) -> Option<Operation>,
    rule: ImmediateRule,
    op_code: u8,
    cursor: &mut ByteCursor,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();

    let position = cursor.position();
    let mrrm_byte = cursor.take_u8()?;
    let extension = (mrrm_byte >> 3) & 0b111;
    let operation =
        operation(extension).ok_or(DecodeError::UnknownExtensionOpcode { extension, position })?;

    let mrrm = ModRegRM::try_from_byte(mrrm_byte, cursor)?;

    let destination = mrrm.register_or_memory.into_operand(operand_size);
    let source = read_immediate(cursor, operand_size, rule)?.into();

    Ok(Instruction::new(
        operation,
        OperandSet::DestinationAndSource(destination, source),
    ))
}

// x x x x w r e g | data | data if w = 1
pub(crate) fn immediate_to_register(
    operation: Operation,
    op_code: u8,
    cursor: &mut ByteCursor,
) -> Result<Instruction> {
    // Special case for reading the operand size from the 4th bit.
    let operand_size = (op_code >> 3).operand_size();

    let destination = SizedRegister(Register::from_encoding(op_code), operand_size).into();
    let source = read_immediate(cursor, operand_size, ImmediateRule::Full)?.into();

    Ok(Instruction::new(
        operation,
        OperandSet::DestinationAndSource(destination, source),
    ))
}

// x x x x x x x w | data | data if w = 1
pub(crate) fn immediate_to_accumulator(
    operation: Operation,
    op_code: u8,
    cursor: &mut ByteCursor,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();

    Ok(Instruction::new(
        operation,
        OperandSet::DestinationAndSource(
            accumulator(operand_size),
            read_immediate(cursor, operand_size, ImmediateRule::Full)?.into(),
        ),
    ))
}

// x x x x x x x x | ip-inc8
pub(crate) fn short_jump(operation: Operation, cursor: &mut ByteCursor) -> Result<Instruction> {
    Ok(Instruction::new(
        operation,
        OperandSet::Destination(Operand::Relative(cursor.take_u8()? as i8)),
    ))
}
