use sim8086_instruction::OperandSize;

/// Bit fields found in the low bits of op code bytes.
pub trait OpCodeExt {
    /// `w` in bit 0.
    fn operand_size(self) -> OperandSize;

    /// `d` in bit 1; set when the reg field holds the destination.
    fn reg_is_destination(self) -> bool;

    /// `s` in bit 1 of the arithmetic immediate group.
    fn sign_extend(self) -> bool;
}

impl OpCodeExt for u8 {
    fn operand_size(self) -> OperandSize {
        if self & 1 == 0 {
            OperandSize::Byte
        } else {
            OperandSize::Word
        }
    }

    fn reg_is_destination(self) -> bool {
        (self >> 1) & 1 == 1
    }

    fn sign_extend(self) -> bool {
        (self >> 1) & 1 == 1
    }
}
