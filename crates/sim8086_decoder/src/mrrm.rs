use crate::cursor::ByteCursor;
use crate::errors::Result;
use sim8086_instruction::{AddressingMode, Displacement, Operand, OperandSize, Register, SizedRegister};

/// The r/m field resolved against the mode field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOrMemory {
    Direct(u16),
    Indirect(AddressingMode),
    DisplacementByte(AddressingMode, u8),
    DisplacementWord(AddressingMode, u16),
    Register(Register),
}

impl RegisterOrMemory {
    /// Resolve the mode and r/m fields of `mrrm_byte`, reading any displacement that follows.
    pub fn try_from_mrrm(mrrm_byte: u8, cursor: &mut ByteCursor) -> Result<Self> {
        let mode = mrrm_byte >> 6;
        let rm = mrrm_byte & 0b111;

        Ok(match mode {
            0b00 => match rm {
                0b110 => RegisterOrMemory::Direct(cursor.take_u16_le()?),
                _ => RegisterOrMemory::Indirect(AddressingMode::from_encoding(rm)),
            },

            0b01 => RegisterOrMemory::DisplacementByte(
                AddressingMode::from_encoding(rm),
                cursor.take_u8()?,
            ),

            0b10 => RegisterOrMemory::DisplacementWord(
                AddressingMode::from_encoding(rm),
                cursor.take_u16_le()?,
            ),

            _ => RegisterOrMemory::Register(Register::from_encoding(rm)),
        })
    }

    pub fn into_operand(self, operand_size: OperandSize) -> Operand {
        match self {
            RegisterOrMemory::Direct(address) => Operand::Direct(address),
            RegisterOrMemory::Indirect(addressing_mode) => {
                Operand::Memory(addressing_mode, Displacement::None)
            }
            RegisterOrMemory::DisplacementByte(addressing_mode, displacement) => {
                Operand::Memory(addressing_mode, Displacement::Byte(displacement))
            }
            RegisterOrMemory::DisplacementWord(addressing_mode, displacement) => {
                Operand::Memory(addressing_mode, Displacement::Word(displacement))
            }
            RegisterOrMemory::Register(register) => {
                Operand::Register(SizedRegister(register, operand_size))
            }
        }
    }
}

/// A decoded mod/reg/rm byte.  The reg field is kept as a [Register] even for op codes that use
/// it as an extension of the op code; [ModRegRM::extension] gives the raw bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModRegRM {
    pub register: Register,
    pub register_or_memory: RegisterOrMemory,
}

impl ModRegRM {
    pub fn new(register: Register, register_or_memory: RegisterOrMemory) -> Self {
        Self {
            register,
            register_or_memory,
        }
    }

    /// Decode `byte`, which was already consumed from `cursor`.  The cursor is advanced past
    /// any displacement bytes.
    pub fn try_from_byte(byte: u8, cursor: &mut ByteCursor) -> Result<Self> {
        let register = Register::from_encoding(byte >> 3);
        let register_or_memory = RegisterOrMemory::try_from_mrrm(byte, cursor)?;

        Ok(ModRegRM {
            register,
            register_or_memory,
        })
    }

    pub fn extension(&self) -> u8 {
        self.register.encoding()
    }

    /// The operand named by the reg field and the operand named by the r/m field, both at
    /// `operand_size` where it applies.
    pub fn into_operands(self, operand_size: OperandSize) -> (Operand, Operand) {
        (
            Operand::Register(SizedRegister(self.register, operand_size)),
            self.register_or_memory.into_operand(operand_size),
        )
    }

    pub fn as_byte(&self) -> u8 {
        let mut byte: u8 = match self.register_or_memory {
            RegisterOrMemory::Direct(_) => 0b00,
            RegisterOrMemory::Indirect(_) => 0b00,
            RegisterOrMemory::DisplacementByte(_, _) => 0b01,
            RegisterOrMemory::DisplacementWord(_, _) => 0b10,
            RegisterOrMemory::Register(_) => 0b11,
        } << 6;

        byte |= self.register.encoding() << 3;

        byte |= match self.register_or_memory {
            RegisterOrMemory::Direct(_) => 0b110,
            RegisterOrMemory::Indirect(addressing_mode)
            | RegisterOrMemory::DisplacementByte(addressing_mode, _)
            | RegisterOrMemory::DisplacementWord(addressing_mode, _) => addressing_mode.encoding(),
            RegisterOrMemory::Register(register) => register.encoding(),
        };

        byte
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DecodeError;

    fn resolve(mrrm_byte: u8, rest: &[u8]) -> (Result<RegisterOrMemory>, usize) {
        let mut cursor = ByteCursor::new(rest);
        let result = RegisterOrMemory::try_from_mrrm(mrrm_byte, &mut cursor);
        (result, cursor.position())
    }

    #[test]
    fn register_or_memory() {
        use AddressingMode::*;

        // Indirect
        assert_eq!(resolve(0b00_000_000, &[]), (Ok(RegisterOrMemory::Indirect(BxSi)), 0));
        assert_eq!(resolve(0b00_000_011, &[]), (Ok(RegisterOrMemory::Indirect(BpDi)), 0));
        assert_eq!(resolve(0b00_000_111, &[]), (Ok(RegisterOrMemory::Indirect(Bx)), 0));

        // Direct
        assert_eq!(
            resolve(0b00_000_110, &[0x82, 0x0D]),
            (Ok(RegisterOrMemory::Direct(3458)), 2)
        );

        // DisplacementByte
        assert_eq!(
            resolve(0b01_000_110, &[0x00]),
            (Ok(RegisterOrMemory::DisplacementByte(Bp, 0)), 1)
        );
        assert_eq!(
            resolve(0b01_000_000, &[0xDB]),
            (Ok(RegisterOrMemory::DisplacementByte(BxSi, 0xDB)), 1)
        );

        // DisplacementWord
        assert_eq!(
            resolve(0b10_000_000, &[0x87, 0x13]),
            (Ok(RegisterOrMemory::DisplacementWord(BxSi, 4999)), 2)
        );

        // Register
        assert_eq!(
            resolve(0b11_000_001, &[0xFF]),
            (Ok(RegisterOrMemory::Register(Register::ClCx)), 0)
        );
    }

    #[test]
    fn truncated_displacement() {
        assert_eq!(
            resolve(0b01_000_000, &[]),
            (Err(DecodeError::OutOfBounds { position: 0 }), 0)
        );
        assert_eq!(
            resolve(0b10_000_000, &[0x01]),
            (Err(DecodeError::OutOfBounds { position: 1 }), 0)
        );
        assert_eq!(
            resolve(0b00_000_110, &[0x01]),
            (Err(DecodeError::OutOfBounds { position: 1 }), 0)
        );
    }

    #[test]
    fn operands_share_the_operand_size() {
        let mut cursor = ByteCursor::new(&[]);
        let mrrm = ModRegRM::try_from_byte(0b11_011_001, &mut cursor).unwrap();

        assert_eq!(
            mrrm.into_operands(OperandSize::Word),
            (
                Operand::Register(SizedRegister(Register::BlBx, OperandSize::Word)),
                Operand::Register(SizedRegister(Register::ClCx, OperandSize::Word)),
            )
        );
        assert_eq!(
            mrrm.into_operands(OperandSize::Byte),
            (
                Operand::Register(SizedRegister(Register::BlBx, OperandSize::Byte)),
                Operand::Register(SizedRegister(Register::ClCx, OperandSize::Byte)),
            )
        );
        assert_eq!(mrrm.extension(), 0b011);
    }

    #[test]
    fn direct_address_is_not_sign_extended() {
        let mut cursor = ByteCursor::new(&[0xFF, 0xFF]);
        let mrrm = ModRegRM::try_from_byte(0b00_001_110, &mut cursor).unwrap();

        assert_eq!(
            mrrm.into_operands(OperandSize::Byte).1,
            Operand::Direct(0xFFFF)
        );
    }

    macro_rules! test_modrm_to_byte {
        ($expected:expr,$register:expr,$register_or_memory:expr) => {{
            let byte: u8 = ModRegRM::new($register, $register_or_memory).as_byte();
            assert_eq!($expected, byte);
        }};
    }

    #[test]
    fn modrm_to_byte_register_indirect() {
        test_modrm_to_byte!(
            0b00011001,
            Register::BlBx,
            RegisterOrMemory::Indirect(AddressingMode::BxDi)
        );
    }

    #[test]
    fn modrm_to_byte_register_displacement_byte() {
        test_modrm_to_byte!(
            0b01011001,
            Register::BlBx,
            RegisterOrMemory::DisplacementByte(AddressingMode::BxDi, 0)
        );
    }

    #[test]
    fn modrm_to_byte_register_displacement_word() {
        test_modrm_to_byte!(
            0b10011001,
            Register::BlBx,
            RegisterOrMemory::DisplacementWord(AddressingMode::BxDi, 0)
        );
    }

    #[test]
    fn modrm_to_byte_register_register() {
        test_modrm_to_byte!(
            0b11011110,
            Register::BlBx,
            RegisterOrMemory::Register(Register::DhSi)
        );
    }

    #[test]
    fn modrm_to_byte_register_direct() {
        test_modrm_to_byte!(0b00010110, Register::DlDx, RegisterOrMemory::Direct(0));
    }
}
