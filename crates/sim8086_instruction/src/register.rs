use crate::OperandSize;

/// Word register names, indexed by the 3-bit register encoding.
pub static WORD_REGISTERS: [&str; 8] = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];

/// Byte register names, indexed by the 3-bit register encoding.
pub static BYTE_REGISTERS: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

/// A register encoding as found in the reg or r/m field.  Which register it names depends on the
/// operand size, so `AlAx` is `al` for byte operations and `ax` for word operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    AlAx,
    ClCx,
    DlDx,
    BlBx,
    AhSp,
    ChBp,
    DhSi,
    BhDi,
}

impl Register {
    /// Decode the low 3 bits of `bits`.  Higher bits are ignored.
    pub fn from_encoding(bits: u8) -> Self {
        use Register::*;

        match bits & 0b111 {
            0b000 => AlAx,
            0b001 => ClCx,
            0b010 => DlDx,
            0b011 => BlBx,
            0b100 => AhSp,
            0b101 => ChBp,
            0b110 => DhSi,
            _ => BhDi,
        }
    }

    pub fn encoding(self) -> u8 {
        use Register::*;

        match self {
            AlAx => 0b000,
            ClCx => 0b001,
            DlDx => 0b010,
            BlBx => 0b011,
            AhSp => 0b100,
            ChBp => 0b101,
            DhSi => 0b110,
            BhDi => 0b111,
        }
    }

    pub fn name(self, operand_size: OperandSize) -> &'static str {
        let index = self.encoding() as usize;
        match operand_size {
            OperandSize::Byte => BYTE_REGISTERS[index],
            OperandSize::Word => WORD_REGISTERS[index],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SizedRegister(pub Register, pub OperandSize);

impl SizedRegister {
    pub fn operand_size(&self) -> OperandSize {
        self.1
    }
}

impl std::fmt::Display for SizedRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.name(self.1))
    }
}
