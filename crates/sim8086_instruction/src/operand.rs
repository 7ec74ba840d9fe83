use crate::display::At;
use crate::{Register, SizedRegister};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandSize {
    Byte,
    Word,
}

/// Effective address base expressions, indexed by the r/m field in memory modes.
pub static EFFECTIVE_ADDRESSES: [&str; 8] = [
    "bx + si", "bx + di", "bp + si", "bp + di", "si", "di", "bp", "bx",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

impl AddressingMode {
    /// Decode the low 3 bits of `bits`.  Higher bits are ignored.
    pub fn from_encoding(bits: u8) -> Self {
        use AddressingMode::*;

        match bits & 0b111 {
            0b000 => BxSi,
            0b001 => BxDi,
            0b010 => BpSi,
            0b011 => BpDi,
            0b100 => Si,
            0b101 => Di,
            0b110 => Bp,
            _ => Bx,
        }
    }

    pub fn encoding(self) -> u8 {
        use AddressingMode::*;

        match self {
            BxSi => 0b000,
            BxDi => 0b001,
            BpSi => 0b010,
            BpDi => 0b011,
            Si => 0b100,
            Di => 0b101,
            Bp => 0b110,
            Bx => 0b111,
        }
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(EFFECTIVE_ADDRESSES[self.encoding() as usize])
    }
}

/// Displacement that follows a mod/reg/rm byte in memory modes 01 and 10.
///
/// The raw bytes are kept as they were encoded.  They are printed as unsigned values and a
/// displacement of zero is not printed at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Displacement {
    None,
    Byte(u8),
    Word(u16),
}

impl Displacement {
    pub fn value(&self) -> u16 {
        match *self {
            Displacement::None => 0,
            Displacement::Byte(value) => value as u16,
            Displacement::Word(value) => value,
        }
    }
}

impl Display for Displacement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            0 => Ok(()),
            value => write!(f, " + {}", value),
        }
    }
}

/// Immediate data, printed as the unsigned value of the bytes that were encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Immediate {
    Byte(u8),
    Word(u16),
    /// A single encoded byte widened to a word operand.  Holds the sign-extended value; only
    /// the low byte was present in the instruction stream.
    SignExtended(u16),
}

impl Immediate {
    pub fn operand_size(&self) -> OperandSize {
        match self {
            Immediate::Byte(_) => OperandSize::Byte,
            Immediate::Word(_) | Immediate::SignExtended(_) => OperandSize::Word,
        }
    }
}

impl Display for Immediate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Immediate::Byte(value) => write!(f, "{}", value),
            Immediate::Word(value) => write!(f, "{}", value),
            Immediate::SignExtended(value) => write!(f, "{}", value as u8),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    Register(SizedRegister),
    Memory(AddressingMode, Displacement),
    Direct(u16),
    Immediate(Immediate),
    Relative(i8),
}

impl Operand {
    /// The size of register and immediate operands.  Memory and relative operands carry no
    /// size of their own.
    pub fn operand_size(&self) -> Option<OperandSize> {
        match self {
            Operand::Register(register) => Some(register.operand_size()),
            Operand::Immediate(immediate) => Some(immediate.operand_size()),
            Operand::Memory(..) | Operand::Direct(_) | Operand::Relative(_) => None,
        }
    }
}

impl From<SizedRegister> for Operand {
    fn from(register: SizedRegister) -> Self {
        Operand::Register(register)
    }
}

impl From<Immediate> for Operand {
    fn from(immediate: Immediate) -> Self {
        Operand::Immediate(immediate)
    }
}

/// The accumulator at the given size: `al` or `ax`.
pub fn accumulator(operand_size: OperandSize) -> Operand {
    Operand::Register(SizedRegister(Register::AlAx, operand_size))
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        At {
            item: self,
            addr: None,
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_addresses() {
        use AddressingMode::*;

        let expected = [
            (BxSi, "bx + si"),
            (BxDi, "bx + di"),
            (BpSi, "bp + si"),
            (BpDi, "bp + di"),
            (Si, "si"),
            (Di, "di"),
            (Bp, "bp"),
            (Bx, "bx"),
        ];

        for (bits, (mode, text)) in expected.into_iter().enumerate() {
            assert_eq!(AddressingMode::from_encoding(bits as u8), mode);
            assert_eq!(mode.to_string(), text);
        }
    }

    #[test]
    fn memory_operands() {
        assert_eq!(
            Operand::Memory(AddressingMode::BxSi, Displacement::None).to_string(),
            "[bx + si]"
        );
        assert_eq!(
            Operand::Memory(AddressingMode::BxSi, Displacement::Byte(4)).to_string(),
            "[bx + si + 4]"
        );
        assert_eq!(
            Operand::Memory(AddressingMode::Bp, Displacement::Byte(0)).to_string(),
            "[bp]"
        );
        assert_eq!(
            Operand::Memory(AddressingMode::Di, Displacement::Word(0)).to_string(),
            "[di]"
        );
        assert_eq!(
            Operand::Memory(AddressingMode::BpDi, Displacement::Byte(0xDB)).to_string(),
            "[bp + di + 219]"
        );
        assert_eq!(
            Operand::Memory(AddressingMode::BxSi, Displacement::Word(4999)).to_string(),
            "[bx + si + 4999]"
        );
    }

    #[test]
    fn direct_immediate_and_relative() {
        assert_eq!(Operand::Direct(3458).to_string(), "[3458]");
        assert_eq!(Operand::Immediate(Immediate::Byte(0xF4)).to_string(), "244");
        assert_eq!(Operand::Immediate(Immediate::Word(0xFFFF)).to_string(), "65535");
        assert_eq!(
            Operand::Immediate(Immediate::SignExtended(0xFFFE)).to_string(),
            "254"
        );
        assert_eq!(Operand::Immediate(Immediate::SignExtended(2)).to_string(), "2");
        assert_eq!(Operand::Relative(-2).to_string(), "-2");
        assert_eq!(Operand::Relative(9).to_string(), "9");
    }

    #[test]
    fn accumulator_follows_size() {
        assert_eq!(accumulator(OperandSize::Byte).to_string(), "al");
        assert_eq!(accumulator(OperandSize::Word).to_string(), "ax");
    }
}
