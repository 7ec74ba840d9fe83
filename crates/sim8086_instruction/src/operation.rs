use std::fmt::{Display, Formatter};

/// Condition codes of the short conditional jumps, in op code order (`0x70..=0x7F`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Overflow,       // jo
    NotOverflow,    // jno
    Below,          // jb
    NotBelow,       // jnb
    Equal,          // je
    NotEqual,       // jne
    BelowOrEqual,   // jbe
    Above,          // ja
    Sign,           // js
    NotSign,        // jns
    Parity,         // jp
    NotParity,      // jnp
    Less,           // jl
    NotLess,        // jnl
    LessOrEqual,    // jle
    Greater,        // jg
}

impl Condition {
    /// Decode the low 4 bits of a `0x7X` op code.
    pub fn from_encoding(bits: u8) -> Self {
        use Condition::*;

        match bits & 0b1111 {
            0x0 => Overflow,
            0x1 => NotOverflow,
            0x2 => Below,
            0x3 => NotBelow,
            0x4 => Equal,
            0x5 => NotEqual,
            0x6 => BelowOrEqual,
            0x7 => Above,
            0x8 => Sign,
            0x9 => NotSign,
            0xA => Parity,
            0xB => NotParity,
            0xC => Less,
            0xD => NotLess,
            0xE => LessOrEqual,
            _ => Greater,
        }
    }

    fn mnemonic(self) -> &'static str {
        use Condition::*;

        match self {
            Overflow => "jo",
            NotOverflow => "jno",
            Below => "jb",
            NotBelow => "jnb",
            Equal => "je",
            NotEqual => "jne",
            BelowOrEqual => "jbe",
            Above => "ja",
            Sign => "js",
            NotSign => "jns",
            Parity => "jp",
            NotParity => "jnp",
            Less => "jl",
            NotLess => "jnl",
            LessOrEqual => "jle",
            Greater => "jg",
        }
    }
}

/// The `cx` driven jumps (`0xE0..=0xE3`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopKind {
    LoopNotZero, // loopnz
    LoopZero,    // loopz
    Loop,        // loop
    CxZero,      // jcxz
}

impl LoopKind {
    /// Decode the low 2 bits of a `0xE0..=0xE3` op code.
    pub fn from_encoding(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => LoopKind::LoopNotZero,
            0b01 => LoopKind::LoopZero,
            0b10 => LoopKind::Loop,
            _ => LoopKind::CxZero,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            LoopKind::LoopNotZero => "loopnz",
            LoopKind::LoopZero => "loopz",
            LoopKind::Loop => "loop",
            LoopKind::CxZero => "jcxz",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Mov,
    Add,
    Sub,
    Cmp,
    Jcc(Condition),
    Loop(LoopKind),
}

impl Operation {
    pub fn is_jump(&self) -> bool {
        matches!(self, Operation::Jcc(_) | Operation::Loop(_))
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operation::Mov => "mov",
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Cmp => "cmp",
            Operation::Jcc(condition) => condition.mnemonic(),
            Operation::Loop(kind) => kind.mnemonic(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_in_op_code_order() {
        let mnemonics: Vec<String> = (0x70..=0x7Fu8)
            .map(|op_code| Operation::Jcc(Condition::from_encoding(op_code)).to_string())
            .collect();

        assert_eq!(
            mnemonics,
            [
                "jo", "jno", "jb", "jnb", "je", "jne", "jbe", "ja", "js", "jns", "jp", "jnp", "jl",
                "jnl", "jle", "jg"
            ]
        );
    }

    #[test]
    fn loops_in_op_code_order() {
        let mnemonics: Vec<String> = (0xE0..=0xE3u8)
            .map(|op_code| Operation::Loop(LoopKind::from_encoding(op_code)).to_string())
            .collect();

        assert_eq!(mnemonics, ["loopnz", "loopz", "loop", "jcxz"]);
    }

    #[test]
    fn jumps() {
        assert!(Operation::Jcc(Condition::Equal).is_jump());
        assert!(Operation::Loop(LoopKind::CxZero).is_jump());
        assert!(!Operation::Cmp.is_jump());
    }
}
