use crate::cursor::ByteCursor;
use crate::errors::Result;
use sim8086_instruction::{Immediate, OperandSize};

/// How the width of an immediate is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmediateRule {
    /// The full declared width is always present (`mov` and the accumulator forms).
    Full,
    /// `s` bit of the arithmetic immediate group.  When set, a word operation only carries a
    /// single byte, which is sign extended.
    SignExtend(bool),
}

/// Read the immediate that follows the current position.  The cursor advances by the number of
/// bytes the encoding actually carries, which is not always the declared width.
pub fn read_immediate(
    cursor: &mut ByteCursor,
    operand_size: OperandSize,
    rule: ImmediateRule,
) -> Result<Immediate> {
    Ok(match (operand_size, rule) {
        (OperandSize::Byte, _) => Immediate::Byte(cursor.take_u8()?),
        (OperandSize::Word, ImmediateRule::SignExtend(true)) => {
            Immediate::SignExtended(cursor.take_i8_sign_extended_u16()?)
        }
        (OperandSize::Word, _) => Immediate::Word(cursor.take_u16_le()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;

    macro_rules! test_immediate {
        ($bytes:expr, $operand_size:expr, $rule:expr, $expected:expr, $consumed:expr) => {{
            let mut cursor = ByteCursor::new(&$bytes);
            assert_eq!(
                read_immediate(&mut cursor, $operand_size, $rule),
                $expected
            );
            assert_eq!(cursor.position(), $consumed);
        }};
    }

    #[test]
    fn byte_width_reads_one_byte_regardless_of_sign_extension() {
        use ImmediateRule::*;

        test_immediate!([0xF4, 0x01], OperandSize::Byte, Full, Ok(Immediate::Byte(0xF4)), 1);
        test_immediate!(
            [0xF4, 0x01],
            OperandSize::Byte,
            SignExtend(true),
            Ok(Immediate::Byte(0xF4)),
            1
        );
        test_immediate!(
            [0xF4, 0x01],
            OperandSize::Byte,
            SignExtend(false),
            Ok(Immediate::Byte(0xF4)),
            1
        );
    }

    #[test]
    fn word_width() {
        use ImmediateRule::*;

        test_immediate!([0x6C, 0x0F], OperandSize::Word, Full, Ok(Immediate::Word(3948)), 2);
        test_immediate!(
            [0x6C, 0x0F],
            OperandSize::Word,
            SignExtend(false),
            Ok(Immediate::Word(3948)),
            2
        );
    }

    #[test]
    fn word_width_sign_extended() {
        test_immediate!(
            [0x02, 0x99],
            OperandSize::Word,
            ImmediateRule::SignExtend(true),
            Ok(Immediate::SignExtended(2)),
            1
        );
        test_immediate!(
            [0xFE],
            OperandSize::Word,
            ImmediateRule::SignExtend(true),
            Ok(Immediate::SignExtended(0xFFFE)),
            1
        );
    }

    #[test]
    fn truncated() {
        test_immediate!(
            [0x01],
            OperandSize::Word,
            ImmediateRule::Full,
            Err(DecodeError::OutOfBounds { position: 1 }),
            0
        );
        test_immediate!(
            [0u8; 0],
            OperandSize::Byte,
            ImmediateRule::Full,
            Err(DecodeError::OutOfBounds { position: 0 }),
            0
        );
    }
}
