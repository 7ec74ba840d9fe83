use super::*;
use crate::{decode_all, Decoder};
use indoc::indoc;
use pretty_assertions::assert_eq;
use sim8086_instruction::{
    AddressingMode, Displacement, Immediate, Operand, OperandSet, OperandSize, Register,
    SizedRegister,
};

fn decode(bytes: &[u8]) -> Result<Instruction> {
    let mut cursor = ByteCursor::new(bytes);
    let instruction = decode_instruction(&mut cursor)?;
    assert_eq!(
        cursor.position(),
        bytes.len(),
        "instruction did not consume all bytes"
    );
    Ok(instruction)
}

fn listing(bytes: &[u8]) -> String {
    let mut lines = vec!["bits 16".to_string()];
    for instruction in Decoder::new(bytes) {
        lines.push(instruction.unwrap().to_string());
    }
    lines.push(String::new());
    lines.join("\n")
}

macro_rules! test_decode {
    ($bytes:expr, $expected:literal) => {{
        assert_eq!(decode(&$bytes).unwrap().to_string(), $expected);
    }};
}

fn reg(register: Register, operand_size: OperandSize) -> Operand {
    Operand::Register(SizedRegister(register, operand_size))
}

#[test]
fn golden() {
    test_decode!([0x89, 0xD9], "mov cx, bx");
    test_decode!([0x8B, 0x1E, 0x82, 0x0D], "mov bx, [3458]");
    test_decode!([0xB1, 0x0C], "mov cl, 12");
    test_decode!([0x83, 0xC6, 0x02], "add si, 2");
    test_decode!([0x75, 0xFE], "jne -2");
}

#[test]
fn mov_register_memory_to_from_register() {
    test_decode!([0x88, 0xE5], "mov ch, ah");
    test_decode!([0x8A, 0x00], "mov al, [bx + si]");
    test_decode!([0x8B, 0x1B], "mov bx, [bp + di]");
    test_decode!([0x8B, 0x56, 0x00], "mov dx, [bp]");
    test_decode!([0x8A, 0x60, 0x04], "mov ah, [bx + si + 4]");
    test_decode!([0x8A, 0x80, 0x87, 0x13], "mov al, [bx + si + 4999]");
    test_decode!([0x89, 0x09], "mov [bx + di], cx");
    test_decode!([0x88, 0x0A], "mov [bp + si], cl");
    test_decode!([0x88, 0x6E, 0x00], "mov [bp], ch");
}

#[test]
fn mov_immediate() {
    test_decode!([0xB5, 0xF4], "mov ch, 244");
    test_decode!([0xB9, 0x0C, 0x00], "mov cx, 12");
    test_decode!([0xBA, 0x6C, 0x0F], "mov dx, 3948");
    test_decode!([0xC6, 0x03, 0x07], "mov [bp + di], 7");
    test_decode!([0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01], "mov [di + 901], 347");
    test_decode!([0xC6, 0xC3, 0x07], "mov bl, 7");
    test_decode!([0xC7, 0x06, 0x82, 0x0D, 0x34, 0x12], "mov [3458], 4660");
}

#[test]
fn arithmetic_register_memory_with_register() {
    test_decode!([0x03, 0x18], "add bx, [bx + si]");
    test_decode!([0x29, 0xD8], "sub ax, bx");
    test_decode!([0x39, 0xD8], "cmp ax, bx");
    test_decode!([0x2A, 0x46, 0x00], "sub al, [bp]");
    test_decode!([0x38, 0x4F, 0x10], "cmp [bx + 16], cl");
}

#[test]
fn arithmetic_immediate() {
    test_decode!([0x80, 0x07, 0x22], "add [bx], 34");
    test_decode!([0x81, 0xC4, 0x88, 0x01], "add sp, 392");
    test_decode!([0x83, 0xEE, 0x02], "sub si, 2");
    test_decode!([0x83, 0xFE, 0x02], "cmp si, 2");
    test_decode!([0x83, 0x3E, 0xE2, 0x12, 0x1D], "cmp [4834], 29");
}

#[test]
fn arithmetic_immediate_sign_extension() {
    // s = 1, w = 1: one byte, sign extended.
    assert_eq!(
        decode(&[0x83, 0xC6, 0xFF]),
        Ok(Instruction::new(
            Operation::Add,
            OperandSet::DestinationAndSource(
                reg(Register::DhSi, OperandSize::Word),
                Operand::Immediate(Immediate::SignExtended(0xFFFF)),
            )
        ))
    );
    test_decode!([0x83, 0xC6, 0xFF], "add si, 255");
    test_decode!([0x83, 0xC6, 0xFE], "add si, 254");
    test_decode!([0x83, 0xEE, 0xFF], "sub si, 255");
    test_decode!([0x83, 0x3E, 0xE2, 0x12, 0x9C], "cmp [4834], 156");

    // s = 1, w = 0: one byte, no extension.
    assert_eq!(
        decode(&[0x82, 0xC6, 0xFF]),
        Ok(Instruction::new(
            Operation::Add,
            OperandSet::DestinationAndSource(
                reg(Register::DhSi, OperandSize::Byte),
                Operand::Immediate(Immediate::Byte(0xFF)),
            )
        ))
    );

    // s = 0, w = 1: two bytes.
    test_decode!([0x81, 0xEE, 0xFF, 0x00], "sub si, 255");
}

#[test]
fn immediate_with_accumulator() {
    test_decode!([0x04, 0x09], "add al, 9");
    test_decode!([0x05, 0xE8, 0x03], "add ax, 1000");
    test_decode!([0x2C, 0x09], "sub al, 9");
    test_decode!([0x2D, 0xFF, 0xFF], "sub ax, 65535");
    test_decode!([0x3C, 0xE2], "cmp al, 226");
    test_decode!([0x3D, 0xE8, 0x03], "cmp ax, 1000");
}

#[test]
fn jumps_and_loops() {
    let expected = [
        (0x70, "jo"),
        (0x71, "jno"),
        (0x72, "jb"),
        (0x73, "jnb"),
        (0x74, "je"),
        (0x75, "jne"),
        (0x76, "jbe"),
        (0x77, "ja"),
        (0x78, "js"),
        (0x79, "jns"),
        (0x7A, "jp"),
        (0x7B, "jnp"),
        (0x7C, "jl"),
        (0x7D, "jnl"),
        (0x7E, "jle"),
        (0x7F, "jg"),
        (0xE0, "loopnz"),
        (0xE1, "loopz"),
        (0xE2, "loop"),
        (0xE3, "jcxz"),
    ];

    for (op_code, mnemonic) in expected {
        assert_eq!(
            decode(&[op_code, 0xFA]).unwrap().to_string(),
            format!("{} -6", mnemonic)
        );
    }

    test_decode!([0x7F, 0x80], "jg -128");
    test_decode!([0x7F, 0x7F], "jg 127");
    test_decode!([0xE3, 0x00], "jcxz 0");
}

#[test]
fn zero_displacement_is_not_printed() {
    assert_eq!(
        decode(&[0x8B, 0x46, 0x00]),
        Ok(Instruction::new(
            Operation::Mov,
            OperandSet::DestinationAndSource(
                reg(Register::AlAx, OperandSize::Word),
                Operand::Memory(AddressingMode::Bp, Displacement::Byte(0)),
            )
        ))
    );
    test_decode!([0x8B, 0x46, 0x00], "mov ax, [bp]");
    test_decode!([0x8B, 0x87, 0x00, 0x00], "mov ax, [bx]");
}

#[test]
fn memory_displacements_print_unsigned() {
    test_decode!([0x8B, 0x41, 0xDB], "mov ax, [bx + di + 219]");
    test_decode!([0x89, 0x8C, 0xD4, 0xFE], "mov [si + 65236], cx");
}

#[test]
fn register_mode_never_mixes_widths() {
    let families: [u8; 4] = [0x88, 0x00, 0x28, 0x38];

    for family in families {
        for low_bits in 0..=0b11 {
            let op_code = family | low_bits;
            let expected = op_code.operand_size();

            for mrrm in 0b11_000_000..=0xFF {
                let instruction = decode(&[op_code, mrrm]).unwrap();

                match instruction.operands {
                    OperandSet::DestinationAndSource(
                        destination @ Operand::Register(_),
                        source @ Operand::Register(_),
                    ) => {
                        assert_eq!(destination.operand_size(), Some(expected));
                        assert_eq!(source.operand_size(), Some(expected));
                    }
                    operands => panic!("expected two registers, got {:?}", operands),
                }
            }
        }
    }
}

#[test]
fn direction_flag_picks_the_destination() {
    // 0x89: reg is the source.  0x8B: reg is the destination.
    let mrrm = 0b11_011_001;

    assert_eq!(
        decode(&[0x89, mrrm]).unwrap().operands,
        OperandSet::DestinationAndSource(
            reg(Register::ClCx, OperandSize::Word),
            reg(Register::BlBx, OperandSize::Word),
        )
    );
    assert_eq!(
        decode(&[0x8B, mrrm]).unwrap().operands,
        OperandSet::DestinationAndSource(
            reg(Register::BlBx, OperandSize::Word),
            reg(Register::ClCx, OperandSize::Word),
        )
    );
}

#[test]
fn unknown_arithmetic_extension() {
    for extension in [0b001, 0b010, 0b011, 0b100, 0b110] {
        for op_code in 0x80..=0x83 {
            let mrrm = 0b11_000_000 | (extension << 3);
            assert_eq!(
                decode(&[op_code, mrrm, 0x01, 0x01]),
                Err(DecodeError::UnknownExtensionOpcode {
                    extension,
                    position: 1
                })
            );
        }
    }
}

#[test]
fn unknown_mov_extension() {
    assert_eq!(
        decode(&[0xC6, 0x08, 0x05]),
        Err(DecodeError::UnknownExtensionOpcode {
            extension: 0b001,
            position: 1
        })
    );
}

#[test]
fn unknown_op_code() {
    for op_code in [0x0F, 0x90, 0xC3, 0xCD, 0xF4, 0xFF] {
        assert_eq!(
            decode(&[op_code, 0x00, 0x00]),
            Err(DecodeError::UnknownOpcode {
                op_code,
                position: 0
            })
        );
    }
}

#[test]
fn truncated_instructions() {
    assert_eq!(decode(&[0x89]), Err(DecodeError::OutOfBounds { position: 1 }));
    assert_eq!(
        decode(&[0x8B, 0x1E, 0x82]),
        Err(DecodeError::OutOfBounds { position: 3 })
    );
    assert_eq!(
        decode(&[0x8A, 0x60]),
        Err(DecodeError::OutOfBounds { position: 2 })
    );
    assert_eq!(
        decode(&[0xB9, 0x0C]),
        Err(DecodeError::OutOfBounds { position: 2 })
    );
    assert_eq!(
        decode(&[0x81, 0xC4, 0x88]),
        Err(DecodeError::OutOfBounds { position: 3 })
    );
    assert_eq!(
        decode(&[0x05, 0xE8]),
        Err(DecodeError::OutOfBounds { position: 2 })
    );
    assert_eq!(decode(&[0x75]), Err(DecodeError::OutOfBounds { position: 1 }));
    assert_eq!(decode(&[]), Err(DecodeError::OutOfBounds { position: 0 }));
}

#[test]
fn failed_decode_does_not_move_the_cursor() {
    let bytes = [0xC7, 0x85, 0x85, 0x03, 0x5B];
    let mut cursor = ByteCursor::new(&bytes);

    assert_eq!(
        decode_instruction(&mut cursor),
        Err(DecodeError::OutOfBounds { position: 5 })
    );
    assert_eq!(cursor.position(), 0);
}

#[test]
fn families_are_mutually_exclusive() {
    let mut known = 0;

    for op_code in 0..=0xFFu8 {
        let matches = OP_CODE_FAMILIES
            .iter()
            .filter(|family| family.matches(op_code))
            .count();
        assert!(matches <= 1, "{:#04x} matches {} families", op_code, matches);
        known += matches;
    }

    assert_eq!(known, 64);
}

#[test]
fn family_lookup() {
    assert_eq!(
        find_family(0x8B).map(|f| f.name),
        Some("mov register/memory to/from register")
    );
    assert_eq!(
        find_family(0xC7).map(|f| f.name),
        Some("mov immediate to register/memory")
    );
    assert_eq!(find_family(0xBF).map(|f| f.name), Some("mov immediate to register"));
    assert_eq!(
        find_family(0x83).map(|f| f.name),
        Some("add/sub/cmp immediate to register/memory")
    );
    assert_eq!(find_family(0xE3).map(|f| f.name), Some("loop/jcxz"));
    assert!(find_family(0xE4).is_none());
}

#[test]
fn decoding_is_repeatable() {
    let bytes = [
        0x89, 0xD9, 0x8B, 0x1E, 0x82, 0x0D, 0xB1, 0x0C, 0x83, 0xC6, 0x02, 0x75, 0xFE,
    ];

    let first = decode_all(&bytes).unwrap();
    let second = decode_all(&bytes).unwrap();

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[test]
fn listing_registers() {
    assert_eq!(
        listing(&[
            0x89, 0xD9, 0x88, 0xE5, 0x89, 0xDA, 0x89, 0xDE, 0x89, 0xFB, 0x88, 0xC8, 0x88, 0xED,
            0x89, 0xC3, 0x89, 0xF3, 0x89, 0xFC, 0x89, 0xC5,
        ]),
        indoc! {"
            bits 16
            mov cx, bx
            mov ch, ah
            mov dx, bx
            mov si, bx
            mov bx, di
            mov al, cl
            mov ch, ch
            mov bx, ax
            mov bx, si
            mov sp, di
            mov bp, ax
        "}
    );
}

#[test]
fn listing_arithmetic_and_jumps() {
    assert_eq!(
        listing(&[
            0x03, 0x18, 0x83, 0xC6, 0x02, 0x05, 0xE8, 0x03, 0x2C, 0x09, 0x83, 0x3E, 0xE2, 0x12,
            0x1D, 0x39, 0xD8, 0x75, 0xF2, 0xE2, 0xFE,
        ]),
        indoc! {"
            bits 16
            add bx, [bx + si]
            add si, 2
            add ax, 1000
            sub al, 9
            cmp [4834], 29
            cmp ax, bx
            jne -14
            loop -2
        "}
    );
}
