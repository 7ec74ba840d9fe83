use crate::error::Error;
use sim8086_decoder::{Decoded, Decoder};
use std::io::Write;

/// The longest 8086 instruction this decoder knows about.
const MAX_INSTRUCTION_BYTES: usize = 6;

#[derive(Clone, Copy, Debug, Default)]
pub struct ListingOptions {
    pub header: bool,
    pub listing: bool,
    pub resolve_targets: bool,
}

fn print_instruction(
    out: &mut impl Write,
    decoded: &Decoded,
    options: &ListingOptions,
) -> std::io::Result<()> {
    let resolve = options.resolve_targets && decoded.instruction.operation.is_jump();

    // Targets are only resolved while the next offset still fits in a 16-bit address.
    let text = match u16::try_from(decoded.offset + decoded.bytes.len()) {
        Ok(next_offset) if resolve => decoded.instruction.at(next_offset).to_string(),
        _ => decoded.instruction.to_string(),
    };

    if !options.listing {
        return writeln!(out, "{}", text);
    }

    let mut b: String = decoded
        .bytes
        .iter()
        .map(|b| format!("{:02X} ", b))
        .collect();
    for _ in decoded.bytes.len()..MAX_INSTRUCTION_BYTES {
        b.push_str("   ");
    }

    writeln!(out, "{:04X}  {} {}", decoded.offset, b, text)
}

/// Write the disassembly of `data` to `out`.
///
/// Everything decoded before an error is written before the error is returned.
pub fn write_listing(
    out: &mut impl Write,
    data: &[u8],
    options: &ListingOptions,
) -> Result<(), Error> {
    if options.header {
        writeln!(out, "bits 16")?;
    }

    let mut decoder = Decoder::new(data);
    while let Some(decoded) = decoder.decode_next() {
        print_instruction(out, &decoded?, options)?;
    }

    Ok(())
}

/// One line per byte: `0xHH: bbbb bbbb`.
pub fn write_bit_dump(out: &mut impl Write, data: &[u8]) -> std::io::Result<()> {
    for byte in data {
        writeln!(out, "0x{:02X}: {:04b} {:04b}", byte, byte >> 4, byte & 0x0F)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sim8086_decoder::DecodeError;

    fn render(data: &[u8], options: ListingOptions) -> (String, Result<(), Error>) {
        let mut out = Vec::new();
        let result = write_listing(&mut out, data, &options);
        (String::from_utf8(out).unwrap(), result)
    }

    const HEADER: ListingOptions = ListingOptions {
        header: true,
        listing: false,
        resolve_targets: false,
    };

    #[test]
    fn plain() {
        let (text, result) = render(&[0x89, 0xD9, 0x8B, 0x1E, 0x82, 0x0D, 0x75, 0xFA], HEADER);
        assert!(result.is_ok());
        assert_eq!(
            text,
            indoc! {"
                bits 16
                mov cx, bx
                mov bx, [3458]
                jne -6
            "}
        );
    }

    #[test]
    fn with_offsets_and_bytes() {
        let (text, result) = render(
            &[0x89, 0xD9, 0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01],
            ListingOptions {
                listing: true,
                ..HEADER
            },
        );
        assert!(result.is_ok());
        assert_eq!(
            text,
            indoc! {"
                bits 16
                0000  89 D9              mov cx, bx
                0002  C7 85 85 03 5B 01  mov [di + 901], 347
            "}
        );
    }

    #[test]
    fn resolved_targets() {
        let (text, result) = render(
            &[0x89, 0xD9, 0x75, 0xFC, 0xE2, 0x00],
            ListingOptions {
                header: false,
                resolve_targets: true,
                ..HEADER
            },
        );
        assert!(result.is_ok());
        assert_eq!(
            text,
            indoc! {"
                mov cx, bx
                jne 0
                loop 6
            "}
        );
    }

    #[test]
    fn targets_past_the_16_bit_range_are_not_resolved() {
        let mut data = [0x89, 0xD9].repeat(0x7FFE);
        // jne at 0xFFFC ends at 0xFFFE; jne at 0xFFFE ends at 0x10000.
        data.extend_from_slice(&[0x75, 0xFE, 0x75, 0xFE]);

        let (text, result) = render(
            &data,
            ListingOptions {
                header: false,
                resolve_targets: true,
                ..HEADER
            },
        );
        assert!(result.is_ok());

        let tail: Vec<&str> = text.lines().skip(0x7FFE).collect();
        assert_eq!(tail, ["jne 65532", "jne -2"]);
    }

    #[test]
    fn stops_at_the_first_error() {
        let (text, result) = render(&[0x89, 0xD9, 0x0F, 0x89, 0xD9], HEADER);
        assert_eq!(text, "bits 16\nmov cx, bx\n");
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::UnknownOpcode {
                op_code: 0x0F,
                position: 2
            }))
        ));
    }

    #[test]
    fn bit_dump() {
        let mut out = Vec::new();
        write_bit_dump(&mut out, &[0x89, 0xD9, 0x00]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0x89: 1000 1001\n0xD9: 1101 1001\n0x00: 0000 0000\n"
        );
    }
}
