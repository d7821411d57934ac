//! Decoding of the in-game character sets used for nicknames.

use byteorder::{ByteOrder, LittleEndian};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    /// Gen 1/2 international character set, terminated by 0x50.
    GameBoy,
    /// Gen 3 international character set, terminated by 0xFF.
    Gen3,
    /// Gen 4 proprietary 16-bit character table, terminated by 0xFFFF.
    Gen4,
    /// UTF-16LE, terminated by 0x0000 (or 0xFFFF in Gen 5).
    Utf16,
}

pub fn decode_text(text_data: &[u8], charset: Charset) -> String {
    match charset {
        Charset::GameBoy => decode_gb(text_data),
        Charset::Gen3 => decode_gen3(text_data),
        Charset::Gen4 => decode_gen4(text_data),
        Charset::Utf16 => decode_utf16(text_data),
    }
}

fn decode_gb(text_data: &[u8]) -> String {
    let mut out_text = String::new();
    for byte in text_data {
        let decoded_char = match *byte {
            0x50 | 0x00 => break,
            0x7f => ' ',
            letter @ 0x80..=0x99 => char::from(b'A' + (letter - 0x80)),
            0x9a => '(',
            0x9b => ')',
            0x9c => ':',
            0x9d => ';',
            0x9e => '[',
            0x9f => ']',
            letter @ 0xa0..=0xb9 => char::from(b'a' + (letter - 0xa0)),
            0xe3 => '-',
            0xe6 => '?',
            0xe7 => '!',
            0xe8 => '.',
            0xef => '♂',
            0xf3 => '/',
            0xf4 => ',',
            0xf5 => '♀',
            digit @ 0xf6..=0xff => char::from(b'0' + (digit - 0xf6)),
            _ => '*',
        };
        out_text.push(decoded_char);
    }

    out_text
}

fn decode_gen3(text_data: &[u8]) -> String {
    let mut out_text = String::new();
    for byte in text_data {
        let decoded_char = match *byte {
            0xff => break,
            0x00 => ' ',
            digit @ 0xa1..=0xaa => char::from(b'0' + (digit - 0xa1)),
            0xab => '!',
            0xac => '?',
            0xad => '.',
            0xae => '-',
            0xb0 => '…',
            0xb1 => '“',
            0xb2 => '”',
            0xb3 => '‘',
            0xb4 => '’',
            0xb5 => '♂',
            0xb6 => '♀',
            0xb8 => ',',
            0xba => '/',
            letter @ 0xbb..=0xd4 => char::from(b'A' + (letter - 0xbb)),
            letter @ 0xd5..=0xee => char::from(b'a' + (letter - 0xd5)),
            _ => '*',
        };
        out_text.push(decoded_char);
    }

    // 0x00 is a space, so an unterminated zeroed buffer would otherwise decode to blanks.
    out_text.truncate(out_text.trim_end().len());
    out_text
}

// Only the Latin subset of the table is mapped.
fn decode_gen4(text_data: &[u8]) -> String {
    let mut out_text = String::new();
    for word in text_data.chunks_exact(2) {
        let decoded_char = match LittleEndian::read_u16(word) {
            0xffff | 0x0000 => break,
            digit @ 0x0121..=0x012a => char::from(b'0' + (digit - 0x0121) as u8),
            letter @ 0x012b..=0x0144 => char::from(b'A' + (letter - 0x012b) as u8),
            letter @ 0x0145..=0x015e => char::from(b'a' + (letter - 0x0145) as u8),
            0x01ab => '!',
            0x01ac => '?',
            0x01ad => ',',
            0x01ae => '.',
            0x01b3 => '\'',
            0x01bb => '♂',
            0x01bc => '♀',
            0x01be => '-',
            0x01de => ' ',
            _ => '*',
        };
        out_text.push(decoded_char);
    }

    out_text
}

fn decode_utf16(text_data: &[u8]) -> String {
    let units = text_data
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .take_while(|unit| *unit != 0x0000 && *unit != 0xffff)
        .map(|unit| match unit {
            // Private-use glyphs the games use for the gender symbols.
            0xe08e => 0x2642,
            0xe08f => 0x2640,
            unit => unit,
        });

    char::decode_utf16(units)
        .map(|decoded| decoded.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gb() {
        // "PIKA" then terminator and padding.
        let data = [0x8f, 0x88, 0x8a, 0x80, 0x50, 0x50, 0x50];
        assert_eq!(decode_text(&data, Charset::GameBoy), "PIKA");
        assert_eq!(decode_text(&[0xa0, 0xf7, 0x50], Charset::GameBoy), "a1");
    }

    #[test]
    fn test_decode_gen3() {
        // "Wurmple" as stored in a pk3 nickname.
        let data = [0xd1, 0xe9, 0xe6, 0xe1, 0xe4, 0xe0, 0xd9, 0xff, 0x00, 0x00];
        assert_eq!(decode_text(&data, Charset::Gen3), "Wurmple");
        assert_eq!(decode_text(&[0xa1, 0xaa, 0xff], Charset::Gen3), "09");
        assert_eq!(decode_text(&[0x00; 10], Charset::Gen3), "");
    }

    #[test]
    fn test_decode_gen4() {
        let data = [0x3a, 0x01, 0x4d, 0x01, 0xde, 0x01, 0x22, 0x01, 0xff, 0xff];
        assert_eq!(decode_text(&data, Charset::Gen4), "Pi 1");
    }

    #[test]
    fn test_decode_utf16() {
        let mut data = Vec::new();
        for unit in "Eevee".encode_utf16().chain([0xe08f, 0x0000, 0x0041]) {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&data, Charset::Utf16), "Eevee♀");
        assert_eq!(decode_text(&[0xff, 0xff, 0x41, 0x00], Charset::Utf16), "");
    }

    #[test]
    fn test_empty_text() {
        for charset in [
            Charset::GameBoy,
            Charset::Gen3,
            Charset::Gen4,
            Charset::Utf16,
        ] {
            assert_eq!(decode_text(&[], charset), "");
        }
    }
}
