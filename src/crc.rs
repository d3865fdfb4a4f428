//! CRC-8 checksum used by the SDP3x for every transmitted word
//!
//! Polynomial `0x31` (x^8 + x^5 + x^4 + 1), initialization `0xFF`, no reflection, no final XOR.

use core::fmt;

/// Generator polynomial
pub const POLYNOMIAL: u8 = 0x31;

/// Initial register value
pub const INITIALIZATION: u8 = 0xFF;

/// Size of one word on the wire: two data bytes and their checksum
pub const WORD_SIZE: usize = 3;

/// CRC validation error
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Error {
    /// The checksum of the word starting at byte `offset` did not match
    CrcError {
        /// Byte offset of the offending word in the frame
        offset: usize,
    },
    /// The frame is not a whole number of words
    WrongBufferSize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CrcError { offset } => write!(f, "crc mismatch in word at byte {offset}"),
            Error::WrongBufferSize => f.write_str("frame length is not a multiple of 3"),
        }
    }
}

#[rustfmt::skip]
const LOOKUP_TABLE: [u8; 256] = [
    0x00, 0x31, 0x62, 0x53, 0xC4, 0xF5, 0xA6, 0x97, 0xB9, 0x88, 0xDB, 0xEA, 0x7D, 0x4C, 0x1F, 0x2E,
    0x43, 0x72, 0x21, 0x10, 0x87, 0xB6, 0xE5, 0xD4, 0xFA, 0xCB, 0x98, 0xA9, 0x3E, 0x0F, 0x5C, 0x6D,
    0x86, 0xB7, 0xE4, 0xD5, 0x42, 0x73, 0x20, 0x11, 0x3F, 0x0E, 0x5D, 0x6C, 0xFB, 0xCA, 0x99, 0xA8,
    0xC5, 0xF4, 0xA7, 0x96, 0x01, 0x30, 0x63, 0x52, 0x7C, 0x4D, 0x1E, 0x2F, 0xB8, 0x89, 0xDA, 0xEB,
    0x3D, 0x0C, 0x5F, 0x6E, 0xF9, 0xC8, 0x9B, 0xAA, 0x84, 0xB5, 0xE6, 0xD7, 0x40, 0x71, 0x22, 0x13,
    0x7E, 0x4F, 0x1C, 0x2D, 0xBA, 0x8B, 0xD8, 0xE9, 0xC7, 0xF6, 0xA5, 0x94, 0x03, 0x32, 0x61, 0x50,
    0xBB, 0x8A, 0xD9, 0xE8, 0x7F, 0x4E, 0x1D, 0x2C, 0x02, 0x33, 0x60, 0x51, 0xC6, 0xF7, 0xA4, 0x95,
    0xF8, 0xC9, 0x9A, 0xAB, 0x3C, 0x0D, 0x5E, 0x6F, 0x41, 0x70, 0x23, 0x12, 0x85, 0xB4, 0xE7, 0xD6,
    0x7A, 0x4B, 0x18, 0x29, 0xBE, 0x8F, 0xDC, 0xED, 0xC3, 0xF2, 0xA1, 0x90, 0x07, 0x36, 0x65, 0x54,
    0x39, 0x08, 0x5B, 0x6A, 0xFD, 0xCC, 0x9F, 0xAE, 0x80, 0xB1, 0xE2, 0xD3, 0x44, 0x75, 0x26, 0x17,
    0xFC, 0xCD, 0x9E, 0xAF, 0x38, 0x09, 0x5A, 0x6B, 0x45, 0x74, 0x27, 0x16, 0x81, 0xB0, 0xE3, 0xD2,
    0xBF, 0x8E, 0xDD, 0xEC, 0x7B, 0x4A, 0x19, 0x28, 0x06, 0x37, 0x64, 0x55, 0xC2, 0xF3, 0xA0, 0x91,
    0x47, 0x76, 0x25, 0x14, 0x83, 0xB2, 0xE1, 0xD0, 0xFE, 0xCF, 0x9C, 0xAD, 0x3A, 0x0B, 0x58, 0x69,
    0x04, 0x35, 0x66, 0x57, 0xC0, 0xF1, 0xA2, 0x93, 0xBD, 0x8C, 0xDF, 0xEE, 0x79, 0x48, 0x1B, 0x2A,
    0xC1, 0xF0, 0xA3, 0x92, 0x05, 0x34, 0x67, 0x56, 0x78, 0x49, 0x1A, 0x2B, 0xBC, 0x8D, 0xDE, 0xEF,
    0x82, 0xB3, 0xE0, 0xD1, 0x46, 0x77, 0x24, 0x15, 0x3B, 0x0A, 0x59, 0x68, 0xFF, 0xCE, 0x9D, 0xAC,
];

/// Checksum algorithm. Both variants compute the same CRC.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum Algorithm {
    /// 256 entry table, one lookup per byte
    #[default]
    LookupTable,
    /// Shift and XOR, bit by bit
    Bitwise,
}

impl Algorithm {
    /// Compute the checksum of a big endian word
    #[must_use]
    pub const fn checksum(self, word: u16) -> u8 {
        let bytes = word.to_be_bytes();
        let mut crc = INITIALIZATION;
        let mut i = 0;
        while i < bytes.len() {
            crc = match self {
                Algorithm::LookupTable => LOOKUP_TABLE[(crc ^ bytes[i]) as usize],
                Algorithm::Bitwise => {
                    let mut crc = crc ^ bytes[i];
                    let mut bit = 0;
                    while bit < 8 {
                        crc = if crc & 0x80 != 0 {
                            (crc << 1) ^ POLYNOMIAL
                        } else {
                            crc << 1
                        };
                        bit += 1;
                    }
                    crc
                }
            };
            i += 1;
        }
        crc
    }
}

/// CRC of an unsigned word
#[must_use]
pub const fn crc8(word: u16) -> u8 {
    Algorithm::LookupTable.checksum(word)
}

/// CRC of a signed word, computed over its two's complement bit pattern
#[must_use]
pub const fn crc8_signed(word: i16) -> u8 {
    crc8(word as u16)
}

/// Check every `[msb, lsb, crc]` triple of `frame`, in order.
///
/// Stops at the first mismatch.
pub fn validate(frame: &[u8]) -> Result<(), Error> {
    if frame.len() % WORD_SIZE != 0 {
        return Err(Error::WrongBufferSize);
    }
    for (index, word) in frame.chunks_exact(WORD_SIZE).enumerate() {
        let value = u16::from_be_bytes([word[0], word[1]]);
        let expected = crc8(value);
        if expected != word[2] {
            log::warn!(
                "crc mismatch for word {:#06x}: received {:#04x}, expected {:#04x}",
                value,
                word[2],
                expected
            );
            return Err(Error::CrcError {
                offset: index * WORD_SIZE,
            });
        }
    }
    Ok(())
}

/// Read the big endian word at `index` of an already validated frame
pub(crate) fn word(frame: &[u8], index: usize) -> u16 {
    let start = index * WORD_SIZE;
    u16::from_be_bytes([frame[start], frame[start + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn datasheet_example() {
        assert_eq!(crc8(0xBEEF), 0x92);
        assert_eq!(Algorithm::Bitwise.checksum(0xBEEF), 0x92);
    }

    #[test]
    fn table_matches_bitwise_for_every_word() {
        for word in 0..=u16::MAX {
            assert_eq!(
                Algorithm::LookupTable.checksum(word),
                Algorithm::Bitwise.checksum(word),
                "word {word:#06x}"
            );
        }
    }

    #[test]
    fn signed_and_unsigned_agree_on_bit_pattern() {
        assert_eq!(crc8_signed(-1), crc8(0xFFFF));
        assert_eq!(crc8_signed(-2000), crc8((-2000i16) as u16));
        assert_eq!(crc8_signed(2000), crc8(2000));
    }

    #[test]
    fn validate_accepts_good_frame() {
        let frame = [0xBE, 0xEF, 0x92, 0x00, 0x00, 0x81];
        assert_eq!(validate(&frame), Ok(()));
    }

    #[test]
    fn validate_reports_first_bad_word() {
        let frame = [0xBE, 0xEF, 0x92, 0x00, 0x00, 0x00, 0xBE, 0xEF, 0x00];
        assert_eq!(validate(&frame), Err(Error::CrcError { offset: 3 }));
    }

    #[test]
    fn validate_rejects_partial_word() {
        assert_eq!(validate(&[0xBE, 0xEF]), Err(Error::WrongBufferSize));
    }

    proptest! {
        #[test]
        fn matches_sensirion_crc(word in any::<u16>()) {
            prop_assert_eq!(crc8(word), sensirion_i2c::crc8::calculate(&word.to_be_bytes()));
        }
    }
}
