//! Product Identification Types

use crate::crc;

/// Size of the identification frame: two product number words and four serial number words
pub const PRODUCT_ID_FRAME_SIZE: usize = 18;

/// Product Identification as described in the datasheet (5.3.7 Read Product Identifier)
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ProductIdentifier {
    /// The serial number (64 bit)
    pub serial_number: u64,
    /// The raw product number (32 bit)
    pub product_number: u32,
}

impl TryFrom<[u8; PRODUCT_ID_FRAME_SIZE]> for ProductIdentifier {
    type Error = crc::Error;

    fn try_from(buf: [u8; PRODUCT_ID_FRAME_SIZE]) -> Result<Self, Self::Error> {
        crc::validate(&buf)?;

        let product_number = u32::from(crc::word(&buf, 0)) << 16 | u32::from(crc::word(&buf, 1));

        let serial_number = (2..6).fold(0u64, |serial, index| {
            serial << 16 | u64::from(crc::word(&buf, index))
        });

        Ok(Self {
            serial_number,
            product_number,
        })
    }
}

impl ProductIdentifier {
    /// Interpret the product number
    #[must_use]
    pub fn variant(&self) -> ProductVariant {
        ProductVariant::from(self.product_number)
    }
}

/// Product variant as listed in the datasheet
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ProductVariant {
    /// Unknown product number
    Unknown(u32),
    /// SDP31, 500 Pascal range
    Sdp31,
    /// SDP32, 125 Pascal range
    Sdp32,
}

/// Product number of the SDP31
pub const SDP31_PRODUCT_NUMBER: u32 = 0x0301_0101;

/// Product number of the SDP32
pub const SDP32_PRODUCT_NUMBER: u32 = 0x0301_0201;

impl From<u32> for ProductVariant {
    fn from(value: u32) -> Self {
        match value {
            SDP31_PRODUCT_NUMBER => Self::Sdp31,
            SDP32_PRODUCT_NUMBER => Self::Sdp32,
            other => Self::Unknown(other),
        }
    }
}

impl ProductVariant {
    /// Get the conversion factor for differential pressure in 1/Pa
    #[must_use]
    pub const fn get_default_conversion_factor(&self) -> Option<i16> {
        match self {
            ProductVariant::Sdp31 => Some(60),
            ProductVariant::Sdp32 => Some(240),
            ProductVariant::Unknown(_) => None,
        }
    }

    /// The product number, or zero if unknown
    #[must_use]
    pub const fn product_number(&self) -> u32 {
        match self {
            ProductVariant::Sdp31 => SDP31_PRODUCT_NUMBER,
            ProductVariant::Sdp32 => SDP32_PRODUCT_NUMBER,
            ProductVariant::Unknown(_) => 0,
        }
    }
}
