//! Sample type for the SDP3x differential pressure sensor

use core::fmt;
use core::marker::PhantomData;

use crate::config::Quantity;
use crate::crc;

/// Temperature scale factor in 1/°C, identical for all product variants
pub const TEMPERATURE_SCALE_FACTOR: f32 = 200.0f32;

/// Size of a measurement frame: pressure, temperature and scale factor words
pub const SAMPLE_FRAME_SIZE: usize = 9;

/// Sample decoding error
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SampleError {
    /// Wrong CRC
    CrcError,
    /// Sensor sent a zero scale factor and no fallback is known
    InvalidScaleFactor,
}

impl From<crc::Error> for SampleError {
    fn from(_: crc::Error) -> Self {
        SampleError::CrcError
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::CrcError => f.write_str("crc mismatch in measurement frame"),
            SampleError::InvalidScaleFactor => f.write_str("no valid scale factor"),
        }
    }
}

/// Marker type for differential pressure
#[derive(Debug, Default, Clone, Copy)]
pub struct DifferentialPressure;

/// Marker type for mass flow
#[derive(Debug, Default, Clone, Copy)]
pub struct MassFlow;

/// Links a marker type to the temperature compensation it selects.
pub trait Measurement {
    /// The compensation requested from the sensor
    const QUANTITY: Quantity;
}

impl Measurement for DifferentialPressure {
    const QUANTITY: Quantity = Quantity::DifferentialPressure;
}

impl Measurement for MassFlow {
    const QUANTITY: Quantity = Quantity::MassFlow;
}

/// A measurement result from the sensor.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Sample<T> {
    /// Differential pressure in Pa (compensation depends on `T`)
    pub value: f32,
    /// Temperature in °C
    pub temperature: f32,
    /// Sample data type
    measurement_type: PhantomData<T>,
}

impl<T> Sample<T> {
    /// Validate and convert a measurement frame.
    ///
    /// The scale factor is taken from the third word. If the sensor sent zero there,
    /// `fallback_scale_factor` is used instead.
    pub fn decode(
        frame: &[u8; SAMPLE_FRAME_SIZE],
        fallback_scale_factor: Option<i16>,
    ) -> Result<Self, SampleError> {
        crc::validate(frame)?;

        let dp_raw = crc::word(frame, 0) as i16;
        let temp_raw = crc::word(frame, 1) as i16;
        let dp_scale = match crc::word(frame, 2) as i16 {
            0 => fallback_scale_factor
                .filter(|&f| f != 0)
                .ok_or(SampleError::InvalidScaleFactor)?,
            scale => scale,
        };

        Ok(Sample::<T> {
            value: f32::from(dp_raw) / f32::from(dp_scale),
            temperature: f32::from(temp_raw) / TEMPERATURE_SCALE_FACTOR,
            measurement_type: PhantomData::<T>,
        })
    }

    /// Get the temperature
    pub fn get_temperature(&self) -> f32 {
        self.temperature
    }
}

impl<T> TryFrom<[u8; SAMPLE_FRAME_SIZE]> for Sample<T> {
    type Error = SampleError;

    fn try_from(buffer: [u8; SAMPLE_FRAME_SIZE]) -> Result<Self, Self::Error> {
        Self::decode(&buffer, None)
    }
}

impl Sample<MassFlow> {
    /// Get mass flow compensated differential pressure
    pub fn get_mass_flow(&self) -> f32 {
        self.value
    }
}

impl Sample<DifferentialPressure> {
    /// Get differential pressure reading
    pub fn get_differential_pressure(&self) -> f32 {
        self.value
    }
}
