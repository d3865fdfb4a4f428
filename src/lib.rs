//! A platform agnostic Rust driver for the Sensirion `SDP3x` differential pressure sensor, based
//! on the [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits.
//! Derived from the [`sdp8xx driver`](https://github.com/barafael/sdp8xx-rs).
//!
//! ## The Device
//!
//! The Sensirion `SDP3x` (`SDP31`, `SDP32`) is a differential pressure sensor with an I2C
//! interface. It measures either with mass flow or with differential pressure temperature
//! compensation, continuously or on request.
//!
//! - [Datasheet](https://sensirion.com/media/documents/E45CBBD3/6218C926/Sensirion_Differential_Pressure_Datasheet_SDP3x_Digital.pdf)
//! - [Product Page](https://sensirion.com/products/catalog/SDP31-500Pa)
//!
//! ## Usage
//!
//! ### Instantiating
//!
//! Import this crate and an `embedded_hal` implementation, then instantiate
//! the device:
//!
//! ```no_run
//! use linux_embedded_hal as hal;
//!
//! use hal::{Delay, I2cdev};
//! use sdp3x::{Address, Sdp3x};
//!
//! # fn main() {
//! let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! let mut sdp = Sdp3x::new(dev, Address::Default, Delay);
//! let variant = sdp.begin().unwrap();
//! println!("Found {:?}", variant);
//! # }
//! ```
//!
//! ### Fetching Some Data
//!
//! A triggered measurement leaves the driver idle:
//!
//! ```no_run
//! use linux_embedded_hal as hal;
//! use hal::{Delay, I2cdev};
//! use sdp3x::{ClockStretching, Sdp3x};
//!
//! let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! let mut sdp = Sdp3x::new(dev, 0x21, Delay);
//!
//! let sample = sdp
//!     .trigger_differential_pressure_sample(ClockStretching::Disabled)
//!     .unwrap();
//! println!("{} Pa, {} °C", sample.get_differential_pressure(), sample.get_temperature());
//! ```
//!
//! Continuous measurement moves the driver into a sampling state, which has to be
//! stopped before any other command can be sent:
//!
//! ```no_run
//! use linux_embedded_hal as hal;
//! use hal::{Delay, I2cdev};
//! use sdp3x::{Averaging, Sdp3x};
//!
//! let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! let sdp = Sdp3x::new(dev, 0x21, Delay);
//!
//! let mut sampling = sdp.start_sampling_mass_flow(Averaging::TillRead).unwrap();
//! for _ in 0..10 {
//!     if let Ok(sample) = sampling.read_continuous_sample() {
//!         println!("{:?}", sample);
//!     }
//! }
//! let sdp = sampling.stop_sampling().unwrap();
//! ```

#![warn(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(not(test), no_std)]


use crate::command::{Command, GENERAL_CALL_ADDRESS, GENERAL_CALL_RESET};
pub use crate::config::*;
pub use crate::sample::*;
use core::fmt;
use core::marker::PhantomData;
use embedded_hal::{delay::DelayNs, i2c::I2c};
pub use product_info::{ProductIdentifier, ProductVariant};
use product_info::PRODUCT_ID_FRAME_SIZE;
use states::{
    ContinuousSamplingState, IdleState, SleepState, ToDifferentialPressureSampling, ToIdle,
    ToMassflowSampling, ToSleep,
};

pub mod command;
pub mod config;
pub mod crc;
pub mod product_info;
pub mod sample;
pub mod states;

/// Maximum conversion time of a triggered measurement without clock stretching
pub const TRIGGERED_MEASUREMENT_TIME_MS: u32 = 45;

/// Time the sensor needs to come back after a soft reset
pub const SOFT_RESET_TIME_MS: u32 = 20;

/// All possible errors in this crate
pub enum SdpError<I>
where
    I: I2c,
{
    /// I2C write failed, e.g. the sensor did not acknowledge
    I2cWrite(I::Error),
    /// I2C read failed
    I2cRead(I::Error),
    /// CRC checksum validation failed
    CrcError,
    /// The sensor sent a zero scale factor and no fallback is known
    InvalidScaleFactor,
    /// The product number is neither an SDP31 nor an SDP32
    UnknownVariant(u32),
}

/// Coarse classification of an [`SdpError`]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Status {
    /// Data corruption or protocol desync
    BadCrc,
    /// Bus level failure
    TransportError,
    /// Data arrived intact but cannot be interpreted
    InvalidData,
}

impl<I> SdpError<I>
where
    I: I2c,
{
    /// Classify the error
    pub fn status(&self) -> Status {
        match self {
            SdpError::I2cWrite(_) | SdpError::I2cRead(_) => Status::TransportError,
            SdpError::CrcError => Status::BadCrc,
            SdpError::InvalidScaleFactor | SdpError::UnknownVariant(_) => Status::InvalidData,
        }
    }
}

impl<I> fmt::Debug for SdpError<I>
where
    I: I2c,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpError::I2cWrite(e) => f.debug_tuple("I2cWrite").field(e).finish(),
            SdpError::I2cRead(e) => f.debug_tuple("I2cRead").field(e).finish(),
            SdpError::CrcError => f.write_str("CrcError"),
            SdpError::InvalidScaleFactor => f.write_str("InvalidScaleFactor"),
            SdpError::UnknownVariant(n) => f.debug_tuple("UnknownVariant").field(n).finish(),
        }
    }
}

impl<I> fmt::Display for SdpError<I>
where
    I: I2c,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpError::I2cWrite(e) => write!(f, "i2c write failed: {e:?}"),
            SdpError::I2cRead(e) => write!(f, "i2c read failed: {e:?}"),
            SdpError::CrcError => f.write_str("crc mismatch"),
            SdpError::InvalidScaleFactor => f.write_str("invalid scale factor"),
            SdpError::UnknownVariant(n) => write!(f, "unknown product number {n:#010x}"),
        }
    }
}

impl<I> From<crc::Error> for SdpError<I>
where
    I: I2c,
{
    fn from(_: crc::Error) -> Self {
        SdpError::CrcError
    }
}

impl<I> From<SampleError> for SdpError<I>
where
    I: I2c,
{
    fn from(error: SampleError) -> Self {
        match error {
            SampleError::CrcError => SdpError::CrcError,
            SampleError::InvalidScaleFactor => SdpError::InvalidScaleFactor,
        }
    }
}

/// State of the `SDP3x`
#[derive(Debug)]
pub struct Sdp3x<I2C, D, State> {
    /// The concrete I2C device implementation.
    i2c: I2C,
    /// The I2C device address.
    address: u8,
    /// The concrete Delay implementation.
    delay: D,
    /// Scale factor of the detected product, used when the sensor sends none
    scale_factor: Option<i16>,
    /// The state of the sensor
    state: PhantomData<State>,
}

impl<I, D, S> Sdp3x<I, D, S> {
    /// Destroy driver instance, return I2C bus instance.
    pub fn release(self) -> I {
        self.i2c
    }

    fn into_state<T>(self) -> Sdp3x<I, D, T> {
        Sdp3x {
            i2c: self.i2c,
            address: self.address,
            delay: self.delay,
            scale_factor: self.scale_factor,
            state: PhantomData::<T>,
        }
    }
}

impl<I, D, S> Sdp3x<I, D, S>
where
    I: I2c,
{
    /// Write an I2C command to the sensor.
    fn send_command(&mut self, command: Command) -> Result<(), SdpError<I>> {
        log::debug!("sending {:?} to {:#04x}", command, self.address);
        sensirion_i2c::i2c::write_command_u16(&mut self.i2c, self.address, command.into())
            .map_err(SdpError::I2cWrite)
    }

    /// Read and decode one measurement frame.
    fn read_sample<T>(&mut self) -> Result<Sample<T>, SdpError<I>> {
        let mut frame = [0u8; SAMPLE_FRAME_SIZE];
        self.i2c
            .read(self.address, &mut frame)
            .map_err(SdpError::I2cRead)?;
        let sample = Sample::decode(&frame, self.scale_factor)?;
        log::debug!(
            "sample: {} Pa, {} °C",
            sample.value,
            sample.get_temperature()
        );
        Ok(sample)
    }
}

impl<I, D> Sdp3x<I, D, IdleState>
where
    I: I2c,
    D: DelayNs,
{
    /// Create a new instance of the `SDP3x` driver.
    ///
    /// No bus traffic happens here, see [`Sdp3x::begin`].
    pub fn new(i2c: I, address: impl Into<u8>, delay: D) -> Self {
        Self {
            i2c,
            address: address.into(),
            delay,
            scale_factor: None,
            state: PhantomData::<IdleState>,
        }
    }

    /// Check that an `SDP31` or `SDP32` answers at the configured address.
    ///
    /// On success the product specific scale factor is remembered and used for frames
    /// without one.
    pub fn begin(&mut self) -> Result<ProductVariant, SdpError<I>> {
        let id = self.read_product_id()?;
        match id.variant() {
            ProductVariant::Unknown(number) => {
                log::warn!("unknown product number {:#010x}", number);
                Err(SdpError::UnknownVariant(number))
            }
            variant => {
                log::info!(
                    "found {:?} with serial number {:#018x}",
                    variant,
                    id.serial_number
                );
                self.scale_factor = variant.get_default_conversion_factor();
                Ok(variant)
            }
        }
    }

    /// Return the product id of the `SDP3x`
    pub fn read_product_id(&mut self) -> Result<ProductIdentifier, SdpError<I>> {
        let mut buf = [0; PRODUCT_ID_FRAME_SIZE];
        // Request product id
        self.send_command(Command::ReadProductId0)?;
        self.send_command(Command::ReadProductId1)?;

        self.i2c
            .read(self.address, &mut buf)
            .map_err(SdpError::I2cRead)?;

        Ok(ProductIdentifier::try_from(buf)?)
    }

    /// Return the product number of a recognized sensor.
    ///
    /// Any failure, including an unknown product number, yields `0`.
    pub fn read_product_number(&mut self) -> u32 {
        match self.read_product_id() {
            Ok(id) => id.variant().product_number(),
            Err(e) => {
                log::warn!("could not read product id: {}", e);
                0
            }
        }
    }

    /// Reset all devices on the bus which support the general call reset.
    /// This function blocks for at least 20 milliseconds.
    pub fn soft_reset(&mut self) -> Result<(), SdpError<I>> {
        log::debug!("general call reset");
        self.i2c
            .write(GENERAL_CALL_ADDRESS, &[GENERAL_CALL_RESET])
            .map_err(SdpError::I2cWrite)?;
        self.delay.delay_ms(SOFT_RESET_TIME_MS);
        Ok(())
    }

    /// Trigger a single measurement and read the result.
    ///
    /// Without clock stretching this function blocks for at least 45 milliseconds.
    /// With clock stretching it blocks until the sensor releases the bus.
    pub fn trigger_sample<T>(
        &mut self,
        clock_stretching: ClockStretching,
    ) -> Result<Sample<T>, SdpError<I>>
    where
        T: Measurement,
    {
        let mode = MeasurementMode::Triggered {
            quantity: T::QUANTITY,
            clock_stretching,
        };
        self.send_command(mode.into())?;
        if clock_stretching == ClockStretching::Disabled {
            self.delay.delay_ms(TRIGGERED_MEASUREMENT_TIME_MS);
        }
        self.read_sample()
    }

    /// Trigger a differential pressure read.
    pub fn trigger_differential_pressure_sample(
        &mut self,
        clock_stretching: ClockStretching,
    ) -> Result<Sample<DifferentialPressure>, SdpError<I>> {
        self.trigger_sample(clock_stretching)
    }

    /// Trigger a mass flow read.
    pub fn trigger_mass_flow_sample(
        &mut self,
        clock_stretching: ClockStretching,
    ) -> Result<Sample<MassFlow>, SdpError<I>> {
        self.trigger_sample(clock_stretching)
    }

    /// Start sampling in continuous mode
    pub fn start_sampling<T>(
        mut self,
        averaging: Averaging,
    ) -> Result<Sdp3x<I, D, ContinuousSamplingState<T>>, SdpError<I>>
    where
        T: Measurement,
    {
        let mode = MeasurementMode::Continuous {
            quantity: T::QUANTITY,
            averaging,
        };
        self.send_command(mode.into())?;
        Ok(self.into_state())
    }

    /// Start sampling differential pressure in continuous mode
    pub fn start_sampling_differential_pressure(
        self,
        averaging: Averaging,
    ) -> ToDifferentialPressureSampling<I, D> {
        self.start_sampling(averaging)
    }

    /// Start sampling mass flow in continuous mode
    pub fn start_sampling_mass_flow(self, averaging: Averaging) -> ToMassflowSampling<I, D> {
        self.start_sampling(averaging)
    }

    /// Enter the `SDP3x` sleep state.
    ///
    /// The sensor ignores all commands until woken up, which this driver does not do.
    pub fn go_to_sleep(mut self) -> ToSleep<I, D> {
        self.send_command(Command::EnterSleepMode)?;
        Ok(self.into_state::<SleepState>())
    }
}

impl<I, D, T> Sdp3x<I, D, ContinuousSamplingState<T>>
where
    I: I2c,
    D: DelayNs,
{
    /// Read a sample in continuous mode
    pub fn read_continuous_sample(&mut self) -> Result<Sample<T>, SdpError<I>> {
        // TODO rate limiting, the sensor updates every 0.5ms
        self.read_sample()
    }

    /// Stop sampling continuous mode
    pub fn stop_sampling(mut self) -> ToIdle<I, D> {
        self.send_command(Command::StopContinuousMeasurement)?;
        Ok(self.into_state::<IdleState>())
    }
}
