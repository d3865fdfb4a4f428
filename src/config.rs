//! Addressing and measurement mode configuration

use crate::command::Command;

/// I2C address of the sensor, selected by hardware strapping.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum Address {
    /// Factory default, 0x21
    #[default]
    Default,
    /// Alternative address 0x22
    Alternate1,
    /// Alternative address 0x23
    Alternate2,
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        match address {
            Address::Default => 0x21,
            Address::Alternate1 => 0x22,
            Address::Alternate2 => 0x23,
        }
    }
}

/// Physical quantity the sensor compensates its output for.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Quantity {
    /// Temperature compensation for mass flow
    MassFlow,
    /// Temperature compensation for differential pressure
    DifferentialPressure,
}

/// Averaging in continuous mode.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum Averaging {
    /// Each read returns the latest sample
    #[default]
    None,
    /// Each read returns the average of all samples since the previous read
    TillRead,
}

/// Clock stretching in triggered mode.
///
/// With clock stretching the sensor holds SCL low until the conversion is done, so the bus
/// implementation must tolerate long stretches.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum ClockStretching {
    /// Poll for the result after the conversion time
    #[default]
    Disabled,
    /// Read immediately and let the sensor stretch the clock
    Enabled,
}

/// A complete measurement configuration, each of which corresponds to exactly one command.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MeasurementMode {
    /// Continuous measurement
    Continuous {
        /// Compensation
        quantity: Quantity,
        /// Averaging
        averaging: Averaging,
    },
    /// Single triggered measurement
    Triggered {
        /// Compensation
        quantity: Quantity,
        /// Clock stretching
        clock_stretching: ClockStretching,
    },
}

impl From<MeasurementMode> for Command {
    fn from(mode: MeasurementMode) -> Self {
        use self::{Averaging as A, ClockStretching as C, Quantity as Q};
        match mode {
            MeasurementMode::Continuous {
                quantity,
                averaging,
            } => match (quantity, averaging) {
                (Q::MassFlow, A::TillRead) => Command::SampleMassFlowAveraging,
                (Q::MassFlow, A::None) => Command::SampleMassFlowRaw,
                (Q::DifferentialPressure, A::TillRead) => {
                    Command::SampleDifferentialPressureAveraging
                }
                (Q::DifferentialPressure, A::None) => Command::SampleDifferentialPressureRaw,
            },
            MeasurementMode::Triggered {
                quantity,
                clock_stretching,
            } => match (quantity, clock_stretching) {
                (Q::MassFlow, C::Disabled) => Command::TriggerMassFlowRead,
                (Q::MassFlow, C::Enabled) => Command::TriggerMassFlowReadSync,
                (Q::DifferentialPressure, C::Disabled) => Command::TriggerDifferentialPressureRead,
                (Q::DifferentialPressure, C::Enabled) => {
                    Command::TriggerDifferentialPressureReadSync
                }
            },
        }
    }
}
