//! I2C commands for the SDP3x differential pressure sensor

use core::convert::From;

/// Address of the I2C general call, used for the soft reset.
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;

/// Second byte of the general call reset.
pub const GENERAL_CALL_RESET: u8 = 0x06;

/// I2C commands sent to the sensor.
/// The general call reset is not addressed to the sensor and is sent separately.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Command {
    /// Trigger Mass Flow Reading with no clock stretching
    TriggerMassFlowRead,
    /// Trigger Mass Flow Reading with clock stretching
    TriggerMassFlowReadSync,
    /// Trigger Differential Pressure Reading with no clock stretching
    TriggerDifferentialPressureRead,
    /// Trigger Differential Pressure Reading with clock stretching
    TriggerDifferentialPressureReadSync,
    /// Continuous Mass Flow Sampling with Average till read
    SampleMassFlowAveraging,
    /// Continuous Mass Flow Sampling with no averaging
    SampleMassFlowRaw,
    /// Continuous Differential Pressure Sampling with Average till read
    SampleDifferentialPressureAveraging,
    /// Continuous Differential Pressure Sampling with no averaging
    SampleDifferentialPressureRaw,
    /// Stop continuous measurement
    StopContinuousMeasurement,
    /// Enter sleep mode
    EnterSleepMode,
    /// Read product identifier, first part
    ReadProductId0,
    /// Read product identifier, second part
    ReadProductId1,
}

impl From<Command> for u16 {
    fn from(val: Command) -> Self {
        match val {
            Command::TriggerMassFlowRead => 0x3624,
            Command::TriggerMassFlowReadSync => 0x3726,
            Command::TriggerDifferentialPressureRead => 0x362F,
            Command::TriggerDifferentialPressureReadSync => 0x372D,
            Command::SampleMassFlowAveraging => 0x3603,
            Command::SampleMassFlowRaw => 0x3608,
            Command::SampleDifferentialPressureAveraging => 0x3615,
            Command::SampleDifferentialPressureRaw => 0x361E,
            Command::StopContinuousMeasurement => 0x3FF9,
            Command::EnterSleepMode => 0x3677,
            Command::ReadProductId0 => 0x367C,
            Command::ReadProductId1 => 0xE102,
        }
    }
}

impl From<Command> for [u8; 2] {
    fn from(val: Command) -> Self {
        u16::from(val).to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order() {
        let bytes: [u8; 2] = Command::StopContinuousMeasurement.into();
        assert_eq!(bytes, [0x3F, 0xF9]);
        let bytes: [u8; 2] = Command::ReadProductId1.into();
        assert_eq!(bytes, [0xE1, 0x02]);
    }

    #[test]
    fn fixed_codes() {
        assert_eq!(u16::from(Command::EnterSleepMode), 0x3677);
        assert_eq!(u16::from(Command::ReadProductId0), 0x367C);
    }
}
