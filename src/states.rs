//! State types for the SDP3x

use core::marker::PhantomData;

use crate::{DifferentialPressure, MassFlow, Sdp3x, SdpError};

/// Default idle state of the SDP3x
#[derive(Debug)]
pub struct IdleState;

/// Continuous sampling state of the SDP3x
#[derive(Debug)]
pub struct ContinuousSamplingState<MeasurementType> {
    data_type: PhantomData<MeasurementType>,
}

/// Sleep state of the SDP3x.
/// The wake up sequence is up to the owner of the bus, see [`Sdp3x::release`].
#[derive(Debug)]
pub struct SleepState;

/// Transition from Idle to Mass Flow Sampling
pub type ToMassflowSampling<I2C, D> =
    Result<Sdp3x<I2C, D, ContinuousSamplingState<MassFlow>>, SdpError<I2C>>;

/// Transition from Idle to Differential Pressure Sampling
pub type ToDifferentialPressureSampling<I2C, D> =
    Result<Sdp3x<I2C, D, ContinuousSamplingState<DifferentialPressure>>, SdpError<I2C>>;

/// Transition from Continuous Sampling to Idle
pub type ToIdle<I2C, D> = Result<Sdp3x<I2C, D, IdleState>, SdpError<I2C>>;

/// Transition from Idle to Sleep state
pub type ToSleep<I2C, D> = Result<Sdp3x<I2C, D, SleepState>, SdpError<I2C>>;
