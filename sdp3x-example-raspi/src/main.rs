use linux_embedded_hal::{Delay, I2cdev};
use log::{error, info};
use sdp3x::{Address, Averaging, ClockStretching, Sdp3x};

fn main() {
    env_logger::init();

    let dev = match I2cdev::new("/dev/i2c-1") {
        Ok(dev) => dev,
        Err(e) => {
            error!("Could not open /dev/i2c-1: {e}");
            return;
        }
    };
    let mut sdp = Sdp3x::new(dev, Address::Default, Delay);

    info!("Starting Sdp3x tests.");

    match sdp.begin() {
        Ok(variant) => info!("Found {:?}", variant),
        Err(e) => {
            error!("No SDP31 or SDP32 found: {e}");
            return;
        }
    }

    info!("Taking 10 triggered samples");
    for _ in 0..10 {
        match sdp.trigger_differential_pressure_sample(ClockStretching::Disabled) {
            Ok(m) => info!("{:?}", m),
            Err(e) => error!("{e}"),
        }
    }

    let mut sdp_sampling = match sdp.start_sampling_differential_pressure(Averaging::TillRead) {
        Ok(s) => s,
        Err(e) => {
            error!("Could not start sampling: {e}");
            return;
        }
    };
    // First result is available 8ms after starting
    std::thread::sleep(std::time::Duration::from_millis(10));
    info!("Starting to take all the samples");

    for _ in 0..50 {
        match sdp_sampling.read_continuous_sample() {
            Ok(r) => info!("{:?}", r),
            Err(e) => error!("Error while getting result: {e}"),
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    let mut idle_sensor = match sdp_sampling.stop_sampling() {
        Ok(s) => s,
        Err(e) => {
            error!("Couldn't stop sampling: {e}");
            return;
        }
    };

    match idle_sensor.trigger_mass_flow_sample(ClockStretching::Enabled) {
        Ok(m) => info!("{:?}", m),
        Err(e) => error!("{e}"),
    }

    info!("Going to sleep!");
    if let Err(e) = idle_sensor.go_to_sleep() {
        error!("Could not go to sleep: {e}");
    }
}
