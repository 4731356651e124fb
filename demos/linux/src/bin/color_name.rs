//! Poll the sensor once per second and print the nearest named color.
//!
//! This is the typical host loop: the driver initializes itself on the
//! first call, and a failed cycle is skipped so the next tick can retry.

use std::thread;
use std::time::Duration;

use linux_embedded_hal::{Delay, I2cdev};
use tcs34725::Tcs34725;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Tcs34725::new(i2c, Delay);

    loop {
        match sensor.color_name() {
            Ok(name) => println!("color name: {name}"),
            Err(e) => eprintln!("sampling failed, retrying next tick: {e:?}"),
        }
        thread::sleep(Duration::from_secs(1));
    }
}
