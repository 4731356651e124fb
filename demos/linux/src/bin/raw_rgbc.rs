//! Dump raw channel counts and the converted RGB color once per second.

use std::thread;
use std::time::Duration;

use linux_embedded_hal::{Delay, I2cdev};
use tcs34725::Tcs34725;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let i2c = I2cdev::new("/dev/i2c-1")?;
    let mut sensor = Tcs34725::new(i2c, Delay);

    loop {
        match sensor.sample() {
            Ok(raw) => {
                print!(
                    "r={:5} g={:5} b={:5} c={:5}",
                    raw.red, raw.green, raw.blue, raw.clear
                );
                match raw.to_color() {
                    Some(color) => println!("  -> #{:02X}{:02X}{:02X}", color.r, color.g, color.b),
                    None => println!("  -> clear channel is zero, no conversion"),
                }
            }
            Err(e) => eprintln!("sampling failed: {e:?}"),
        }
        thread::sleep(Duration::from_secs(1));
    }
}
