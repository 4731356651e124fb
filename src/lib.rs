//! # TCS34725 RGBC Color Sensor Driver
//!
//! This is a platform-agnostic Rust driver for the TCS34725 RGBC color
//! sensor, built using the [`embedded-hal`] traits for I2C communication.
//!
//! The TCS34725 provides red, green, blue and clear (unfiltered) light
//! measurements behind an I2C register interface with command-bit framing.
//! On top of the raw channels this crate offers:
//!
//! - **Lazy, idempotent bring-up**: the power-on/ADC-enable/integration
//!   time/gain sequence runs exactly once, on the first operation that
//!   needs it, and is retried on the next call if any step fails
//! - **Clear-relative color conversion** into an opaque 8-bit RGB triple
//! - **Nearest-color classification** against a built-in table of 140
//!   named reference colors, or any caller-supplied [`ColorTable`]
//! - **Async/await support** with feature gating (optional)
//!
//! The driver is synchronous from the caller's perspective and performs no
//! background polling; the sampling cadence is the caller's business.
//! Exclusive `&mut self` access serializes bus transactions, so at most one
//! is ever in flight. For a shared bus, wrap the I2C handle with a mutex
//! adapter (e.g. from `embedded-hal-bus`) before handing it to the driver.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tcs34725::Tcs34725;
//!
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! # let delay = embedded_hal_mock::eh1::delay::NoopDelay::new();
//! let mut sensor = Tcs34725::new(i2c, delay);
//!
//! // Bring-up happens implicitly on first use; raw counts come back as
//! // four 16-bit channels read in red, green, blue, clear order.
//! let raw = sensor.sample().unwrap();
//!
//! // Or go straight to a named color.
//! let name = sensor.color_name().unwrap();
//! ```
//!
//! ## Async Usage
//!
//! Enable the `async` feature to use async/await patterns:
//!
//! ```toml
//! [dependencies]
//! tcs34725 = { version = "0.1", features = ["async"] }
//! ```
//!
//! The async API mirrors the blocking one with `_async` suffixes
//! ([`Tcs34725::sample_async`], [`Tcs34725::color_name_async`], ...).
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

#![no_std]
#![deny(missing_docs)]

mod classify;
mod color;

pub use classify::{ColorTable, NAMED_COLORS};
pub use color::{Color, RawRgbc};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Default I2C address of the TCS34725
pub const I2C_ADDRESS: u8 = 0x29;

// Register addresses
const ENABLE: u8 = 0x00;
const ATIME: u8 = 0x01;
const CONTROL: u8 = 0x0F;
const CDATAL: u8 = 0x14;
const RDATAL: u8 = 0x16;
const GDATAL: u8 = 0x18;
const BDATAL: u8 = 0x1A;

// Command bit, OR-ed into every register address placed on the wire
const COMMAND_BIT: u8 = 0x80;

// ENABLE register bits
const ENABLE_PON: u8 = 0x01; // internal oscillator on
const ENABLE_AEN: u8 = 0x02; // RGBC ADC enable

// Fixed acquisition configuration: longest integration window, highest gain
const INTEGRATION_TIME_700MS: u8 = 0x00;
const GAIN_60X: u8 = 0x03;

// Oscillator settle time after power-on, in milliseconds
const SETTLE_MS: u32 = 3;

/// All possible errors in this crate
#[derive(Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C transaction failed; propagated unchanged from the bus
    Bus(E),
    /// A bring-up step failed; wraps the underlying bus error. The driver
    /// stays uninitialized so the next call retries the full sequence.
    Init(E),
    /// The clear channel read zero, leaving the color conversion undefined
    ClearChannelZero,
}

/// Bring-up progress of the driver instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitState {
    Uninitialized,
    Initializing,
    Ready,
}

/// High-level TCS34725 driver
pub struct Tcs34725<I2C, Delay> {
    i2c: I2C,
    delay: Delay,
    address: u8,
    state: InitState,
}

impl<I2C, Delay> Tcs34725<I2C, Delay> {
    /// Create a driver using the default device address (0x29).
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self::new_with_address(i2c, delay, I2C_ADDRESS)
    }

    /// Create a driver addressing a device at a non-default 7-bit address.
    pub fn new_with_address(i2c: I2C, delay: Delay, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            state: InitState::Uninitialized,
        }
    }

    /// The 7-bit device address this driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Whether the one-time bring-up sequence has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.state == InitState::Ready
    }

    /// Destroy the driver and return the I2C interface
    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E, Delay> Tcs34725<I2C, Delay>
where
    I2C: I2c<Error = E>,
    Delay: DelayNs,
{
    /// Run the one-time bring-up sequence if it has not completed yet.
    ///
    /// Safe to call before every operation; after the first success it is a
    /// no-op. The sequence is: power on the oscillator, wait 3 ms, enable
    /// the RGBC ADC, set the integration time (700 ms) and the analog gain
    /// (60x). If any step fails the driver returns to the uninitialized
    /// state and the next call replays the whole sequence.
    pub fn ensure_initialized(&mut self) -> Result<(), Error<E>> {
        if self.state == InitState::Ready {
            return Ok(());
        }
        self.state = InitState::Initializing;
        match self.bring_up() {
            Ok(()) => {
                self.state = InitState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = InitState::Uninitialized;
                Err(Error::Init(e))
            }
        }
    }

    fn bring_up(&mut self) -> Result<(), E> {
        self.raw_write(ENABLE, ENABLE_PON)?;
        self.delay.delay_ms(SETTLE_MS);
        self.raw_write(ENABLE, ENABLE_PON | ENABLE_AEN)?;
        self.raw_write(ATIME, INTEGRATION_TIME_700MS)?;
        self.raw_write(CONTROL, GAIN_60X)
    }

    /// Read the four raw channels as one logical sample.
    ///
    /// Initializes the device first if needed. The channels are read as
    /// four 16-bit transactions in fixed order: red, green, blue, clear.
    /// Every call hits the bus; nothing is cached.
    pub fn sample(&mut self) -> Result<RawRgbc, Error<E>> {
        self.ensure_initialized()?;
        let red = self.raw_read16(RDATAL).map_err(Error::Bus)?;
        let green = self.raw_read16(GDATAL).map_err(Error::Bus)?;
        let blue = self.raw_read16(BDATAL).map_err(Error::Bus)?;
        let clear = self.raw_read16(CDATAL).map_err(Error::Bus)?;
        Ok(RawRgbc {
            red,
            green,
            blue,
            clear,
        })
    }

    /// Sample the sensor and convert to a clear-relative RGB color.
    ///
    /// Returns [`Error::ClearChannelZero`] when the clear channel reads
    /// zero, since the normalization is undefined in that case.
    pub fn color(&mut self) -> Result<Color, Error<E>> {
        self.sample()?.to_color().ok_or(Error::ClearChannelZero)
    }

    /// Sample the sensor and name the nearest color in the built-in
    /// [`NAMED_COLORS`] reference table.
    pub fn color_name(&mut self) -> Result<&'static str, Error<E>> {
        Ok(ColorTable::named().classify(self.color()?))
    }

    /// Write an 8-bit register. Command-bit framing is applied.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.raw_write(register, value).map_err(Error::Bus)
    }

    /// Read an 8-bit register. Command-bit framing is applied.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<E>> {
        self.raw_read8(register).map_err(Error::Bus)
    }

    /// Read a 16-bit register pair, low byte first on the wire.
    /// Command-bit framing is applied.
    pub fn read_register_u16(&mut self, register: u8) -> Result<u16, Error<E>> {
        self.raw_read16(register).map_err(Error::Bus)
    }

    // Helper methods for register access
    fn raw_write(&mut self, register: u8, value: u8) -> Result<(), E> {
        self.i2c
            .write(self.address, &[register | COMMAND_BIT, value])
    }

    fn raw_read8(&mut self, register: u8) -> Result<u8, E> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register | COMMAND_BIT], &mut buffer)?;
        Ok(buffer[0])
    }

    fn raw_read16(&mut self, register: u8) -> Result<u16, E> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register | COMMAND_BIT], &mut buffer)?;
        Ok(u16::from_le_bytes(buffer))
    }
}

#[cfg(feature = "async")]
impl<I2C, E, Delay> Tcs34725<I2C, Delay>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
    Delay: embedded_hal_async::delay::DelayNs,
{
    /// Run the one-time bring-up sequence if it has not completed yet
    /// (async version). See [`Tcs34725::ensure_initialized`].
    pub async fn ensure_initialized_async(&mut self) -> Result<(), Error<E>> {
        if self.state == InitState::Ready {
            return Ok(());
        }
        self.state = InitState::Initializing;
        match self.bring_up_async().await {
            Ok(()) => {
                self.state = InitState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = InitState::Uninitialized;
                Err(Error::Init(e))
            }
        }
    }

    async fn bring_up_async(&mut self) -> Result<(), E> {
        self.raw_write_async(ENABLE, ENABLE_PON).await?;
        self.delay.delay_ms(SETTLE_MS).await;
        self.raw_write_async(ENABLE, ENABLE_PON | ENABLE_AEN).await?;
        self.raw_write_async(ATIME, INTEGRATION_TIME_700MS).await?;
        self.raw_write_async(CONTROL, GAIN_60X).await
    }

    /// Read the four raw channels as one logical sample (async version).
    /// See [`Tcs34725::sample`].
    pub async fn sample_async(&mut self) -> Result<RawRgbc, Error<E>> {
        self.ensure_initialized_async().await?;
        let red = self.raw_read16_async(RDATAL).await.map_err(Error::Bus)?;
        let green = self.raw_read16_async(GDATAL).await.map_err(Error::Bus)?;
        let blue = self.raw_read16_async(BDATAL).await.map_err(Error::Bus)?;
        let clear = self.raw_read16_async(CDATAL).await.map_err(Error::Bus)?;
        Ok(RawRgbc {
            red,
            green,
            blue,
            clear,
        })
    }

    /// Sample the sensor and convert to a clear-relative RGB color
    /// (async version). See [`Tcs34725::color`].
    pub async fn color_async(&mut self) -> Result<Color, Error<E>> {
        self.sample_async()
            .await?
            .to_color()
            .ok_or(Error::ClearChannelZero)
    }

    /// Sample the sensor and name the nearest built-in reference color
    /// (async version). See [`Tcs34725::color_name`].
    pub async fn color_name_async(&mut self) -> Result<&'static str, Error<E>> {
        Ok(ColorTable::named().classify(self.color_async().await?))
    }

    /// Write an 8-bit register (async version). Command-bit framing is
    /// applied.
    pub async fn write_register_async(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.raw_write_async(register, value)
            .await
            .map_err(Error::Bus)
    }

    /// Read an 8-bit register (async version). Command-bit framing is
    /// applied.
    pub async fn read_register_async(&mut self, register: u8) -> Result<u8, Error<E>> {
        self.raw_read8_async(register).await.map_err(Error::Bus)
    }

    /// Read a 16-bit register pair, low byte first on the wire (async
    /// version). Command-bit framing is applied.
    pub async fn read_register_u16_async(&mut self, register: u8) -> Result<u16, Error<E>> {
        self.raw_read16_async(register).await.map_err(Error::Bus)
    }

    // Helper methods for async register access
    async fn raw_write_async(&mut self, register: u8, value: u8) -> Result<(), E> {
        self.i2c
            .write(self.address, &[register | COMMAND_BIT, value])
            .await
    }

    async fn raw_read8_async(&mut self, register: u8) -> Result<u8, E> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register | COMMAND_BIT], &mut buffer)
            .await?;
        Ok(buffer[0])
    }

    async fn raw_read16_async(&mut self, register: u8) -> Result<u16, E> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register | COMMAND_BIT], &mut buffer)
            .await?;
        Ok(u16::from_le_bytes(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    extern crate std;
    use std::vec;
    use std::vec::Vec;

    // The bring-up sequence as seen on the wire (the settle delay is not a
    // bus transaction).
    fn bring_up_transactions(address: u8) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(address, vec![0x80, 0x01]),
            I2cTransaction::write(address, vec![0x80, 0x03]),
            I2cTransaction::write(address, vec![0x81, 0x00]),
            I2cTransaction::write(address, vec![0x8F, 0x03]),
        ]
    }

    fn sample_transactions(address: u8, raw: RawRgbc) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write_read(address, vec![0x96], raw.red.to_le_bytes().to_vec()),
            I2cTransaction::write_read(address, vec![0x98], raw.green.to_le_bytes().to_vec()),
            I2cTransaction::write_read(address, vec![0x9A], raw.blue.to_le_bytes().to_vec()),
            I2cTransaction::write_read(address, vec![0x94], raw.clear.to_le_bytes().to_vec()),
        ]
    }

    #[test]
    fn bring_up_runs_exactly_once() {
        let i2c = I2cMock::new(&bring_up_transactions(I2C_ADDRESS));
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert!(!sensor.is_initialized());
        sensor.ensure_initialized().unwrap();
        assert!(sensor.is_initialized());
        // Second call must not touch the bus.
        sensor.ensure_initialized().unwrap();

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn failed_bring_up_step_allows_full_retry() {
        // Third write (ATIME) fails; the retry replays the whole sequence.
        let mut expectations = vec![
            I2cTransaction::write(I2C_ADDRESS, vec![0x80, 0x01]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x80, 0x03]),
            I2cTransaction::write(I2C_ADDRESS, vec![0x81, 0x00]).with_error(ErrorKind::Other),
        ];
        expectations.extend(bring_up_transactions(I2C_ADDRESS));
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert!(matches!(sensor.ensure_initialized(), Err(Error::Init(_))));
        assert!(!sensor.is_initialized());

        sensor.ensure_initialized().unwrap();
        assert!(sensor.is_initialized());

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn failure_on_first_step_stays_uninitialized() {
        let expectations =
            [I2cTransaction::write(I2C_ADDRESS, vec![0x80, 0x01]).with_error(ErrorKind::Other)];
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert!(matches!(sensor.ensure_initialized(), Err(Error::Init(_))));
        assert!(!sensor.is_initialized());

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn sample_frames_addresses_and_assembles_little_endian() {
        // Red 500 comes back as [0xF4, 0x01] behind framed address 0x96.
        let raw = RawRgbc {
            red: 500,
            green: 300,
            blue: 200,
            clear: 1000,
        };
        let mut expectations = bring_up_transactions(I2C_ADDRESS);
        expectations.extend(sample_transactions(I2C_ADDRESS, raw));
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert_eq!(sensor.sample().unwrap(), raw);

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn read_register_applies_command_bit() {
        let expectations = [I2cTransaction::write_read(
            I2C_ADDRESS,
            vec![0x80],
            vec![0x03],
        )];
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert_eq!(sensor.read_register(ENABLE).unwrap(), 0x03);

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn bus_error_during_sample_propagates_unchanged() {
        let mut expectations = bring_up_transactions(I2C_ADDRESS);
        expectations.push(
            I2cTransaction::write_read(I2C_ADDRESS, vec![0x96], vec![0x00, 0x00])
                .with_error(ErrorKind::Other),
        );
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert!(matches!(sensor.sample(), Err(Error::Bus(_))));
        // Initialization survives a later bus failure.
        assert!(sensor.is_initialized());

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn non_default_address_is_used_on_the_wire() {
        let address = 0x39;
        let i2c = I2cMock::new(&bring_up_transactions(address));
        let mut sensor = Tcs34725::new_with_address(i2c, NoopDelay::new(), address);

        assert_eq!(sensor.address(), address);
        sensor.ensure_initialized().unwrap();

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn zero_clear_surfaces_as_conversion_error() {
        let raw = RawRgbc {
            red: 10,
            green: 10,
            blue: 10,
            clear: 0,
        };
        let mut expectations = bring_up_transactions(I2C_ADDRESS);
        expectations.extend(sample_transactions(I2C_ADDRESS, raw));
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        assert!(matches!(sensor.color(), Err(Error::ClearChannelZero)));

        let mut i2c = sensor.destroy();
        i2c.done();
    }

    #[test]
    fn end_to_end_sample_convert_classify() {
        let raw = RawRgbc {
            red: 500,
            green: 300,
            blue: 200,
            clear: 1000,
        };
        let mut expectations = bring_up_transactions(I2C_ADDRESS);
        expectations.extend(sample_transactions(I2C_ADDRESS, raw));
        let i2c = I2cMock::new(&expectations);
        let mut sensor = Tcs34725::new(i2c, NoopDelay::new());

        let color = sensor.color().unwrap();
        assert_eq!(color, Color::rgb(128, 77, 51));

        let entries = [("TestGrey", Color::rgb(128, 77, 51))];
        let table = ColorTable::new(&entries);
        assert_eq!(table.classify(color), "TestGrey");

        let mut i2c = sensor.destroy();
        i2c.done();
    }
}
