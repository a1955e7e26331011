//! Driver for the Sensirion SHT4x family of temperature and humidity sensors.
//!
//! ```no_run
//! # fn run<B: i2c::BulkTransfer>(bus: B) -> Result<(), sht4x_i2c::Error<B::Error>> {
//! use sht4x_i2c::{I2cDevice, Precision, Sht4x};
//!
//! let mut sht = Sht4x::new();
//! sht.begin(I2cDevice::new(bus))?;
//! sht.set_precision(Precision::Medium);
//! let m = sht.measure()?;
//! println!("{:.2}°C {:.2}%RH", m.temperature, m.humidity);
//! # Ok(())
//! # }
//! ```

mod clock;
mod device;
mod error;
mod i2c_impl;
mod protocol;
mod sensor;
mod transport;

pub use clock::{Clock, StdClock};
pub use device::*;
pub use error::*;
pub use i2c_impl::*;
pub use protocol::{
    checksum8, decode_reply, select_command, ticks_to_celsius, ticks_to_humidity, Heater,
    Precision, ALT_ADDRESS_B, ALT_ADDRESS_C, CRC_8_SENSIRION, DEFAULT_ADDRESS, REPLY_LEN,
};
pub use sensor::*;
pub use transport::Transport;
