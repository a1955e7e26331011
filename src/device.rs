use std::time::Duration;

use crate::protocol::{self, *};
use crate::{
    Clock, Error, Heater, HumiditySensor, Precision, Result, StdClock, TemperatureSensor,
    Transport,
};

pub const TEMPERATURE_SENSOR_ID: u16 = 0x0400;
pub const HUMIDITY_SENSOR_ID: u16 = 0x0401;

/// Ids of the two logical sensors a single SHT4x provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIds {
    pub temperature: u16,
    pub humidity: u16,
}

const DEVICE_IDS: DeviceIds = DeviceIds {
    temperature: TEMPERATURE_SENSOR_ID,
    humidity: HUMIDITY_SENSOR_ID,
};

/// Result of one measurement cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Degrees Celsius, not clamped.
    pub temperature: f32,
    /// Percent relative humidity in 0..=100.
    pub humidity: f32,
    /// Clock time at which the cycle started.
    pub timestamp_ms: u64,
}

/// Driver for one SHT4x sensor.
///
/// The handle is unbound until [`Sht4x::begin`] succeeds. Every bus operation blocks the calling
/// thread, including the wait between a measurement command and its reply (up to 1.1 s when a
/// heater setting is active). A command/wait/read cycle is not atomic, so sharing the transport
/// with other users requires external serialization.
pub struct Sht4x<T, C = StdClock> {
    transport: Option<T>,
    clock: C,
    precision: Precision,
    heater: Heater,
    last: Measurement,
}

impl<T> Sht4x<T, StdClock> {
    pub fn new() -> Self {
        Self::with_clock(StdClock::new())
    }
}

impl<T> Default for Sht4x<T, StdClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Sht4x<T, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            transport: None,
            clock,
            precision: Precision::default(),
            heater: Heater::default(),
            last: Measurement::default(),
        }
    }

    /// Unbinds and returns the transport. The handle has to be re-initialized before further use.
    pub fn release(&mut self) -> Option<T> {
        self.transport.take()
    }

    pub fn is_initialized(&self) -> bool {
        self.transport.is_some()
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    pub fn transport_mut(&mut self) -> Option<&mut T> {
        self.transport.as_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn ids(&self) -> DeviceIds {
        DEVICE_IDS
    }

    /// Takes effect on the next measurement.
    pub fn set_precision(&mut self, precision: Precision) {
        self.precision = precision;
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Takes effect on the next measurement. Any heater setting other than `Heater::None`
    /// overrides the precision.
    pub fn set_heater(&mut self, heater: Heater) {
        self.heater = heater;
    }

    pub fn heater(&self) -> Heater {
        self.heater
    }

    /// Last known good measurement, zeroed before the first successful one. This never touches
    /// the bus, so the value may be arbitrarily old; check `timestamp_ms`.
    pub fn last_measurement(&self) -> Measurement {
        self.last
    }
}

impl<T: Transport, C: Clock> Sht4x<T, C> {
    /// Binds `transport` and soft-resets the sensor. A previously bound transport is dropped
    /// first. On failure the handle is left unbound.
    pub fn begin(&mut self, transport: T) -> Result<(), T::Error> {
        self.transport = Some(transport);
        if let Err(e) = self.reset() {
            self.transport = None;
            return Err(e);
        }
        log::debug!("sht4x initialized");
        Ok(())
    }

    /// The sensor doesn't reply to a reset, it only needs a moment before the next command.
    pub fn reset(&mut self) -> Result<(), T::Error> {
        self.send(CMD_SOFT_RESET, RESET_DELAY)
    }

    pub fn read_serial(&mut self) -> Result<u32, T::Error> {
        let reply = self.fetch(CMD_READ_SERIAL, SERIAL_DELAY)?;
        let [high, low] = protocol::decode_reply(&reply)?;
        Ok((u32::from(high) << 16) | u32::from(low))
    }

    /// Runs one full measurement cycle of both channels with the current settings.
    ///
    /// On error the cached measurement is left untouched.
    pub fn measure(&mut self) -> Result<Measurement, T::Error> {
        let timestamp_ms = self.clock.now_ms();
        let (command, wait) = protocol::select_command(self.precision, self.heater);
        let reply = self.fetch(command, wait)?;
        let [t_ticks, rh_ticks] = protocol::decode_reply(&reply)?;

        let measurement = Measurement {
            temperature: protocol::ticks_to_celsius(t_ticks),
            humidity: protocol::ticks_to_humidity(rh_ticks),
            timestamp_ms,
        };
        log::debug!(
            "measured {:.2}°C, {:.2}%RH",
            measurement.temperature,
            measurement.humidity
        );
        self.last = measurement;
        Ok(measurement)
    }

    /// Temperature-only view. Each reading runs a full measurement.
    pub fn temperature_sensor(&mut self) -> TemperatureSensor<'_, T, C> {
        TemperatureSensor::new(self)
    }

    /// Humidity-only view. Each reading runs a full measurement.
    pub fn humidity_sensor(&mut self) -> HumiditySensor<'_, T, C> {
        HumiditySensor::new(self)
    }

    fn send(&mut self, command: u8, wait: Duration) -> Result<(), T::Error> {
        let transport = self.transport.as_mut().ok_or(Error::NotInitialized)?;
        log::debug!("command {command:#04x}, waiting {wait:?}");
        transport.write(&[command]).map_err(Error::WriteFailed)?;
        self.clock.delay(wait);
        Ok(())
    }

    fn fetch(&mut self, command: u8, wait: Duration) -> Result<[u8; REPLY_LEN], T::Error> {
        self.send(command, wait)?;
        let transport = self.transport.as_mut().ok_or(Error::NotInitialized)?;
        let mut reply = [0u8; REPLY_LEN];
        transport.read(&mut reply).map_err(Error::ReadFailed)?;
        Ok(reply)
    }
}
