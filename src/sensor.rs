//! Generic single-quantity sensor interface and the two views an SHT4x provides through it.

use crate::{
    Clock, Error, Measurement, Sht4x, Transport, HUMIDITY_SENSOR_ID, TEMPERATURE_SENSOR_ID,
};

pub const SENSOR_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    AmbientTemperature,
    RelativeHumidity,
}

/// Static description of a sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorMetadata {
    pub name: &'static str,
    pub version: u32,
    pub sensor_id: u16,
    pub kind: SensorKind,
    /// Minimum time between readings in microseconds, 0 if readings are on demand.
    pub min_delay_us: u32,
    pub min_value: f32,
    pub max_value: f32,
    pub resolution: f32,
}

/// One reading of one quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    pub version: u32,
    pub sensor_id: u16,
    pub kind: SensorKind,
    pub timestamp_ms: u64,
    /// °C for temperature, %RH for humidity.
    pub value: f32,
}

pub trait Sensor {
    type Error;

    fn metadata(&self) -> SensorMetadata;

    fn reading(&mut self) -> Result<SensorEvent, Self::Error>;
}

pub const TEMPERATURE_METADATA: SensorMetadata = SensorMetadata {
    name: "SHT4x_T",
    version: SENSOR_VERSION,
    sensor_id: TEMPERATURE_SENSOR_ID,
    kind: SensorKind::AmbientTemperature,
    min_delay_us: 0,
    min_value: -40.0,
    max_value: 85.0,
    resolution: 0.3,
};

pub const HUMIDITY_METADATA: SensorMetadata = SensorMetadata {
    name: "SHT4x_H",
    version: SENSOR_VERSION,
    sensor_id: HUMIDITY_SENSOR_ID,
    kind: SensorKind::RelativeHumidity,
    min_delay_us: 0,
    min_value: 0.0,
    max_value: 100.0,
    resolution: 2.0,
};

impl Measurement {
    pub fn temperature_event(&self) -> SensorEvent {
        SensorEvent {
            version: SENSOR_VERSION,
            sensor_id: TEMPERATURE_SENSOR_ID,
            kind: SensorKind::AmbientTemperature,
            timestamp_ms: self.timestamp_ms,
            value: self.temperature,
        }
    }

    pub fn humidity_event(&self) -> SensorEvent {
        SensorEvent {
            version: SENSOR_VERSION,
            sensor_id: HUMIDITY_SENSOR_ID,
            kind: SensorKind::RelativeHumidity,
            timestamp_ms: self.timestamp_ms,
            value: self.humidity,
        }
    }
}

// Both views borrow the handle, so they can't outlive it or survive a `begin()` on it.
// Reading through one view measures both channels and discards the other half; to get a matched
// pair call `Sht4x::measure` directly.
macro_rules! sensor_view {
    ($name:ident, $doc:expr, $metadata:expr, $event:ident) => {
        #[doc = $doc]
        pub struct $name<'a, T, C> {
            device: &'a mut Sht4x<T, C>,
        }

        impl<'a, T, C> $name<'a, T, C> {
            pub(crate) fn new(device: &'a mut Sht4x<T, C>) -> Self {
                Self { device }
            }
        }

        impl<T: Transport, C: Clock> Sensor for $name<'_, T, C> {
            type Error = Error<T::Error>;

            fn metadata(&self) -> SensorMetadata {
                $metadata
            }

            fn reading(&mut self) -> Result<SensorEvent, Self::Error> {
                Ok(self.device.measure()?.$event())
            }
        }
    };
}

sensor_view!(
    TemperatureSensor,
    "Temperature view of an [`Sht4x`].",
    TEMPERATURE_METADATA,
    temperature_event
);

sensor_view!(
    HumiditySensor,
    "Humidity view of an [`Sht4x`].",
    HUMIDITY_METADATA,
    humidity_event
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::tests::{reply, sensor};
    use crate::transport::mock::MockError;

    #[test]
    fn test_metadata() {
        let mut sht = sensor(&[]);
        let meta = sht.temperature_sensor().metadata();
        assert_eq!(meta.name, "SHT4x_T");
        assert_eq!(meta.sensor_id, 0x0400);
        assert_eq!((meta.min_value, meta.max_value), (-40.0, 85.0));

        let meta = sht.humidity_sensor().metadata();
        assert_eq!(meta.name, "SHT4x_H");
        assert_eq!(meta.sensor_id, 0x0401);
        assert_eq!((meta.min_value, meta.max_value), (0.0, 100.0));
        assert_eq!(meta.kind, SensorKind::RelativeHumidity);
    }

    #[test]
    fn test_each_view_measures() {
        let mut sht = sensor(&[reply(0x6666, 0x6666), reply(0, 0xffff)]);
        sht.clock_mut().now = 100;

        let t = sht.temperature_sensor().reading().unwrap();
        assert_eq!(t.value, 25.0);
        assert_eq!(t.sensor_id, 0x0400);
        assert_eq!(t.kind, SensorKind::AmbientTemperature);
        assert_eq!(t.timestamp_ms, 100);

        let h = sht.humidity_sensor().reading().unwrap();
        assert_eq!(h.value, 100.0);
        assert_eq!(h.sensor_id, 0x0401);
        assert_eq!(h.timestamp_ms, 110);

        // two full cycles on the bus, not one
        let bus = sht.transport_mut().unwrap();
        assert!(bus.pop_write(&[0xfd]));
        assert!(bus.pop_write(&[0xfd]));
        assert_eq!(sht.last_measurement().temperature, -45.0);
    }

    #[test]
    fn test_view_error() {
        let mut sht = sensor(&[]);
        sht.transport_mut().unwrap().fail_reads = true;
        assert_eq!(
            sht.humidity_sensor().reading(),
            Err(Error::ReadFailed(MockError::Nack))
        );
    }

    #[test]
    fn test_events_from_one_measurement() {
        let m = Measurement {
            temperature: 21.5,
            humidity: 40.0,
            timestamp_ms: 7,
        };
        let (t, h) = (m.temperature_event(), m.humidity_event());
        assert_eq!(t.timestamp_ms, h.timestamp_ms);
        assert_eq!((t.value, h.value), (21.5, 40.0));
        assert_eq!(t.version, 1);
    }
}
