use crate::{protocol::DEFAULT_ADDRESS, Transport};
use i2c::{Message, ReadFlags, WriteFlags};

/// A sensor at a fixed 7-bit address on a bus implementing `i2c::BulkTransfer`.
///
/// Every operation is issued as one bulk transfer, so a `write_read` keeps the bus between the
/// two messages (repeated start) instead of releasing it.
pub struct I2cDevice<B> {
    bus: B,
    address: u16,
}

impl<B> I2cDevice<B> {
    /// Binds to the default SHT4x address 0x44.
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, DEFAULT_ADDRESS)
    }

    pub fn with_address(bus: B, address: u16) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: i2c::BulkTransfer> Transport for I2cDevice<B> {
    type Error = B::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        self.bus.i2c_transfer(&mut [Message::Write {
            address: self.address,
            data: bytes,
            flags: WriteFlags::empty(),
        }])
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), B::Error> {
        self.bus.i2c_transfer(&mut [Message::Read {
            address: self.address,
            data: buf,
            flags: ReadFlags::empty(),
        }])
    }

    fn write_read(&mut self, bytes: &[u8], buf: &mut [u8]) -> Result<(), B::Error> {
        self.bus.i2c_transfer(&mut [
            Message::Write {
                address: self.address,
                data: bytes,
                flags: WriteFlags::empty(),
            },
            Message::Read {
                address: self.address,
                data: buf,
                flags: ReadFlags::empty(),
            },
        ])
    }
}
