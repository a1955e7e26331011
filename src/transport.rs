/// Byte-level access to a single device on a two-wire bus. The address is fixed by the
/// implementation, so the driver only deals in payloads. `I2cDevice` provides this for any bus
/// implementing the `i2c` crate traits; tests use `MockTransport`.
pub trait Transport {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Fills the whole buffer or fails.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write followed by a repeated-start read.
    fn write_read(&mut self, bytes: &[u8], buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(bytes)
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(buf)
    }

    #[inline]
    fn write_read(&mut self, bytes: &[u8], buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).write_read(bytes, buf)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockError {
        Nack,
        NoScheduledRead,
        LengthMismatch,
    }

    #[derive(Debug, Default)]
    pub struct MockTransport {
        pub last_writes: Vec<Vec<u8>>,
        pub next_reads: VecDeque<Vec<u8>>,
        pub fail_writes: bool,
        pub fail_reads: bool,
    }

    impl Transport for MockTransport {
        type Error = MockError;

        fn write(&mut self, bytes: &[u8]) -> Result<(), MockError> {
            if self.fail_writes {
                return Err(MockError::Nack);
            }
            self.last_writes.push(bytes.into());
            Ok(())
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<(), MockError> {
            if self.fail_reads {
                return Err(MockError::Nack);
            }
            let data = self
                .next_reads
                .pop_front()
                .ok_or(MockError::NoScheduledRead)?;
            if data.len() != buf.len() {
                // the read request doesn't match the scheduled response
                return Err(MockError::LengthMismatch);
            }
            buf.copy_from_slice(&data);
            Ok(())
        }

        fn write_read(&mut self, bytes: &[u8], buf: &mut [u8]) -> Result<(), MockError> {
            self.write(bytes)?;
            self.read(buf)
        }
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn schedule_read(&mut self, data: &[u8]) {
            self.next_reads.push_back(data.into());
        }

        pub fn pop_write(&mut self, data: &[u8]) -> bool {
            match self.last_writes.pop() {
                None => false,
                Some(t) => t == data,
            }
        }

        pub fn has_writes(&self) -> bool {
            !self.last_writes.is_empty()
        }
    }

    #[test]
    fn test_mock_rejects_unscheduled_read() {
        let mut t = MockTransport::new();
        let mut buf = [0u8; 6];
        assert_eq!(t.read(&mut buf), Err(MockError::NoScheduledRead));
        t.schedule_read(&[1, 2]);
        assert_eq!(t.read(&mut buf), Err(MockError::LengthMismatch));
    }

    #[test]
    fn test_mock_through_mut_ref() {
        let mut t = MockTransport::new();
        t.schedule_read(&[0xaa]);
        let mut buf = [0u8; 1];
        fn command<T: Transport>(mut t: T, buf: &mut [u8]) -> Result<(), T::Error> {
            t.write_read(&[0x89], buf)
        }
        command(&mut t, &mut buf).unwrap();
        assert_eq!(buf, [0xaa]);
        assert!(t.pop_write(&[0x89]));
        assert!(!t.has_writes());
    }
}
