use std::fmt;

/// A reply word whose trailing CRC byte did not match its two data bytes.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("checksum mismatch (computed {computed:#04x}, received {received:#04x})")]
pub struct ChecksumMismatch {
    pub computed: u8,
    pub received: u8,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error<E> {
    #[error("writing the command to the sensor failed: {0:?}")]
    WriteFailed(E),

    #[error("reading the reply from the sensor failed: {0:?}")]
    ReadFailed(E),

    #[error(transparent)]
    ChecksumMismatch(#[from] ChecksumMismatch),

    #[error("no transport is bound to the sensor")]
    NotInitialized,
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;

impl<E: fmt::Debug> From<Error<E>> for std::io::Error {
    fn from(value: Error<E>) -> Self {
        use std::io::ErrorKind;
        let kind = match value {
            Error::WriteFailed(_) | Error::ReadFailed(_) => ErrorKind::Other,
            Error::ChecksumMismatch(_) => ErrorKind::InvalidData,
            Error::NotInitialized => ErrorKind::NotConnected,
        };
        std::io::Error::new(kind, value.to_string())
    }
}
