//! Byte transport to the sensor
//!
//! Both media (addressed I2C bursts and a plain serial stream) are reduced
//! to the same three operations, so the protocol layer never knows which
//! one it is driving.

/// Errors reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLoss,
    /// NACK received
    Nack,
    /// Receive overrun
    Overrun,
    /// Peripheral timed out
    Timeout,
    /// Other error
    Other,
}

impl From<embedded_hal::i2c::ErrorKind> for TransportError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;

        match kind {
            ErrorKind::Bus => TransportError::Bus,
            ErrorKind::ArbitrationLoss => TransportError::ArbitrationLoss,
            ErrorKind::NoAcknowledge(_) => TransportError::Nack,
            ErrorKind::Overrun => TransportError::Overrun,
            _ => TransportError::Other,
        }
    }
}

impl From<embedded_io::ErrorKind> for TransportError {
    fn from(kind: embedded_io::ErrorKind) -> Self {
        match kind {
            embedded_io::ErrorKind::TimedOut => TransportError::Timeout,
            _ => TransportError::Other,
        }
    }
}

/// Half-duplex byte transport to the sensor
///
/// Reads never block: `bytes_available` reports what can be read right now
/// and `read_byte` returns `None` once that is used up.
pub trait Transport {
    /// Send a complete encoded frame
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Number of received bytes ready to read
    fn bytes_available(&mut self) -> Result<usize, TransportError>;

    /// Take one received byte, if any
    fn read_byte(&mut self) -> Result<Option<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        (**self).write(data)
    }

    fn bytes_available(&mut self) -> Result<usize, TransportError> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        (**self).read_byte()
    }
}
