//! Serial stream transport
//!
//! Wraps any `embedded-io` port. Reads only happen when the port reports
//! data ready, so polling never blocks.

use embedded_io::{Error as _, Read, ReadReady, Write};

use crate::transport::{Transport, TransportError};

/// Bytes pulled from the port per read
const RX_BUF_SIZE: usize = 32;

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600, // Sensor factory default, 8N1
        }
    }
}

/// [`Transport`] over an `embedded-io` serial port
#[derive(Debug)]
pub struct UartTransport<S> {
    port: S,
    rx: [u8; RX_BUF_SIZE],
    rx_len: usize,
    rx_pos: usize,
}

impl<S> UartTransport<S>
where
    S: Read + ReadReady + Write,
{
    /// Wrap a serial port
    pub fn new(port: S) -> Self {
        Self {
            port,
            rx: [0; RX_BUF_SIZE],
            rx_len: 0,
            rx_pos: 0,
        }
    }

    /// Give the port back
    pub fn release(self) -> S {
        self.port
    }

    fn buffered(&self) -> usize {
        self.rx_len - self.rx_pos
    }
}

impl<S> Transport for UartTransport<S>
where
    S: Read + ReadReady + Write,
{
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.port
            .write_all(data)
            .map_err(|e| TransportError::from(e.kind()))?;
        self.port
            .flush()
            .map_err(|e| TransportError::from(e.kind()))
    }

    fn bytes_available(&mut self) -> Result<usize, TransportError> {
        if self.buffered() == 0 {
            self.rx_len = 0;
            self.rx_pos = 0;
            let ready = self
                .port
                .read_ready()
                .map_err(|e| TransportError::from(e.kind()))?;
            if ready {
                self.rx_len = self
                    .port
                    .read(&mut self.rx)
                    .map_err(|e| TransportError::from(e.kind()))?;
            }
        }
        Ok(self.buffered())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TransportError> {
        if self.buffered() == 0 {
            return Ok(None);
        }
        let byte = self.rx[self.rx_pos];
        self.rx_pos += 1;
        Ok(Some(byte))
    }
}
