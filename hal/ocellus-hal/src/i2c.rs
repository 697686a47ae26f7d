//! I2C transport
//!
//! The sensor exposes its frame stream behind a fixed 7-bit address. Writes
//! go out as a single burst; reads pull fixed-size chunks into a local
//! buffer that then feeds the byte-at-a-time parser.

use embedded_hal::i2c::{Error as _, I2c};

use crate::transport::{Transport, TransportError};

/// Default 7-bit address of the sensor
pub const DEFAULT_ADDRESS: u8 = 0x32;

/// Bytes fetched per read burst
pub const READ_CHUNK: usize = 16;

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// 7-bit device address
    pub address: u8,
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        address: DEFAULT_ADDRESS,
        frequency: 100_000,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        address: DEFAULT_ADDRESS,
        frequency: 400_000,
    };
}

/// [`Transport`] over an `embedded-hal` I2C master
#[derive(Debug)]
pub struct I2cTransport<B> {
    bus: B,
    config: I2cConfig,
    rx: [u8; READ_CHUNK],
    rx_len: usize,
    rx_pos: usize,
}

impl<B: I2c> I2cTransport<B> {
    /// Wrap a bus with the default configuration
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, I2cConfig::default())
    }

    /// Wrap a bus with an explicit configuration
    pub fn with_config(bus: B, config: I2cConfig) -> Self {
        Self {
            bus,
            config,
            rx: [0; READ_CHUNK],
            rx_len: 0,
            rx_pos: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    fn buffered(&self) -> usize {
        self.rx_len - self.rx_pos
    }
}

impl<B: I2c> Transport for I2cTransport<B> {
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.bus
            .write(self.config.address, data)
            .map_err(|e| TransportError::from(e.kind()))
    }

    fn bytes_available(&mut self) -> Result<usize, TransportError> {
        if self.buffered() == 0 {
            // Drop the old chunk first so a failed burst never replays it
            self.rx_len = 0;
            self.rx_pos = 0;
            self.bus
                .read(self.config.address, &mut self.rx)
                .map_err(|e| TransportError::from(e.kind()))?;
            self.rx_len = READ_CHUNK;
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
