//! Frame encoding and decoding for the sensor link.
//!
//! Frame format:
//! - HEADER (2 bytes): 0x55 0xAA synchronization pattern
//! - ADDRESS (1 byte): 0x11
//! - LENGTH (1 byte): payload length (0-64)
//! - COMMAND (1 byte): command code
//! - PAYLOAD (0-64 bytes): five little-endian i16 fields or a command-specific block
//! - CHECKSUM (1 byte): wrapping sum of every preceding byte

use heapless::Vec;

/// First synchronization byte
pub const HEADER_0: u8 = 0x55;

/// Second synchronization byte
pub const HEADER_1: u8 = 0xAA;

/// Protocol address byte
pub const FRAME_ADDRESS: u8 = 0x11;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Bytes surrounding the payload (HEADER + ADDRESS + LENGTH + COMMAND + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 6;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Number of fixed 16-bit fields in a field-carrying frame
pub const FIELD_COUNT: usize = 5;

/// Payload length of a field-carrying frame
pub const FIELDS_PAYLOAD_SIZE: usize = FIELD_COUNT * 2;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Invalid frame structure
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Name, text or version string longer than the device accepts
    TextTooLong,
    /// Command code has no decoder
    UnknownCommand(u8),
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Command code
    pub command: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given command code and payload
    pub fn new(command: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            command,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(command: u8) -> Self {
        Self {
            command,
            payload: Vec::new(),
        }
    }

    /// Create a field-carrying frame
    ///
    /// Missing trailing fields are zero; the wire always carries all five.
    pub fn with_fields(command: u8, fields: &[i16]) -> Result<Self, FrameError> {
        if fields.len() > FIELD_COUNT {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut payload = [0u8; FIELDS_PAYLOAD_SIZE];
        for (slot, value) in payload.chunks_exact_mut(2).zip(fields) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        Self::new(command, &payload)
    }

    /// Read field `index` if the payload is a five-field block
    pub fn field(&self, index: usize) -> Option<i16> {
        self.fields().and_then(|fields| fields.get(index).copied())
    }

    /// All five fields, or `None` if the payload is not a five-field block
    pub fn fields(&self) -> Option<[i16; FIELD_COUNT]> {
        if self.payload.len() != FIELDS_PAYLOAD_SIZE {
            return None;
        }

        let mut fields = [0i16; FIELD_COUNT];
        for (field, bytes) in fields.iter_mut().zip(self.payload.chunks_exact(2)) {
            *field = i16::from_le_bytes([bytes[0], bytes[1]]);
        }
        Some(fields)
    }

    /// Length of this frame on the wire
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Calculate checksum over everything that precedes it on the wire
    fn calculate_checksum(length: u8, command: u8, payload: &[u8]) -> u8 {
        let mut checksum = HEADER_0
            .wrapping_add(HEADER_1)
            .wrapping_add(FRAME_ADDRESS)
            .wrapping_add(length)
            .wrapping_add(command);
        for &byte in payload {
            checksum = checksum.wrapping_add(byte);
        }
        checksum
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let end = 5 + self.payload.len();

        buffer[0] = HEADER_0;
        buffer[1] = HEADER_1;
        buffer[2] = FRAME_ADDRESS;
        buffer[3] = length;
        buffer[4] = self.command;
        buffer[5..end].copy_from_slice(&self.payload);
        buffer[end] = Self::calculate_checksum(length, self.command, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// State machine for parsing incoming frames
///
/// `feed` never blocks: `Ok(Some(_))` means a frame completed, `Ok(None)`
/// means more bytes are needed and `Err(_)` means the partial frame was
/// dropped and the parser is already hunting for the next header.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
    command: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for HEADER_0
    WaitingForHeader,
    /// Got HEADER_0, waiting for HEADER_1
    WaitingForHeaderTail,
    /// Waiting for ADDRESS
    WaitingForAddress,
    /// Waiting for LENGTH
    WaitingForLength,
    /// Waiting for COMMAND
    WaitingForCommand,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForHeader,
            buffer: Vec::new(),
            expected_length: 0,
            command: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForHeader;
        self.buffer.clear();
        self.expected_length = 0;
        self.command = 0;
    }

    /// Whether the parser is in the middle of a frame
    pub fn in_frame(&self) -> bool {
        self.state != ParseState::WaitingForHeader
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` when the partial
    /// frame was discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForHeader => {
                if byte == HEADER_0 {
                    self.state = ParseState::WaitingForHeaderTail;
                }
                // Silently ignore noise between frames
                Ok(None)
            }
            ParseState::WaitingForHeaderTail => {
                match byte {
                    HEADER_1 => self.state = ParseState::WaitingForAddress,
                    // 0x55 0x55 0xAA: the second 0x55 may start the real header
                    HEADER_0 => {}
                    _ => self.state = ParseState::WaitingForHeader,
                }
                Ok(None)
            }
            ParseState::WaitingForAddress => {
                if byte != FRAME_ADDRESS {
                    self.reset();
                    // 0x55 0xAA 0x55 0xAA: the cut-off header is followed by a real one
                    if byte == HEADER_0 {
                        self.state = ParseState::WaitingForHeaderTail;
                    }
                    return Err(FrameError::InvalidFrame);
                }
                self.state = ParseState::WaitingForLength;
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.expected_length = byte;
                self.state = ParseState::WaitingForCommand;
                Ok(None)
            }
            ParseState::WaitingForCommand => {
                self.command = byte;
                self.buffer.clear();
                self.state = if self.expected_length == 0 {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Capacity is guaranteed by the LENGTH check
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected_checksum =
                    Frame::calculate_checksum(self.expected_length, self.command, &self.buffer);

                if byte != expected_checksum {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    command: self.command,
                    payload: self.buffer.clone(),
                };

                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
