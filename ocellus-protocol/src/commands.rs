//! Command catalog
//!
//! Maps every logical operation to its command code, the shape of the
//! outbound frame and the reply the host should wait for:
//! - Host → Sensor: [`Request`], encoded with [`Request::to_frame`]
//! - Sensor → Host: [`Reply`], decoded with [`Reply::from_frame`]

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::records::{Arrow, Block, Metadata};
use heapless::Vec;

/// Command codes
pub mod cmd {
    pub const REQUEST: u8 = 0x20;
    pub const REQUEST_BLOCKS: u8 = 0x21;
    pub const REQUEST_ARROWS: u8 = 0x22;
    pub const REQUEST_LEARNED: u8 = 0x23;
    pub const REQUEST_BLOCKS_LEARNED: u8 = 0x24;
    pub const REQUEST_ARROWS_LEARNED: u8 = 0x25;
    pub const REQUEST_BY_ID: u8 = 0x26;
    pub const REQUEST_BLOCKS_BY_ID: u8 = 0x27;
    pub const REQUEST_ARROWS_BY_ID: u8 = 0x28;
    pub const RETURN_INFO: u8 = 0x29;
    pub const RETURN_BLOCK: u8 = 0x2A;
    pub const RETURN_ARROW: u8 = 0x2B;
    pub const REQUEST_KNOCK: u8 = 0x2C;
    pub const REQUEST_ALGORITHM: u8 = 0x2D;
    pub const RETURN_OK: u8 = 0x2E;
    pub const REQUEST_CUSTOM_NAMES: u8 = 0x2F;
    pub const REQUEST_PHOTO: u8 = 0x30;
    pub const REQUEST_SAVE_MODEL: u8 = 0x32;
    pub const REQUEST_LOAD_MODEL: u8 = 0x33;
    pub const REQUEST_CUSTOM_TEXT: u8 = 0x34;
    pub const REQUEST_CLEAR_TEXT: u8 = 0x35;
    pub const REQUEST_LEARN: u8 = 0x36;
    pub const REQUEST_FORGET: u8 = 0x37;
    pub const REQUEST_SCREENSHOT: u8 = 0x39;
    pub const REQUEST_IS_PRO: u8 = 0x3B;
    pub const REQUEST_FIRMWARE_VERSION: u8 = 0x3C;
    pub const RETURN_BUSY: u8 = 0x3D;
    pub const RETURN_NEED_PRO: u8 = 0x3E;
}

/// Longest name, text or version string the sensor accepts
pub const MAX_TEXT_LEN: usize = 20;

/// Largest x coordinate for custom text (screen is 320 px wide)
pub const MAX_TEXT_X: u16 = 319;

/// Largest y coordinate for custom text (screen is 240 px high)
pub const MAX_TEXT_Y: u8 = 239;

/// Flag byte marking an x coordinate of 256 or more
const TEXT_X_HIGH_FLAG: u8 = 0xFF;

/// Outbound frame layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    /// Empty payload
    NoField,
    /// Five-field block with only field 0 meaningful
    OneField,
    /// Command-specific byte block
    Payload,
}

/// What the host waits for after sending a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpectedReply {
    /// A single `RETURN_OK`
    Ack,
    /// `RETURN_INFO` followed by `protocol_size` Block/Arrow frames
    Enumeration,
    /// A frame echoing the request code with a boolean in field 0
    Flag,
}

/// One row of the command catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Name for diagnostics
    pub name: &'static str,
    /// Command code on the wire
    pub code: u8,
    /// Outbound frame layout
    pub shape: Shape,
    /// Reply to wait for
    pub reply: ExpectedReply,
}

const fn row(
    name: &'static str,
    code: u8,
    shape: Shape,
    reply: ExpectedReply,
) -> CommandDescriptor {
    CommandDescriptor {
        name,
        code,
        shape,
        reply,
    }
}

/// Every host-originated command
pub static CATALOG: [CommandDescriptor; 22] = [
    row("request", cmd::REQUEST, Shape::NoField, ExpectedReply::Enumeration),
    row("request_blocks", cmd::REQUEST_BLOCKS, Shape::NoField, ExpectedReply::Enumeration),
    row("request_arrows", cmd::REQUEST_ARROWS, Shape::NoField, ExpectedReply::Enumeration),
    row("request_learned", cmd::REQUEST_LEARNED, Shape::NoField, ExpectedReply::Enumeration),
    row("request_blocks_learned", cmd::REQUEST_BLOCKS_LEARNED, Shape::NoField, ExpectedReply::Enumeration),
    row("request_arrows_learned", cmd::REQUEST_ARROWS_LEARNED, Shape::NoField, ExpectedReply::Enumeration),
    row("request_by_id", cmd::REQUEST_BY_ID, Shape::OneField, ExpectedReply::Enumeration),
    row("request_blocks_by_id", cmd::REQUEST_BLOCKS_BY_ID, Shape::OneField, ExpectedReply::Enumeration),
    row("request_arrows_by_id", cmd::REQUEST_ARROWS_BY_ID, Shape::OneField, ExpectedReply::Enumeration),
    row("knock", cmd::REQUEST_KNOCK, Shape::NoField, ExpectedReply::Ack),
    row("algorithm", cmd::REQUEST_ALGORITHM, Shape::OneField, ExpectedReply::Ack),
    row("custom_name", cmd::REQUEST_CUSTOM_NAMES, Shape::Payload, ExpectedReply::Ack),
    row("photo", cmd::REQUEST_PHOTO, Shape::NoField, ExpectedReply::Ack),
    row("save_model", cmd::REQUEST_SAVE_MODEL, Shape::OneField, ExpectedReply::Ack),
    row("load_model", cmd::REQUEST_LOAD_MODEL, Shape::OneField, ExpectedReply::Ack),
    row("custom_text", cmd::REQUEST_CUSTOM_TEXT, Shape::Payload, ExpectedReply::Ack),
    row("clear_text", cmd::REQUEST_CLEAR_TEXT, Shape::NoField, ExpectedReply::Ack),
    row("learn", cmd::REQUEST_LEARN, Shape::OneField, ExpectedReply::Ack),
    row("forget", cmd::REQUEST_FORGET, Shape::NoField, ExpectedReply::Ack),
    row("screenshot", cmd::REQUEST_SCREENSHOT, Shape::NoField, ExpectedReply::Ack),
    row("is_pro", cmd::REQUEST_IS_PRO, Shape::OneField, ExpectedReply::Flag),
    row("firmware_version", cmd::REQUEST_FIRMWARE_VERSION, Shape::Payload, ExpectedReply::Ack),
];

/// Find the catalog row for a command code
pub fn lookup(code: u8) -> Option<&'static CommandDescriptor> {
    CATALOG.iter().find(|descriptor| descriptor.code == code)
}

/// Vision algorithm selectable on the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Algorithm {
    FaceRecognition = 0,
    ObjectTracking = 1,
    ObjectRecognition = 2,
    LineTracking = 3,
    ColorRecognition = 4,
    TagRecognition = 5,
    ObjectClassification = 6,
    QrCodeRecognition = 7,
    BarcodeRecognition = 8,
}

impl Algorithm {
    /// Parse an algorithm from its wire value
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Algorithm::FaceRecognition),
            1 => Some(Algorithm::ObjectTracking),
            2 => Some(Algorithm::ObjectRecognition),
            3 => Some(Algorithm::LineTracking),
            4 => Some(Algorithm::ColorRecognition),
            5 => Some(Algorithm::TagRecognition),
            6 => Some(Algorithm::ObjectClassification),
            7 => Some(Algorithm::QrCodeRecognition),
            8 => Some(Algorithm::BarcodeRecognition),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Which records an enumerate cycle asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Query {
    All,
    Blocks,
    Arrows,
    Learned,
    BlocksLearned,
    ArrowsLearned,
    ById(u16),
    BlocksById(u16),
    ArrowsById(u16),
}

impl Query {
    /// Command code that carries this query
    pub fn code(&self) -> u8 {
        match self {
            Query::All => cmd::REQUEST,
            Query::Blocks => cmd::REQUEST_BLOCKS,
            Query::Arrows => cmd::REQUEST_ARROWS,
            Query::Learned => cmd::REQUEST_LEARNED,
            Query::BlocksLearned => cmd::REQUEST_BLOCKS_LEARNED,
            Query::ArrowsLearned => cmd::REQUEST_ARROWS_LEARNED,
            Query::ById(_) => cmd::REQUEST_BY_ID,
            Query::BlocksById(_) => cmd::REQUEST_BLOCKS_BY_ID,
            Query::ArrowsById(_) => cmd::REQUEST_ARROWS_BY_ID,
        }
    }

    /// Target ID for the filtered variants
    pub fn target_id(&self) -> Option<u16> {
        match self {
            Query::ById(id) | Query::BlocksById(id) | Query::ArrowsById(id) => Some(*id),
            _ => None,
        }
    }
}

/// Requests from the host to the sensor
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request<'a> {
    /// Link presence check
    Knock,
    /// Start an enumerate cycle
    Enumerate(Query),
    /// Switch the active algorithm
    SetAlgorithm(Algorithm),
    /// Learn the object in view under this ID
    Learn(u16),
    /// Forget everything learned by the current algorithm
    Forget,
    /// Rename a learned ID on the sensor screen
    SetCustomName { id: u8, name: &'a str },
    /// Draw text on the sensor screen
    SetCustomText { x: u16, y: u8, text: &'a str },
    /// Remove all custom text
    ClearText,
    /// Save a camera photo to the SD card
    TakePhoto,
    /// Save a screenshot to the SD card
    SaveScreenshot,
    /// Save the current model to SD card slot
    SaveModel(u16),
    /// Load a model from SD card slot
    LoadModel(u16),
    /// Ask whether this is the Pro hardware
    IsPro,
    /// Send the host's expected firmware version string
    FirmwareVersion(&'a str),
}

impl<'a> Request<'a> {
    /// Command code of this request
    pub fn code(&self) -> u8 {
        match self {
            Request::Knock => cmd::REQUEST_KNOCK,
            Request::Enumerate(query) => query.code(),
            Request::SetAlgorithm(_) => cmd::REQUEST_ALGORITHM,
            Request::Learn(_) => cmd::REQUEST_LEARN,
            Request::Forget => cmd::REQUEST_FORGET,
            Request::SetCustomName { .. } => cmd::REQUEST_CUSTOM_NAMES,
            Request::SetCustomText { .. } => cmd::REQUEST_CUSTOM_TEXT,
            Request::ClearText => cmd::REQUEST_CLEAR_TEXT,
            Request::TakePhoto => cmd::REQUEST_PHOTO,
            Request::SaveScreenshot => cmd::REQUEST_SCREENSHOT,
            Request::SaveModel(_) => cmd::REQUEST_SAVE_MODEL,
            Request::LoadModel(_) => cmd::REQUEST_LOAD_MODEL,
            Request::IsPro => cmd::REQUEST_IS_PRO,
            Request::FirmwareVersion(_) => cmd::REQUEST_FIRMWARE_VERSION,
        }
    }

    /// Catalog row for this request
    pub fn descriptor(&self) -> Option<&'static CommandDescriptor> {
        lookup(self.code())
    }

    /// Reply the host should wait for
    pub fn expected_reply(&self) -> ExpectedReply {
        self.descriptor()
            .map(|descriptor| descriptor.reply)
            .unwrap_or(ExpectedReply::Ack)
    }

    /// Encode this request into a frame
    ///
    /// Length checks happen here, so a request that fails to encode never
    /// reaches the transport.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let code = self.code();
        match self {
            Request::Knock
            | Request::Forget
            | Request::ClearText
            | Request::TakePhoto
            | Request::SaveScreenshot => Ok(Frame::empty(code)),
            Request::IsPro => Frame::with_fields(code, &[0]),
            Request::Enumerate(query) => match query.target_id() {
                Some(id) => Frame::with_fields(code, &[id as i16]),
                None => Ok(Frame::empty(code)),
            },
            Request::SetAlgorithm(algorithm) => {
                Frame::with_fields(code, &[algorithm.to_byte() as i16])
            }
            Request::Learn(id) => Frame::with_fields(code, &[*id as i16]),
            Request::SaveModel(slot) | Request::LoadModel(slot) => {
                Frame::with_fields(code, &[*slot as i16])
            }
            Request::SetCustomName { id, name } => {
                // Payload: [id][len + 1][name...][0]
                let name = checked_text(name)?;
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload.push(*id).map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .push(name.len() as u8 + 1)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(name)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload.push(0).map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(code, &payload)
            }
            Request::SetCustomText { x, y, text } => {
                // Payload: [len][x flag][x low][y][text...]
                let text = checked_text(text)?;
                let (x_flag, x_low) = encode_text_x(*x);
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&[text.len() as u8, x_flag, x_low, (*y).min(MAX_TEXT_Y)])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(text)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(code, &payload)
            }
            Request::FirmwareVersion(version) => {
                let version = checked_text(version)?;
                Frame::new(code, version)
            }
        }
    }
}

fn checked_text(text: &str) -> Result<&[u8], FrameError> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_TEXT_LEN {
        return Err(FrameError::TextTooLong);
    }
    Ok(bytes)
}

/// Split a text x coordinate into its flag and low byte, clamping to the screen
fn encode_text_x(x: u16) -> (u8, u8) {
    let x = x.min(MAX_TEXT_X);
    if x > u8::MAX as u16 {
        (TEXT_X_HIGH_FLAG, (x - 256) as u8)
    } else {
        (0, x as u8)
    }
}

/// Recover the x coordinate from its flag and low byte
pub fn decode_text_x(flag: u8, low: u8) -> u16 {
    if flag == TEXT_X_HIGH_FLAG {
        256 + low as u16
    } else {
        low as u16
    }
}

/// Replies parsed from sensor-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Command accepted
    Ack,
    /// Sensor is busy and dropped the command
    Busy,
    /// Command needs the Pro hardware
    NeedPro,
    /// Enumerate cycle header
    Info(Metadata),
    /// Block data record
    Block(Block),
    /// Arrow data record
    Arrow(Arrow),
    /// Answer to an is-pro query
    IsPro(bool),
}

impl Reply {
    /// Parse a reply from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.command {
            cmd::RETURN_OK => Ok(Reply::Ack),
            cmd::RETURN_BUSY => Ok(Reply::Busy),
            cmd::RETURN_NEED_PRO => Ok(Reply::NeedPro),
            cmd::RETURN_INFO => Ok(Reply::Info(Metadata::from_fields(Self::fields(frame)?))),
            cmd::RETURN_BLOCK => Ok(Reply::Block(Block::from_fields(Self::fields(frame)?))),
            cmd::RETURN_ARROW => Ok(Reply::Arrow(Arrow::from_fields(Self::fields(frame)?))),
            cmd::REQUEST_IS_PRO => Ok(Reply::IsPro(Self::fields(frame)?[0] != 0)),
            other => Err(FrameError::UnknownCommand(other)),
        }
    }

    fn fields(frame: &Frame) -> Result<[i16; 5], FrameError> {
        frame.fields().ok_or(FrameError::InvalidFrame)
    }

    /// Encode this reply into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            Reply::Ack => Ok(Frame::empty(cmd::RETURN_OK)),
            Reply::Busy => Ok(Frame::empty(cmd::RETURN_BUSY)),
            Reply::NeedPro => Ok(Frame::empty(cmd::RETURN_NEED_PRO)),
            Reply::Info(info) => Frame::with_fields(cmd::RETURN_INFO, &info.to_fields()),
            Reply::Block(block) => Frame::with_fields(cmd::RETURN_BLOCK, &block.to_fields()),
            Reply::Arrow(arrow) => Frame::with_fields(cmd::RETURN_ARROW, &arrow.to_fields()),
            Reply::IsPro(pro) => Frame::with_fields(cmd::REQUEST_IS_PRO, &[*pro as i16]),
        }
    }
}
