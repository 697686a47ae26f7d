//! Error types for sensor operations

use ocellus_hal::TransportError;
use ocellus_protocol::FrameError;

/// Why a sensor operation failed
///
/// Every variant is recoverable by retrying the whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LensError {
    /// No matching frame arrived within the configured timeout
    Timeout,
    /// Every knock attempt went unanswered
    HandshakeFailed,
    /// A frame with this command code arrived where a data record was expected
    UnexpectedReply(u8),
    /// The sensor refused the command because it needs the Pro hardware
    NeedPro,
    /// The result buffer could not grow to the advertised record count
    OutOfMemory,
    /// The request could not be encoded (nothing was sent)
    Frame(FrameError),
    /// The transport failed
    Transport(TransportError),
}

impl From<FrameError> for LensError {
    fn from(e: FrameError) -> Self {
        LensError::Frame(e)
    }
}

impl From<TransportError> for LensError {
    fn from(e: TransportError) -> Self {
        LensError::Transport(e)
    }
}
