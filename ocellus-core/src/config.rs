//! Link configuration
//!
//! Timing knobs for the request/response loop. With the `serde` feature the
//! config can be stored alongside other settings (e.g. postcard in flash).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default time to wait for each reply frame
pub const DEFAULT_TIMEOUT_MS: u32 = 100;

/// Default number of knocks before the handshake gives up
pub const DEFAULT_KNOCK_ATTEMPTS: u8 = 5;

/// Request/response timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LensConfig {
    /// Budget for each single-frame wait, in milliseconds
    pub timeout_ms: u32,
    /// Knock attempts made by `connect`
    pub knock_attempts: u8,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            knock_attempts: DEFAULT_KNOCK_ATTEMPTS,
        }
    }
}

impl LensConfig {
    /// Replace the per-wait timeout
    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Replace the knock attempt count
    pub const fn with_knock_attempts(mut self, knock_attempts: u8) -> Self {
        self.knock_attempts = knock_attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LensConfig::default();
        assert_eq!(config.timeout_ms, 100);
        assert_eq!(config.knock_attempts, 5);
    }

    #[test]
    fn test_builder() {
        let config = LensConfig::default()
            .with_timeout_ms(250)
            .with_knock_attempts(2);
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.knock_attempts, 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_roundtrip() {
        let config = LensConfig::default().with_timeout_ms(500);
        let bytes = postcard::to_allocvec(&config).unwrap();
        let parsed: LensConfig = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, config);
    }
}
