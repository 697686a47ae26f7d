//! Ocellus Hardware Abstraction Layer
//!
//! The protocol layer talks to the sensor through two small capabilities:
//! a [`Transport`] that moves bytes and a [`Clock`] that bounds waits.
//! This crate defines both and adapts the standard `embedded-hal` and
//! `embedded-io` traits to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ocellus-core (request/response)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ocellus-hal (this crate - Transport)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ I2cTransport  │       │ UartTransport │
//! │ embedded-hal  │       │ embedded-io   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Byte transport to the sensor
//! - [`clock::Clock`] - Monotonic millisecond clock

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod i2c;
pub mod transport;
pub mod uart;

// Re-export key types at crate root for convenience
pub use clock::Clock;
#[cfg(feature = "embassy-time")]
pub use clock::EmbassyClock;
pub use i2c::{I2cConfig, I2cTransport};
pub use transport::{Transport, TransportError};
pub use uart::{UartConfig, UartTransport};
