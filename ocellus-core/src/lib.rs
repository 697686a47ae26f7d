//! Host-side driver logic for the vision sensor
//!
//! This crate contains everything between the byte transport and the
//! caller:
//!
//! - Request/response orchestration with bounded waits ([`client::Lens`])
//! - The result store holding the latest enumerate cycle ([`store::ResultStore`])
//! - Link configuration ([`config::LensConfig`])
//!
//! Every operation is synchronous. A call sends one request, polls the
//! transport until the reply sequence is complete or the timeout expires,
//! and only then returns.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod client;
pub mod config;
pub mod error;
pub mod store;

#[cfg(test)]
mod testing;

pub use client::Lens;
pub use config::LensConfig;
pub use error::LensError;
pub use store::ResultStore;

pub use ocellus_hal::{Clock, Transport, TransportError};
pub use ocellus_protocol::{Algorithm, Arrow, Block, Metadata, Query, Record, RecordKind};
