//! Vision Sensor Link Protocol
//!
//! This crate defines the wire protocol between a host controller and the
//! vision sensor module. The same frames travel over I2C bursts and over a
//! plain UART byte stream.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────────┬─────────┬────────┬─────────┬─────────────┬──────────┐
//! │ 0x55 0xAA │ ADDRESS │ LENGTH │ COMMAND │ PAYLOAD     │ CHECKSUM │
//! │ 2B        │ 1B      │ 1B     │ 1B      │ 0–64B       │ 1B       │
//! └───────────┴─────────┴────────┴─────────┴─────────────┴──────────┘
//! ```
//!
//! Most payloads are five little-endian `i16` fields whose meaning depends
//! on the command; [`records`] gives each meaning its own type.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod frame;
pub mod records;

pub use commands::{
    cmd, lookup, Algorithm, CommandDescriptor, ExpectedReply, Query, Reply, Request, Shape,
    CATALOG, MAX_TEXT_LEN,
};
pub use frame::{Frame, FrameError, FrameParser, FIELD_COUNT, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use records::{Arrow, Block, Metadata, Record, RecordKind};
