#![no_std]
#![deny(missing_docs)]
//! # onewire-bus
//! A no-std interface for talking to devices on a 1-Wire bus.
//!
//! [OneWire] is the capability a bus master exposes to applications: reset with presence
//! detect, bit and byte transfers, and a resumable ROM search. Masters that implement it get
//! device addressing ([OneWire::skip], [OneWire::select]) and enumeration
//! ([OneWire::devices]) for free.
//!
//! ROM codes are carried around as [RomCode] values. They are treated as opaque 8-byte
//! identifiers; no check-byte validation is performed.

mod rom;
mod search;
mod traits;

pub use rom::RomCode;
pub use search::OneWireDevices;
pub use traits::OneWire;

/// Command to match a specific ROM address in 1-Wire communication.
pub const ONEWIRE_MATCH_ROM_CMD: u8 = 0x55;

/// Command to skip ROM addressing and talk to every device on the bus.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;

/// Command to search for devices on the 1-Wire bus.
pub const ONEWIRE_SEARCH_CMD: u8 = 0xf0;
