#![no_std]
#![deny(missing_docs)]

/*! # DS2482
 *
 * Driver for the DS2482 family of I2C to 1-Wire bridges.
 *
 * The bridge generates all 1-Wire timing itself; the host only writes command
 * bytes over I2C and polls the status register until the 1-Wire line is idle.
 * [`Ds2482`] wraps every command in that polling discipline, exposes the 1-Wire
 * primitives (reset, bit and byte transfers, Skip/Match ROM) and runs the ROM
 * search with the chip's triplet command.
 *
 * Slow or hung bus operations never fail a call: a busy-wait that runs out of
 * polls sets the sticky [`Ds2482::timed_out`] flag and the command continues with
 * the last status read. Only I2C transport errors are returned as errors.
 */

pub use onewire_bus::{OneWire, RomCode};
mod commands;
mod device;
mod error;
mod onewire;
mod registers;
mod search;
#[cfg(test)]
mod sim;
mod traits;

pub use device::{Ds2482, Ds2482Builder};
pub use error::Ds2482Error;
pub use registers::{DeviceConfiguration, DeviceStatus};
pub use search::SearchState;
pub use traits::Interact;

/// Results of DS2482-specific function calls.
pub type Ds2482Result<T, E> = Result<T, Ds2482Error<E>>;
