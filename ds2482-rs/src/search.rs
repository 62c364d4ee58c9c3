use crate::{Ds2482, Ds2482Result};
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};
use log::{debug, trace};
use onewire_bus::{ONEWIRE_SEARCH_CMD, RomCode};

/// Number of bits in a ROM code.
const ROM_BITS: u8 = 64;

/// Progress of a ROM search across calls.
///
/// Bit positions are 1-indexed, in the order the bits appear on the wire:
/// position `i` lives in byte `(i - 1) / 8` under mask `1 << ((i - 1) % 8)`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchState {
    address: [u8; 8],
    last_discrepancy: u8,
    exhausted: bool,
}

impl SearchState {
    /// Rewinds to the start of an enumeration.
    pub fn reset(&mut self) {
        self.address = [0; 8];
        self.last_discrepancy = 0;
        self.exhausted = false;
    }

    /// The ROM code found last, or partially traced by an aborted search.
    pub fn address(&self) -> &[u8; 8] {
        &self.address
    }

    /// Position of the branch point the next search will take the 1-branch at; 0 if none.
    pub fn last_discrepancy(&self) -> u8 {
        self.last_discrepancy
    }

    /// Whether every device has been reported.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Reads the address bit at 1-indexed `position`.
    pub fn bit(&self, position: u8) -> bool {
        let (byte, mask) = Self::locate(position);
        self.address[byte] & mask != 0
    }

    /// Sets or clears the address bit at 1-indexed `position`.
    pub fn set_bit(&mut self, position: u8, value: bool) {
        let (byte, mask) = Self::locate(position);
        if value {
            self.address[byte] |= mask;
        } else {
            self.address[byte] &= !mask;
        }
    }

    fn locate(position: u8) -> (usize, u8) {
        debug_assert!((1..=ROM_BITS).contains(&position));
        let idx = position - 1;
        ((idx >> 3) as usize, 1 << (idx & 7))
    }

    /// Direction to drive at `position` in the next pass.
    ///
    /// Below the last discrepancy the previous path is retraced, at it the
    /// 1-branch is taken, and past it the 0-branch is preferred.
    fn direction(&self, position: u8) -> bool {
        if position < self.last_discrepancy {
            self.bit(position)
        } else {
            position == self.last_discrepancy
        }
    }
}

impl<I: I2c<SevenBitAddress>, D: DelayNs> Ds2482<I, D> {
    /// Rewinds the device's own search so the next [`Ds2482::search`] starts over.
    pub fn reset_search(&mut self) {
        self.search.reset();
    }

    /// The device's own search progress.
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Finds the next device on the 1-Wire bus.
    ///
    /// Successive calls walk the devices depth-first, 0-branch first, one
    /// device per call. See [`Ds2482::search_with`].
    pub fn search(&mut self) -> Ds2482Result<Option<RomCode>, I::Error> {
        let mut state = core::mem::take(&mut self.search);
        let res = self.search_with(&mut state);
        self.search = state;
        res
    }

    /// Runs one search pass on a caller-owned [`SearchState`].
    ///
    /// # Returns
    /// - `Some(rom)` for the next device found.
    /// - `None` if the search is exhausted, nothing answered the reset, or
    ///   both bits of a triplet came back 1. The last case leaves the state
    ///   resumable, so a later call may succeed.
    pub fn search_with(
        &mut self,
        state: &mut SearchState,
    ) -> Ds2482Result<Option<RomCode>, I::Error> {
        if state.exhausted {
            return Ok(None);
        }
        if !self.wire_reset()? {
            debug!("DS2482 at {:#04x}: no presence pulse, search ends", self.addr);
            return Ok(None);
        }
        self.busy_wait(true)?;
        self.wire_write_byte(ONEWIRE_SEARCH_CMD)?;

        let mut last_zero: u8 = 0;
        for position in 1..=ROM_BITS {
            let status = self.wire_triplet(state.direction(position))?;
            let id_bit = status.single_bit_result();
            let complement_bit = status.triplet_second_bit();
            let taken = status.branch_dir_taken();
            if id_bit && complement_bit {
                debug!(
                    "DS2482 at {:#04x}: no device answered bit {}, search aborted",
                    self.addr, position
                );
                return Ok(None);
            }
            if !id_bit && !complement_bit && !taken {
                last_zero = position;
            }
            state.set_bit(position, taken);
        }

        state.last_discrepancy = last_zero;
        state.exhausted = last_zero == 0;
        let rom = RomCode::new(state.address);
        trace!(
            "DS2482 at {:#04x}: found {}, last discrepancy {}",
            self.addr, rom, last_zero
        );
        Ok(Some(rom))
    }
}
