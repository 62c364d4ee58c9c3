//! Simulated DS2482 with a population of 1-Wire devices behind it.

extern crate std;

use crate::registers::{DEVICE_CONFIG_PTR, DEVICE_STATUS_PTR, READ_DATA_PTR};
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use onewire_bus::RomCode;
use std::vec::Vec;

const BUSY: u8 = 1 << 0;
const PPD: u8 = 1 << 1;
const LL: u8 = 1 << 3;
const RST: u8 = 1 << 4;
const SBR: u8 = 1 << 5;
const TSB: u8 = 1 << 6;
const DIR: u8 = 1 << 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SimError;

impl i2c::Error for SimError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub(crate) fn rom(family: u8, serial: u8) -> RomCode {
    RomCode::new([family, serial, 0, 0, 0, 0, 0, 0])
}

fn rom_bit(rom: &RomCode, position: u8) -> bool {
    let idx = position - 1;
    rom.as_bytes()[(idx >> 3) as usize] & (1 << (idx & 7)) != 0
}

pub(crate) struct SimBus {
    pub devices: Vec<RomCode>,
    /// Every transaction fails.
    pub fail: bool,
    /// Status reads always report BUSY.
    pub stuck_busy: bool,
    /// Number of upcoming status reads that report BUSY.
    pub busy_polls: u32,
    /// Configuration writes are dropped.
    pub ignore_config: bool,
    /// Some device holds the line low during single bit reads.
    pub line_held_low: bool,
    /// Value returned by 1-Wire byte reads when a device is present.
    pub bus_byte: u8,
    /// Every device stops answering from this search position on.
    pub vanish_at_bit: Option<u8>,

    pub bus_writes: Vec<u8>,
    pub seen_addrs: Vec<u8>,
    pub status_reads: usize,
    pub device_resets: usize,

    ptr: u8,
    status: u8,
    config: u8,
    data: u8,
    awaiting_rom_cmd: bool,
    searching: Vec<RomCode>,
    search_bit: u8,
}

impl SimBus {
    pub fn new(devices: &[RomCode]) -> Self {
        Self {
            devices: devices.to_vec(),
            fail: false,
            stuck_busy: false,
            busy_polls: 0,
            ignore_config: false,
            line_held_low: false,
            bus_byte: 0xff,
            vanish_at_bit: None,
            bus_writes: Vec::new(),
            seen_addrs: Vec::new(),
            status_reads: 0,
            device_resets: 0,
            ptr: DEVICE_STATUS_PTR,
            status: RST | LL,
            config: 0,
            data: 0,
            awaiting_rom_cmd: false,
            searching: Vec::new(),
            search_bit: 0,
        }
    }

    fn set_status_bit(&mut self, bit: u8, value: bool) {
        if value {
            self.status |= bit;
        } else {
            self.status &= !bit;
        }
    }

    fn command(&mut self, bytes: &[u8]) {
        match *bytes {
            [0xf0] => {
                self.device_resets += 1;
                self.status = RST | LL;
                self.config = 0;
                self.ptr = DEVICE_STATUS_PTR;
                self.searching.clear();
            }
            [0xe1, ptr] => self.ptr = ptr,
            [0xd2, cfg] => {
                self.ptr = DEVICE_CONFIG_PTR;
                if !self.ignore_config && cfg >> 4 == !cfg & 0x0f {
                    self.config = cfg & 0x0f;
                    self.status &= !RST;
                }
            }
            [0xb4] => {
                self.ptr = DEVICE_STATUS_PTR;
                let present = !self.devices.is_empty();
                self.set_status_bit(PPD, present);
                self.awaiting_rom_cmd = present;
                self.searching.clear();
            }
            [0xa5, byte] => {
                self.ptr = DEVICE_STATUS_PTR;
                self.bus_writes.push(byte);
                if self.awaiting_rom_cmd && byte == 0xf0 {
                    self.searching = self.devices.clone();
                    self.search_bit = 0;
                }
                self.awaiting_rom_cmd = false;
            }
            [0x96] => {
                self.ptr = DEVICE_STATUS_PTR;
                self.data = if self.devices.is_empty() {
                    0xff
                } else {
                    self.bus_byte
                };
            }
            [0x87, bit] => {
                self.ptr = DEVICE_STATUS_PTR;
                let sampled = bit & 0x80 != 0 && !self.line_held_low;
                self.set_status_bit(SBR, sampled);
            }
            [0x78, dir] => {
                self.ptr = DEVICE_STATUS_PTR;
                self.triplet(dir & 0x80 != 0);
            }
            _ => panic!("unexpected command {:02x?}", bytes),
        }
    }

    fn triplet(&mut self, requested: bool) {
        self.search_bit += 1;
        let position = self.search_bit;
        if self.vanish_at_bit == Some(position) {
            self.searching.clear();
        }
        // Wired-AND: the line reads 1 only if no device pulls it low.
        let id = self.searching.iter().all(|r| rom_bit(r, position));
        let complement = self.searching.iter().all(|r| !rom_bit(r, position));
        let taken = if id != complement {
            id
        } else if !id {
            requested
        } else {
            true
        };
        if !(id && complement) {
            self.searching.retain(|r| rom_bit(r, position) == taken);
        }
        self.set_status_bit(SBR, id);
        self.set_status_bit(TSB, complement);
        self.set_status_bit(DIR, taken);
    }

    fn read_byte(&mut self) -> u8 {
        match self.ptr {
            DEVICE_STATUS_PTR => {
                self.status_reads += 1;
                let busy = self.stuck_busy || self.busy_polls > 0;
                self.busy_polls = self.busy_polls.saturating_sub(1);
                if busy { self.status | BUSY } else { self.status }
            }
            DEVICE_CONFIG_PTR => self.config,
            READ_DATA_PTR => self.data,
            _ => 0xff,
        }
    }
}

impl ErrorType for SimBus {
    type Error = SimError;
}

impl I2c<SevenBitAddress> for SimBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(SimError);
        }
        self.seen_addrs.push(address);
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => self.command(&**bytes),
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.read_byte();
                    }
                }
            }
        }
        Ok(())
    }
}
