use crate::{
    DeviceStatus, Ds2482, Ds2482Result,
    registers::{DEVICE_RST_CMD, READ_DATA_PTR, WRITE_CONFIG_CMD, config_to_wire},
};
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};
use log::debug;
use onewire_bus::{ONEWIRE_MATCH_ROM_CMD, ONEWIRE_SKIP_ROM_CMD, RomCode};

pub(crate) const ONEWIRE_RESET_CMD: u8 = 0xb4;
pub(crate) const ONEWIRE_WRITE_BYTE: u8 = 0xa5;
pub(crate) const ONEWIRE_READ_BYTE: u8 = 0x96;
pub(crate) const ONEWIRE_SINGLE_BIT: u8 = 0x87;
pub(crate) const ONEWIRE_TRIPLET: u8 = 0x78;

/// Direction bit of the single bit and triplet commands.
const fn bit_byte(bit: bool) -> u8 {
    if bit { 0x80 } else { 0x0 }
}

impl<I: I2c<SevenBitAddress>, D: DelayNs> Ds2482<I, D> {
    /// Reset the device.
    ///
    /// Performs a global reset of the chip's state machine logic and terminates
    /// any ongoing 1-Wire communication. The 1-Wire bus itself is not reset;
    /// see [`Ds2482::wire_reset`].
    pub fn device_reset(&mut self) -> Ds2482Result<(), I::Error> {
        debug!("DS2482 at {:#04x}: device reset", self.addr);
        self.write_command(DEVICE_RST_CMD)
    }

    /// Writes the configuration register.
    ///
    /// Accepts a raw nibble or a [`DeviceConfiguration`](crate::DeviceConfiguration).
    /// Only the lower nibble is sent, but the read-back is compared with the
    /// whole value, so anything above 0x0f is reported as rejected.
    ///
    /// # Returns
    /// `true` if the chip echoes the configuration back.
    pub fn configure<C: Into<u8>>(&mut self, cfg: C) -> Ds2482Result<bool, I::Error> {
        let cfg = cfg.into();
        self.busy_wait(true)?;
        self.write_block(WRITE_CONFIG_CMD, config_to_wire(cfg))?;
        let accepted = self.read_register()? == cfg;
        debug!(
            "DS2482 at {:#04x}: configuration {:#03x} {}",
            self.addr,
            cfg,
            if accepted { "accepted" } else { "rejected" }
        );
        Ok(accepted)
    }

    /// Issues a 1-Wire reset pulse and samples the presence pulse.
    ///
    /// # Returns
    /// `true` if at least one device answered.
    pub fn wire_reset(&mut self) -> Ds2482Result<bool, I::Error> {
        self.busy_wait(true)?;
        self.write_command(ONEWIRE_RESET_CMD)?;
        let status = self.busy_wait(false)?;
        Ok(status.presence_pulse_detect())
    }

    /// Writes one byte to the 1-Wire bus.
    pub fn wire_write_byte(&mut self, byte: u8) -> Ds2482Result<(), I::Error> {
        self.busy_wait(true)?;
        self.write_block(ONEWIRE_WRITE_BYTE, byte)
    }

    /// Reads one byte from the 1-Wire bus.
    pub fn wire_read_byte(&mut self) -> Ds2482Result<u8, I::Error> {
        self.busy_wait(true)?;
        self.write_command(ONEWIRE_READ_BYTE)?;
        self.busy_wait(false)?;
        self.set_read_pointer(READ_DATA_PTR)?;
        self.read_register()
    }

    /// Writes one bit to the 1-Wire bus.
    pub fn wire_write_bit(&mut self, bit: bool) -> Ds2482Result<(), I::Error> {
        self.busy_wait(true)?;
        self.write_block(ONEWIRE_SINGLE_BIT, bit_byte(bit))
    }

    /// Reads one bit from the 1-Wire bus.
    ///
    /// A read is a write-one time slot; any device pulling the line low turns
    /// the sampled bit into a zero.
    pub fn wire_read_bit(&mut self) -> Ds2482Result<bool, I::Error> {
        self.wire_write_bit(true)?;
        Ok(self.busy_wait(true)?.single_bit_result())
    }

    /// Sends the Skip ROM command, addressing every device on the bus.
    pub fn wire_skip(&mut self) -> Ds2482Result<(), I::Error> {
        self.wire_write_byte(ONEWIRE_SKIP_ROM_CMD)
    }

    /// Sends the Match ROM command followed by the eight ROM bytes.
    pub fn wire_select(&mut self, rom: &RomCode) -> Ds2482Result<(), I::Error> {
        self.wire_write_byte(ONEWIRE_MATCH_ROM_CMD)?;
        for &b in rom.as_bytes().iter() {
            self.wire_write_byte(b)?;
        }
        Ok(())
    }

    /// Runs one search step: two read slots followed by a write slot.
    ///
    /// `direction` is written when the two read slots both come back 0.
    /// The returned status carries the id bit (SBR), its complement (TSB)
    /// and the direction actually written (DIR).
    pub fn wire_triplet(&mut self, direction: bool) -> Ds2482Result<DeviceStatus, I::Error> {
        self.busy_wait(false)?;
        self.write_block(ONEWIRE_TRIPLET, bit_byte(direction))?;
        self.busy_wait(false)
    }
}
