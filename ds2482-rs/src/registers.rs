use crate::traits::Interact;
use bitfield_struct::bitfield;

pub(crate) const DEVICE_RST_CMD: u8 = 0xf0; // Reset the device
pub(crate) const WRITE_CONFIG_CMD: u8 = 0xd2; // Write the configuration register
pub(crate) const READ_PTR_CMD: u8 = 0xe1; // Set the read pointer
pub(crate) const DEVICE_STATUS_PTR: u8 = 0xf0; // Status register
pub(crate) const READ_DATA_PTR: u8 = 0xe1; // Read data register
pub(crate) const DEVICE_CONFIG_PTR: u8 = 0xc3; // Configuration register

/// Status register of the DS2482.
///
/// The read-only status register reports 1-Wire activity, the results of
/// reset, single bit and triplet commands, and whether the chip itself has
/// been reset. Every 1-Wire command leaves the read pointer on this register.
#[bitfield(u8)]
pub struct DeviceStatus {
    /// 1WB: the 1-Wire line is busy executing a command.
    pub busy: bool,
    /// PPD: a presence pulse was seen during the last 1-Wire reset.
    pub presence_pulse_detect: bool,
    /// SD: the line was shorted during the last 1-Wire reset.
    pub short_detected: bool,
    /// LL: logic level of the 1-Wire line, sampled when the register is read.
    pub logic_level: bool,
    /// RST: the chip has performed an internal reset and not yet been configured.
    pub device_reset: bool,
    /// SBR: line state sampled in a single bit command, or the first bit of a triplet.
    pub single_bit_result: bool,
    /// TSB: line state sampled in the second bit of a triplet.
    pub triplet_second_bit: bool,
    /// DIR: search direction chosen by the third bit of a triplet.
    pub branch_dir_taken: bool,
}

impl Interact for DeviceStatus {
    const READ_PTR: u8 = DEVICE_STATUS_PTR;
}

/// Device configuration register.
///
/// The chip stores the lower nibble. On the wire the nibble is sent together
/// with its one's complement in the upper nibble; reads return the upper
/// nibble as zero. After a device reset the register reads 00h.
///
/// Bit 3 selects 1-Wire overdrive speed, which this driver does not support,
/// so it has no accessor and is always written as 0.
#[bitfield(u8)]
pub struct DeviceConfiguration {
    /// APU: drive rising edges with the active pullup instead of the resistor.
    pub active_pullup: bool,
    /// PPM: mask presence pulses (the chip then always reports presence).
    pub presence_pulse_masking: bool,
    /// SPU: strong pullup after the next byte or bit write, cleared by the chip afterwards.
    pub strong_pullup: bool,
    #[bits(5)]
    __: u8,
}

impl Interact for DeviceConfiguration {
    const READ_PTR: u8 = DEVICE_CONFIG_PTR;
}

/// Byte written after the configuration command: the nibble and its complement.
pub(crate) const fn config_to_wire(cfg: u8) -> u8 {
    (cfg & 0x0f) | ((!cfg & 0x0f) << 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bits_follow_register_layout() {
        let status = DeviceStatus::from_bits(0b1010_0110);
        assert!(!status.busy());
        assert!(status.presence_pulse_detect());
        assert!(status.short_detected());
        assert!(!status.logic_level());
        assert!(!status.device_reset());
        assert!(status.single_bit_result());
        assert!(!status.triplet_second_bit());
        assert!(status.branch_dir_taken());
        assert!(DeviceStatus::from_bits(0x01).busy());
        assert!(DeviceStatus::from_bits(0x10).device_reset());
    }

    #[test]
    fn configuration_bits_pack_into_lower_nibble() {
        let cfg = DeviceConfiguration::new()
            .with_active_pullup(true)
            .with_strong_pullup(true);
        assert_eq!(cfg.into_bits(), 0b0101);
        assert!(DeviceConfiguration::from_bits(0x02).presence_pulse_masking());
    }

    #[test]
    fn wire_byte_carries_complement_in_upper_nibble() {
        assert_eq!(config_to_wire(0x0), 0xf0);
        assert_eq!(config_to_wire(0x1), 0xe1);
        assert_eq!(config_to_wire(0x5), 0xa5);
        assert_eq!(config_to_wire(0xf), 0x0f);
        for cfg in 0..16u8 {
            let wire = config_to_wire(cfg);
            assert_eq!(wire & 0x0f, cfg);
            assert_eq!(wire >> 4, !cfg & 0x0f);
        }
    }
}
