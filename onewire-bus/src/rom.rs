use core::fmt;

/// 64-bit identifier of a device on the 1-Wire bus.
///
/// | Byte | Description |
/// |------|-------------|
/// | 0 | Family code (e.g., 0x28 for DS18B20) |
/// | 1-6 | Serial number |
/// | 7 | Check byte (not validated) |
///
/// Byte 0 is the first byte on the wire, and bit 0 of byte 0 is the first
/// bit seen during a ROM search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RomCode([u8; 8]);

impl RomCode {
    /// Creates a ROM code from its eight bytes, in wire order.
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Family code of the device.
    pub const fn family(&self) -> u8 {
        self.0[0]
    }

    /// The raw bytes, in wire order.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// The ROM code packed little-endian into a `u64`, family code in the lowest byte.
    pub const fn to_u64(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl From<[u8; 8]> for RomCode {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl From<u64> for RomCode {
    fn from(value: u64) -> Self {
        Self(value.to_le_bytes())
    }
}

impl From<RomCode> for [u8; 8] {
    fn from(rom: RomCode) -> Self {
        rom.0
    }
}

impl fmt::Display for RomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}
