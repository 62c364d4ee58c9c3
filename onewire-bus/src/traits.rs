use crate::{ONEWIRE_MATCH_ROM_CMD, ONEWIRE_SKIP_ROM_CMD, OneWireDevices, RomCode};

/// Trait for 1-Wire bus masters.
///
/// This trait defines the operations an application needs from a 1-Wire master: resetting
/// the bus, writing and reading bits and bytes, and enumerating devices with the ROM search.
/// Failures reported through [`OneWire::BusError`] come from the hardware that carries the
/// bus; absent devices and exhausted searches are ordinary return values.
pub trait OneWire {
    /// The error type returned by the underlying hardware.
    type BusError;

    /// Resets the 1-Wire bus.
    ///
    /// # Returns
    /// `true` if at least one device answered with a presence pulse.
    fn reset(&mut self) -> Result<bool, Self::BusError>;

    /// Writes a byte to the 1-Wire bus.
    /// # Arguments
    /// * `byte` - The byte to write to the bus.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::BusError>;

    /// Reads a byte from the 1-Wire bus.
    fn read_byte(&mut self) -> Result<u8, Self::BusError>;

    /// Writes a single bit to the 1-Wire bus.
    fn write_bit(&mut self, bit: bool) -> Result<(), Self::BusError>;

    /// Reads a single bit from the 1-Wire bus.
    fn read_bit(&mut self) -> Result<bool, Self::BusError>;

    /// Rewinds the ROM search so the next [`OneWire::search`] starts a fresh enumeration.
    fn reset_search(&mut self);

    /// Finds the next device on the bus.
    ///
    /// Repeated calls walk the whole population, one device per call.
    ///
    /// # Returns
    /// The ROM code of the next device, or `None` once every device has been reported,
    /// when nothing answered the reset, or when the bus gave an inconsistent answer
    /// during the search.
    fn search(&mut self) -> Result<Option<RomCode>, Self::BusError>;

    /// Addresses every device on the bus at once (Skip ROM).
    fn skip(&mut self) -> Result<(), Self::BusError> {
        self.write_byte(ONEWIRE_SKIP_ROM_CMD)
    }

    /// Addresses the single device with the given ROM code (Match ROM).
    ///
    /// Sends the Match ROM command followed by the eight ROM bytes in wire order.
    fn select(&mut self, rom: &RomCode) -> Result<(), Self::BusError> {
        self.write_byte(ONEWIRE_MATCH_ROM_CMD)?;
        for &b in rom.as_bytes().iter() {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Returns an iterator over every device on the bus.
    ///
    /// The search is rewound before the first device is looked up.
    fn devices(&mut self) -> OneWireDevices<'_, Self>
    where
        Self: Sized,
    {
        OneWireDevices::new(self)
    }
}
