use crate::{Ds2482, Ds2482Error};
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};
use onewire_bus::{OneWire, RomCode};

impl<I2C: I2c<SevenBitAddress>, D: DelayNs> OneWire for Ds2482<I2C, D> {
    type BusError = Ds2482Error<I2C::Error>;

    fn reset(&mut self) -> Result<bool, Self::BusError> {
        self.wire_reset()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::BusError> {
        self.wire_write_byte(byte)
    }

    fn read_byte(&mut self) -> Result<u8, Self::BusError> {
        self.wire_read_byte()
    }

    fn write_bit(&mut self, bit: bool) -> Result<(), Self::BusError> {
        self.wire_write_bit(bit)
    }

    fn read_bit(&mut self) -> Result<bool, Self::BusError> {
        self.wire_read_bit()
    }

    fn reset_search(&mut self) {
        Ds2482::reset_search(self)
    }

    fn search(&mut self) -> Result<Option<RomCode>, Self::BusError> {
        Ds2482::search(self)
    }

    fn skip(&mut self) -> Result<(), Self::BusError> {
        self.wire_skip()
    }

    fn select(&mut self, rom: &RomCode) -> Result<(), Self::BusError> {
        self.wire_select(rom)
    }
}
