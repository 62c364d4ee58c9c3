use crate::{Ds2482, Ds2482Result};
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

/// Trait for DS2482 registers that can be read back through the read pointer.
pub trait Interact: Sized + From<u8> {
    /// Pointer code that selects this register for reading.
    const READ_PTR: u8;

    /// Moves the read pointer to this register and reads it.
    fn read<I: I2c<SevenBitAddress>, D: DelayNs>(
        dev: &mut Ds2482<I, D>,
    ) -> Ds2482Result<Self, I::Error> {
        dev.set_read_pointer(Self::READ_PTR)?;
        Ok(Self::from(dev.read_register()?))
    }
}
