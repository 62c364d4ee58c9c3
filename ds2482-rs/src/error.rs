#[derive(Debug, PartialEq)]
/// DS2482 driver errors.
pub enum Ds2482Error<E> {
    /// I2C bus errors.
    I2c(E),
    /// The address pin selection does not fit in three bits.
    InvalidPinSelect(u8),
    /// The chip did not echo the configuration that was written.
    ConfigurationRejected(u8),
}

impl<E> From<E> for Ds2482Error<E> {
    fn from(value: E) -> Self {
        Self::I2c(value)
    }
}
