use crate::{
    DeviceConfiguration, DeviceStatus, Ds2482Error, Ds2482Result, Interact, SearchState,
    registers::{DEVICE_STATUS_PTR, READ_PTR_CMD},
};
use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};
use log::warn;

/// Base I2C address; the three address-select pins are OR'd into the low bits.
pub(crate) const DS2482_BASE_ADDR: u8 = 0x18;
pub(crate) const DEFAULT_BUSY_LIMIT: u16 = 1000;
pub(crate) const DEFAULT_SETTLE_MS: u32 = 20;

/// A DS2482 I2C to 1-Wire bridge device.
///
/// Takes ownership of an I2C bus (implementing [`I2c`](embedded_hal::i2c::I2c) trait)
/// and a timer object implementing the [`DelayNs`](embedded_hal::delay::DelayNs) trait.
///
/// The device is not shared: one owner drives one chip, one call at a time.
pub struct Ds2482<I, D> {
    pub(crate) i2c: I,
    pub(crate) addr: u8,
    pub(crate) delay: D,
    pub(crate) busy_limit: u16,
    pub(crate) settle_ms: u32,
    pub(crate) timed_out: bool,
    pub(crate) search: SearchState,
}

/// Builder for creating a [`Ds2482`] instance with custom configuration.
pub struct Ds2482Builder {
    pin_select: u8,
    busy_limit: u16,
    settle_ms: u32,
    config: Option<DeviceConfiguration>,
}

impl Default for Ds2482Builder {
    fn default() -> Self {
        Ds2482Builder {
            pin_select: 0,
            busy_limit: DEFAULT_BUSY_LIMIT,
            settle_ms: DEFAULT_SETTLE_MS,
            config: None,
        }
    }
}

impl Ds2482Builder {
    /// Sets the state of the address-select pins (0 to 7).
    pub fn with_pin_select(mut self, pins: u8) -> Self {
        self.pin_select = pins;
        self
    }

    /// Sets the maximum number of status polls in one busy-wait.
    ///
    /// A busy-wait that runs out of polls marks the device as timed out
    /// and carries on with the last status read.
    pub fn with_busy_limit(mut self, polls: u16) -> Self {
        self.busy_limit = polls;
        self
    }

    /// Sets the delay that follows every busy-wait, in milliseconds.
    pub fn with_settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Resets the chip and writes this configuration when the device is built.
    pub fn with_config(mut self, config: DeviceConfiguration) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds a new `Ds2482` instance with the specified configuration.
    ///
    /// No bus traffic happens unless a configuration was given.
    pub fn build<I: I2c<SevenBitAddress>, D: DelayNs>(
        self,
        i2c: I,
        delay: D,
    ) -> Ds2482Result<Ds2482<I, D>, I::Error> {
        if self.pin_select > 0b111 {
            return Err(Ds2482Error::InvalidPinSelect(self.pin_select));
        }
        let mut dev = Ds2482 {
            i2c,
            addr: DS2482_BASE_ADDR | self.pin_select,
            delay,
            busy_limit: self.busy_limit,
            settle_ms: self.settle_ms,
            timed_out: false,
            search: SearchState::default(),
        };
        if let Some(config) = self.config {
            dev.device_reset()?;
            if !dev.configure(config)? {
                return Err(Ds2482Error::ConfigurationRejected(config.into_bits()));
            }
        }
        Ok(dev)
    }
}

impl<I, D> Ds2482<I, D> {
    /// Creates a new instance of `Ds2482` at the base address with default settings.
    pub fn new(i2c: I, delay: D) -> Self {
        Ds2482 {
            i2c,
            addr: DS2482_BASE_ADDR,
            delay,
            busy_limit: DEFAULT_BUSY_LIMIT,
            settle_ms: DEFAULT_SETTLE_MS,
            timed_out: false,
            search: SearchState::default(),
        }
    }

    /// The 7-bit I2C address of the chip.
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Whether any busy-wait has run out of polls since the flag was last cleared.
    ///
    /// The flag is advisory: no operation checks it.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Clears the timed out flag.
    pub fn clear_timed_out(&mut self) {
        self.timed_out = false;
    }

    /// Gives back the I2C bus and the timer.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }
}

impl<I: I2c<SevenBitAddress>, D: DelayNs> Ds2482<I, D> {
    /// Reads the status register, moving the read pointer to it first.
    pub fn status(&mut self) -> Ds2482Result<DeviceStatus, I::Error> {
        DeviceStatus::read(self)
    }

    /// Reads back the configuration register.
    pub fn configuration(&mut self) -> Ds2482Result<DeviceConfiguration, I::Error> {
        DeviceConfiguration::read(self)
    }

    /// Reads one status byte.
    ///
    /// With `select_pointer` the read pointer is moved to the status register
    /// first; otherwise the byte comes from wherever the pointer currently is,
    /// which is the status register after any 1-Wire command.
    pub fn poll_status(&mut self, select_pointer: bool) -> Ds2482Result<DeviceStatus, I::Error> {
        if select_pointer {
            self.set_read_pointer(DEVICE_STATUS_PTR)?;
        }
        Ok(DeviceStatus::from_bits(self.read_register()?))
    }

    /// Polls the status register until the 1-Wire line is idle.
    ///
    /// At most `busy_limit` polls are made. Running out of polls sets the
    /// timed out flag and returns the last status anyway. Either way the
    /// settle delay follows before returning.
    pub fn busy_wait(&mut self, select_pointer: bool) -> Ds2482Result<DeviceStatus, I::Error> {
        let mut status = self.poll_status(select_pointer)?;
        let mut polls: u16 = 1;
        while status.busy() {
            if polls >= self.busy_limit {
                self.timed_out = true;
                warn!(
                    "DS2482 at {:#04x} still busy after {} polls",
                    self.addr, polls
                );
                break;
            }
            status = self.poll_status(select_pointer)?;
            polls += 1;
        }
        self.delay.delay_ms(self.settle_ms);
        Ok(status)
    }

    pub(crate) fn set_read_pointer(&mut self, ptr: u8) -> Ds2482Result<(), I::Error> {
        self.write_block(READ_PTR_CMD, ptr)
    }

    pub(crate) fn write_command(&mut self, cmd: u8) -> Ds2482Result<(), I::Error> {
        self.i2c.write(self.addr, &[cmd])?;
        Ok(())
    }

    pub(crate) fn write_block(&mut self, cmd: u8, data: u8) -> Ds2482Result<(), I::Error> {
        self.i2c.write(self.addr, &[cmd, data])?;
        Ok(())
    }

    pub(crate) fn read_register(&mut self) -> Ds2482Result<u8, I::Error> {
        let mut val = [0; 1];
        self.i2c.read(self.addr, &mut val)?;
        Ok(val[0])
    }
}
