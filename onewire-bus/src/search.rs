use crate::{OneWire, RomCode};

/// Iterator over the devices found by repeated [`OneWire::search`] calls.
///
/// Created by [`OneWire::devices`]. The first call to [`Iterator::next`] rewinds the search;
/// iteration ends when the search reports no further device. A bus error is yielded once and
/// ends the iteration.
pub struct OneWireDevices<'a, T> {
    onewire: &'a mut T,
    started: bool,
    done: bool,
}

impl<'a, T: OneWire> OneWireDevices<'a, T> {
    pub(crate) fn new(onewire: &'a mut T) -> Self {
        Self {
            onewire,
            started: false,
            done: false,
        }
    }
}

impl<T: OneWire> Iterator for OneWireDevices<'_, T> {
    type Item = Result<RomCode, T::BusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.onewire.reset_search();
            self.started = true;
        }
        match self.onewire.search() {
            Ok(Some(rom)) => Some(Ok(rom)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
