//! Recording stand-ins for the bus, the control pins and the delay provider.
//!
//! Every handle created from one [`MockBus`] writes into the same log, so a test can
//! move the hardware into a driver and still inspect what happened on the wire.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::st7789::bus::Bus;

/// One bus transfer, classified by the level of the DC line at the time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Cmd(u8),
    Data(Vec<u8>),
}

#[derive(Default)]
struct Log {
    transfers: Vec<Transfer>,
    pins: Vec<(&'static str, bool)>,
    delays_ms: Vec<u32>,
    dc_high: bool,
    clock_rate: Option<u32>,
    mode3: bool,
    fail: bool,
}

#[derive(Clone, Default)]
pub struct MockBus {
    log: Arc<Mutex<Log>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            log: self.log.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            log: self.log.clone(),
        }
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.log.lock().unwrap().transfers.clone()
    }

    /// Levels driven on the named pin, in order
    pub fn pin_events(&self, name: &str) -> Vec<bool> {
        self.log
            .lock()
            .unwrap()
            .pins
            .iter()
            .filter(|(pin, _)| *pin == name)
            .map(|(_, level)| *level)
            .collect()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.log.lock().unwrap().delays_ms.clone()
    }

    pub fn clock_rate(&self) -> Option<u32> {
        self.log.lock().unwrap().clock_rate
    }

    pub fn mode3(&self) -> bool {
        self.log.lock().unwrap().mode3
    }

    /// Make every following transmit fail with `BusWriteError`
    pub fn fail_transfers(&self, fail: bool) {
        self.log.lock().unwrap().fail = fail;
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        let mut log = self.log.lock().unwrap();
        log.transfers.clear();
        log.pins.clear();
        log.delays_ms.clear();
    }
}

impl Bus for MockBus {
    fn set_clock_rate(&mut self, hz: u32) -> Result<(), DisplayError> {
        self.log.lock().unwrap().clock_rate = Some(hz);
        Ok(())
    }

    fn select_mode3(&mut self) -> Result<(), DisplayError> {
        self.log.lock().unwrap().mode3 = true;
        Ok(())
    }

    fn transmit(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        let mut log = self.log.lock().unwrap();
        if log.fail {
            return Err(DisplayError::BusWriteError);
        }
        let transfer = if log.dc_high {
            Transfer::Data(data.to_vec())
        } else {
            assert_eq!(data.len(), 1, "commands are sent one byte at a time");
            Transfer::Cmd(data[0])
        };
        log.transfers.push(transfer);
        Ok(())
    }
}

pub struct MockPin {
    name: &'static str,
    log: Arc<Mutex<Log>>,
}

impl MockPin {
    fn drive(&mut self, level: bool) {
        let mut log = self.log.lock().unwrap();
        if self.name == "dc" {
            log.dc_high = level;
        }
        log.pins.push((self.name, level));
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

/// Records requested delays without sleeping
pub struct MockDelay {
    log: Arc<Mutex<Log>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.lock().unwrap().delays_ms.push(ms);
    }
}
