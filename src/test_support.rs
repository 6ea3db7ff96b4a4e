//! Host-side doubles for the radio and the timer.

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use embassy_futures::yield_now;
use embedded_hal_async::delay::DelayNs;

use crate::error::Error;
use crate::hid::keyboard::KEYBOARD_REPORT_SIZE;
use crate::hid::report_protocol::ReportChannel;
use crate::link::HidTransport;

pub use embassy_futures::block_on;

/// Records every notification that the transport accepted.
#[derive(Default)]
pub struct RecordingTransport {
    sent: RefCell<Vec<(ReportChannel, [u8; KEYBOARD_REPORT_SIZE])>>,
    failing: RefCell<Vec<ReportChannel>>,
    pub attempts: Cell<usize>,
    pub adverts: Cell<usize>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<(ReportChannel, [u8; KEYBOARD_REPORT_SIZE])> {
        self.sent.borrow().clone()
    }

    pub fn fail_on(&self, channel: ReportChannel) {
        self.failing.borrow_mut().push(channel);
    }
}

impl HidTransport for RecordingTransport {
    fn notify(
        &self,
        channel: ReportChannel,
        report: &[u8; KEYBOARD_REPORT_SIZE],
    ) -> Result<(), Error> {
        self.attempts.set(self.attempts.get() + 1);
        if self.failing.borrow().contains(&channel) {
            return Err(Error::NotifyFailed(channel));
        }
        self.sent.borrow_mut().push((channel, *report));
        Ok(())
    }

    fn start_advertising(&self) {
        self.adverts.set(self.adverts.get() + 1);
    }
}

/// Returns immediately and remembers every millisecond wait.
#[derive(Default)]
pub struct MockDelay {
    pub waited_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.waited_ms.push(ms);
    }
}

/// Like [`MockDelay`], but gives the executor one chance to run other
/// futures on every wait, the way a real timer would.
#[derive(Default)]
pub struct YieldingDelay {
    pub waited_ms: Vec<u32>,
}

impl DelayNs for YieldingDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        yield_now().await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waited_ms.push(ms);
        yield_now().await
    }
}
