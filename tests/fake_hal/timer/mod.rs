use super::concurrent::{self, Event};
use simple_dht11::hal::MicrosTimer;
use std::cell::Cell;

/// Fake microsecond counter that records requested delays under its name
/// instead of spinning.
#[derive(Debug)]
pub struct Timer {
    name: &'static str,
    count: Cell<u32>,
}

impl Timer {
    pub fn new(name: &'static str) -> Timer {
        Timer {
            name,
            count: Cell::new(0),
        }
    }
}

impl MicrosTimer for Timer {
    fn restart(&mut self) {
        self.count.set(0);
    }

    // Advances one microsecond per poll.
    fn ticks(&self) -> u32 {
        let ticks = self.count.get() + 1;
        self.count.set(ticks);
        ticks
    }

    fn delay_us(&mut self, us: u32) {
        concurrent::push_event(self.name, Event::DelayMicros(us));
    }
}
