use embedded_hal::digital::PinState;

/// A pin that can be reconfigured between input and output modes.
///
/// `embedded-hal` 1.0 leaves pin mode switching to the individual HAL, so a
/// driver that has to turn its line around mid-transaction needs its own
/// conversion trait. Implement this for a pin wrapper whose input half senses
/// external drive and whose output half drives the line push-pull.
pub trait IoPin<TInput, TOutput> {
    type Error;

    /// Reconfigures the pin as a floating input (no pull resistor).
    fn into_input_pin(self) -> Result<TInput, Self::Error>;

    /// Reconfigures the pin as a push-pull output, driven to `state`.
    fn into_output_pin(self, state: PinState) -> Result<TOutput, Self::Error>;
}

/// A free-running microsecond counter.
///
/// This is the only clock the driver uses; every protocol delay busy-waits
/// on it.
pub trait MicrosTimer {
    /// Resets the counter to zero.
    fn restart(&mut self);

    /// Microseconds counted since the last [`restart`](MicrosTimer::restart).
    fn ticks(&self) -> u32;

    /// Busy-waits until at least `us` microseconds have elapsed.
    ///
    /// Blocks the calling context for the full duration and cannot be
    /// cancelled.
    fn delay_us(&mut self, us: u32) {
        self.restart();
        while self.ticks() < us {}
    }
}
