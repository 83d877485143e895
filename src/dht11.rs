use core::time::Duration;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::hal::{IoPin, MicrosTimer};

/// The minimum interval to leave between reads.
///
/// The sensor needs about a second to settle after reporting a frame, and
/// reads issued sooner than this tend to come back garbled. The driver does
/// not pace calls itself; the caller is responsible for spacing them out.
pub const MIN_READ_INTERVAL: Duration = Duration::from_millis(1000);

// Hold the line low long enough to wake the sensor, then release it briefly
// before handing the line over.
const START_SIGNAL_LOW_US: u32 = 18_000;
const START_SIGNAL_HIGH_US: u32 = 30;
// A zero bit holds the line high for 26-28us, a one bit for about 70us.
// Sampling 40us into the high pulse lands between the two.
const BIT_SAMPLE_DELAY_US: u32 = 40;

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<TIoError> {
    /// Wrapped error from the HAL.
    Wrapped(TIoError),
}

impl<TIoError> From<TIoError> for Error<TIoError> {
    fn from(error: TIoError) -> Error<TIoError> {
        Error::Wrapped(error)
    }
}

/// One raw 40-bit frame, exactly as the sensor sent it.
///
/// Bytes are neither scaled nor combined; in particular `checksum` is
/// whatever arrived in the fifth byte, and is never compared against the
/// payload.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading {
    /// Integral part of the relative humidity, in percent.
    pub humidity: u8,
    /// Decimal part of the relative humidity.
    pub humidity_decimal: u8,
    /// Integral part of the temperature, in degrees Celsius.
    pub temperature: u8,
    /// Decimal part of the temperature.
    pub temperature_decimal: u8,
    /// The checksum byte as transmitted.
    pub checksum: u8,
}

impl RawReading {
    fn from_raw_bytes(bytes: [u8; 5]) -> RawReading {
        RawReading {
            humidity: bytes[0],
            humidity_decimal: bytes[1],
            temperature: bytes[2],
            temperature_decimal: bytes[3],
            checksum: bytes[4],
        }
    }
}

/// Limit on a single level wait, counted in line samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaitBound {
    /// Spin until the line changes, however long that takes.
    Unbounded,
    /// Give up after this many samples of the unwanted level.
    Samples(u32),
}

/// Spins while the line sits at `level`.
///
/// Returns `Ok(true)` once the line leaves `level`, or `Ok(false)` if the
/// bound ran out first. [`Dht11::read`] always waits unbounded; the bounded
/// form exists so a wrapper around the protocol can give up instead of
/// hanging.
pub fn wait_while_level<TInputPin, TError>(
    pin: &mut TInputPin,
    level: PinState,
    bound: WaitBound,
) -> Result<bool, TError>
where
    TInputPin: InputPin<Error = TError>,
{
    let mut remaining = match bound {
        WaitBound::Samples(samples) => samples,
        WaitBound::Unbounded => 0,
    };
    loop {
        if let WaitBound::Samples(_) = bound {
            if remaining == 0 {
                return Ok(false);
            }
            remaining -= 1;
        }
        let at_level = match level {
            PinState::High => pin.is_high()?,
            PinState::Low => pin.is_low()?,
        };
        if !at_level {
            return Ok(true);
        }
    }
}

/// Driver for the DHT11's single-wire link.
///
/// Owns the line for its whole lifetime. Between reads the line is parked in
/// input mode, so the sensor idles against the bus pull-up; the next read
/// reconfigures it as needed.
///
/// Due to the tight timing necessary to distinguish bits in the sensor's
/// reply, [`read`](Dht11::read) busy-waits from the start signal through the
/// final bit (roughly 22ms plus up to 5ms of data, depending on the data).
/// The calling context must not be preempted for intervals comparable to the
/// pulse widths (tens of microseconds) during sampling, or bits will decode
/// corrupted.
pub struct Dht11<TInputPin, TOutputPin, TTimer> {
    input_pin: Option<TInputPin>,
    output_pin: Option<TOutputPin>,
    timer: TTimer,
}

impl<TInputPin, TOutputPin, TError, TTimer> Dht11<TInputPin, TOutputPin, TTimer>
where
    TInputPin: InputPin<Error = TError> + IoPin<TInputPin, TOutputPin, Error = TError>,
    TOutputPin: OutputPin<Error = TError> + IoPin<TInputPin, TOutputPin, Error = TError>,
    TTimer: MicrosTimer,
{
    /// Constructs a driver that reads from the given pin.
    ///
    /// The pin should be configured as an output, driven high (the line's
    /// idle level).
    pub fn new(pin: TOutputPin, timer: TTimer) -> Dht11<TInputPin, TOutputPin, TTimer> {
        Dht11 {
            input_pin: None,
            output_pin: Some(pin),
            timer,
        }
    }

    /// Requests and decodes one frame from the sensor.
    ///
    /// Sends the start signal, hands the line to the sensor, and samples the
    /// 40 reply bits into a [`RawReading`], most significant bit first. The
    /// line is left in input mode when this returns.
    ///
    /// If the sensor never drives the line (absent, disconnected, or out of
    /// sync), this call spins forever: there is no timeout, and no failure
    /// return beyond wrapped HAL errors. Leave [`MIN_READ_INTERVAL`] between
    /// calls.
    pub fn read(&mut self) -> Result<RawReading, Error<TError>> {
        // A previous read leaves the line in input mode.
        if self.output_pin.is_none() {
            self.swap_to_output_mode()?;
        }

        self.send_start_signal()?;
        let bytes = self.receive_frame()?;
        Ok(RawReading::from_raw_bytes(bytes))
    }

    fn send_start_signal(&mut self) -> Result<(), Error<TError>> {
        self.output_pin
            .as_mut()
            .unwrap()
            .set_low()
            .map_err(Error::Wrapped)?;
        self.timer.delay_us(START_SIGNAL_LOW_US);
        self.output_pin
            .as_mut()
            .unwrap()
            .set_high()
            .map_err(Error::Wrapped)?;
        self.timer.delay_us(START_SIGNAL_HIGH_US);
        Ok(())
    }

    fn receive_frame(&mut self) -> Result<[u8; 5], Error<TError>> {
        // From here the sensor drives the line. Its acknowledgment pulse is
        // not checked; sampling starts at the first low-to-high edge.
        self.input_pin = Some(
            self.output_pin
                .take()
                .unwrap()
                .into_input_pin()
                .map_err(Error::Wrapped)?,
        );
        let input_pin = self.input_pin.as_mut().unwrap();

        let mut bytes = [0u8; 5];
        for byte in bytes.iter_mut() {
            for bit in 0..8 {
                // Leading low pulse of the bit.
                wait_while_level(input_pin, PinState::Low, WaitBound::Unbounded)
                    .map_err(Error::Wrapped)?;
                self.timer.delay_us(BIT_SAMPLE_DELAY_US);
                if input_pin.is_high().map_err(Error::Wrapped)? {
                    *byte |= 1 << (7 - bit);
                }
                // Remainder of the bit's high pulse.
                wait_while_level(input_pin, PinState::High, WaitBound::Unbounded)
                    .map_err(Error::Wrapped)?;
            }
        }
        Ok(bytes)
    }

    fn swap_to_output_mode(&mut self) -> Result<(), Error<TError>> {
        self.output_pin = Some(
            self.input_pin
                .take()
                .unwrap()
                .into_output_pin(PinState::High)
                .map_err(Error::Wrapped)?,
        );
        Ok(())
    }
}
