#![no_std]

/// Driver for reading raw 40-bit frames from a DHT11 sensor over its
/// single-wire protocol.
///
/// Refer to [this datasheet](https://cdn-shop.adafruit.com/datasheets/DHT11-chinese.pdf)
/// for more information about the device.
pub mod dht11;
/// Capability traits for the GPIO line and the microsecond timer the driver
/// is written against.
pub mod hal;
