//! Adapter from `embedded-io` peripherals to the transport traits
//!
//! Most HALs (embassy-rp buffered UARTs among them) expose their serial
//! peripherals through the `embedded-io` blocking traits. [`BlockingIo`]
//! wraps any such peripheral and implements [`UartTx`]/[`UartRx`] on
//! top of it, so firmware does not need a chip-specific shim.

use embedded_io::{Read, ReadReady, Write};

use crate::uart::{UartRx, UartTx};

/// Wrapper implementing the transport traits over an `embedded-io`
/// peripheral
pub struct BlockingIo<T>(T);

impl<T> BlockingIo<T> {
    /// Wrap a peripheral
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Release the wrapped peripheral
    pub fn release(self) -> T {
        self.0
    }
}

impl<T: Write> UartTx for BlockingIo<T> {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(data)
    }
}

impl<T: Read + ReadReady> UartRx for BlockingIo<T> {
    type Error = T::Error;

    fn available(&mut self) -> bool {
        // A peripheral that cannot report readiness is treated as
        // having nothing pending; the driver degrades the byte to zero.
        self.0.read_ready().unwrap_or(false)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        // Called after `available()`, so a well-behaved peripheral
        // delivers exactly one byte; a zero-length read leaves 0x00.
        self.0.read(&mut buf)?;
        Ok(buf[0])
    }
}
