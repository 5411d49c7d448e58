//! UART serial communication abstractions
//!
//! Provides traits for polled serial communication that can be
//! implemented by chip-specific HALs or test mocks.
//!
//! The receive side is polled rather than blocking: the link driver's
//! timeout unit is one availability check, so the trait exposes
//! [`UartRx::available`] and a single-byte read instead of a
//! buffer-filling blocking read.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one received byte is ready to read
    ///
    /// Must not block and must not consume data.
    fn available(&mut self) -> bool;

    /// Read a single byte from the UART
    ///
    /// Only called after [`available`](UartRx::available) reported a
    /// pending byte; may block until that byte is delivered.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}
