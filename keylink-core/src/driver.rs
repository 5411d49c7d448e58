//! Link polling driver
//!
//! One [`MatrixDriver`] owns one UART link to the remote half and all
//! state derived from it: the decoded key matrix and the encoder
//! baselines. The host scan loop calls [`scan`](MatrixDriver::scan)
//! once per tick; everything else is private.
//!
//! The receive path never reports an error. A byte that does not
//! arrive within the poll budget is recorded as 0x00, which makes the
//! terminator check fail and the whole cycle degrade to a no-op. A
//! noisy link costs responsiveness, never corrupted state.

use heapless::Vec;

use keylink_hal::Uart;
use keylink_protocol::{EncoderEvent, Frame, MatrixState, FRAME_LEN, NUM_ENCODERS, REQUEST_SNAPSHOT};

use crate::encoder::EncoderTracker;

/// Default per-byte availability poll budget
///
/// An iteration count, not a wall-clock duration: one iteration is one
/// `available()` check. At the fixed link baud a byte normally arrives
/// within a few dozen iterations; the budget only matters when a wire
/// comes loose.
pub const DEFAULT_POLL_BUDGET: u32 = 10_000;

/// Outcome of one scan cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Whether any matrix row changed
    pub changed: bool,
    /// Encoder steps detected in this cycle, at most one per channel
    pub events: Vec<EncoderEvent, NUM_ENCODERS>,
}

impl ScanResult {
    /// A cycle that produced no new information
    fn silent() -> Self {
        Self {
            changed: false,
            events: Vec::new(),
        }
    }
}

/// Polling driver for the remote matrix link
///
/// The transport must already be configured at
/// [`LINK_BAUD`](keylink_protocol::LINK_BAUD); constructing the driver
/// is the single initialization point of the lifecycle.
pub struct MatrixDriver<U> {
    uart: U,
    matrix: MatrixState,
    encoders: EncoderTracker,
    poll_budget: u32,
}

impl<U: Uart> MatrixDriver<U> {
    /// Create a driver with the default poll budget
    pub fn new(uart: U) -> Self {
        Self::with_poll_budget(uart, DEFAULT_POLL_BUDGET)
    }

    /// Create a driver with a custom per-byte poll budget
    pub fn with_poll_budget(uart: U, poll_budget: u32) -> Self {
        Self {
            uart,
            matrix: MatrixState::new(),
            encoders: EncoderTracker::new(),
            poll_budget,
        }
    }

    /// The key matrix as of the last valid snapshot
    pub fn matrix(&self) -> &MatrixState {
        &self.matrix
    }

    /// Perform one request/response cycle
    ///
    /// Requests a snapshot, collects and validates the response frame,
    /// updates the matrix and encoder state. An invalid or missing
    /// response leaves all state untouched and reports a silent cycle;
    /// the caller cannot tell a quiet peer from a broken wire, by
    /// construction of the protocol.
    pub fn scan(&mut self) -> ScanResult {
        let frame = self.receive_frame();
        if !frame.is_valid() {
            return ScanResult::silent();
        }

        let changed = self.matrix.apply(&frame);
        let events = self.encoders.update(&frame);
        ScanResult { changed, events }
    }

    /// Request and collect one frame, substituting zero for missing bytes
    fn receive_frame(&mut self) -> Frame {
        self.uart.write(&[REQUEST_SNAPSHOT]).ok();

        let mut bytes = [0u8; FRAME_LEN];
        for slot in bytes.iter_mut() {
            if self.wait_available() {
                // A failed read degrades like a timeout: the slot
                // stays zero and validation rejects the frame.
                *slot = self.uart.read_byte().unwrap_or(0);
            }
        }
        Frame::from_bytes(bytes)
    }

    /// Spin on the availability check, bounded by the poll budget
    fn wait_available(&mut self) -> bool {
        for _ in 0..self.poll_budget {
            if self.uart.available() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keylink_hal::{UartRx, UartTx};
    use keylink_protocol::{Direction, EncoderChannel, FRAME_TERMINATOR, MATRIX_ROWS, PAYLOAD_LEN};

    /// Scripted transport: replays queued response bytes, optionally
    /// delaying each byte by a fixed number of availability polls.
    struct MockUart {
        rx: heapless::Vec<u8, 64>,
        cursor: usize,
        latency: u32,
        waited: u32,
        fail_reads: bool,
        writes: heapless::Vec<u8, 16>,
    }

    impl MockUart {
        fn silent() -> Self {
            Self {
                rx: heapless::Vec::new(),
                cursor: 0,
                latency: 0,
                waited: 0,
                fail_reads: false,
                writes: heapless::Vec::new(),
            }
        }

        fn respond_with(frame: &Frame) -> Self {
            let mut uart = Self::silent();
            uart.queue(frame);
            uart
        }

        fn queue(&mut self, frame: &Frame) {
            self.rx.extend_from_slice(frame.as_bytes()).unwrap();
        }

        fn with_latency(mut self, latency: u32) -> Self {
            self.latency = latency;
            self
        }

        fn failing_reads(mut self) -> Self {
            self.fail_reads = true;
            self
        }
    }

    impl UartTx for MockUart {
        type Error = ();

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            self.writes.extend_from_slice(data).map_err(|_| ())
        }
    }

    impl UartRx for MockUart {
        type Error = ();

        fn available(&mut self) -> bool {
            if self.fail_reads {
                return true;
            }
            if self.cursor >= self.rx.len() {
                return false;
            }
            if self.waited < self.latency {
                self.waited += 1;
                return false;
            }
            true
        }

        fn read_byte(&mut self) -> Result<u8, ()> {
            if self.fail_reads {
                return Err(());
            }
            let byte = self.rx[self.cursor];
            self.cursor += 1;
            self.waited = 0;
            Ok(byte)
        }
    }

    fn snapshot(rows: &[u16; MATRIX_ROWS], left: u8, right: u8) -> Frame {
        Frame::compose(rows, &[left, right])
    }

    #[test]
    fn test_scan_decodes_valid_snapshot() {
        let rows = [0x0003, 0, 0x2001, 0, 0x3FFF];
        let mut driver = MatrixDriver::new(MockUart::respond_with(&snapshot(&rows, 0, 0)));

        let result = driver.scan();
        assert!(result.changed);
        assert!(result.events.is_empty()); // first frame calibrates encoders
        assert_eq!(driver.matrix().rows(), &rows);
    }

    #[test]
    fn test_identical_snapshot_is_quiet() {
        let frame = snapshot(&[0x0042, 0, 0, 0, 0], 7, 9);
        let mut uart = MockUart::respond_with(&frame);
        uart.queue(&frame);

        let mut driver = MatrixDriver::new(uart);
        assert!(driver.scan().changed);

        let second = driver.scan();
        assert!(!second.changed);
        assert!(second.events.is_empty());
    }

    #[test]
    fn test_request_byte_written_each_scan() {
        let frame = snapshot(&[0; MATRIX_ROWS], 0, 0);
        let mut uart = MockUart::respond_with(&frame);
        uart.queue(&frame);

        let mut driver = MatrixDriver::new(uart);
        driver.scan();
        driver.scan();
        assert_eq!(&driver.uart.writes[..], &[REQUEST_SNAPSHOT, REQUEST_SNAPSHOT]);
    }

    #[test]
    fn test_bad_terminator_discards_frame() {
        let rows = [0x0100, 0, 0, 0, 0];
        let mut uart = MockUart::respond_with(&snapshot(&rows, 10, 0));

        // Second response: plausible payload, corrupt terminator
        let mut bytes = *snapshot(&[0x1111; MATRIX_ROWS], 90, 90).as_bytes();
        bytes[PAYLOAD_LEN] = 0x7F;
        uart.queue(&Frame::from_bytes(bytes));

        let mut driver = MatrixDriver::new(uart);
        driver.scan();

        let result = driver.scan();
        assert!(!result.changed);
        assert!(result.events.is_empty());
        assert_eq!(driver.matrix().rows(), &rows);
    }

    #[test]
    fn test_invalid_frame_preserves_encoder_baseline() {
        let mut uart = MockUart::respond_with(&snapshot(&[0; MATRIX_ROWS], 10, 0));

        let mut bytes = [0xFFu8; keylink_protocol::FRAME_LEN];
        bytes[PAYLOAD_LEN] = 0x00;
        uart.queue(&Frame::from_bytes(bytes));

        uart.queue(&snapshot(&[0; MATRIX_ROWS], 12, 0));

        let mut driver = MatrixDriver::new(uart);
        driver.scan(); // calibrate at 10
        driver.scan(); // discarded, must not touch the baseline

        let result = driver.scan();
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].channel, EncoderChannel::Left);
        assert_eq!(result.events[0].direction, Direction::Clockwise);
    }

    #[test]
    fn test_silent_peer_is_idempotent_noop() {
        let mut driver = MatrixDriver::with_poll_budget(MockUart::silent(), 16);

        for _ in 0..3 {
            let result = driver.scan();
            assert!(!result.changed);
            assert!(result.events.is_empty());
        }
        assert_eq!(driver.matrix().rows(), &[0; MATRIX_ROWS]);
    }

    #[test]
    fn test_slow_bytes_within_budget_are_received() {
        let rows = [1, 2, 3, 4, 5];
        let uart = MockUart::respond_with(&snapshot(&rows, 0, 0)).with_latency(5);

        let mut driver = MatrixDriver::with_poll_budget(uart, 8);
        assert!(driver.scan().changed);
        assert_eq!(driver.matrix().rows(), &rows);
    }

    #[test]
    fn test_bytes_slower_than_budget_invalidate_frame() {
        let uart = MockUart::respond_with(&snapshot(&[1, 2, 3, 4, 5], 0, 0)).with_latency(1_000);

        let mut driver = MatrixDriver::with_poll_budget(uart, 8);
        let result = driver.scan();
        assert!(!result.changed);
        assert_eq!(driver.matrix().rows(), &[0; MATRIX_ROWS]);
    }

    #[test]
    fn test_read_errors_degrade_to_silence() {
        let uart = MockUart::silent().failing_reads();

        let mut driver = MatrixDriver::with_poll_budget(uart, 8);
        let result = driver.scan();
        assert!(!result.changed);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_encoder_step_through_scan() {
        let mut uart = MockUart::respond_with(&snapshot(&[0; MATRIX_ROWS], 10, 20));
        uart.queue(&snapshot(&[0; MATRIX_ROWS], 10, 22));

        let mut driver = MatrixDriver::new(uart);
        driver.scan();

        let result = driver.scan();
        assert!(!result.changed);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].channel, EncoderChannel::Right);
        assert_eq!(result.events[0].direction, Direction::Clockwise);
    }

    #[test]
    fn test_drivers_are_independent() {
        let mut left = MatrixDriver::new(MockUart::respond_with(&snapshot(
            &[0x0001, 0, 0, 0, 0],
            0,
            0,
        )));
        let mut right = MatrixDriver::new(MockUart::silent());

        assert!(left.scan().changed);
        assert!(!right.scan().changed);
        assert_eq!(right.matrix().rows(), &[0; MATRIX_ROWS]);
        assert_eq!(left.matrix().row(0), 0x0001);
    }

    #[test]
    fn test_frame_terminator_constant_matches_wire() {
        // Guard against the sentinel drifting from the peer firmware
        assert_eq!(FRAME_TERMINATOR, 0xE0);
        assert_eq!(REQUEST_SNAPSHOT, b's');
    }
}
