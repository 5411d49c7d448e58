//! Link scan task
//!
//! Polls the remote half once per tick and fans the results out.

use defmt::*;
use embassy_rp::uart::BufferedUart;
use embassy_time::{Duration, Ticker};

use keylink_core::MatrixDriver;
use keylink_hal::BlockingIo;

use crate::channels::ENCODER_EVENTS;

/// Scan interval: 1 kHz keeps worst-case input latency well below
/// human perception
const SCAN_INTERVAL: Duration = Duration::from_millis(1);

/// Scan task - one request/response cycle per tick
#[embassy_executor::task]
pub async fn scan_task(mut driver: MatrixDriver<BlockingIo<BufferedUart>>) {
    info!("Link scan task started");

    let mut ticker = Ticker::every(SCAN_INTERVAL);

    loop {
        ticker.next().await;

        let result = driver.scan();
        if result.changed {
            trace!("matrix changed: {}", driver.matrix().rows());
        }
        for event in result.events {
            // Send to the dispatch channel, dropping if full
            if ENCODER_EVENTS.try_send(event).is_err() {
                warn!("Encoder channel full, dropping event");
            }
        }
    }
}
