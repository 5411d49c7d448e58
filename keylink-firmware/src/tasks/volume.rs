//! Encoder-to-volume dispatch task
//!
//! The stock keymap puts both encoders on volume. This task is the
//! seam where a full HID report pipeline would plug in; it consumes
//! the events and resolves the consumer-control usage to tap.

use defmt::*;

use keylink_protocol::Direction;

use crate::channels::ENCODER_EVENTS;

/// USB HID consumer-control usage IDs for the volume keys
const USAGE_VOLUME_UP: u16 = 0x00E9;
const USAGE_VOLUME_DOWN: u16 = 0x00EA;

/// Volume dispatch task - maps encoder steps onto volume usages
#[embassy_executor::task]
pub async fn volume_task() {
    info!("Volume dispatch task started");

    loop {
        let event = ENCODER_EVENTS.receive().await;
        let usage = match event.direction {
            Direction::Clockwise => USAGE_VOLUME_UP,
            Direction::CounterClockwise => USAGE_VOLUME_DOWN,
        };
        debug!("enc {}: tap consumer usage {=u16:x}", event.channel, usage);
    }
}
