//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use keylink_protocol::EncoderEvent;

/// Channel capacity for encoder events
const ENCODER_CHANNEL_SIZE: usize = 8;

/// Encoder steps from the link scan task to the volume dispatcher
pub static ENCODER_EVENTS: Channel<CriticalSectionRawMutex, EncoderEvent, ENCODER_CHANNEL_SIZE> =
    Channel::new();
