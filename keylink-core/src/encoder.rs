//! Encoder tick tracking
//!
//! The peer ships each encoder as a free-running 8-bit detent counter.
//! This tracker turns successive counter readings into discrete
//! direction events: the difference between two readings, taken as a
//! wrapping signed byte, is the number of detents moved since the last
//! poll. Readings that jump further than any human can turn an encoder
//! between two polls are line noise and get dropped.

use heapless::Vec;

use keylink_protocol::{Direction, EncoderChannel, EncoderEvent, Frame, NUM_ENCODERS};

/// Largest believable counter movement between two polls
///
/// The filter is exclusive: a delta of exactly this magnitude still
/// counts as rotation.
pub const GLITCH_THRESHOLD: u8 = 100;

/// Per-channel encoder counter tracker
///
/// Consumes the first valid frame after construction for calibration
/// only; every later frame may yield up to one event per channel.
pub struct EncoderTracker {
    last: [u8; NUM_ENCODERS],
    initialized: bool,
}

impl Default for EncoderTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderTracker {
    /// Create a tracker with no baseline yet
    pub const fn new() -> Self {
        Self {
            last: [0; NUM_ENCODERS],
            initialized: false,
        }
    }

    /// Whether the baseline has been captured
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Consume one validated frame and emit direction events
    ///
    /// The very first frame records the counters as baseline and emits
    /// nothing. After that, each channel whose counter moved emits one
    /// event, unless the movement fails the glitch filter. The stored
    /// value is updated either way so a discarded glitch cannot
    /// re-trigger on the next poll.
    pub fn update(&mut self, frame: &Frame) -> Vec<EncoderEvent, NUM_ENCODERS> {
        let mut events = Vec::new();

        if !self.initialized {
            for channel in EncoderChannel::ALL {
                self.last[channel.index()] = frame.encoder_raw(channel.index());
            }
            self.initialized = true;
            return events;
        }

        for channel in EncoderChannel::ALL {
            let index = channel.index();
            let new_value = frame.encoder_raw(index);
            if new_value == self.last[index] {
                continue;
            }

            let delta = new_value.wrapping_sub(self.last[index]) as i8;
            self.last[index] = new_value;

            #[cfg(feature = "defmt")]
            defmt::trace!("enc {}: value {} delta {}", channel, new_value, delta);

            if delta.unsigned_abs() > GLITCH_THRESHOLD {
                #[cfg(feature = "defmt")]
                defmt::debug!("enc {}: delta {} too large, ignoring", channel, delta);
                continue;
            }

            let direction = if delta > 0 {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            };
            // One event per channel at most, so capacity cannot be exceeded
            let _ = events.push(EncoderEvent { channel, direction });
        }

        events
    }
}
