//! SharedArrayBuffer layout.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Sparks: max_sparks × 4 floats]
//! [Sounds: max_sounds × 1 float]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Only the spark capacity lives in the header. TypeScript reads the sound and
//! event capacities through the `get_max_sounds` / `get_max_events` exports
//! (or `get_buffer_total_floats`) and derives the section offsets from those.

use crate::api::config::TravelerConfig;
use crate::api::types::WireEvent;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_SPARKS: usize = 2;
pub const HEADER_SPARK_COUNT: usize = 3;
pub const HEADER_STATE: usize = 4;
pub const HEADER_AVATAR_OPACITY: usize = 5;
pub const HEADER_ORB_VISIBLE: usize = 6;
pub const HEADER_CAST_SHADOW: usize = 7;
pub const HEADER_ORB_X: usize = 8;
pub const HEADER_ORB_Y: usize = 9;
pub const HEADER_ORB_Z: usize = 10;
pub const HEADER_YAW: usize = 11;
pub const HEADER_COLOR_MIX: usize = 12;
pub const HEADER_SIZE_BOOST: usize = 13;
pub const HEADER_OPACITY_BOOST: usize = 14;
pub const HEADER_PROTOCOL_VERSION: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per spark vertex: x, y, z, color_mix (wire format, fixed).
pub const SPARK_FLOATS: usize = 4;

/// Floats per traveler event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = WireEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Spark render slots.
    pub max_sparks: usize,
    /// Maximum sound cues per frame.
    pub max_sounds: usize,
    /// Maximum traveler events per frame.
    pub max_events: usize,

    pub spark_data_floats: usize,
    pub sound_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where spark data begins.
    pub spark_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sparks: usize, max_sounds: usize, max_events: usize) -> Self {
        let spark_data_floats = max_sparks * SPARK_FLOATS;
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let spark_data_offset = HEADER_FLOATS;
        let sound_data_offset = spark_data_offset + spark_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_sparks,
            max_sounds,
            max_events,
            spark_data_floats,
            sound_data_floats,
            event_data_floats,
            spark_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a TravelerConfig.
    pub fn from_config(config: &TravelerConfig) -> Self {
        Self::new(
            config.sparks.render_slots,
            config.timing.max_sounds,
            config.timing.max_events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&TravelerConfig::default());

        assert_eq!(layout.max_sparks, 3000);
        assert_eq!(layout.max_sounds, 32);
        assert_eq!(layout.max_events, 32);

        assert_eq!(layout.spark_data_floats, 3000 * 4);
        assert_eq!(layout.sound_data_floats, 32);
        assert_eq!(layout.event_data_floats, 32 * 4);

        let expected_total = HEADER_FLOATS + 3000 * 4 + 32 + 32 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 20);

        assert_eq!(layout.spark_data_offset, HEADER_FLOATS);
        assert_eq!(layout.sound_data_offset, layout.spark_data_offset + layout.spark_data_floats);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + layout.sound_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_fields_fit_the_header() {
        let fields = [
            HEADER_LOCK,
            HEADER_FRAME_COUNTER,
            HEADER_MAX_SPARKS,
            HEADER_SPARK_COUNT,
            HEADER_STATE,
            HEADER_AVATAR_OPACITY,
            HEADER_ORB_VISIBLE,
            HEADER_CAST_SHADOW,
            HEADER_ORB_X,
            HEADER_ORB_Y,
            HEADER_ORB_Z,
            HEADER_YAW,
            HEADER_COLOR_MIX,
            HEADER_SIZE_BOOST,
            HEADER_OPACITY_BOOST,
            HEADER_PROTOCOL_VERSION,
        ];
        for (i, field) in fields.iter().enumerate() {
            assert_eq!(*field, i);
        }
        assert_eq!(fields.len(), HEADER_FLOATS);
    }
}
