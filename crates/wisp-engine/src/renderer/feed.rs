use bytemuck::{Pod, Zeroable};

use crate::bridge::protocol::{self, HEADER_FLOATS, PROTOCOL_VERSION};
use crate::traveler::Traveler;

/// Per-spark render data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SparkVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Blend between the start and end spark colors (0..1).
    pub color_mix: f32,
}

impl SparkVertex {
    pub const FLOATS: usize = protocol::SPARK_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Header and spark vertices the renderer reads each frame.
///
/// Rebuilt from the traveler after every step. Sparks beyond the render slot
/// capacity are left out of the feed but keep simulating.
pub struct RenderFeed {
    header: [f32; HEADER_FLOATS],
    sparks: Vec<SparkVertex>,
    capacity: usize,
    frames: u64,
    truncated: usize,
}

impl RenderFeed {
    pub fn new(capacity: usize) -> Self {
        let mut header = [0.0; HEADER_FLOATS];
        header[protocol::HEADER_MAX_SPARKS] = capacity as f32;
        header[protocol::HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        Self {
            header,
            sparks: Vec::with_capacity(capacity),
            capacity,
            frames: 0,
            truncated: 0,
        }
    }

    /// Refill the header and the spark section from the traveler's current state.
    pub fn rebuild(&mut self, traveler: &Traveler) {
        let glow = traveler.glow();
        let pool = traveler.pool();

        self.sparks.clear();
        self.sparks.extend(pool.iter().take(self.capacity).map(|spark| SparkVertex {
            x: spark.position.x,
            y: spark.position.y,
            z: spark.position.z,
            color_mix: spark.color_mix.unwrap_or(glow.color_mix),
        }));
        self.truncated = pool.len() - self.sparks.len();
        if self.truncated > 0 {
            log::trace!("render feed full: {} sparks not drawn", self.truncated);
        }

        self.frames += 1;
        let visibility = traveler.visibility();
        let position = traveler.position();
        let h = &mut self.header;
        h[protocol::HEADER_LOCK] = 0.0;
        h[protocol::HEADER_FRAME_COUNTER] = self.frames as f32;
        h[protocol::HEADER_MAX_SPARKS] = self.capacity as f32;
        h[protocol::HEADER_SPARK_COUNT] = self.sparks.len() as f32;
        h[protocol::HEADER_STATE] = traveler.state().index() as f32;
        h[protocol::HEADER_AVATAR_OPACITY] = visibility.opacity();
        h[protocol::HEADER_ORB_VISIBLE] = flag(visibility.orb_visible());
        h[protocol::HEADER_CAST_SHADOW] = flag(visibility.cast_shadow());
        h[protocol::HEADER_ORB_X] = position.x;
        h[protocol::HEADER_ORB_Y] = position.y;
        h[protocol::HEADER_ORB_Z] = position.z;
        h[protocol::HEADER_YAW] = traveler.yaw();
        h[protocol::HEADER_COLOR_MIX] = glow.color_mix;
        h[protocol::HEADER_SIZE_BOOST] = glow.size_boost;
        h[protocol::HEADER_OPACITY_BOOST] = glow.opacity_boost;
        h[protocol::HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn sparks(&self) -> &[SparkVertex] {
        &self.sparks
    }

    pub fn spark_count(&self) -> u32 {
        self.sparks.len() as u32
    }

    /// Live sparks left out of the latest rebuild.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn frame_counter(&self) -> u64 {
        self.frames
    }

    /// Raw pointer to the header for SharedArrayBuffer reads.
    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    /// Raw pointer to spark data for SharedArrayBuffer reads.
    pub fn sparks_ptr(&self) -> *const f32 {
        self.sparks.as_ptr() as *const f32
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}
