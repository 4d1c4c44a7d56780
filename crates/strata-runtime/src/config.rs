use serde::Deserialize;

/// Streaming and GPU-side knobs, read from the `[render]` table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Chunks drawn around the camera; streaming reaches one further.
    pub render_distance: i32,
    pub max_resorts_per_update: usize,
    /// Mesh slots per chunk.
    pub frames_in_flight: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_distance: 12,
            max_resorts_per_update: 2,
            frames_in_flight: 2,
        }
    }
}

impl RenderConfig {
    #[inline]
    pub fn stream_radius(&self) -> i32 {
        self.render_distance.max(0) + 1
    }
}
