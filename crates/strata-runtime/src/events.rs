use strata_geom::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub forward: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// Sent once per rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UpdateEvent {
    /// Seconds since start.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub frame_index: u64,
    pub camera: CameraState,
}

/// Sent on the fixed simulation step. The manager does not consume these; interaction code does.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickEvent {
    pub elapsed: f64,
    pub tick_index: u64,
    pub camera: CameraState,
}
