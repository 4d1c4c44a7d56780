use strata_geom::Vec3;
use strata_runtime::CameraState;

/// Scripted free-flying camera: glides along its heading and slowly turns.
#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    pub move_speed: f32,
    /// Degrees per second.
    pub turn_rate: f32,
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -45.0,
            pitch: -25.0,
            move_speed: 8.0,
            turn_rate: 6.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalized()
    }

    pub fn update(&mut self, dt: f32) {
        self.yaw += self.turn_rate * dt;
        let f = self.forward();
        let flat = Vec3::new(f.x, 0.0, f.z);
        if flat.length_sq() > 0.0 {
            self.position += flat.normalized() * self.move_speed * dt;
        }
    }

    pub fn state(&self) -> CameraState {
        CameraState::new(self.position, self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flies_level_along_heading() {
        let mut cam = FlyCamera::new(Vec3::new(0.0, 90.0, 0.0));
        cam.turn_rate = 0.0;
        cam.yaw = 0.0;
        cam.update(0.5);
        assert!((cam.position.x - 4.0).abs() < 1e-4);
        assert_eq!(cam.position.y, 90.0);
        assert!(cam.forward().y < 0.0);
    }
}
