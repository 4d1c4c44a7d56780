use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

/// Frequency/amplitude set for one noise field. Octave `i` of [`SimplexNoise::fractal`]
/// samples at `frequency * lacunarity^i` with weight `amplitude * persistence^i`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct NoiseParams {
    pub frequency: f32,
    pub amplitude: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
}

fn default_lacunarity() -> f32 {
    2.0
}
fn default_persistence() -> f32 {
    0.5
}

impl NoiseParams {
    pub const fn new(frequency: f32, amplitude: f32, lacunarity: f32, persistence: f32) -> Self {
        Self {
            frequency,
            amplitude,
            lacunarity,
            persistence,
        }
    }

    /// Macro terrain height.
    pub const HEIGHT: NoiseParams = NoiseParams::new(0.006, 10.0, 2.1, 0.45);
    /// Fine detail used to warp the height lookup.
    pub const DETAIL: NoiseParams = NoiseParams::new(1.0, 1.0, 1.8, 0.6);
    /// Thickness of the sand band around sea level.
    pub const SAND: NoiseParams = NoiseParams::new(0.006, 1.0, 2.0, 0.5);
}

/// Stateless 2D coherent noise. Sampling never mutates the generator, so the same
/// coordinates always give the same value.
pub struct SimplexNoise {
    params: NoiseParams,
    fnl: FastNoiseLite,
}

impl SimplexNoise {
    pub fn new(seed: i32, params: NoiseParams) -> Self {
        let mut fnl = FastNoiseLite::with_seed(seed);
        fnl.set_noise_type(Some(NoiseType::OpenSimplex2));
        // Frequency is applied to the inputs so octaves can scale it independently.
        fnl.set_frequency(Some(1.0));
        Self { params, fnl }
    }

    #[inline]
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    #[inline]
    fn sample(&self, x: f32, y: f32, frequency: f32) -> f32 {
        self.fnl.get_noise_2d(x * frequency, y * frequency).clamp(-1.0, 1.0)
    }

    /// Single octave in `[-1, 1]`.
    #[inline]
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        self.sample(x, y, self.params.frequency)
    }

    /// Normalized fractal sum of `octaves` octaves, in `[-1, 1]`. Zero octaves yield 0.
    pub fn fractal(&self, octaves: u32, x: f32, y: f32) -> f32 {
        let mut frequency = self.params.frequency;
        let mut amplitude = self.params.amplitude;
        let mut sum = 0.0f32;
        let mut weight = 0.0f32;
        for _ in 0..octaves {
            sum += self.sample(x, y, frequency) * amplitude;
            weight += amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        if weight > 0.0 { (sum / weight).clamp(-1.0, 1.0) } else { 0.0 }
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_octaves_is_flat() {
        let n = SimplexNoise::new(7, NoiseParams::HEIGHT);
        assert_eq!(n.fractal(0, 12.5, -3.0), 0.0);
    }

    #[test]
    fn same_seed_same_values() {
        let a = SimplexNoise::new(42, NoiseParams::DETAIL);
        let b = SimplexNoise::new(42, NoiseParams::DETAIL);
        for i in 0..32 {
            let x = i as f32 * 3.7 - 50.0;
            let z = i as f32 * -1.3 + 8.0;
            assert_eq!(a.fractal(8, x, z), b.fractal(8, x, z));
            assert_eq!(a.noise(x, z), b.noise(x, z));
        }
    }
}
