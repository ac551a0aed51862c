use noise::{NoiseFn, Perlin};
use tg_core::{NoiseField, NoiseParams};

/// Permutation seed shared by every generation. There is no per-request seed,
/// so identical configs always produce identical maps.
pub const NOISE_SEED: u32 = 0;

/// Multi-octave Perlin noise over a single fixed permutation table.
///
/// Output range: approximately [-1.0, 1.0]
pub struct PerlinField {
    noise: Perlin,
}

impl PerlinField {
    pub fn new() -> Self {
        Self {
            noise: Perlin::new(NOISE_SEED),
        }
    }

    /// Generate fBm (fractal Brownian motion) noise.
    fn fbm(&self, x: f64, y: f64, params: &NoiseParams) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..params.octaves {
            let nx = x * frequency / params.scale;
            let ny = y * frequency / params.scale;
            value += self.noise.get([nx, ny]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        value / max_amplitude
    }
}

impl Default for PerlinField {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, x: f64, y: f64, params: &NoiseParams) -> f64 {
        self.fbm(x, y, params)
    }

    fn name(&self) -> &'static str {
        "Perlin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_range() {
        let field = PerlinField::new();
        let params = NoiseParams::elevation();
        for i in 0..200 {
            let x = i as f64 * 7.3;
            let y = i as f64 * 3.1;
            let value = field.sample(x, y, &params);
            assert!(value.abs() <= 1.0 + 1e-9, "Value {} out of range", value);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let a = PerlinField::new();
        let b = PerlinField::new();
        let params = NoiseParams::temperature();
        for i in 0..50 {
            let x = i as f64 * 13.0;
            let y = i as f64 * 5.0;
            assert_eq!(
                a.sample(x, y, &params).to_bits(),
                b.sample(x, y, &params).to_bits()
            );
        }
    }

    #[test]
    fn scale_divides_coordinates() {
        let field = PerlinField::new();
        let coarse = NoiseParams::with_scale(100.0, 1);
        let fine = NoiseParams::with_scale(50.0, 1);
        // (x, y) at scale 100 reads the same lattice point as (x/2, y/2) at scale 50
        assert_eq!(
            field.sample(37.0, 81.0, &coarse),
            field.sample(18.5, 40.5, &fine)
        );
    }

    #[test]
    fn field_varies_across_the_map() {
        let field = PerlinField::new();
        let params = NoiseParams::elevation();
        let first = field.sample(13.0, 29.0, &params);
        let differs = (1..20).any(|i| {
            let v = field.sample(13.0 + i as f64 * 17.0, 29.0 + i as f64 * 11.0, &params);
            v != first
        });
        assert!(differs, "Noise should not be constant");
    }
}
