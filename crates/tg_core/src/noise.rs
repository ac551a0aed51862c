use crate::config::NoiseParams;

/// A deterministic 2-D coherent noise source.
///
/// Implementations sum `params.octaves` layers of noise using fractal Brownian
/// motion. Coordinates are divided by `params.scale` before sampling, so the
/// scale controls feature size rather than the lookup position.
///
/// The trait is object-safe so builders can hold a `&dyn NoiseField`.
pub trait NoiseField: Send + Sync {
    /// Sample the field at cell-space coordinates.
    ///
    /// # Returns
    /// A noise value, typically in the range [-1.0, 1.0].
    fn sample(&self, x: f64, y: f64, params: &NoiseParams) -> f64;

    /// Returns the name of this noise field for debugging.
    fn name(&self) -> &'static str {
        "NoiseField"
    }
}
