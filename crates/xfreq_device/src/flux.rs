//! Flux-noise frequency jitter for xfreq
//!
//! Gantree: L2_Device → FluxNoise
//!
//! Frequency deviation of an asymmetric transmon when its flux bias
//! is perturbed by Gaussian noise.

use crate::device::Device;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use xfreq_core::constants::physics;
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::Ghz;

/// Asymmetric-transmon energy model
/// Gantree: FluxNoise // 플럭스 노이즈
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxNoise {
    /// Small-junction Josephson energy (GHz)
    pub ejs: f64,
    /// Large-junction Josephson energy (GHz)
    pub ejl: f64,
    /// Charging energy (GHz)
    pub ec: f64,
}

impl FluxNoise {
    /// Create from junction parameters
    pub fn new(ejs: f64, ejl: f64, ec: f64) -> Self {
        Self { ejs, ejl, ec }
    }

    /// Take the junction parameters of a device
    pub fn from_device(device: &Device) -> Self {
        Self::new(device.ejs, device.ejl, device.ec)
    }

    fn asymmetry(&self) -> f64 {
        let gamma = self.ejl / self.ejs;
        (gamma - 1.0) / (gamma + 1.0)
    }

    /// Energy of level `m` at reduced flux `phi`
    /// Gantree: level_energy(phi, m) -> f64 // 준위 에너지
    pub fn level_energy(&self, phi: f64, m: u32) -> f64 {
        let m = f64::from(m);
        let ej_sum = self.ejs + self.ejl;
        let d = self.asymmetry();
        let (s, c) = (PI * phi).sin_cos();
        let squid = (c * c + d * d * s * s).sqrt();

        -ej_sum / 2.0 + (4.0 * ej_sum * self.ec * squid).sqrt() * (m + 0.5)
            - self.ec * (6.0 * m * m + 6.0 * m + 3.0) / 12.0
    }

    /// 0-1 transition frequency at reduced flux `phi`
    pub fn transition_frequency(&self, phi: f64) -> Ghz {
        self.level_energy(phi, 1) - self.level_energy(phi, 0)
    }

    /// Flux bias estimate for a target frequency
    /// Gantree: estimate_flux(omega) -> f64 // 플럭스 추정
    pub fn estimate_flux(omega: Ghz) -> f64 {
        let x = ((omega - 3.75) / 1.25).clamp(-1.0, 1.0);
        x.acos() / (2.0 * PI)
    }

    /// Deviation caused by a fixed flux offset
    ///
    /// The perturbed frequency is clamped to the device band.
    pub fn deviation_at(&self, omega: Ghz, flux_offset: f64) -> Ghz {
        let flux = Self::estimate_flux(omega);
        let old = self.transition_frequency(flux);
        let new = self
            .transition_frequency(flux + flux_offset)
            .clamp(physics::FLUX_OMEGA_FLOOR, physics::FLUX_OMEGA_CEIL);
        new - old
    }

    /// Deviation for a Gaussian flux offset of standard deviation `sigma`
    /// Gantree: sample(omega, sigma, rng) -> Result<f64> // 샘플링
    pub fn sample<R: Rng + ?Sized>(&self, omega: Ghz, sigma: f64, rng: &mut R) -> XfreqResult<Ghz> {
        let normal = flux_distribution(sigma)?;
        Ok(self.deviation_at(omega, normal.sample(rng)))
    }
}

/// Zero-mean flux offset distribution; sigma must be finite and non-negative
fn flux_distribution(sigma: f64) -> XfreqResult<Normal<f64>> {
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(XfreqError::InvalidConfig(format!(
            "flux noise sigma must be finite and non-negative, got {}",
            sigma
        )));
    }
    Normal::new(0.0, sigma)
        .map_err(|e| XfreqError::InvalidConfig(format!("flux noise sigma {}: {}", sigma, e)))
}

impl Default for FluxNoise {
    fn default() -> Self {
        Self::new(physics::EJS, physics::EJL, physics::EC)
    }
}

/// Seeded jitter source applied to emitted frequencies
/// Gantree: FluxJitter // 주파수 지터
#[derive(Debug, Clone)]
pub struct FluxJitter {
    model: FluxNoise,
    normal: Normal<f64>,
    rng: StdRng,
}

impl FluxJitter {
    /// Create a jitter source; `seed = None` draws from entropy
    pub fn new(model: FluxNoise, sigma: f64, seed: Option<u64>) -> XfreqResult<Self> {
        let normal = flux_distribution(sigma)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { model, normal, rng })
    }

    /// Perturbed frequency
    pub fn apply(&mut self, omega: Ghz) -> Ghz {
        let offset = self.normal.sample(&mut self.rng);
        let shifted = omega + self.model.deviation_at(omega, offset);
        log::trace!("flux jitter {:.4} -> {:.4} GHz", omega, shifted);
        shifted
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_spectrum_spans_band() {
        let model = FluxNoise::default();
        let top = model.transition_frequency(0.0);
        let bottom = model.transition_frequency(0.5);
        assert_abs_diff_eq!(top, 5.0, epsilon = 0.01);
        assert_abs_diff_eq!(bottom, 2.5, epsilon = 0.01);
    }

    #[test]
    fn test_zero_offset_is_zero_deviation() {
        let model = FluxNoise::default();
        for omega in [3.0, 3.75, 4.2, 4.8] {
            assert_abs_diff_eq!(model.deviation_at(omega, 0.0), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_perturbed_frequency_clamped() {
        let model = FluxNoise::default();
        let omega = 4.5;
        let base = model.transition_frequency(FluxNoise::estimate_flux(omega));
        for offset in [-0.4, -0.1, 0.1, 0.4] {
            let shifted = base + model.deviation_at(omega, offset);
            assert!(shifted <= physics::FLUX_OMEGA_CEIL + 1e-12);
            assert!(shifted >= physics::FLUX_OMEGA_FLOOR - 1e-12);
        }
    }

    #[test]
    fn test_seeded_jitter_reproducible() {
        let mut a = FluxJitter::new(FluxNoise::default(), 0.01, Some(7)).unwrap();
        let mut b = FluxJitter::new(FluxNoise::default(), 0.01, Some(7)).unwrap();
        for _ in 0..5 {
            assert_eq!(a.apply(4.3), b.apply(4.3));
        }
    }

    #[test]
    fn test_invalid_sigma() {
        for sigma in [-1.0, -1e-9, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                FluxJitter::new(FluxNoise::default(), sigma, Some(1)),
                Err(XfreqError::InvalidConfig(_))
            ));
            let mut rng = StdRng::seed_from_u64(0);
            assert!(matches!(
                FluxNoise::default().sample(4.0, sigma, &mut rng),
                Err(XfreqError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_zero_sigma_leaves_frequency() {
        let mut jitter = FluxJitter::new(FluxNoise::default(), 0.0, Some(3)).unwrap();
        assert_abs_diff_eq!(jitter.apply(4.3), 4.3, epsilon = 1e-12);
    }

    #[test]
    fn test_model_follows_device_junctions() {
        let device = Device::linear(2).with_junctions(10.0, 20.0, 0.25);
        let model = FluxNoise::from_device(&device);
        assert_eq!(model, FluxNoise::new(10.0, 20.0, 0.25));
        assert!(model.transition_frequency(0.0) > model.transition_frequency(0.5));
    }
}
