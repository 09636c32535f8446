//! Color to frequency allocation
//!
//! Gantree: L4_Schedule → FrequencyAllocator
//!
//! Keeps the signed color map of a run. Park colors (`-(c+1)`) are
//! solved once at construction; interaction colors (`0..n`) are
//! re-solved for every sub-layer. Infeasible requests fall back to
//! even spacing and leave a `SolverInfeasible` warning behind.

use crate::config::DecompositionScheme;
use std::collections::{BTreeMap, BTreeSet};
use xfreq_color::{park_color_id, ParkColoring};
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::{ColorId, Ghz, QubitId};
use xfreq_device::Device;
use xfreq_solver::{even_spacing, FrequencySolver, SolverCache};

/// Frequency allocator for one scheduling run
/// Gantree: FrequencyAllocator // 주파수 할당
#[derive(Debug)]
pub struct FrequencyAllocator {
    solver: FrequencySolver,
    cache: SolverCache,
    park: ParkColoring,
    colors: BTreeMap<ColorId, Ghz>,
    interaction_band: (Ghz, Ghz),
    alpha: Ghz,
    max_solver_bins: usize,
    infeasible_bins: BTreeSet<usize>,
    warnings: Vec<XfreqError>,
}

impl FrequencyAllocator {
    /// Create an allocator and solve the park frequencies
    /// Gantree: new(device, scheme, max_bins, cache) -> Result<Self> // 파킹 주파수
    pub fn new(
        device: &Device,
        scheme: DecompositionScheme,
        max_solver_bins: usize,
        cache: SolverCache,
    ) -> XfreqResult<Self> {
        let park = ParkColoring::from_topology(device.topology());
        let mut allocator = Self {
            solver: FrequencySolver::new(),
            cache,
            park,
            colors: BTreeMap::new(),
            interaction_band: device.interaction_band(scheme.uses_shifted_band()),
            alpha: device.alpha,
            max_solver_bins,
            infeasible_bins: BTreeSet::new(),
            warnings: Vec::new(),
        };

        let num_park = allocator.park.num_colors();
        if num_park > 0 {
            let (lo, hi) = device.park_band();
            let outcome = allocator
                .solver
                .solve(lo, hi, num_park, device.alpha, &allocator.cache)?;

            let omegas = if outcome.feasible {
                outcome.frequencies
            } else {
                log::warn!("no separated park assignment for {} colors, using even spacing", num_park);
                allocator.warnings.push(XfreqError::SolverInfeasible {
                    band_lo: lo,
                    band_hi: hi,
                    bins: num_park,
                });
                let top = device.omega_max - device.delta_int - device.delta_ext;
                even_spacing(top, device.delta_park / num_park as f64, num_park)
            };

            for (c, omega) in omegas.into_iter().enumerate() {
                allocator.colors.insert(park_color_id(c), omega);
            }
        }

        log::debug!(
            "park frequencies for {} colors: {:?}",
            num_park,
            allocator.colors.values().collect::<Vec<_>>()
        );
        Ok(allocator)
    }

    // ========================================================================
    // Interaction Colors
    // ========================================================================

    /// Assign frequencies to interaction colors `0..num_colors`
    /// Gantree: assign_interaction(n) -> Result // 상호작용 주파수
    ///
    /// Zero colors is a no-op. Above `max_solver_bins` the even
    /// spacing is used without asking the solver.
    pub fn assign_interaction(&mut self, num_colors: usize) -> XfreqResult<()> {
        self.colors.retain(|&color, _| color < 0);
        if num_colors == 0 {
            return Ok(());
        }

        let (lo, hi) = self.interaction_band;
        let spacing = || even_spacing(hi, (hi - lo) / num_colors as f64, num_colors);

        let omegas = if num_colors > self.max_solver_bins {
            log::debug!("{} interaction colors, using even spacing", num_colors);
            spacing()
        } else {
            let outcome = self
                .solver
                .solve(lo, hi, num_colors, self.alpha, &self.cache)?;
            if outcome.feasible {
                outcome.frequencies
            } else {
                // one warning per failing request, however often it recurs
                if self.infeasible_bins.insert(num_colors) {
                    log::warn!(
                        "no separated interaction assignment for {} colors, using even spacing",
                        num_colors
                    );
                    self.warnings.push(XfreqError::SolverInfeasible {
                        band_lo: lo,
                        band_hi: hi,
                        bins: num_colors,
                    });
                }
                spacing()
            }
        };

        for (c, omega) in omegas.into_iter().enumerate() {
            self.colors.insert(c as ColorId, omega);
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Frequency of a signed color
    pub fn frequency(&self, color: ColorId) -> Option<Ghz> {
        self.colors.get(&color).copied()
    }

    /// Frequency of interaction color `c`
    pub fn interaction_frequency(&self, color: usize) -> Option<Ghz> {
        self.frequency(color as ColorId)
    }

    /// Park frequency of a qubit
    pub fn park_frequency(&self, qubit: QubitId) -> Option<Ghz> {
        self.park.color_id(qubit).and_then(|c| self.frequency(c))
    }

    /// Idle pair `(park, park + alpha)` of every qubit
    /// Gantree: idle_pairs() -> Vec<(f64,f64)> // 유휴 주파수 쌍
    pub fn idle_pairs(&self) -> Vec<(Ghz, Ghz)> {
        (0..self.park.num_qubits())
            .map(|q| {
                let park = self.park_frequency(q).unwrap_or(0.0);
                (park, park + self.alpha)
            })
            .collect()
    }

    /// Park coloring of the device
    pub fn park(&self) -> &ParkColoring {
        &self.park
    }

    /// Interaction band in use
    pub fn interaction_band(&self) -> (Ghz, Ghz) {
        self.interaction_band
    }

    /// Shared solver cache
    pub fn cache(&self) -> &SolverCache {
        &self.cache
    }

    /// Drain recorded degradations
    pub fn take_warnings(&mut self) -> Vec<XfreqError> {
        std::mem::take(&mut self.warnings)
    }
}

// ============================================================================
// Tests
// ============================================================================
