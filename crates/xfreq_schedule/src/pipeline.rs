//! Per-layer scheduling pipeline
//!
//! Gantree: L5_Integration → LayerPipeline
//!
//! Drives every circuit layer through
//! `Decompose -> Reschedule -> LimitColors -> ColorAndAssignFrequency ->
//! EmitInstructions -> Accumulate`. Only the solver cache and the IR
//! accumulator outlive a layer.

use crate::accumulator::Accumulator;
use crate::config::{ScheduleConfig, SchedulerPolicy};
use crate::decompose::decompose_layer;
use crate::frequency::FrequencyAllocator;
use crate::ir::{Instruction, Ir};
use crate::limit::limit_colors;
use crate::reschedule::reschedule;
use crate::timing::interaction_timing;
use serde::{Deserialize, Serialize};
use std::fmt;
use xfreq_color::{ColoringOutcome, CrosstalkColorer};
use xfreq_core::error::{XfreqError, XfreqResult};
use xfreq_core::{Circuit, Coupling, Gate, Ghz, Layer, QubitId};
use xfreq_device::{Device, FluxJitter, FluxNoise};
use xfreq_solver::SolverCache;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Rewriting onto native gates
    Decompose,
    /// Greedy compaction (greedy policy only)
    Reschedule,
    /// Budget splitting (positive budget only)
    LimitColors,
    /// Coloring interactions and solving their frequencies
    ColorAndAssignFrequency,
    /// Computing frequencies and durations per gate
    EmitInstructions,
    /// Appending to the IR
    Accumulate,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Decompose => "decompose",
            PipelineStage::Reschedule => "reschedule",
            PipelineStage::LimitColors => "limit_colors",
            PipelineStage::ColorAndAssignFrequency => "color_and_assign_frequency",
            PipelineStage::EmitInstructions => "emit_instructions",
            PipelineStage::Accumulate => "accumulate",
        };
        write!(f, "{}", name)
    }
}

/// Instructions of one sub-layer before accumulation
struct EmittedLayer {
    instructions: Vec<Instruction>,
    qubit_frequencies: Vec<Ghz>,
    barrier: bool,
}

/// Layer-by-layer scheduler
/// Gantree: LayerPipeline // 레이어 파이프라인
pub struct LayerPipeline {
    device: Device,
    config: ScheduleConfig,
    cache: SolverCache,
    stage: Option<PipelineStage>,
}

impl LayerPipeline {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a pipeline; configuration errors stop here
    /// Gantree: new(device, config) -> Result<Self> // 생성 및 검증
    pub fn new(device: Device, config: ScheduleConfig) -> XfreqResult<Self> {
        config.validate()?;
        device.validate()?;
        Ok(Self {
            device,
            config,
            cache: SolverCache::new(),
            stage: None,
        })
    }

    /// Share an existing solver cache
    pub fn with_cache(mut self, cache: SolverCache) -> Self {
        self.cache = cache;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Stage most recently entered, `None` before the first run
    pub fn stage(&self) -> Option<PipelineStage> {
        self.stage
    }

    /// Solver cache
    pub fn cache(&self) -> &SolverCache {
        &self.cache
    }

    /// Device
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Configuration
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Schedule a circuit
    /// Gantree: run(circuit, mapping) -> Result<Ir> // 스케줄링 실행
    ///
    /// `mapping[logical]` is the physical qubit; `None` is the identity.
    pub fn run(&mut self, circuit: &Circuit, mapping: Option<&[QubitId]>) -> XfreqResult<Ir> {
        let num_qubits = self.device.num_qubits();
        let circuit = match mapping {
            Some(mapping) => circuit.remap(mapping, num_qubits)?,
            None => {
                let identity: Vec<QubitId> = (0..circuit.num_qubits()).collect();
                circuit.remap(&identity, num_qubits)?
            }
        };

        let mut allocator = FrequencyAllocator::new(
            &self.device,
            self.config.decomposition,
            self.config.max_solver_bins,
            self.cache.clone(),
        )?;
        let mut colorer = CrosstalkColorer::new(self.config.color_budget, self.config.seed)
            .with_attempts(self.config.recolor_attempts);
        let mut jitter = self
            .config
            .flux_noise_sigma
            .map(|sigma| {
                FluxJitter::new(FluxNoise::from_device(&self.device), sigma, self.config.seed)
            })
            .transpose()?;

        let mut acc = Accumulator::new(self.device.alpha, allocator.idle_pairs());
        let layers = circuit.layers();
        acc.set_depth_before(layers.len());

        log::debug!(
            "scheduling {} layers on {} qubits with {}",
            layers.len(),
            num_qubits,
            self.config
        );

        for (index, layer) in layers.iter().enumerate() {
            let sub_layers = self.prepare_layer(layer, &mut colorer)?;
            log::debug!("layer {}: {} sub-layers", index, sub_layers.len());

            for sub_layer in &sub_layers {
                // Gantree: color_and_assign() // 색칠 및 주파수 할당
                self.stage = Some(PipelineStage::ColorAndAssignFrequency);
                let active: Vec<Coupling> = sub_layer
                    .iter()
                    .filter_map(|g| g.pair())
                    .map(|(a, b)| Coupling::new(a, b))
                    .collect::<XfreqResult<_>>()?;

                let coloring = if active.is_empty() {
                    ColoringOutcome::default()
                } else {
                    let outcome = colorer.color(self.device.crosstalk(), &active);
                    if let Some(warning) = outcome.budget_warning() {
                        acc.warn(&warning);
                    }
                    acc.record_colors(outcome.num_colors);
                    allocator.assign_interaction(outcome.num_colors)?;
                    outcome
                };

                self.stage = Some(PipelineStage::EmitInstructions);
                let emitted = self.emit(sub_layer, &coloring, &allocator, jitter.as_mut())?;

                if emitted.barrier {
                    log::debug!("layer {}: dropping sub-layer with a barrier", index);
                    continue;
                }

                self.stage = Some(PipelineStage::Accumulate);
                if self.config.verbosity > 0 {
                    let qasm: Vec<String> = sub_layer.iter().map(Gate::to_qasm).collect();
                    log::info!("layer {}:\n{}", index, qasm.join("\n"));
                }
                acc.accumulate(emitted.instructions, emitted.qubit_frequencies);
            }
        }

        for warning in allocator.take_warnings() {
            acc.warn(&warning);
        }

        let ir = acc.finish();
        log::debug!("scheduled: {}", ir.summary());
        Ok(ir)
    }

    // ========================================================================
    // Stages
    // ========================================================================

    /// Decompose, then optionally reschedule and limit colors
    fn prepare_layer(&mut self, layer: &[Gate], colorer: &mut CrosstalkColorer) -> XfreqResult<Vec<Layer>> {
        self.stage = Some(PipelineStage::Decompose);
        let mut sub_layers = decompose_layer(layer, self.config.decomposition, self.device.crosstalk());

        if self.config.scheduler == SchedulerPolicy::Greedy {
            self.stage = Some(PipelineStage::Reschedule);
            sub_layers = reschedule(&sub_layers, self.device.topology())?;
        }

        if self.config.color_budget > 0 {
            self.stage = Some(PipelineStage::LimitColors);
            sub_layers = limit_colors(sub_layers, colorer, self.device.crosstalk());
            log::trace!("limit colors: {} sub-layers", sub_layers.len());
        }

        Ok(sub_layers)
    }

    /// Instructions and per-qubit frequencies of one sub-layer
    /// Gantree: emit(sub_layer) -> Result<EmittedLayer> // 명령 생성
    ///
    /// Measurements are skipped. Qubits outside an interaction sit at
    /// their park frequency.
    fn emit(
        &self,
        sub_layer: &[Gate],
        coloring: &ColoringOutcome,
        allocator: &FrequencyAllocator,
        mut jitter: Option<&mut FluxJitter>,
    ) -> XfreqResult<EmittedLayer> {
        let num_qubits = self.device.num_qubits();
        let mut qubit_frequencies: Vec<Ghz> = (0..num_qubits)
            .map(|q| allocator.park_frequency(q).unwrap_or(0.0))
            .collect();
        let mut instructions = Vec::with_capacity(sub_layer.len());
        let mut barrier = false;

        for gate in sub_layer {
            if gate.is_barrier() {
                barrier = true;
            }
            if gate.is_measurement() {
                continue;
            }

            let Some((q1, q2)) = gate.pair() else {
                let duration = self.device.gate_times.gate_duration(gate);
                instructions.push(Instruction::timed(gate.clone(), duration));
                continue;
            };

            let coupling = Coupling::new(q1, q2)?;
            let frequency = coloring
                .color_of(&coupling)
                .and_then(|c| allocator.interaction_frequency(c))
                .ok_or_else(|| {
                    XfreqError::InternalError(format!("no interaction frequency for {}", coupling))
                })?;

            let timing = interaction_timing(gate, frequency, self.device.alpha, self.device.cqq)?;
            let (f1, f2) = match jitter.as_deref_mut() {
                Some(jitter) => (jitter.apply(timing.f1), jitter.apply(timing.f2)),
                None => (timing.f1, timing.f2),
            };

            if let Some(slot) = qubit_frequencies.get_mut(q1) {
                *slot = f1;
            }
            if let Some(slot) = qubit_frequencies.get_mut(q2) {
                *slot = f2;
            }
            instructions.push(Instruction::interaction(gate.clone(), (f1, f2), timing.duration));
        }

        Ok(EmittedLayer {
            instructions,
            qubit_frequencies,
            barrier,
        })
    }
}

impl fmt::Debug for LayerPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerPipeline")
            .field("device", &self.device.name())
            .field("config", &self.config)
            .field("stage", &self.stage)
            .field("cached_solves", &self.cache.len())
            .finish()
    }
}

/// Schedule a circuit in one call
/// Gantree: schedule(circuit, device, mapping, config) -> Result<Ir> // 단일 호출
pub fn schedule(
    circuit: &Circuit,
    device: &Device,
    mapping: Option<&[QubitId]>,
    config: &ScheduleConfig,
) -> XfreqResult<Ir> {
    LayerPipeline::new(device.clone(), config.clone())?.run(circuit, mapping)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecompositionScheme;
    use approx::assert_relative_eq;
    use xfreq_core::CircuitBuilder;

    #[test]
    fn test_hybrid_rejected_before_run() {
        let config = ScheduleConfig::new().with_scheduler(SchedulerPolicy::Hybrid);
        let err = LayerPipeline::new(Device::linear(2), config).unwrap_err();
        assert_eq!(err, XfreqError::UnsupportedScheduler("hybrid".into()));
    }

    #[test]
    fn test_stage_tracking() {
        let mut pipeline = LayerPipeline::new(Device::linear(2), ScheduleConfig::new()).unwrap();
        assert_eq!(pipeline.stage(), None);

        let circuit = CircuitBuilder::new(2).h(0).build();
        pipeline.run(&circuit, None).unwrap();
        assert_eq!(pipeline.stage(), Some(PipelineStage::Accumulate));
    }

    #[test]
    fn test_measure_skipped_but_layer_counted() {
        let circuit = CircuitBuilder::new(2).measure(0).build();
        let ir = schedule(&circuit, &Device::linear(2), None, &ScheduleConfig::new()).unwrap();
        assert_eq!(ir.depth_after, 1);
        assert_eq!(ir.num_instructions(), 0);
        assert_relative_eq!(ir.total_time, 0.0);
    }

    #[test]
    fn test_mapping_moves_interaction() {
        let circuit = CircuitBuilder::new(2).cz(0, 1).build();
        let ir = schedule(
            &circuit,
            &Device::linear(4),
            Some(&[2, 3][..]),
            &ScheduleConfig::new(),
        )
        .unwrap();

        let inst = ir.instructions().next().unwrap();
        assert_eq!(inst.gate, Gate::Cz(2, 3));
        assert_eq!(ir.t_act[0], 0.0);
        assert!(ir.t_act[3] > 0.0);
    }

    #[test]
    fn test_oversized_circuit_rejected() {
        let circuit = CircuitBuilder::new(3).h(2).build();
        let err = schedule(&circuit, &Device::linear(2), None, &ScheduleConfig::new()).unwrap_err();
        assert!(matches!(err, XfreqError::QubitOutOfRange { qubit: 2, .. }));
    }

    #[test]
    fn test_flux_noise_moves_frequencies() {
        let circuit = CircuitBuilder::new(2).cz(0, 1).build();
        let device = Device::linear(2);
        let quiet = schedule(&circuit, &device, None, &ScheduleConfig::new()).unwrap();
        let noisy = schedule(
            &circuit,
            &device,
            None,
            &ScheduleConfig::reproducible(3).with_flux_noise(0.01),
        )
        .unwrap();

        let (f1, _) = quiet.instructions().next().unwrap().frequencies.unwrap();
        let (g1, _) = noisy.instructions().next().unwrap().frequencies.unwrap();
        assert_ne!(f1, g1);
        assert!(g1.is_finite());
    }

    #[test]
    fn test_cache_shared_across_runs() {
        let cache = SolverCache::new();
        let circuit = CircuitBuilder::new(2).cz(0, 1).build();
        let config = ScheduleConfig::new().with_decomposition(DecompositionScheme::Cphase);

        let mut first = LayerPipeline::new(Device::linear(2), config.clone())
            .unwrap()
            .with_cache(cache.clone());
        first.run(&circuit, None).unwrap();
        let misses = cache.misses();

        let mut second = LayerPipeline::new(Device::linear(2), config)
            .unwrap()
            .with_cache(cache.clone());
        second.run(&circuit, None).unwrap();
        assert_eq!(cache.misses(), misses);
        assert!(cache.hits() > 0);
    }
}
