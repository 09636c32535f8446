//! Memoization of solver outcomes
//!
//! Gantree: L3_Solver → SolverCache
//!
//! Outcomes are keyed by the quantized request and live for the whole
//! scheduling run. Clones share storage and counters.

use crate::solver::SolveOutcome;
use crate::quantize::SolveKey;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Shared solver cache
/// Gantree: SolverCache // 캐싱
#[derive(Debug, Default)]
pub struct SolverCache {
    /// Cache storage
    /// Gantree: entries: HashMap<SolveKey,SolveOutcome> // 캐시 저장소
    entries: Arc<RwLock<HashMap<SolveKey, SolveOutcome>>>,

    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
}

impl SolverCache {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Cache Operations
    // ========================================================================

    /// Look up an outcome, counting the hit or miss
    /// Gantree: get(key) -> Option<SolveOutcome> // 캐시 조회
    pub fn get(&self, key: &SolveKey) -> Option<SolveOutcome> {
        let found = self
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned());

        match found {
            Some(outcome) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(outcome)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store an outcome; the first write for a key wins
    /// Gantree: insert(key, outcome) // 캐시 저장
    pub fn insert(&self, key: SolveKey, outcome: SolveOutcome) {
        if let Ok(mut entries) = self.entries.write() {
            entries.entry(key).or_insert(outcome);
        }
    }

    /// Cached outcome, or compute and store one
    pub fn get_or_insert_with<F>(&self, key: SolveKey, compute: F) -> SolveOutcome
    where
        F: FnOnce() -> SolveOutcome,
    {
        if let Some(outcome) = self.get(&key) {
            return outcome;
        }
        let outcome = compute();
        self.insert(key, outcome.clone());
        outcome
    }

    /// Drop every entry and reset counters
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that found nothing
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Fraction of lookups that hit
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

impl Clone for SolverCache {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
