//! Color-budget limiting of sub-layers
//!
//! Gantree: L4_Schedule → LimitColors
//!
//! A sub-layer whose interactions need more colors than the budget is
//! split so each piece carries at most `budget` color classes.

use xfreq_color::CrosstalkColorer;
use xfreq_core::{Coupling, CrosstalkGraph, Gate, Layer};

/// Split sub-layers to respect the colorer's budget
/// Gantree: limit_colors(layers, colorer, crosstalk) -> Vec<Layer> // 색 제한
///
/// Gates without an interaction stay in the first piece.
pub fn limit_colors(
    layers: Vec<Layer>,
    colorer: &mut CrosstalkColorer,
    crosstalk: &CrosstalkGraph,
) -> Vec<Layer> {
    let budget = colorer.budget();
    let mut result: Vec<Layer> = Vec::with_capacity(layers.len());

    for layer in layers {
        let active: Vec<Coupling> = layer.iter().filter_map(coupling_of).collect();

        if budget == 0 || active.is_empty() {
            result.push(layer);
            continue;
        }

        let outcome = colorer.color(crosstalk, &active);
        if outcome.num_colors <= budget {
            result.push(layer);
            continue;
        }

        // Gantree: split_by_classes(outcome) // 클래스 분할
        let pieces = (outcome.num_colors + budget - 1) / budget;
        let mut split: Vec<Layer> = vec![Vec::new(); pieces];
        for gate in layer {
            let piece = coupling_of(&gate)
                .and_then(|c| outcome.color_of(&c))
                .map_or(0, |color| color / budget);
            split[piece].push(gate);
        }

        log::debug!(
            "split sub-layer with {} colors into {} pieces (budget {})",
            outcome.num_colors,
            pieces,
            budget
        );

        result.extend(split);
    }

    result
}

fn coupling_of(gate: &Gate) -> Option<Coupling> {
    gate.pair().and_then(|(a, b)| Coupling::new(a, b).ok())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> CrosstalkGraph {
        let e = [
            Coupling::new(0, 1).unwrap(),
            Coupling::new(2, 3).unwrap(),
            Coupling::new(4, 5).unwrap(),
        ];
        let mut graph = CrosstalkGraph::new();
        graph.add_conflict(e[0], e[1]).unwrap();
        graph.add_conflict(e[1], e[2]).unwrap();
        graph.add_conflict(e[0], e[2]).unwrap();
        graph
    }

    #[test]
    fn test_unbounded_passthrough() {
        let layers = vec![vec![Gate::Cz(0, 1), Gate::Cz(2, 3), Gate::Cz(4, 5)]];
        let mut colorer = CrosstalkColorer::unbounded();
        let limited = limit_colors(layers.clone(), &mut colorer, &triangle());
        assert_eq!(limited, layers);
    }

    #[test]
    fn test_triangle_split_under_budget_two() {
        let layers = vec![vec![Gate::H(6), Gate::Cz(0, 1), Gate::Cz(2, 3), Gate::Cz(4, 5)]];
        let mut colorer = CrosstalkColorer::new(2, Some(5)).with_attempts(10);
        let limited = limit_colors(layers, &mut colorer, &triangle());

        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].len(), 3);
        assert!(limited[0].contains(&Gate::H(6)));
        assert_eq!(limited[1].len(), 1);
    }

    #[test]
    fn test_within_budget_untouched() {
        let layers = vec![vec![Gate::Cz(0, 1), Gate::Cz(2, 3)]];
        let mut colorer = CrosstalkColorer::new(2, Some(5));
        let limited = limit_colors(layers.clone(), &mut colorer, &triangle());
        assert_eq!(limited, layers);
    }
}
