use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::DistanceCache;
use crate::enums::{Location, FUGITIVE_COLOR};
use crate::state::{GameState, PlayerState};

/// Weights of the fugitive's position score. Positive is good for the
/// fugitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueWeights {
    pub mobility: f64,
    pub average_distance: f64,
    pub minimum_distance: f64,
    pub win: f64,
    pub loss: f64,
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self {
            mobility: 20.0,
            average_distance: 20.0,
            minimum_distance: 60.0,
            win: 1_000_000.0,
            loss: -1_000_000.0,
        }
    }
}

/// Scores positions from the fugitive's point of view using the distance
/// cache.
#[derive(Debug, Clone)]
pub struct ValueFunction {
    cache: Arc<DistanceCache>,
    weights: ValueWeights,
}

impl ValueFunction {
    pub fn new(cache: Arc<DistanceCache>, weights: ValueWeights) -> Self {
        ValueFunction { cache, weights }
    }

    pub fn weights(&self) -> &ValueWeights {
        &self.weights
    }

    pub fn evaluate(&self, state: &GameState) -> f64 {
        self.terminal_value(state)
            .unwrap_or_else(|| self.heuristic(state))
    }

    /// Fixed score for decided positions, `None` while play continues.
    /// Follows `GameState::winners`, so stuck players end the game here too.
    pub fn terminal_value(&self, state: &GameState) -> Option<f64> {
        let winners = state.winners();
        if winners.is_empty() {
            None
        } else if winners.contains(&FUGITIVE_COLOR) {
            Some(self.weights.win)
        } else {
            Some(self.weights.loss)
        }
    }

    /// Weighted sum of three terms, each scaled to roughly 0..100:
    /// fugitive mobility, mean pursuer distance, and a closest-pursuer
    /// penalty that halves with every extra step of separation.
    pub fn heuristic(&self, state: &GameState) -> f64 {
        let fugitive = state.fugitive();
        let max_moves = self.cache.max_move_count().max(1) as f64;
        let max_distance = self.cache.max_distance().max(1) as f64;

        let mobility =
            self.cache.valid_move_count(fugitive.location, &fugitive.tickets) as f64 / max_moves;

        let distances: Vec<f64> = state
            .pursuers()
            .iter()
            .map(|pursuer| self.pursuer_distance(pursuer, fugitive.location, max_distance))
            .collect();
        if distances.is_empty() {
            return self.weights.mobility * mobility * 100.0;
        }
        let average = distances.iter().sum::<f64>() / distances.len() as f64;
        let closest = distances.iter().copied().fold(f64::INFINITY, f64::min);

        self.weights.mobility * mobility * 100.0
            + self.weights.average_distance * average / max_distance * 100.0
            - self.weights.minimum_distance * 100.0 / 2f64.powf(closest)
    }

    // Unreachable pursuers count as one step beyond the furthest known distance.
    fn pursuer_distance(&self, pursuer: &PlayerState, target: Location, max_distance: f64) -> f64 {
        self.cache
            .try_distance(pursuer.location, target, &pursuer.tickets)
            .map_or(max_distance + 1.0, f64::from)
    }
}
