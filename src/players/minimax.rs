use std::f64;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::cache::DistanceCache;
use crate::config::SearchConfig;
use crate::enums::{Location, Move};
use crate::player::Player;
use crate::state::GameState;

use super::value::{ValueFunction, ValueWeights};

const DEFAULT_DEPTH: usize = 1;

/// Alpha-Beta search over fugitive decisions.
///
/// The fugitive maximises the position score. Pursuers do not search: each
/// one answers greedily with the move that minimises the score one ply
/// ahead. `depth` counts the extra rotations looked at after the root move;
/// depth 0 is a plain greedy choice.
#[derive(Debug, Clone)]
pub struct AlphaBetaPlayer {
    value: ValueFunction,
    depth: usize,
    use_parallel: bool,
}

impl AlphaBetaPlayer {
    pub fn new(cache: Arc<DistanceCache>) -> Self {
        AlphaBetaPlayer {
            value: ValueFunction::new(cache, ValueWeights::default()),
            depth: DEFAULT_DEPTH,
            use_parallel: true,
        }
    }

    pub fn with_depth(cache: Arc<DistanceCache>, depth: usize) -> Self {
        AlphaBetaPlayer {
            depth,
            ..Self::new(cache)
        }
    }

    pub fn from_config(cache: Arc<DistanceCache>, config: &SearchConfig) -> Self {
        AlphaBetaPlayer {
            value: ValueFunction::new(cache, config.weights.clone()),
            depth: config.depth,
            use_parallel: config.parallel,
        }
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Best move for the player to act in `state`, searching `max_depth`
    /// rotations past the root move.
    pub fn search(&self, state: &GameState, max_depth: usize) -> Move {
        let moves = state.current_legal_moves();
        self.search_moves(state, &moves, max_depth)
    }

    fn search_moves(&self, state: &GameState, moves: &[Move], max_depth: usize) -> Move {
        match moves {
            [] => return Move::Pass(state.current_color()),
            [only] => return *only,
            _ => {}
        }

        let (best_move, best_value) = if state.current_color().is_pursuer() {
            self.greedy_pursuer(state, moves)
        } else if self.use_parallel {
            self.parallel_root(state, moves, max_depth)
        } else {
            self.sequential_root(state, moves, max_depth)
        };
        debug!(
            "{:?} chose {:?} (value {:.1}, {} candidates, depth {})",
            state.current_color(),
            best_move,
            best_value,
            moves.len(),
            max_depth
        );
        best_move
    }

    fn sequential_root(&self, state: &GameState, moves: &[Move], depth: usize) -> (Move, f64) {
        let beta = self.value.weights().win;
        let mut alpha = f64::NEG_INFINITY;
        let mut best_move = moves[0];
        let mut best_value = f64::NEG_INFINITY;

        for action in moves {
            let value = self.move_value(state, action, depth, alpha, beta);
            if value > best_value {
                best_value = value;
                best_move = *action;
            }
            alpha = alpha.max(best_value);
            if best_value >= beta {
                break; // nothing beats a forced win
            }
        }
        (best_move, best_value)
    }

    // Scores every root move independently; ties keep the earliest move so
    // the choice matches the sequential search.
    fn parallel_root(&self, state: &GameState, moves: &[Move], depth: usize) -> (Move, f64) {
        let beta = self.value.weights().win;
        let values: Vec<f64> = moves
            .par_iter()
            .map(|action| self.move_value(state, action, depth, f64::NEG_INFINITY, beta))
            .collect();

        let mut best = (moves[0], values[0]);
        for (action, value) in moves.iter().zip(values).skip(1) {
            if value > best.1 {
                best = (*action, value);
            }
        }
        best
    }

    /// Value of the fugitive playing `action`, then `depth` more rotations.
    fn move_value(&self, state: &GameState, action: &Move, depth: usize, alpha: f64, beta: f64) -> f64 {
        let mut next = state.clone();
        next.apply_move(action);
        if depth == 0 {
            return self.value.evaluate(&next);
        }
        if let Some(value) = self.value.terminal_value(&next) {
            return value;
        }

        self.pursuers_reply(&mut next);
        if let Some(value) = self.value.terminal_value(&next) {
            return value;
        }
        self.fugitive_value(&next, depth - 1, alpha, beta)
    }

    // The pursuers' greedy reply does not read the bounds, so only beta can
    // prune; alpha is carried for the fugitive layers below.
    fn fugitive_value(&self, state: &GameState, depth: usize, mut alpha: f64, beta: f64) -> f64 {
        let moves = state.current_legal_moves();
        let mut best_value = f64::NEG_INFINITY;
        for action in &moves {
            let value = self.move_value(state, action, depth, alpha, beta);
            best_value = best_value.max(value);
            alpha = alpha.max(best_value);
            if best_value >= beta {
                break; // beta cut-off
            }
        }
        best_value
    }

    // Every pursuer moves greedily in turn order until the fugitive is to
    // act again or has been caught.
    fn pursuers_reply(&self, state: &mut GameState) {
        while state.current_color().is_pursuer() && !state.is_captured() {
            let moves = state.current_legal_moves();
            let (action, _) = self.greedy_pursuer(state, &moves);
            state.apply_move(&action);
        }
    }

    /// Pursuer move with the lowest one-ply score; ties keep the earliest.
    fn greedy_pursuer(&self, state: &GameState, moves: &[Move]) -> (Move, f64) {
        let mut best = (Move::Pass(state.current_color()), f64::INFINITY);
        for action in moves {
            let mut next = state.clone();
            next.apply_move(action);
            let value = self.value.evaluate(&next);
            if value < best.1 {
                best = (*action, value);
            }
        }
        best
    }
}

impl Player for AlphaBetaPlayer {
    fn choose_move(&mut self, view: &GameState, _location: Location, moves: &[Move]) -> Move {
        self.search_moves(view, moves, self.depth)
    }
}
