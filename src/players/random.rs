use rand::prelude::*;
use rand_xorshift::XorShiftRng;

use crate::enums::{Location, Move};
use crate::player::Player;
use crate::state::GameState;

/// Picks uniformly among the legal moves. Seeded so simulations replay.
pub struct RandomPlayer {
    rng: XorShiftRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        RandomPlayer {
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, view: &GameState, _location: Location, moves: &[Move]) -> Move {
        moves
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::Pass(view.current_color()))
    }
}
