// Player module - the decision interface the game drives
//
// Implementations live under players/.

use crate::enums::{Location, Move};
use crate::state::GameState;

pub trait Player {
    /// Picks one of `moves` for the player to act. `view` is the state as
    /// this player may see it and `location` is the player's true location.
    /// `moves` is never empty.
    fn choose_move(&mut self, view: &GameState, location: Location, moves: &[Move]) -> Move;
}

impl<F> Player for F
where
    F: FnMut(&GameState, Location, &[Move]) -> Move,
{
    fn choose_move(&mut self, view: &GameState, location: Location, moves: &[Move]) -> Move {
        self(view, location, moves)
    }
}
