// Players module - automated decision makers
//
// AlphaBetaPlayer searches with the distance-cache heuristic; RandomPlayer
// is a seeded baseline.

pub mod minimax;
pub mod random;
pub mod value;

pub use self::minimax::AlphaBetaPlayer;
pub use self::random::RandomPlayer;
pub use self::value::{ValueFunction, ValueWeights};
