// Manhunt Engine Library - Core Module Organization
//
// Rules engine and adversarial search for a hidden-movement pursuit game on a
// transport graph: one fugitive moving in secret, several pursuers hunting it.

// Board and game data
pub mod enums;
pub mod graph;
pub mod tickets;

// Rules
pub mod events;
pub mod game;
pub mod state;

// Decision making
pub mod cache;
pub mod player;
pub mod players;

pub mod config;
pub mod errors;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export common types for convenient access
pub use crate::cache::DistanceCache;
pub use crate::config::EngineConfig;
pub use crate::enums::{Color, Location, Move, Ticket, Transport};
pub use crate::errors::{ManhuntError, ManhuntResult};
pub use crate::events::{GameEvent, Spectator};
pub use crate::game::Game;
pub use crate::graph::TransportGraph;
pub use crate::player::Player;
pub use crate::state::GameState;
pub use crate::tickets::TicketBag;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
