// Shared fixtures for unit tests

use std::sync::Arc;

use crate::enums::{Color, Location, Ticket, Transport};
use crate::graph::TransportGraph;
use crate::state::{GameState, PlayerConfig};

/// 1-2 taxi, 2-3 bus, 3-1 underground
pub fn triangle_graph() -> Arc<TransportGraph> {
    Arc::new(
        TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (2, 3, Transport::Bus),
            (3, 1, Transport::Underground),
        ])
        .unwrap(),
    )
}

/// Taxi chain 1-2-...-n
pub fn line_graph(n: Location) -> Arc<TransportGraph> {
    Arc::new(TransportGraph::from_edges((1..n).map(|i| (i, i + 1, Transport::Taxi))).unwrap())
}

/// Twelve locations: an inner and an outer taxi ring joined by spokes, with
/// bus and underground shortcuts.
pub fn small_board() -> Arc<TransportGraph> {
    Arc::new(
        TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (2, 3, Transport::Taxi),
            (3, 4, Transport::Taxi),
            (4, 5, Transport::Taxi),
            (5, 6, Transport::Taxi),
            (6, 1, Transport::Taxi),
            (1, 7, Transport::Taxi),
            (7, 8, Transport::Taxi),
            (8, 9, Transport::Taxi),
            (9, 10, Transport::Taxi),
            (10, 11, Transport::Taxi),
            (11, 12, Transport::Taxi),
            (12, 7, Transport::Taxi),
            (2, 8, Transport::Bus),
            (4, 10, Transport::Bus),
            (6, 12, Transport::Bus),
            (3, 9, Transport::Bus),
            (1, 11, Transport::Underground),
            (5, 9, Transport::Underground),
            (3, 7, Transport::Underground),
        ])
        .unwrap(),
    )
}

/// Fugitive configuration with all five ticket kinds present.
pub fn fugitive(location: Location, counts: [u32; 5]) -> PlayerConfig {
    PlayerConfig::new(
        Color::Black,
        location,
        [
            (Ticket::Taxi, counts[0]),
            (Ticket::Bus, counts[1]),
            (Ticket::Underground, counts[2]),
            (Ticket::Double, counts[3]),
            (Ticket::Secret, counts[4]),
        ],
    )
}

/// Pursuer configuration holding only the ordinary kinds.
pub fn pursuer(color: Color, location: Location, counts: [u32; 3]) -> PlayerConfig {
    PlayerConfig::new(
        color,
        location,
        [
            (Ticket::Taxi, counts[0]),
            (Ticket::Bus, counts[1]),
            (Ticket::Underground, counts[2]),
        ],
    )
}

pub fn state(
    graph: Arc<TransportGraph>,
    rounds: Vec<bool>,
    fugitive: PlayerConfig,
    pursuers: Vec<PlayerConfig>,
) -> GameState {
    GameState::new(graph, rounds, fugitive, pursuers).unwrap()
}

/// The triangle scenario: fugitive at 1 with one of everything, one pursuer at 2.
pub fn triangle_state(rounds: Vec<bool>) -> GameState {
    state(
        triangle_graph(),
        rounds,
        fugitive(1, [1, 1, 1, 1, 1]),
        vec![pursuer(Color::Red, 2, [1, 1, 1])],
    )
}
