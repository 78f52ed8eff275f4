// Game state
//
// Authoritative model of the players, their tickets, the round counter, the
// turn pointer and what the pursuers currently know about the fugitive.
// Legal move generation lives in move_generation.rs, transitions in
// move_application.rs.

mod move_application;
mod move_generation;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use move_generation::generate_moves;

use crate::enums::{
    Color, Location, Move, Ticket, FUGITIVE_COLOR, HIDDEN_LOCATION, ORDINARY_TICKETS,
};
use crate::errors::{ConfigError, ConfigResult};
use crate::graph::TransportGraph;
use crate::tickets::TicketBag;

/// The fugitive always occupies slot 0 of the turn order.
pub const FUGITIVE_INDEX: usize = 0;

/// Starting position and tickets for one player, as supplied by setup code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub color: Color,
    pub location: Location,
    pub tickets: HashMap<Ticket, u32>,
}

impl PlayerConfig {
    pub fn new(
        color: Color,
        location: Location,
        tickets: impl IntoIterator<Item = (Ticket, u32)>,
    ) -> Self {
        PlayerConfig {
            color,
            location,
            tickets: tickets.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    pub location: Location,
    pub tickets: TicketBag,
}

impl From<&PlayerConfig> for PlayerState {
    fn from(config: &PlayerConfig) -> Self {
        PlayerState {
            color: config.color,
            location: config.location,
            tickets: TicketBag::from_map(&config.tickets),
        }
    }
}

/// Complete game state. Cloning is cheap: the graph and the reveal schedule
/// are shared, only the player records are copied.
#[derive(Debug, Clone)]
pub struct GameState {
    graph: Arc<TransportGraph>,
    rounds: Arc<[bool]>,
    // Turn order: fugitive first, then pursuers in the order supplied.
    players: Vec<PlayerState>,
    current: usize,
    round: usize,
    last_revealed: Location,
}

impl GameState {
    /// Validates the setup and builds the opening state: round 0, fugitive to
    /// move, fugitive not yet revealed.
    pub fn new(
        graph: Arc<TransportGraph>,
        rounds: Vec<bool>,
        fugitive: PlayerConfig,
        pursuers: Vec<PlayerConfig>,
    ) -> ConfigResult<Self> {
        if rounds.is_empty() {
            return Err(ConfigError::EmptyRounds);
        }
        if graph.is_empty() {
            return Err(ConfigError::EmptyGraph);
        }
        if pursuers.is_empty() {
            return Err(ConfigError::NoPursuers);
        }
        if fugitive.color != FUGITIVE_COLOR {
            return Err(ConfigError::FugitiveColor {
                expected: FUGITIVE_COLOR,
                actual: fugitive.color,
            });
        }

        let configs: Vec<&PlayerConfig> = std::iter::once(&fugitive).chain(&pursuers).collect();
        validate_players(&graph, &configs)?;

        Ok(GameState {
            players: configs.into_iter().map(PlayerState::from).collect(),
            graph,
            rounds: rounds.into(),
            current: FUGITIVE_INDEX,
            round: 0,
            last_revealed: HIDDEN_LOCATION,
        })
    }

    pub fn graph(&self) -> &Arc<TransportGraph> {
        &self.graph
    }

    /// Reveal schedule: `rounds()[r]` is true when the move made in round `r`
    /// is shown to the pursuers.
    pub fn rounds(&self) -> &[bool] {
        &self.rounds
    }

    /// Number of completed fugitive moves, in `0..=rounds().len()`.
    pub fn current_round(&self) -> usize {
        self.round
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current]
    }

    pub fn current_color(&self) -> Color {
        self.current_player().color
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.players.iter().position(|p| p.color == color)
    }

    pub fn player(&self, color: Color) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.color == color)
    }

    pub fn fugitive(&self) -> &PlayerState {
        &self.players[FUGITIVE_INDEX]
    }

    pub fn pursuers(&self) -> &[PlayerState] {
        &self.players[FUGITIVE_INDEX + 1..]
    }

    pub fn pursuer_colors(&self) -> BTreeSet<Color> {
        self.pursuers().iter().map(|p| p.color).collect()
    }

    pub fn player_tickets(&self, color: Color, ticket: Ticket) -> Option<u32> {
        self.player(color).map(|p| p.tickets.count(ticket))
    }

    /// Last location the fugitive was seen at, or `HIDDEN_LOCATION` before the
    /// first reveal.
    pub fn last_revealed_location(&self) -> Location {
        self.last_revealed
    }

    /// Location of `color` as everyone at the table sees it.
    pub fn public_location(&self, color: Color) -> Option<Location> {
        if color.is_fugitive() {
            return Some(self.last_revealed);
        }
        self.player(color).map(|p| p.location)
    }

    /// Whether a move made while the counter reads `round` is revealed.
    /// Rounds past the schedule are concealed.
    pub fn is_reveal_round(&self, round: usize) -> bool {
        self.rounds.get(round).copied().unwrap_or(false)
    }

    /// True when some pursuer other than `mover` stands on `location`. The
    /// fugitive never blocks anyone.
    pub fn is_location_busy(&self, mover: Color, location: Location) -> bool {
        self.pursuers()
            .iter()
            .any(|p| p.color != mover && p.location == location)
    }

    pub fn is_captured(&self) -> bool {
        let fugitive = self.fugitive().location;
        self.pursuers().iter().any(|p| p.location == fugitive)
    }

    /// Every round has been played and the last pursuer has moved.
    pub fn rounds_exhausted(&self) -> bool {
        self.round == self.rounds.len() && self.current == FUGITIVE_INDEX
    }

    fn is_stuck(&self, player: &PlayerState) -> bool {
        matches!(self.legal_moves(player.color).as_slice(), [Move::Pass(_)])
    }

    /// Winning colours, or an empty set while the game is still running.
    ///
    /// Checked in order: capture, every pursuer stuck, schedule exhausted,
    /// fugitive stuck on its own turn.
    pub fn winners(&self) -> BTreeSet<Color> {
        if self.is_captured() {
            return self.pursuer_colors();
        }
        if self.pursuers().iter().all(|p| self.is_stuck(p)) || self.rounds_exhausted() {
            return BTreeSet::from([FUGITIVE_COLOR]);
        }
        if self.current == FUGITIVE_INDEX && self.is_stuck(self.fugitive()) {
            return self.pursuer_colors();
        }
        BTreeSet::new()
    }

    pub fn is_game_over(&self) -> bool {
        !self.winners().is_empty()
    }

    /// The state as `color` is allowed to see it. Pursuers see the fugitive at
    /// its last revealed location; the fugitive sees everything.
    pub fn view_for(&self, color: Color) -> GameState {
        let mut view = self.clone();
        if color.is_pursuer() {
            view.players[FUGITIVE_INDEX].location = self.last_revealed;
        }
        view
    }
}

fn validate_players(graph: &TransportGraph, configs: &[&PlayerConfig]) -> ConfigResult<()> {
    let mut colors = HashSet::new();
    let mut locations = HashSet::new();

    for config in configs {
        if !colors.insert(config.color) {
            return Err(ConfigError::DuplicateColor {
                color: config.color,
            });
        }
        if !locations.insert(config.location) {
            return Err(ConfigError::DuplicateLocation {
                location: config.location,
            });
        }
        if !graph.contains(config.location) {
            return Err(ConfigError::UnknownLocation {
                color: config.color,
                location: config.location,
            });
        }
        if config.color.is_pursuer() {
            if let Some(ticket) = [Ticket::Double, Ticket::Secret]
                .into_iter()
                .find(|t| config.tickets.get(t).copied().unwrap_or(0) > 0)
            {
                return Err(ConfigError::IllegalTicket {
                    color: config.color,
                    ticket,
                });
            }
        }
        if let Some(&ticket) = ORDINARY_TICKETS
            .iter()
            .find(|t| !config.tickets.contains_key(*t))
        {
            return Err(ConfigError::MissingTicket {
                color: config.color,
                ticket,
            });
        }
    }
    Ok(())
}
