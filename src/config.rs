// Engine configuration
//
// JSON file with three optional sections: search tuning, cache location and
// the game setup. Missing fields fall back to the classic board game values.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::enums::{Color, Location, Ticket, FUGITIVE_COLOR, PURSUER_COLORS};
use crate::errors::{ConfigError, ConfigResult, InfrastructureError, ManhuntResult};
use crate::graph::TransportGraph;
use crate::players::ValueWeights;
use crate::state::{GameState, PlayerConfig};

const REVEAL_ROUNDS: [usize; 5] = [3, 8, 13, 18, 24];
const ROUND_COUNT: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub cache: CacheConfig,
    pub game: GameSetup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Rotations searched past the root move; 0 is greedy.
    pub depth: usize,
    pub parallel: bool,
    pub weights: ValueWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            parallel: true,
            weights: ValueWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub directory: PathBuf,
    /// Ignore persisted tables and rebuild them.
    pub regenerate: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("cache"),
            regenerate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSetup {
    /// Reveal flag per round, one entry per fugitive move.
    pub rounds: Vec<bool>,
    pub pursuers: usize,
    pub fugitive_tickets: HashMap<Ticket, u32>,
    pub pursuer_tickets: HashMap<Ticket, u32>,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            rounds: (1..=ROUND_COUNT)
                .map(|round| REVEAL_ROUNDS.contains(&round))
                .collect(),
            pursuers: PURSUER_COLORS.len(),
            fugitive_tickets: HashMap::from([
                (Ticket::Taxi, 4),
                (Ticket::Bus, 3),
                (Ticket::Underground, 3),
                (Ticket::Double, 2),
                (Ticket::Secret, 5),
            ]),
            pursuer_tickets: HashMap::from([
                (Ticket::Taxi, 11),
                (Ticket::Bus, 8),
                (Ticket::Underground, 4),
            ]),
        }
    }
}

impl GameSetup {
    pub fn pursuer_colors(&self) -> &[Color] {
        &PURSUER_COLORS[..self.pursuers.min(PURSUER_COLORS.len())]
    }

    /// Player configurations for the given start locations: the first goes to
    /// the fugitive, the rest to pursuers in colour order.
    pub fn players_at(&self, starts: &[Location]) -> (PlayerConfig, Vec<PlayerConfig>) {
        let fugitive_start = starts.first().copied().unwrap_or_default();
        let fugitive = PlayerConfig::new(
            FUGITIVE_COLOR,
            fugitive_start,
            self.fugitive_tickets.clone(),
        );
        let pursuers = self
            .pursuer_colors()
            .iter()
            .zip(starts.iter().skip(1))
            .map(|(&color, &location)| {
                PlayerConfig::new(color, location, self.pursuer_tickets.clone())
            })
            .collect();
        (fugitive, pursuers)
    }

    /// Opening state with every player on a distinct random location.
    pub fn random_start<R: Rng>(
        &self,
        graph: Arc<TransportGraph>,
        rng: &mut R,
    ) -> ConfigResult<GameState> {
        let needed = self.pursuer_colors().len() + 1;
        if graph.node_count() < needed {
            return Err(ConfigError::TooFewLocations {
                needed,
                available: graph.node_count(),
            });
        }
        let starts: Vec<Location> = graph
            .nodes()
            .choose_multiple(rng, needed)
            .copied()
            .collect();
        let (fugitive, pursuers) = self.players_at(&starts);
        GameState::new(graph, self.rounds.clone(), fugitive, pursuers)
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ManhuntResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            InfrastructureError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            InfrastructureError::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Reads `path` if given, falling back to defaults when it is absent or
    /// unreadable.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::from_file) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::errors::ManhuntError;
    use crate::test_utils::small_board;

    #[test]
    fn test_classic_defaults() {
        let config = EngineConfig::default();
        let reveals: Vec<usize> = config
            .game
            .rounds
            .iter()
            .enumerate()
            .filter(|(_, &reveal)| reveal)
            .map(|(index, _)| index + 1)
            .collect();

        assert_eq!(config.game.rounds.len(), 24);
        assert_eq!(reveals, vec![3, 8, 13, 18, 24]);
        assert_eq!(config.game.fugitive_tickets[&Ticket::Secret], 5);
        assert_eq!(config.game.pursuer_tickets[&Ticket::Underground], 4);
        assert_eq!(config.search.depth, 1);
        assert_eq!(config.search.weights.minimum_distance, 60.0);
        assert_eq!(config.cache.directory, PathBuf::from("cache"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"search": {"depth": 3, "parallel": false}, "game": {"pursuers": 2}}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.search.depth, 3);
        assert!(!config.search.parallel);
        assert_eq!(config.search.weights, ValueWeights::default());
        assert_eq!(config.game.pursuer_colors(), &[Color::Blue, Color::Green]);
        assert_eq!(config.game.rounds.len(), 24);
        assert!(!config.cache.regenerate);
    }

    #[test]
    fn test_missing_file_is_an_infrastructure_error() {
        let result = EngineConfig::from_file("/nonexistent/manhunt.json");
        assert!(matches!(result, Err(ManhuntError::Infrastructure(_))));

        let fallback = EngineConfig::load_or_default(Some(Path::new("/nonexistent/manhunt.json")));
        assert_eq!(fallback, EngineConfig::default());
    }

    #[test]
    fn test_random_start_is_reproducible() {
        let setup = GameSetup {
            pursuers: 3,
            ..GameSetup::default()
        };
        let board = small_board();
        let mut a = XorShiftRng::seed_from_u64(11);
        let mut b = XorShiftRng::seed_from_u64(11);

        let first = setup.random_start(board.clone(), &mut a).unwrap();
        let second = setup.random_start(board, &mut b).unwrap();

        assert_eq!(first.players(), second.players());
        assert_eq!(first.pursuers().len(), 3);
        assert_eq!(first.player_tickets(Color::Black, Ticket::Double), Some(2));
    }

    #[test]
    fn test_random_start_needs_enough_locations() {
        let setup = GameSetup::default();
        let mut rng = XorShiftRng::seed_from_u64(1);

        let result = setup.random_start(crate::test_utils::triangle_graph(), &mut rng);
        assert_eq!(
            result.err(),
            Some(ConfigError::TooFewLocations {
                needed: 6,
                available: 3
            })
        );
    }
}
