use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{Color, Location, Ticket};

/// Top-level error type for the engine
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ManhuntError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Move error: {0}")]
    Move(#[from] MoveError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

/// Invalid game setup, reported before any state exists
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Round schedule is empty")]
    EmptyRounds,

    #[error("Transport graph is empty")]
    EmptyGraph,

    #[error("At least one pursuer is required")]
    NoPursuers,

    #[error("Fugitive must play {expected:?}, got {actual:?}")]
    FugitiveColor { expected: Color, actual: Color },

    #[error("Duplicate colour: {color:?}")]
    DuplicateColor { color: Color },

    #[error("Duplicate start location: {location}")]
    DuplicateLocation { location: Location },

    #[error("Start location {location} of {color:?} is not on the graph")]
    UnknownLocation { color: Color, location: Location },

    #[error("Location {location} is reserved and cannot appear on the graph")]
    ReservedLocation { location: Location },

    #[error("Location {location} is above the largest supported id {max}")]
    LocationOutOfRange { location: Location, max: Location },

    #[error("Pursuer {color:?} holds fugitive-only ticket {ticket:?}")]
    IllegalTicket { color: Color, ticket: Ticket },

    #[error("Player {color:?} is missing ticket kind {ticket:?}")]
    MissingTicket { color: Color, ticket: Ticket },

    #[error("Board has {available} locations, {needed} players need distinct starts")]
    TooFewLocations { needed: usize, available: usize },
}

/// Errors raised while driving turns
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    #[error("Illegal move '{action}' for player {color:?}")]
    IllegalMove { action: String, color: Color },

    #[error("Game is already over")]
    GameOver,

    #[error("No player supplied for colour {color:?}")]
    MissingPlayer { color: Color },
}

/// File system and persistence errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfrastructureError {
    #[error("Persistence error: {details}")]
    Persistence { details: String },

    #[error("Configuration file error: {details}")]
    Configuration { details: String },
}

pub type ManhuntResult<T> = Result<T, ManhuntError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

impl MoveError {
    pub fn illegal(action: impl std::fmt::Debug, color: Color) -> Self {
        Self::IllegalMove {
            action: format!("{:?}", action),
            color,
        }
    }
}

impl InfrastructureError {
    pub fn persistence(details: impl Into<String>) -> Self {
        Self::Persistence {
            details: details.into(),
        }
    }

    pub fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration {
            details: details.into(),
        }
    }
}
