// Spectator notifications
//
// Events a running game broadcasts to its observers. Fugitive moves inside
// MoveMade are always the redacted, pursuer-visible form.

use std::collections::BTreeSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::enums::{Color, Move};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The fugitive's move counter advanced to `round`
    RoundStarted { round: usize },

    /// A move as the table saw it
    MoveMade(Move),

    /// Turn passed back to the fugitive
    RotationComplete,

    GameOver { winners: BTreeSet<Color> },
}

/// Receives every event a game emits, in order.
pub trait Spectator {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> Spectator for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned on registration, used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpectatorId(pub u64);

/// Writes the event stream to the `log` facade.
#[derive(Debug, Default)]
pub struct LoggingSpectator;

impl Spectator for LoggingSpectator {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoundStarted { round } => debug!("Round {} started", round),
            GameEvent::MoveMade(action) => debug!("Move made: {:?}", action),
            GameEvent::RotationComplete => debug!("Rotation complete"),
            GameEvent::GameOver { winners } => info!("Game over, winners: {:?}", winners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_spectator_records_events() {
        let mut seen = Vec::new();
        {
            let mut spectator = |event: &GameEvent| seen.push(event.clone());
            spectator.on_event(&GameEvent::RoundStarted { round: 1 });
            spectator.on_event(&GameEvent::RotationComplete);
        }
        assert_eq!(
            seen,
            vec![GameEvent::RoundStarted { round: 1 }, GameEvent::RotationComplete]
        );
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::GameOver {
            winners: BTreeSet::from([Color::Black]),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
