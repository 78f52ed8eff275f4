// Game driver
//
// Owns the authoritative state, validates submitted moves, asks players for
// decisions and broadcasts what happens to registered spectators.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::enums::{Color, Location, Move};
use crate::errors::{ManhuntResult, MoveError};
use crate::events::{GameEvent, Spectator, SpectatorId};
use crate::player::Player;
use crate::state::GameState;

pub struct Game {
    state: GameState,
    spectators: Vec<(SpectatorId, Box<dyn Spectator>)>,
    next_spectator_id: u64,
}

impl Game {
    pub fn new(state: GameState) -> Self {
        Game {
            state,
            spectators: Vec::new(),
            next_spectator_id: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_color(&self) -> Color {
        self.state.current_color()
    }

    pub fn current_round(&self) -> usize {
        self.state.current_round()
    }

    pub fn public_location(&self, color: Color) -> Option<Location> {
        self.state.public_location(color)
    }

    pub fn winners(&self) -> BTreeSet<Color> {
        self.state.winners()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn register_spectator(&mut self, spectator: Box<dyn Spectator>) -> SpectatorId {
        let id = SpectatorId(self.next_spectator_id);
        self.next_spectator_id += 1;
        self.spectators.push((id, spectator));
        id
    }

    /// Removes a spectator; returns it if it was registered.
    pub fn unregister_spectator(&mut self, id: SpectatorId) -> Option<Box<dyn Spectator>> {
        let index = self.spectators.iter().position(|(sid, _)| *sid == id)?;
        Some(self.spectators.remove(index).1)
    }

    pub fn spectator_count(&self) -> usize {
        self.spectators.len()
    }

    /// Validates and applies a move for the player to act, notifying
    /// spectators. Returns the move as the pursuers saw it. A rejected move
    /// leaves the game untouched and emits nothing.
    pub fn submit(&mut self, action: Move) -> ManhuntResult<Move> {
        if self.state.is_game_over() {
            return Err(MoveError::GameOver.into());
        }
        let color = self.state.current_color();
        if !self.state.current_legal_moves().contains(&action) {
            return Err(MoveError::illegal(action, color).into());
        }

        let mut events = Vec::new();
        self.state.apply_observed(&action, |event| events.push(event));
        let observable = events
            .iter()
            .find_map(|event| match event {
                GameEvent::MoveMade(seen) => Some(*seen),
                _ => None,
            })
            .unwrap_or(action);
        debug!("{:?} played {:?}", color, observable);

        let winners = self.state.winners();
        if !winners.is_empty() {
            info!(
                "Game over after round {}: {:?} win",
                self.state.current_round(),
                winners
            );
            events.push(GameEvent::GameOver { winners });
        } else if self.state.current_index() == 0 {
            events.push(GameEvent::RotationComplete);
        }

        for event in &events {
            self.notify(event);
        }
        Ok(observable)
    }

    /// Asks `player` for a move as the current colour and submits it.
    pub fn play_turn(&mut self, player: &mut dyn Player) -> ManhuntResult<Move> {
        if self.state.is_game_over() {
            return Err(MoveError::GameOver.into());
        }
        let color = self.state.current_color();
        let view = self.state.view_for(color);
        let location = self.state.current_player().location;
        let moves = self.state.current_legal_moves();

        let chosen = player.choose_move(&view, location, &moves);
        self.submit(chosen)
    }

    /// Plays turns until the turn returns to the fugitive or the game ends.
    /// `players` is indexed by turn order: fugitive first, then pursuers.
    pub fn start_rotate(&mut self, players: &mut [Box<dyn Player>]) -> ManhuntResult<()> {
        if self.state.is_game_over() {
            return Err(MoveError::GameOver.into());
        }
        if let Some(missing) = self.state.players().get(players.len()) {
            return Err(MoveError::MissingPlayer {
                color: missing.color,
            }
            .into());
        }

        loop {
            let index = self.state.current_index();
            self.play_turn(players[index].as_mut())?;
            if self.state.is_game_over() || self.state.current_index() == 0 {
                return Ok(());
            }
        }
    }

    /// Plays whole rotations until someone wins.
    pub fn run(&mut self, players: &mut [Box<dyn Player>]) -> ManhuntResult<BTreeSet<Color>> {
        while !self.state.is_game_over() {
            self.start_rotate(players)?;
        }
        Ok(self.state.winners())
    }

    fn notify(&mut self, event: &GameEvent) {
        for (_, spectator) in self.spectators.iter_mut() {
            spectator.on_event(event);
        }
    }
}
