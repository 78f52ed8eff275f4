use super::{GameState, FUGITIVE_INDEX};
use crate::enums::{DoubleMove, Move, Ticket, TicketMove};
use crate::events::GameEvent;

impl GameState {
    /// Applies a legal move. Legality is the caller's responsibility; see
    /// `Game::submit` for the checked entry point.
    pub fn apply_move(&mut self, action: &Move) {
        self.apply_observed(action, |_| {});
    }

    /// Applies a legal move, reporting round changes and the publicly visible
    /// form of each move to `observe` in the order they happen.
    ///
    /// A double is announced as a whole first, then each leg is played and
    /// reported individually.
    pub fn apply_observed<F>(&mut self, action: &Move, mut observe: F)
    where
        F: FnMut(GameEvent),
    {
        match *action {
            Move::Pass(color) => {
                if color.is_fugitive() {
                    self.advance_round(&mut observe);
                }
                observe(GameEvent::MoveMade(*action));
            }
            Move::Ticket(leg) if leg.color.is_fugitive() => {
                self.play_fugitive_leg(leg, &mut observe);
            }
            Move::Ticket(ticket_move) => {
                self.play_pursuer_move(ticket_move);
                observe(GameEvent::MoveMade(*action));
            }
            Move::Double(double_move) => {
                self.players[FUGITIVE_INDEX].tickets.remove(Ticket::Double);
                observe(GameEvent::MoveMade(Move::Double(
                    self.redact_double(&double_move),
                )));
                self.play_fugitive_leg(double_move.first, &mut observe);
                self.play_fugitive_leg(double_move.second, &mut observe);
            }
        }
        self.current = (self.current + 1) % self.players.len();
    }

    /// Copy of the state after `action`, together with the form of the move
    /// the pursuers get to see.
    pub fn successor(&self, action: &Move) -> (GameState, Move) {
        let mut next = self.clone();
        let mut observable = None;
        next.apply_observed(action, |event| {
            if let GameEvent::MoveMade(seen) = event {
                if observable.is_none() {
                    observable = Some(seen);
                }
            }
        });
        (next, observable.unwrap_or(*action))
    }

    /// The double as the pursuers see it before either leg is played. Each
    /// concealed leg shows the last location known at that point.
    pub fn redact_double(&self, double_move: &DoubleMove) -> DoubleMove {
        let first_destination = if self.is_reveal_round(self.round) {
            double_move.first.destination
        } else {
            self.last_revealed
        };
        let second_destination = if self.is_reveal_round(self.round + 1) {
            double_move.second.destination
        } else {
            first_destination
        };
        DoubleMove {
            color: double_move.color,
            first: TicketMove {
                destination: first_destination,
                ..double_move.first
            },
            second: TicketMove {
                destination: second_destination,
                ..double_move.second
            },
        }
    }

    fn play_fugitive_leg<F>(&mut self, leg: TicketMove, observe: &mut F)
    where
        F: FnMut(GameEvent),
    {
        let revealed = self.is_reveal_round(self.round);

        let fugitive = &mut self.players[FUGITIVE_INDEX];
        fugitive.tickets.remove(leg.ticket);
        fugitive.location = leg.destination;
        if revealed {
            self.last_revealed = leg.destination;
        }

        let public = TicketMove {
            destination: self.last_revealed,
            ..leg
        };
        self.advance_round(observe);
        observe(GameEvent::MoveMade(Move::Ticket(public)));
    }

    // Spent pursuer tickets go to the fugitive.
    fn play_pursuer_move(&mut self, ticket_move: TicketMove) {
        if let Some(index) = self.index_of(ticket_move.color) {
            let pursuer = &mut self.players[index];
            pursuer.tickets.remove(ticket_move.ticket);
            pursuer.location = ticket_move.destination;
            self.players[FUGITIVE_INDEX].tickets.add(ticket_move.ticket);
        }
    }

    fn advance_round<F>(&mut self, observe: &mut F)
    where
        F: FnMut(GameEvent),
    {
        if self.round < self.rounds.len() {
            self.round += 1;
            observe(GameEvent::RoundStarted { round: self.round });
        }
    }
}
