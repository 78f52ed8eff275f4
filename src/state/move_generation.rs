use itertools::Itertools;

use super::GameState;
use crate::enums::{Color, DoubleMove, Location, Move, Ticket, TicketMove};
use crate::graph::TransportGraph;
use crate::tickets::TicketBag;

impl GameState {
    /// Legal moves for `color` in the current state. A player with nothing
    /// else to do gets exactly `[Move::Pass(color)]`; an unknown colour gets
    /// no moves at all.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let Some(player) = self.player(color) else {
            return Vec::new();
        };
        generate_moves(
            &self.graph,
            color,
            player.location,
            &player.tickets,
            color.is_fugitive() && self.double_moves_allowed(),
            |location| self.is_location_busy(color, location),
        )
    }

    pub fn current_legal_moves(&self) -> Vec<Move> {
        self.legal_moves(self.current_color())
    }

    /// A double needs two rounds left on the schedule.
    pub fn double_moves_allowed(&self) -> bool {
        self.round + 1 < self.rounds.len()
    }
}

/// Enumerates single-ticket moves from `location`, plus doubles when
/// `allow_double` is set and a DOUBLE ticket is held. Destinations for which
/// `is_busy` holds are skipped. Returns `[Move::Pass(color)]` when nothing
/// else is possible.
pub fn generate_moves<F>(
    graph: &TransportGraph,
    color: Color,
    location: Location,
    tickets: &TicketBag,
    allow_double: bool,
    is_busy: F,
) -> Vec<Move>
where
    F: Fn(Location) -> bool,
{
    let singles = single_moves(graph, color, location, tickets, &is_busy);

    let mut moves: Vec<Move> = singles.iter().copied().map(Move::Ticket).collect();
    if allow_double && tickets.has(Ticket::Double) {
        let remaining = tickets.without(Ticket::Double);
        for first in &singles {
            let after_first = remaining.without(first.ticket);
            moves.extend(
                single_moves(graph, color, first.destination, &after_first, &is_busy)
                    .into_iter()
                    .map(|second| {
                        Move::Double(DoubleMove {
                            color,
                            first: *first,
                            second,
                        })
                    }),
            );
        }
    }

    if moves.is_empty() {
        moves.push(Move::Pass(color));
    }
    moves
}

fn single_moves<F>(
    graph: &TransportGraph,
    color: Color,
    location: Location,
    tickets: &TicketBag,
    is_busy: &F,
) -> Vec<TicketMove>
where
    F: Fn(Location) -> bool,
{
    graph
        .edges_from(location)
        .iter()
        .filter(|edge| !is_busy(edge.destination))
        .flat_map(|edge| {
            let ordinary = Ticket::from_transport(edge.transport);
            [ordinary, Ticket::Secret]
                .into_iter()
                .filter(move |&ticket| tickets.has(ticket))
                .map(move |ticket| TicketMove {
                    color,
                    ticket,
                    destination: edge.destination,
                })
        })
        // Parallel edges of the same kind would otherwise repeat a move.
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::enums::Transport;
    use crate::test_utils::{fugitive, pursuer, state, triangle_graph, triangle_state};

    fn ticket(color: Color, ticket: Ticket, destination: Location) -> Move {
        Move::Ticket(TicketMove {
            color,
            ticket,
            destination,
        })
    }

    #[test]
    fn test_pursuer_moves_on_triangle() {
        // The fugitive on 1 does not block the pursuer's taxi move there.
        let state = triangle_state(vec![false, false]);

        let moves: HashSet<Move> = state.legal_moves(Color::Red).into_iter().collect();
        assert_eq!(
            moves,
            HashSet::from([
                ticket(Color::Red, Ticket::Taxi, 1),
                ticket(Color::Red, Ticket::Bus, 3),
            ])
        );
    }

    #[test]
    fn test_fugitive_secret_only() {
        let state = state(
            triangle_graph(),
            vec![false],
            fugitive(1, [0, 0, 0, 0, 2]),
            vec![pursuer(Color::Red, 2, [1, 1, 1])],
        );

        // Location 2 is occupied by the pursuer.
        assert_eq!(
            state.legal_moves(Color::Black),
            vec![ticket(Color::Black, Ticket::Secret, 3)]
        );
    }

    #[test]
    fn test_fugitive_secret_covers_every_edge() {
        // Triangle plus an isolated location 4 to park the pursuer on.
        let graph = TransportGraph::new(
            [4],
            [
                (1, 2, Transport::Taxi),
                (2, 3, Transport::Bus),
                (3, 1, Transport::Underground),
            ],
        )
        .unwrap();
        let state = state(
            std::sync::Arc::new(graph),
            vec![false],
            fugitive(1, [0, 0, 0, 0, 1]),
            vec![pursuer(Color::Red, 4, [1, 1, 1])],
        );

        let moves: HashSet<Move> = state.legal_moves(Color::Black).into_iter().collect();
        assert_eq!(
            moves,
            HashSet::from([
                ticket(Color::Black, Ticket::Secret, 2),
                ticket(Color::Black, Ticket::Secret, 3),
            ])
        );
    }

    #[test]
    fn test_ordinary_and_secret_are_both_offered() {
        let state = triangle_state(vec![false]);
        let moves = state.legal_moves(Color::Black);

        // Red blocks 2, so only the underground edge to 3 is open.
        assert_eq!(
            moves,
            vec![
                ticket(Color::Black, Ticket::Underground, 3),
                ticket(Color::Black, Ticket::Secret, 3),
            ]
        );
    }

    #[test]
    fn test_doubles_need_two_rounds_left() {
        let graph = crate::test_utils::line_graph(4);
        let build = |rounds: Vec<bool>| {
            state(
                graph.clone(),
                rounds,
                fugitive(1, [2, 0, 0, 1, 0]),
                vec![pursuer(Color::Blue, 4, [1, 0, 0])],
            )
        };

        let short = build(vec![false]);
        assert!(!short.double_moves_allowed());
        assert!(short
            .legal_moves(Color::Black)
            .iter()
            .all(|m| !matches!(m, Move::Double(_))));

        let long = build(vec![false, false]);
        let doubles: Vec<Move> = long
            .legal_moves(Color::Black)
            .into_iter()
            .filter(|m| matches!(m, Move::Double(_)))
            .collect();
        // 1 -> 2 -> {1, 3}
        assert_eq!(doubles.len(), 2);
        assert!(doubles.iter().any(|m| m.destination() == Some(3)));
        assert!(doubles.iter().any(|m| m.destination() == Some(1)));
    }

    #[test]
    fn test_double_second_leg_respects_first_spend() {
        let graph = crate::test_utils::line_graph(3);
        let state = state(
            graph,
            vec![false, false, false],
            fugitive(1, [1, 0, 0, 1, 0]),
            vec![pursuer(Color::Blue, 3, [1, 0, 0])],
        );

        // The only taxi ticket is used on the first leg.
        assert_eq!(
            state.legal_moves(Color::Black),
            vec![ticket(Color::Black, Ticket::Taxi, 2)]
        );
    }

    #[test]
    fn test_pass_when_no_moves() {
        let state = state(
            triangle_graph(),
            vec![false],
            fugitive(1, [0, 0, 0, 0, 0]),
            vec![pursuer(Color::Red, 2, [0, 0, 0])],
        );

        assert_eq!(state.legal_moves(Color::Black), vec![Move::Pass(Color::Black)]);
        assert_eq!(state.legal_moves(Color::Red), vec![Move::Pass(Color::Red)]);
        assert!(state.legal_moves(Color::Green).is_empty());
    }

    #[test]
    fn test_parallel_edges_do_not_duplicate_moves() {
        let graph = TransportGraph::from_edges([
            (1, 2, Transport::Taxi),
            (1, 2, Transport::Taxi),
            (1, 2, Transport::Bus),
        ])
        .unwrap();

        let moves = generate_moves(
            &graph,
            Color::Black,
            1,
            &TicketBag::new(1, 1, 0, 0, 1),
            false,
            |_| false,
        );
        assert_eq!(moves.len(), 3);
    }
}
