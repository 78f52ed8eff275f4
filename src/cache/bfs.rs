// Ticket-bounded breadth-first search
//
// Each search node carries the taxi/bus/underground tickets still unspent on
// the path that reached it, so a location can be queued more than once with
// different budgets. A location is queued again only when the new budget is
// not dominated by one it was already queued with, which keeps the search
// exact: any path a dominated budget could extend, the dominating one can too.

use std::collections::VecDeque;

use crate::enums::{Location, Transport};
use crate::graph::TransportGraph;

/// Remaining ordinary tickets, indexed by `Transport::index()`.
pub type Budget = [u8; 3];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BfsNode {
    distance: u8,
    tickets: Budget,
    visited: bool,
}

impl BfsNode {
    fn origin(budget: Budget) -> Self {
        BfsNode {
            distance: 0,
            tickets: budget,
            visited: true,
        }
    }

    fn step(&self, transport: Transport) -> Option<Self> {
        let mut tickets = self.tickets;
        let slot = &mut tickets[transport.index()];
        *slot = slot.checked_sub(1)?;
        Some(BfsNode {
            distance: self.distance.saturating_add(1),
            tickets,
            visited: true,
        })
    }

    /// Hops on the shortest path found; 0 for the start or an unreached node.
    pub fn distance(&self) -> u8 {
        self.distance
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Tickets of `transport` left when this node was first reached.
    pub fn tickets(&self, transport: Transport) -> u8 {
        self.tickets[transport.index()]
    }
}

fn dominates(a: &Budget, b: &Budget) -> bool {
    a.iter().zip(b).all(|(x, y)| x >= y)
}

/// Shortest hop counts from `start` to every location, spending at most
/// `budget` tickets of each kind. The result is indexed by location; nodes
/// that cannot be reached stay unvisited.
pub fn shortest_distances(graph: &TransportGraph, start: Location, budget: Budget) -> Vec<BfsNode> {
    let bound = graph.location_bound();
    let mut nodes = vec![BfsNode::default(); bound];
    if start >= bound {
        return nodes;
    }

    // Budgets each location has been queued with.
    let mut queued: Vec<Vec<Budget>> = vec![Vec::new(); bound];
    let mut queue = VecDeque::new();

    nodes[start] = BfsNode::origin(budget);
    queued[start].push(budget);
    queue.push_back((start, nodes[start]));

    while let Some((location, node)) = queue.pop_front() {
        for edge in graph.edges_from(location) {
            let Some(next) = node.step(edge.transport) else {
                continue;
            };
            let destination = edge.destination;
            if queued[destination]
                .iter()
                .any(|seen| dominates(seen, &next.tickets))
            {
                continue;
            }

            if !nodes[destination].visited {
                nodes[destination] = next;
            }
            queued[destination].push(next.tickets);
            queue.push_back((destination, next));
        }
    }
    nodes
}
