use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Ticket, TICKETS};

/// Ticket counts indexed by `Ticket::index()`.
pub type TicketCounts = [u32; 5];

/// Per-player ticket holdings. Every kind always has a (possibly zero) count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketBag(TicketCounts);

impl TicketBag {
    pub fn new(taxi: u32, bus: u32, underground: u32, double: u32, secret: u32) -> Self {
        TicketBag([taxi, bus, underground, double, secret])
    }

    /// Bag with only the three ordinary kinds, as pursuers hold.
    pub fn ordinary(taxi: u32, bus: u32, underground: u32) -> Self {
        Self::new(taxi, bus, underground, 0, 0)
    }

    /// Builds a bag from a ticket map; kinds absent from the map count as zero.
    pub fn from_map(map: &HashMap<Ticket, u32>) -> Self {
        let mut counts = [0; 5];
        for ticket in TICKETS {
            counts[ticket.index()] = map.get(&ticket).copied().unwrap_or(0);
        }
        TicketBag(counts)
    }

    pub fn count(&self, ticket: Ticket) -> u32 {
        self.0[ticket.index()]
    }

    pub fn has(&self, ticket: Ticket) -> bool {
        self.count(ticket) > 0
    }

    pub fn add(&mut self, ticket: Ticket) {
        self.0[ticket.index()] += 1;
    }

    /// Spends one ticket. Spending a ticket that is not held leaves the bag unchanged.
    pub fn remove(&mut self, ticket: Ticket) {
        let slot = &mut self.0[ticket.index()];
        *slot = slot.saturating_sub(1);
    }

    /// Copy of the bag with one `ticket` spent.
    pub fn without(&self, ticket: Ticket) -> Self {
        let mut bag = *self;
        bag.remove(ticket);
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut bag = TicketBag::ordinary(1, 0, 2);
        bag.add(Ticket::Bus);
        bag.remove(Ticket::Underground);

        assert_eq!(bag.count(Ticket::Taxi), 1);
        assert_eq!(bag.count(Ticket::Bus), 1);
        assert_eq!(bag.count(Ticket::Underground), 1);
        assert_eq!(bag, TicketBag::ordinary(1, 1, 1));
    }

    #[test]
    fn test_remove_never_goes_negative() {
        let mut bag = TicketBag::default();
        bag.remove(Ticket::Secret);
        assert_eq!(bag.count(Ticket::Secret), 0);
    }

    #[test]
    fn test_without_leaves_original_untouched() {
        let bag = TicketBag::new(2, 1, 1, 1, 1);
        let spent = bag.without(Ticket::Taxi);

        assert_eq!(bag.count(Ticket::Taxi), 2);
        assert_eq!(spent.count(Ticket::Taxi), 1);
    }

    #[test]
    fn test_from_map_defaults_missing_kinds_to_zero() {
        let map = HashMap::from([(Ticket::Taxi, 4), (Ticket::Secret, 5)]);
        let bag = TicketBag::from_map(&map);

        assert_eq!(bag, TicketBag::new(4, 0, 0, 0, 5));
    }
}
