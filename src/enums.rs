use serde::{Deserialize, Serialize};

/// Identifier of a node on the transport graph. Location 0 is reserved for
/// "never revealed" and is never a real node.
pub type Location = usize;

pub const HIDDEN_LOCATION: Location = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Red = 3,
    White = 4,
    Yellow = 5,
}

/// The fugitive always plays black; every other colour is a pursuer.
pub const FUGITIVE_COLOR: Color = Color::Black;

pub const PURSUER_COLORS: [Color; 5] = [
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::White,
    Color::Yellow,
];

impl Color {
    pub fn is_fugitive(self) -> bool {
        self == FUGITIVE_COLOR
    }

    pub fn is_pursuer(self) -> bool {
        !self.is_fugitive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transport {
    Taxi,
    Bus,
    Underground,
}

pub const TRANSPORTS: [Transport; 3] = [Transport::Taxi, Transport::Bus, Transport::Underground];

impl Transport {
    pub fn index(self) -> usize {
        match self {
            Transport::Taxi => 0,
            Transport::Bus => 1,
            Transport::Underground => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ticket {
    Taxi,
    Bus,
    Underground,
    Double,
    Secret,
}

pub const TICKETS: [Ticket; 5] = [
    Ticket::Taxi,
    Ticket::Bus,
    Ticket::Underground,
    Ticket::Double,
    Ticket::Secret,
];

/// One ordinary ticket per transport mode, in transport index order.
pub const ORDINARY_TICKETS: [Ticket; 3] = [Ticket::Taxi, Ticket::Bus, Ticket::Underground];

impl Ticket {
    pub fn from_transport(transport: Transport) -> Self {
        match transport {
            Transport::Taxi => Ticket::Taxi,
            Transport::Bus => Ticket::Bus,
            Transport::Underground => Ticket::Underground,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// DOUBLE and SECRET are fugitive-only currencies.
    pub fn is_ordinary(self) -> bool {
        !matches!(self, Ticket::Double | Ticket::Secret)
    }
}

/// A single hop paid for with one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketMove {
    pub color: Color,
    pub ticket: Ticket,
    pub destination: Location,
}

/// Two fugitive hops played as one turn for the price of a DOUBLE ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoubleMove {
    pub color: Color,
    pub first: TicketMove,
    pub second: TicketMove,
}

impl DoubleMove {
    pub fn final_destination(&self) -> Location {
        self.second.destination
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Pass(Color),
    Ticket(TicketMove),
    Double(DoubleMove),
}

impl Move {
    pub fn color(&self) -> Color {
        match self {
            Move::Pass(color) => *color,
            Move::Ticket(ticket_move) => ticket_move.color,
            Move::Double(double_move) => double_move.color,
        }
    }

    /// Where the mover ends up, or `None` for a pass.
    pub fn destination(&self) -> Option<Location> {
        match self {
            Move::Pass(_) => None,
            Move::Ticket(ticket_move) => Some(ticket_move.destination),
            Move::Double(double_move) => Some(double_move.final_destination()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_from_transport_matches_index() {
        for transport in TRANSPORTS {
            let ticket = Ticket::from_transport(transport);
            assert!(ticket.is_ordinary());
            assert_eq!(ticket.index(), transport.index());
        }
        assert!(!Ticket::Double.is_ordinary());
        assert!(!Ticket::Secret.is_ordinary());
    }

    #[test]
    fn test_move_destination() {
        let first = TicketMove {
            color: Color::Black,
            ticket: Ticket::Taxi,
            destination: 4,
        };
        let second = TicketMove {
            color: Color::Black,
            ticket: Ticket::Secret,
            destination: 9,
        };
        let double = Move::Double(DoubleMove {
            color: Color::Black,
            first,
            second,
        });

        assert_eq!(Move::Pass(Color::Red).destination(), None);
        assert_eq!(Move::Ticket(first).destination(), Some(4));
        assert_eq!(double.destination(), Some(9));
        assert_eq!(double.color(), Color::Black);
        assert!(Color::Black.is_fugitive());
        assert!(PURSUER_COLORS.iter().all(|c| c.is_pursuer()));
    }
}
