// Transport graph
//
// Immutable node/edge structure the rules engine and the distance cache read.
// Edges are undirected: every connection is stored from both ends.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{Location, Transport, HIDDEN_LOCATION};
use crate::errors::{ConfigError, ConfigResult, InfrastructureError, ManhuntResult};

/// Largest location id a board may use. Distance tables grow with the square
/// of the highest id.
pub const MAX_LOCATION: Location = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: Location,
    pub destination: Location,
    pub transport: Transport,
}

/// On-disk board description: `{"nodes": [..], "edges": [[1, 8, "Taxi"], ..]}`.
/// `nodes` may be omitted when every node has at least one edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardFile {
    #[serde(default)]
    pub nodes: Vec<Location>,
    pub edges: Vec<(Location, Location, Transport)>,
}

#[derive(Debug, Clone)]
pub struct TransportGraph {
    nodes: Vec<Location>,
    // Indexed by location; slot 0 is always empty.
    adjacency: Vec<Vec<Edge>>,
}

impl TransportGraph {
    pub fn new(
        nodes: impl IntoIterator<Item = Location>,
        edges: impl IntoIterator<Item = (Location, Location, Transport)>,
    ) -> ConfigResult<Self> {
        let edges: Vec<(Location, Location, Transport)> = edges.into_iter().collect();

        let mut node_set: BTreeSet<Location> = nodes.into_iter().collect();
        for &(a, b, _) in &edges {
            node_set.insert(a);
            node_set.insert(b);
        }
        if node_set.contains(&HIDDEN_LOCATION) {
            return Err(ConfigError::ReservedLocation {
                location: HIDDEN_LOCATION,
            });
        }

        if let Some(&location) = node_set.iter().next_back().filter(|&&l| l > MAX_LOCATION) {
            return Err(ConfigError::LocationOutOfRange {
                location,
                max: MAX_LOCATION,
            });
        }

        let bound = node_set.iter().next_back().map_or(1, |max| max + 1);
        let mut adjacency = vec![Vec::new(); bound];
        for (a, b, transport) in edges {
            adjacency[a].push(Edge {
                source: a,
                destination: b,
                transport,
            });
            adjacency[b].push(Edge {
                source: b,
                destination: a,
                transport,
            });
        }

        Ok(TransportGraph {
            nodes: node_set.into_iter().collect(),
            adjacency,
        })
    }

    pub fn from_edges(
        edges: impl IntoIterator<Item = (Location, Location, Transport)>,
    ) -> ConfigResult<Self> {
        Self::new(std::iter::empty::<Location>(), edges)
    }

    pub fn from_board(board: BoardFile) -> ConfigResult<Self> {
        Self::new(board.nodes, board.edges)
    }

    /// Reads a JSON board file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ManhuntResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            InfrastructureError::configuration(format!(
                "Failed to read board file {}: {}",
                path.display(),
                e
            ))
        })?;
        let board: BoardFile = serde_json::from_str(&contents).map_err(|e| {
            InfrastructureError::configuration(format!(
                "Failed to parse board file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_board(board)?)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All locations in ascending order
    pub fn nodes(&self) -> &[Location] {
        &self.nodes
    }

    pub fn contains(&self, location: Location) -> bool {
        self.nodes.binary_search(&location).is_ok()
    }

    /// One past the highest location; tables indexed by location use this length.
    pub fn location_bound(&self) -> usize {
        self.adjacency.len()
    }

    /// Edges leaving `location`; empty for locations not on the graph.
    pub fn edges_from(&self, location: Location) -> &[Edge] {
        self.adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_stored_from_both_ends() {
        let graph = TransportGraph::from_edges([(1, 2, Transport::Taxi), (2, 3, Transport::Bus)])
            .unwrap();

        assert_eq!(graph.nodes(), &[1, 2, 3]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges_from(2).len(), 2);
        assert_eq!(graph.edges_from(3)[0].destination, 2);
        assert_eq!(graph.edges_from(3)[0].transport, Transport::Bus);
        assert_eq!(graph.location_bound(), 4);
    }

    #[test]
    fn test_isolated_nodes_and_unknown_locations() {
        let graph = TransportGraph::new([7], [(1, 2, Transport::Underground)]).unwrap();

        assert!(graph.contains(7));
        assert!(graph.edges_from(7).is_empty());
        assert!(!graph.contains(5));
        assert!(graph.edges_from(500).is_empty());
    }

    #[test]
    fn test_location_zero_is_rejected() {
        let result = TransportGraph::from_edges([(0, 1, Transport::Taxi)]);
        assert_eq!(
            result.err(),
            Some(ConfigError::ReservedLocation { location: 0 })
        );
    }

    #[test]
    fn test_oversized_location_is_rejected() {
        let json = r#"{"edges": [[1, 18446744073709551615, "Taxi"]]}"#;
        let board: BoardFile = serde_json::from_str(json).unwrap();

        assert_eq!(
            TransportGraph::from_board(board).err(),
            Some(ConfigError::LocationOutOfRange {
                location: usize::MAX,
                max: MAX_LOCATION,
            })
        );
        assert!(TransportGraph::from_edges([(1, MAX_LOCATION, Transport::Bus)]).is_ok());
    }

    #[test]
    fn test_board_file_parses_edge_triples() {
        let json = r#"{"edges": [[1, 2, "Taxi"], [2, 3, "Underground"]], "nodes": [9]}"#;
        let board: BoardFile = serde_json::from_str(json).unwrap();
        let graph = TransportGraph::from_board(board).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edges_from(1)[0].transport, Transport::Taxi);
    }

    #[test]
    fn test_empty_graph() {
        let graph = TransportGraph::from_edges(Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.location_bound(), 1);
    }
}
