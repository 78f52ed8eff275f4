// Distance cache
//
// Precomputed lookup tables for the search heuristic:
//   - shortest ticket-bounded distance between every pair of locations for
//     every taxi/bus/underground budget up to the ceilings below;
//   - number of legal fugitive moves from every location for every small
//     ticket holding, ignoring occupancy.
//
// Both tables are persisted to `distance.dat` and `moves.dat` so the build
// only runs once per board.

pub mod bfs;

use std::fs;
use std::path::Path;
use std::time::Instant;

use itertools::iproduct;
use log::{info, warn};
use rayon::prelude::*;

use crate::enums::{Location, Ticket, FUGITIVE_COLOR};
use crate::errors::{InfrastructureError, ManhuntResult};
use crate::graph::TransportGraph;
use crate::state::generate_moves;
use crate::tickets::TicketBag;

pub const TAXI_CEILING: usize = 11;
pub const BUS_CEILING: usize = 8;
pub const UNDERGROUND_CEILING: usize = 4;
const BUDGETS_PER_PAIR: usize =
    (TAXI_CEILING + 1) * (BUS_CEILING + 1) * (UNDERGROUND_CEILING + 1);

pub const ORDINARY_MOVE_CEILING: usize = 2;
pub const DOUBLE_MOVE_CEILING: usize = 1;
pub const SECRET_MOVE_CEILING: usize = 2;
const HOLDINGS_PER_LOCATION: usize = (ORDINARY_MOVE_CEILING + 1).pow(3)
    * (DOUBLE_MOVE_CEILING + 1)
    * (SECRET_MOVE_CEILING + 1);

pub const DISTANCE_FILE: &str = "distance.dat";
pub const MOVES_FILE: &str = "moves.dat";

fn budget_index(taxi: usize, bus: usize, underground: usize) -> usize {
    (taxi * (BUS_CEILING + 1) + bus) * (UNDERGROUND_CEILING + 1) + underground
}

fn holding_index(taxi: usize, bus: usize, underground: usize, double: usize, secret: usize) -> usize {
    let ordinary = (taxi * (ORDINARY_MOVE_CEILING + 1) + bus) * (ORDINARY_MOVE_CEILING + 1)
        + underground;
    (ordinary * (DOUBLE_MOVE_CEILING + 1) + double) * (SECRET_MOVE_CEILING + 1) + secret
}

fn clamped(tickets: &TicketBag, ticket: Ticket, ceiling: usize) -> usize {
    (tickets.count(ticket) as usize).min(ceiling)
}

#[derive(Debug, Clone, Default)]
pub struct DistanceCache {
    bound: usize,
    // [from][to][budget], budget laid out by `budget_index`.
    distances: Vec<u8>,
    // [location][holding], holding laid out by `holding_index`.
    move_counts: Vec<u32>,
    max_distance: u8,
    max_move_count: u32,
}

impl DistanceCache {
    /// A cache with no tables; every lookup answers 0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Computes both tables for `graph`, one location per rayon task.
    pub fn build(graph: &TransportGraph) -> Self {
        let started = Instant::now();
        let bound = graph.location_bound();
        let row_len = bound * BUDGETS_PER_PAIR;

        let distance_rows: Vec<(Location, Vec<u8>)> = graph
            .nodes()
            .par_iter()
            .map(|&from| (from, distance_row(graph, from)))
            .collect();
        let mut distances = vec![0u8; bound * row_len];
        for (from, row) in distance_rows {
            distances[from * row_len..(from + 1) * row_len].copy_from_slice(&row);
        }

        let move_rows: Vec<(Location, Vec<u32>)> = graph
            .nodes()
            .par_iter()
            .map(|&location| (location, move_count_row(graph, location)))
            .collect();
        let mut move_counts = vec![0u32; bound * HOLDINGS_PER_LOCATION];
        for (location, row) in move_rows {
            move_counts[location * HOLDINGS_PER_LOCATION..(location + 1) * HOLDINGS_PER_LOCATION]
                .copy_from_slice(&row);
        }

        let cache = Self::from_tables(bound, distances, move_counts);
        info!(
            "Built distance cache for {} locations in {:.2?} (max distance {}, max moves {})",
            graph.node_count(),
            started.elapsed(),
            cache.max_distance,
            cache.max_move_count
        );
        cache
    }

    fn from_tables(bound: usize, distances: Vec<u8>, move_counts: Vec<u32>) -> Self {
        DistanceCache {
            bound,
            max_distance: distances.iter().copied().max().unwrap_or(0),
            max_move_count: move_counts.iter().copied().max().unwrap_or(0),
            distances,
            move_counts,
        }
    }

    pub fn is_built(&self) -> bool {
        !self.distances.is_empty()
    }

    /// Largest finite distance in the table, used to normalise the heuristic.
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }

    pub fn max_move_count(&self) -> u32 {
        self.max_move_count
    }

    /// Shortest distance from `from` to `to` using at most the ordinary
    /// tickets in `tickets`, clamped to the table ceilings. Returns 0 when
    /// `from == to`, when `to` is unreachable, or when either location is
    /// outside the table.
    pub fn distance(&self, from: Location, to: Location, tickets: &TicketBag) -> u8 {
        if from >= self.bound || to >= self.bound {
            return 0;
        }
        let budget = budget_index(
            clamped(tickets, Ticket::Taxi, TAXI_CEILING),
            clamped(tickets, Ticket::Bus, BUS_CEILING),
            clamped(tickets, Ticket::Underground, UNDERGROUND_CEILING),
        );
        self.distances
            .get((from * self.bound + to) * BUDGETS_PER_PAIR + budget)
            .copied()
            .unwrap_or(0)
    }

    /// Like `distance`, but `None` when `to` cannot be reached from `from`.
    pub fn try_distance(&self, from: Location, to: Location, tickets: &TicketBag) -> Option<u8> {
        match self.distance(from, to, tickets) {
            0 if from != to => None,
            distance => Some(distance),
        }
    }

    /// Number of fugitive moves available from `location` with `tickets`
    /// (clamped), on an empty board with doubles allowed. A lone pass counts
    /// as one move.
    pub fn valid_move_count(&self, location: Location, tickets: &TicketBag) -> u32 {
        if location >= self.bound {
            return 0;
        }
        let holding = holding_index(
            clamped(tickets, Ticket::Taxi, ORDINARY_MOVE_CEILING),
            clamped(tickets, Ticket::Bus, ORDINARY_MOVE_CEILING),
            clamped(tickets, Ticket::Underground, ORDINARY_MOVE_CEILING),
            clamped(tickets, Ticket::Double, DOUBLE_MOVE_CEILING),
            clamped(tickets, Ticket::Secret, SECRET_MOVE_CEILING),
        );
        self.move_counts
            .get(location * HOLDINGS_PER_LOCATION + holding)
            .copied()
            .unwrap_or(0)
    }

    /// Distance table in file order: for each `from` in `1..bound`, each `to`
    /// in `1..bound`, one byte per budget.
    pub fn distance_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.distance_file_len());
        for from in 1..self.bound {
            let start = (from * self.bound + 1) * BUDGETS_PER_PAIR;
            let end = (from + 1) * self.bound * BUDGETS_PER_PAIR;
            bytes.extend_from_slice(&self.distances[start..end]);
        }
        bytes
    }

    /// Move-count table in file order: for each location in `1..bound`, one
    /// big-endian u32 per holding.
    pub fn move_count_bytes(&self) -> Vec<u8> {
        self.move_counts
            .iter()
            .skip(HOLDINGS_PER_LOCATION)
            .flat_map(|count| count.to_be_bytes())
            .collect()
    }

    fn distance_file_len(&self) -> usize {
        let locations = self.bound.saturating_sub(1);
        locations * locations * BUDGETS_PER_PAIR
    }

    fn move_file_len(&self) -> usize {
        self.bound.saturating_sub(1) * HOLDINGS_PER_LOCATION * 4
    }

    /// Rebuilds a cache for a graph with `bound` from the two file images.
    /// `None` when either image has the wrong length.
    pub fn from_bytes(bound: usize, distance_bytes: &[u8], move_bytes: &[u8]) -> Option<Self> {
        let expected = DistanceCache {
            bound,
            ..Self::default()
        };
        if bound == 0
            || distance_bytes.len() != expected.distance_file_len()
            || move_bytes.len() != expected.move_file_len()
        {
            return None;
        }

        let pair_block = (bound - 1) * BUDGETS_PER_PAIR;
        let mut distances = vec![0u8; bound * bound * BUDGETS_PER_PAIR];
        for (index, block) in distance_bytes.chunks_exact(pair_block.max(1)).enumerate() {
            let from = index + 1;
            let start = (from * bound + 1) * BUDGETS_PER_PAIR;
            distances[start..start + block.len()].copy_from_slice(block);
        }

        let mut move_counts = vec![0u32; HOLDINGS_PER_LOCATION];
        move_counts.extend(
            move_bytes
                .chunks_exact(4)
                .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])),
        );

        Some(Self::from_tables(bound, distances, move_counts))
    }

    /// Writes both tables into `directory`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, directory: P) -> ManhuntResult<()> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|e| {
            InfrastructureError::persistence(format!(
                "Failed to create cache directory {}: {}",
                directory.display(),
                e
            ))
        })?;
        for (name, bytes) in [
            (DISTANCE_FILE, self.distance_bytes()),
            (MOVES_FILE, self.move_count_bytes()),
        ] {
            let path = directory.join(name);
            fs::write(&path, bytes).map_err(|e| {
                InfrastructureError::persistence(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Reads cached tables for `graph`. `Ok(None)` when the files are missing
    /// or were written for a different board.
    pub fn load<P: AsRef<Path>>(graph: &TransportGraph, directory: P) -> ManhuntResult<Option<Self>> {
        let directory = directory.as_ref();
        let distance_path = directory.join(DISTANCE_FILE);
        let moves_path = directory.join(MOVES_FILE);
        if !distance_path.exists() || !moves_path.exists() {
            return Ok(None);
        }

        let read = |path: &Path| {
            fs::read(path).map_err(|e| {
                InfrastructureError::persistence(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                ))
            })
        };
        let distance_bytes = read(&distance_path)?;
        let move_bytes = read(&moves_path)?;

        let cache = Self::from_bytes(graph.location_bound(), &distance_bytes, &move_bytes);
        if cache.is_none() {
            warn!(
                "Cache files in {} do not match the board, ignoring them",
                directory.display()
            );
        }
        Ok(cache)
    }

    /// Loads the tables from `directory`, rebuilding and saving them when
    /// they are missing, stale or unreadable.
    pub fn load_or_build<P: AsRef<Path>>(graph: &TransportGraph, directory: P) -> Self {
        let directory = directory.as_ref();
        match Self::load(graph, directory) {
            Ok(Some(cache)) => {
                info!("Loaded distance cache from {}", directory.display());
                return cache;
            }
            Ok(None) => info!("No usable distance cache in {}", directory.display()),
            Err(e) => warn!("{}", e),
        }

        let cache = Self::build(graph);
        if let Err(e) = cache.save(directory) {
            warn!("Could not persist distance cache: {}", e);
        }
        cache
    }
}

fn distance_row(graph: &TransportGraph, from: Location) -> Vec<u8> {
    let bound = graph.location_bound();
    let mut row = vec![0u8; bound * BUDGETS_PER_PAIR];
    for (taxi, bus, underground) in
        iproduct!(0..=TAXI_CEILING, 0..=BUS_CEILING, 0..=UNDERGROUND_CEILING)
    {
        let nodes = bfs::shortest_distances(graph, from, [taxi as u8, bus as u8, underground as u8]);
        let budget = budget_index(taxi, bus, underground);
        for &to in graph.nodes() {
            if nodes[to].visited() {
                row[to * BUDGETS_PER_PAIR + budget] = nodes[to].distance();
            }
        }
    }
    row
}

fn move_count_row(graph: &TransportGraph, location: Location) -> Vec<u32> {
    iproduct!(
        0..=ORDINARY_MOVE_CEILING,
        0..=ORDINARY_MOVE_CEILING,
        0..=ORDINARY_MOVE_CEILING,
        0..=DOUBLE_MOVE_CEILING,
        0..=SECRET_MOVE_CEILING
    )
    .map(|(taxi, bus, underground, double, secret)| {
        let tickets = TicketBag::new(
            taxi as u32,
            bus as u32,
            underground as u32,
            double as u32,
            secret as u32,
        );
        generate_moves(graph, FUGITIVE_COLOR, location, &tickets, true, |_| false).len() as u32
    })
    .collect()
}
