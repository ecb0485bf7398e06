#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first path search over the agent's known floor.
//!
//! One traversal serves two purposes: pursuing a fixed goal and finding the
//! nearest cell worth re-observing. Both only walk cells classified as floor
//! and both report the first hop of a shortest path as a cardinal direction.

use std::collections::{HashMap, VecDeque};

use gem_scout_core::{CellCoord, Direction};
use gem_scout_world::query::MemoryView;
use tracing::trace;

/// Ticks a floor cell may go unobserved before exploration revisits it.
pub const DEFAULT_STALE_AFTER_TICKS: u64 = 30;

/// Configuration parameters required to construct the path search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathSearchConfig {
    stale_after: u64,
}

impl PathSearchConfig {
    /// Creates a configuration with the provided staleness threshold.
    ///
    /// A floor cell qualifies for exploration once strictly more than
    /// `stale_after` ticks have passed since it was last reported.
    #[must_use]
    pub const fn new(stale_after: u64) -> Self {
        Self { stale_after }
    }

    /// Staleness threshold measured in ticks.
    #[must_use]
    pub const fn stale_after(&self) -> u64 {
        self.stale_after
    }
}

impl Default for PathSearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER_TICKS)
    }
}

/// What the traversal is looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Shortest route to a fixed goal coordinate.
    Pursuit {
        /// Coordinate the agent is committed to reaching.
        target: CellCoord,
    },
    /// Nearest stale or frontier floor cell.
    Exploration,
}

/// Result of a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathOutcome {
    /// A shortest path exists and starts with the given step.
    Step {
        /// Direction of the first hop.
        direction: Direction,
        /// Cell at which the traversal stopped.
        destination: CellCoord,
    },
    /// The agent's own cell already satisfies the search, so there is no hop.
    AtStart,
    /// Nothing reachable through known floor satisfies the search.
    Unreachable,
}

impl PathOutcome {
    /// Direction of the first hop, if the search produced one.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::Step { direction, .. } => Some(*direction),
            Self::AtStart | Self::Unreachable => None,
        }
    }
}

/// Path search that reuses its frontier and parent buffers across ticks.
#[derive(Debug, Default)]
pub struct PathSearch {
    config: PathSearchConfig,
    queue: VecDeque<CellCoord>,
    came_from: HashMap<CellCoord, Option<CellCoord>>,
}

impl PathSearch {
    /// Creates a path search using the supplied configuration.
    #[must_use]
    pub fn new(config: PathSearchConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            came_from: HashMap::new(),
        }
    }

    /// Configuration the search was built with.
    #[must_use]
    pub const fn config(&self) -> PathSearchConfig {
        self.config
    }

    /// Runs a breadth-first search from the agent's current cell.
    pub fn search(&mut self, memory: &MemoryView<'_>, mode: SearchMode) -> PathOutcome {
        let Some(start) = memory.agent() else {
            return PathOutcome::Unreachable;
        };

        let found = match mode {
            SearchMode::Pursuit { target } => {
                self.breadth_first(memory, start, |cell| cell == target)
            }
            SearchMode::Exploration => {
                let stale_after = self.config.stale_after;
                self.breadth_first(memory, start, |cell| {
                    is_exploration_candidate(memory, cell, stale_after)
                })
            }
        };

        let Some(found) = found else {
            trace!(?mode, visited = self.came_from.len(), "search exhausted");
            return PathOutcome::Unreachable;
        };

        if found == start {
            return PathOutcome::AtStart;
        }

        let direction = self
            .first_hop(start, found)
            .and_then(|next| Direction::between(start, next));

        match direction {
            Some(direction) => {
                trace!(?mode, ?direction, x = found.x(), y = found.y(), "search found");
                PathOutcome::Step {
                    direction,
                    destination: found,
                }
            }
            None => PathOutcome::Unreachable,
        }
    }

    fn breadth_first<F>(
        &mut self,
        memory: &MemoryView<'_>,
        start: CellCoord,
        mut is_goal: F,
    ) -> Option<CellCoord>
    where
        F: FnMut(CellCoord) -> bool,
    {
        self.queue.clear();
        self.came_from.clear();

        if !memory.is_floor(start) {
            return None;
        }

        let _ = self.came_from.insert(start, None);
        self.queue.push_back(start);

        while let Some(cell) = self.queue.pop_front() {
            if is_goal(cell) {
                return Some(cell);
            }

            for neighbor in cell.neighbors() {
                if !memory.is_floor(neighbor) || self.came_from.contains_key(&neighbor) {
                    continue;
                }

                let _ = self.came_from.insert(neighbor, Some(cell));
                self.queue.push_back(neighbor);
            }
        }

        None
    }

    /// Walks parent links back from `found` to the cell one step after `start`.
    fn first_hop(&self, start: CellCoord, found: CellCoord) -> Option<CellCoord> {
        let mut current = found;
        loop {
            let parent = (*self.came_from.get(&current)?)?;
            if parent == start {
                return Some(current);
            }
            current = parent;
        }
    }
}

fn is_exploration_candidate(memory: &MemoryView<'_>, cell: CellCoord, stale_after: u64) -> bool {
    let stale = memory
        .staleness(cell)
        .is_some_and(|elapsed| elapsed > stale_after);
    stale || memory.is_frontier(cell)
}
