#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world memory for the Gem Scout agent.

mod tiles;

use std::collections::BTreeSet;

use gem_scout_core::{CellCoord, Command, Direction, Event, TargetRelease, TickState, Tile};
use tracing::debug;

use crate::tiles::TileMemory;

/// Accumulated knowledge about the partially observed map.
///
/// A single instance is created at startup and mutated exclusively through
/// [`apply`] for the lifetime of the process.
#[derive(Debug, Default)]
pub struct World {
    tiles: TileMemory,
    goals: BTreeSet<CellCoord>,
    target: Option<CellCoord>,
    agent: Option<CellCoord>,
    last_action: Option<Direction>,
    tick_index: u64,
}

impl World {
    /// Creates an empty world memory with the clock at tick zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn observe(&mut self, state: TickState, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        let tick = self.tick_index;
        let agent = state.agent;
        self.agent = Some(agent);
        out_events.push(Event::TickObserved { tick, agent });

        for goal in state.goals {
            if self.goals.insert(goal) {
                out_events.push(Event::GoalSighted { goal });
            }
        }

        if self.goals.remove(&agent) {
            debug!(x = agent.x(), y = agent.y(), tick, "goal collected");
            out_events.push(Event::GoalCollected { goal: agent });

            if self.target == Some(agent) {
                self.target = None;
                out_events.push(Event::TargetReleased {
                    goal: agent,
                    reason: TargetRelease::Collected,
                });
            }
        }

        for cell in state.floors {
            self.tiles.record(cell, Tile::Floor, tick);
        }

        for cell in state.walls {
            self.tiles.record(cell, Tile::Wall, tick);
        }

        self.tiles.record(agent, Tile::Floor, tick);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ObserveTick { state } => world.observe(state, out_events),
        Command::AcquireTarget { goal } => {
            if world.target.is_some() || !world.goals.contains(&goal) {
                return;
            }

            debug!(x = goal.x(), y = goal.y(), "target acquired");
            world.target = Some(goal);
            out_events.push(Event::TargetAcquired { goal });
        }
        Command::ReleaseTarget { goal, reason } => {
            if world.target != Some(goal) {
                return;
            }

            debug!(x = goal.x(), y = goal.y(), ?reason, "target released");
            world.target = None;
            out_events.push(Event::TargetReleased { goal, reason });
        }
        Command::CommitAction { direction } => {
            world.last_action = Some(direction);
            out_events.push(Event::ActionCommitted {
                tick: world.tick_index,
                direction,
            });
        }
    }
}

/// Query functions that provide read-only access to the world memory.
pub mod query {
    use gem_scout_core::{CellCoord, Direction, Tile};

    use super::World;

    /// Captures a read-only view of the world memory.
    #[must_use]
    pub fn memory_view(world: &World) -> MemoryView<'_> {
        MemoryView { world }
    }

    /// Index of the most recently observed tick.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick_index
    }

    /// Goal currently being pursued, if any.
    #[must_use]
    pub fn target(world: &World) -> Option<CellCoord> {
        world.target
    }

    /// Known, uncollected goals in ascending coordinate order.
    #[must_use]
    pub fn known_goals(world: &World) -> Vec<CellCoord> {
        world.goals.iter().copied().collect()
    }

    /// Read-only view over tiles, goals and agent state.
    #[derive(Clone, Copy, Debug)]
    pub struct MemoryView<'a> {
        world: &'a World,
    }

    impl<'a> MemoryView<'a> {
        /// Classification of the cell, or `None` when it is Unknown.
        #[must_use]
        pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
            self.world.tiles.tile(cell)
        }

        /// Reports whether the cell is known to be traversable.
        #[must_use]
        pub fn is_floor(&self, cell: CellCoord) -> bool {
            self.tile(cell) == Some(Tile::Floor)
        }

        /// Reports whether the cell is known to be impassable.
        #[must_use]
        pub fn is_wall(&self, cell: CellCoord) -> bool {
            self.tile(cell) == Some(Tile::Wall)
        }

        /// Reports whether the cell has never been reported.
        #[must_use]
        pub fn is_unknown(&self, cell: CellCoord) -> bool {
            self.tile(cell).is_none()
        }

        /// Reports whether the cell is known floor bordering Unknown space.
        #[must_use]
        pub fn is_frontier(&self, cell: CellCoord) -> bool {
            self.is_floor(cell)
                && cell
                    .neighbors()
                    .into_iter()
                    .any(|neighbor| self.is_unknown(neighbor))
        }

        /// Tick at which the cell was last reported.
        #[must_use]
        pub fn last_seen(&self, cell: CellCoord) -> Option<u64> {
            self.world.tiles.last_seen(cell)
        }

        /// Number of ticks elapsed since the cell was last reported.
        #[must_use]
        pub fn staleness(&self, cell: CellCoord) -> Option<u64> {
            self.last_seen(cell)
                .map(|seen| self.world.tick_index.saturating_sub(seen))
        }

        /// Index of the most recently observed tick.
        #[must_use]
        pub fn tick(&self) -> u64 {
            self.world.tick_index
        }

        /// Position reported on the most recent tick.
        #[must_use]
        pub fn agent(&self) -> Option<CellCoord> {
            self.world.agent
        }

        /// Goal currently being pursued, if any.
        #[must_use]
        pub fn target(&self) -> Option<CellCoord> {
            self.world.target
        }

        /// Direction committed on the previous tick, if any.
        #[must_use]
        pub fn last_action(&self) -> Option<Direction> {
            self.world.last_action
        }

        /// Reports whether the coordinate is a known, uncollected goal.
        #[must_use]
        pub fn is_known_goal(&self, cell: CellCoord) -> bool {
            self.world.goals.contains(&cell)
        }

        /// Known goals in ascending coordinate order.
        pub fn goals(&self) -> impl Iterator<Item = CellCoord> + 'a {
            let world: &'a World = self.world;
            world.goals.iter().copied()
        }

        /// Number of cells with a known classification.
        #[must_use]
        pub fn known_cells(&self) -> usize {
            self.world.tiles.len()
        }
    }
}
