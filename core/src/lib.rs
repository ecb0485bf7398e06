#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gem Scout agent.
//!
//! This crate defines the message surface that connects the tick adapter, the
//! authoritative world memory, and the pure decision systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable memory views, and respond exclusively with new commands or
//! a chosen [`Direction`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Action emitted when no search or fallback candidate produced a move.
pub const DEFAULT_DIRECTION: Direction = Direction::North;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Merges a freshly decoded tick snapshot into the world memory.
    ObserveTick {
        /// Observations reported for the tick.
        state: TickState,
    },
    /// Commits the agent to pursuing the provided known goal.
    AcquireTarget {
        /// Goal coordinate that becomes the current target.
        goal: CellCoord,
    },
    /// Drops the current target without collecting it.
    ReleaseTarget {
        /// Goal coordinate that was being pursued.
        goal: CellCoord,
        /// Why the pursuit was abandoned.
        reason: TargetRelease,
    },
    /// Records the action emitted for the current tick.
    CommitAction {
        /// Direction written to the output channel.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the staleness clock advanced for a new tick.
    TickObserved {
        /// Index of the tick that was just merged, starting at one.
        tick: u64,
        /// Position the agent reported for the tick.
        agent: CellCoord,
    },
    /// Announces a goal that was not previously known.
    GoalSighted {
        /// Coordinate of the goal.
        goal: CellCoord,
    },
    /// Confirms that the agent stepped onto a known goal.
    GoalCollected {
        /// Coordinate of the collected goal.
        goal: CellCoord,
    },
    /// Confirms that the agent committed to a new target.
    TargetAcquired {
        /// Goal coordinate now being pursued.
        goal: CellCoord,
    },
    /// Reports that the current target was cleared.
    TargetReleased {
        /// Goal coordinate that was being pursued.
        goal: CellCoord,
        /// Why the target was cleared.
        reason: TargetRelease,
    },
    /// Confirms the action recorded for the tick.
    ActionCommitted {
        /// Tick the action belongs to.
        tick: u64,
        /// Direction that was emitted.
        direction: Direction,
    },
}

/// Reasons the current target can be cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRelease {
    /// The agent occupied the goal coordinate.
    Collected,
    /// No path through known floor reaches the goal.
    Unreachable,
}

/// Per-tick snapshot decoded from a single input record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickState {
    /// Cell currently occupied by the agent.
    pub agent: CellCoord,
    /// Coordinates reported as impassable on this tick.
    pub walls: Vec<CellCoord>,
    /// Coordinates reported as traversable on this tick.
    pub floors: Vec<CellCoord>,
    /// Goal coordinates currently visible to the agent.
    pub goals: Vec<CellCoord>,
}

impl TickState {
    /// Creates a snapshot with only the agent position populated.
    #[must_use]
    pub fn at(agent: CellCoord) -> Self {
        Self {
            agent,
            ..Self::default()
        }
    }
}

/// Classification stored for every coordinate the agent has observed.
///
/// Coordinates that were never reported are Unknown and have no entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Traversable cell.
    Floor,
    /// Impassable cell.
    Wall,
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing y.
    North,
    /// Movement toward increasing x.
    East,
    /// Movement toward increasing y.
    South,
    /// Movement toward decreasing x.
    West,
}

impl Direction {
    /// All directions in the fixed North, East, South, West order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit offset applied to a coordinate when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Single-letter protocol symbol for the direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Resolves the direction of a single step between two cells.
    ///
    /// `to` must be exactly one unit away from `from` along exactly one axis.
    /// Any other pair, including identical cells, yields `None` instead of a
    /// plausible-looking guess.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let dx = i64::from(to.x()) - i64::from(from.x());
        let dy = i64::from(to.y()) - i64::from(from.y());

        match (dx, dy) {
            (0, -1) => Some(Self::North),
            (1, 0) => Some(Self::East),
            (0, 1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Location of a single grid cell expressed as signed x and y coordinates.
///
/// x grows toward the east and y grows toward the south. Ordering is
/// lexicographic on (x, y), which the target selection relies on for ties.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, east-positive.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, south-positive.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Cell reached by taking a single step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> CellCoord {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// The four orthogonal neighbours in North, East, South, West order.
    #[must_use]
    pub const fn neighbors(self) -> [CellCoord; 4] {
        [
            self.step(Direction::North),
            self.step(Direction::East),
            self.step(Direction::South),
            self.step(Direction::West),
        ]
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<[i32; 2]> for CellCoord {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}
