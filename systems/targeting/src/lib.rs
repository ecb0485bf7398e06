#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Target manager that commits the agent to at most one goal at a time.

use gem_scout_core::{CellCoord, Command, Event, TargetRelease};
use gem_scout_world::query::MemoryView;

/// Pure system that selects, keeps, or gives up the pursued goal.
#[derive(Debug, Default)]
pub struct Targeting;

impl Targeting {
    /// Creates a new targeting system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and the memory view to emit target commands.
    ///
    /// A target is only proposed on ticks that observed a fresh snapshot and
    /// only when none is currently held; a held target is never swapped for a
    /// nearer goal.
    pub fn handle(&mut self, events: &[Event], memory: &MemoryView<'_>, out: &mut Vec<Command>) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TickObserved { .. }))
        {
            return;
        }

        if memory.target().is_some() {
            return;
        }

        let Some(agent) = memory.agent() else {
            return;
        };

        if let Some(goal) = select_goal(agent, memory.goals()) {
            out.push(Command::AcquireTarget { goal });
        }
    }

    /// Emits the command that abandons a goal no known path reaches.
    pub fn release_unreachable(&mut self, goal: CellCoord, out: &mut Vec<Command>) {
        out.push(Command::ReleaseTarget {
            goal,
            reason: TargetRelease::Unreachable,
        });
    }
}

/// Picks the Manhattan-nearest goal to `from`.
///
/// Goals are expected in ascending coordinate order; the first goal at the
/// minimum distance wins, so ties resolve to the lowest (x, y).
#[must_use]
pub fn select_goal<I>(from: CellCoord, goals: I) -> Option<CellCoord>
where
    I: IntoIterator<Item = CellCoord>,
{
    let mut best: Option<(u32, CellCoord)> = None;

    for goal in goals {
        let distance = from.manhattan_distance(goal);
        let replace = match best {
            None => true,
            Some((best_distance, best_goal)) => {
                distance < best_distance || (distance == best_distance && goal < best_goal)
            }
        };

        if replace {
            best = Some((distance, goal));
        }
    }

    best.map(|(_, goal)| goal)
}
