#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Safe move selection used when path search yields nothing.

use gem_scout_core::Direction;
use gem_scout_world::query::MemoryView;

/// Pure system that keeps the agent moving without walking into known walls.
#[derive(Debug, Default)]
pub struct Fallback;

impl Fallback {
    /// Creates a new fallback system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks the first candidate whose destination is not a known wall.
    ///
    /// Candidates are the previous action followed by North, East, South and
    /// West. Unknown destinations count as open. Returns `None` when every
    /// neighbour is a known wall or no agent position has been observed.
    #[must_use]
    pub fn choose(
        &self,
        memory: &MemoryView<'_>,
        previous: Option<Direction>,
    ) -> Option<Direction> {
        let agent = memory.agent()?;

        previous
            .into_iter()
            .chain(Direction::ALL)
            .find(|direction| !memory.is_wall(agent.step(*direction)))
    }
}
