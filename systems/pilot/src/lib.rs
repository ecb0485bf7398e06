#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick decision pipeline that turns a snapshot into exactly one move.
//!
//! Each tick flows through the memory update, target selection, pursuit or
//! exploration search, and finally the fallback policy. Whatever direction
//! comes out is committed back into the world so the next tick's fallback can
//! prefer it.

use gem_scout_core::{Command, Direction, Event, TickState, DEFAULT_DIRECTION};
use gem_scout_system_fallback::Fallback;
use gem_scout_system_pathing::{PathSearch, PathSearchConfig, SearchMode};
use gem_scout_system_targeting::Targeting;
use gem_scout_world::{self as world, query, World};
use tracing::debug;

/// Configuration parameters required to construct the pilot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PilotConfig {
    search: PathSearchConfig,
}

impl PilotConfig {
    /// Creates a configuration using the provided search parameters.
    #[must_use]
    pub const fn new(search: PathSearchConfig) -> Self {
        Self { search }
    }
}

/// Stage of the pipeline that produced a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionSource {
    /// First hop toward the current target.
    Pursuit,
    /// First hop toward the nearest stale or frontier cell.
    Exploration,
    /// Safe neighbour picked when both searches came up empty.
    Fallback,
    /// Built-in default used when nothing else applied.
    Default,
}

/// Move chosen for a tick together with its provenance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    /// Direction to emit.
    pub direction: Direction,
    /// Pipeline stage that chose the direction.
    pub source: DecisionSource,
}

impl Decision {
    const fn new(direction: Direction, source: DecisionSource) -> Self {
        Self { direction, source }
    }
}

/// Orchestrates the targeting, pathing and fallback systems for one agent.
#[derive(Debug, Default)]
pub struct Pilot {
    targeting: Targeting,
    search: PathSearch,
    fallback: Fallback,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Pilot {
    /// Creates a pilot using the supplied configuration.
    #[must_use]
    pub fn new(config: PilotConfig) -> Self {
        Self {
            targeting: Targeting::new(),
            search: PathSearch::new(config.search),
            fallback: Fallback::new(),
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Merges the snapshot into the world and decides the tick's move.
    ///
    /// Every event generated while processing the tick is appended to
    /// `out_events`, ending with the [`Event::ActionCommitted`] for the
    /// returned decision.
    pub fn step(
        &mut self,
        world: &mut World,
        state: TickState,
        out_events: &mut Vec<Event>,
    ) -> Decision {
        self.events.clear();
        world::apply(world, Command::ObserveTick { state }, &mut self.events);

        self.targeting
            .handle(&self.events, &query::memory_view(world), &mut self.commands);
        self.flush_commands(world);

        let decision = self.decide(world);
        debug!(
            tick = query::tick(world),
            direction = %decision.direction,
            source = ?decision.source,
            "decision"
        );
        self.commit(world, decision, out_events)
    }

    /// Emits the default move for a tick that carried no usable snapshot.
    ///
    /// The world's tile memory and clock are left untouched; only the
    /// committed action is recorded.
    pub fn hold(&mut self, world: &mut World, out_events: &mut Vec<Event>) -> Decision {
        self.events.clear();
        let decision = Decision::new(DEFAULT_DIRECTION, DecisionSource::Default);
        self.commit(world, decision, out_events)
    }

    fn decide(&mut self, world: &mut World) -> Decision {
        if let Some(target) = query::target(world) {
            let outcome = self
                .search
                .search(&query::memory_view(world), SearchMode::Pursuit { target });
            if let Some(direction) = outcome.direction() {
                return Decision::new(direction, DecisionSource::Pursuit);
            }

            debug!(x = target.x(), y = target.y(), ?outcome, "target unreachable");
            self.targeting.release_unreachable(target, &mut self.commands);
            self.flush_commands(world);
        }

        let outcome = self
            .search
            .search(&query::memory_view(world), SearchMode::Exploration);
        if let Some(direction) = outcome.direction() {
            return Decision::new(direction, DecisionSource::Exploration);
        }

        let memory = query::memory_view(world);
        match self.fallback.choose(&memory, memory.last_action()) {
            Some(direction) => Decision::new(direction, DecisionSource::Fallback),
            None => Decision::new(DEFAULT_DIRECTION, DecisionSource::Default),
        }
    }

    fn commit(
        &mut self,
        world: &mut World,
        decision: Decision,
        out_events: &mut Vec<Event>,
    ) -> Decision {
        world::apply(
            world,
            Command::CommitAction {
                direction: decision.direction,
            },
            &mut self.events,
        );
        out_events.append(&mut self.events);
        decision
    }

    fn flush_commands(&mut self, world: &mut World) {
        for command in self.commands.drain(..) {
            world::apply(world, command, &mut self.events);
        }
    }
}
