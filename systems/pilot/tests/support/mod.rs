//! Tiny simulated maze that produces partial snapshots around the agent.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};

use gem_scout_core::{CellCoord, Direction, TickState};

/// Manhattan radius within which gems show up in a snapshot.
const GEM_VISION: u32 = 3;

pub struct Maze {
    floors: HashSet<CellCoord>,
    gems: BTreeSet<CellCoord>,
    agent: CellCoord,
}

impl Maze {
    /// `#` wall, `.` floor, `A` agent start, `G` gem.
    pub fn parse(rows: &[&str]) -> Self {
        let mut floors = HashSet::new();
        let mut gems = BTreeSet::new();
        let mut agent = None;

        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let cell = CellCoord::new(x as i32, y as i32);
                match symbol {
                    '#' => continue,
                    'A' => agent = Some(cell),
                    'G' => {
                        let _ = gems.insert(cell);
                    }
                    '.' => {}
                    other => panic!("unexpected maze symbol {other:?}"),
                }
                let _ = floors.insert(cell);
            }
        }

        Self {
            floors,
            gems,
            agent: agent.expect("maze has an agent"),
        }
    }

    /// Agent cell plus its four neighbours, and every gem within sight.
    pub fn snapshot(&self) -> TickState {
        let mut state = TickState::at(self.agent);
        for cell in std::iter::once(self.agent).chain(self.agent.neighbors()) {
            if self.floors.contains(&cell) {
                state.floors.push(cell);
            } else {
                state.walls.push(cell);
            }
        }
        state.goals = self
            .gems
            .iter()
            .copied()
            .filter(|gem| gem.manhattan_distance(self.agent) <= GEM_VISION)
            .collect();
        state
    }

    /// Moves the agent unless the destination is a wall; picks up any gem.
    pub fn advance(&mut self, direction: Direction) {
        let next = self.agent.step(direction);
        if self.floors.contains(&next) {
            self.agent = next;
        }
        let _ = self.gems.remove(&self.agent);
    }

    pub fn agent(&self) -> CellCoord {
        self.agent
    }

    pub fn gems_left(&self) -> usize {
        self.gems.len()
    }
}

/// Corridor loop with the gem tucked behind a wall from the start.
pub const DETOUR: &[&str] = &[
    "#######",
    "#A..#G#",
    "#.#.#.#",
    "#.#...#",
    "#######",
];
