use gem_scout_core::{CellCoord, Command, TickState};
use gem_scout_system_pathing::{PathOutcome, PathSearch, SearchMode};
use gem_scout_world::{self as world, query, World};
use proptest::prelude::*;

const SIZE: i32 = 6;
const CELL_COUNT: usize = (SIZE * SIZE) as usize;
const AGENT: CellCoord = CellCoord::new(2, 2);

fn cell_at(index: usize) -> CellCoord {
    let index = index as i32;
    CellCoord::new(index % SIZE, index / SIZE)
}

fn index_of(cell: CellCoord) -> Option<usize> {
    let in_bounds = (0..SIZE).contains(&cell.x()) && (0..SIZE).contains(&cell.y());
    in_bounds.then(|| (cell.y() * SIZE + cell.x()) as usize)
}

fn build_world(open: &[bool]) -> World {
    let mut walls = Vec::new();
    let mut floors = Vec::new();
    for (index, &is_open) in open.iter().enumerate() {
        if is_open {
            floors.push(cell_at(index));
        } else {
            walls.push(cell_at(index));
        }
    }

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ObserveTick {
            state: TickState {
                agent: AGENT,
                walls,
                floors,
                goals: Vec::new(),
            },
        },
        &mut events,
    );
    world
}

/// Hop distances from `origin` computed by exhaustive relaxation.
fn brute_force_distances(open: &[bool], origin: CellCoord) -> Vec<Option<u32>> {
    let mut distances = vec![None; CELL_COUNT];
    let Some(origin_index) = index_of(origin) else {
        return distances;
    };
    distances[origin_index] = Some(0);

    for _ in 0..CELL_COUNT {
        for index in 0..CELL_COUNT {
            if !open[index] {
                continue;
            }

            for neighbor in cell_at(index).neighbors() {
                let Some(neighbor_index) = index_of(neighbor) else {
                    continue;
                };
                let Some(via) = distances[neighbor_index] else {
                    continue;
                };
                let candidate = via + 1;
                if distances[index].map_or(true, |current| candidate < current) {
                    distances[index] = Some(candidate);
                }
            }
        }
    }

    distances
}

fn grid() -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(proptest::bool::weighted(0.7), CELL_COUNT).prop_map(|mut open| {
        if let Some(index) = index_of(AGENT) {
            open[index] = true;
        }
        open
    })
}

proptest! {
    #[test]
    fn pursuit_first_hop_lies_on_a_shortest_path(
        mut open in grid(),
        target_index in 0..CELL_COUNT,
    ) {
        open[target_index] = true;
        let target = cell_at(target_index);
        prop_assume!(target != AGENT);

        let world = build_world(&open);
        let mut search = PathSearch::default();
        let outcome = search.search(&query::memory_view(&world), SearchMode::Pursuit { target });

        let to_target = brute_force_distances(&open, target);
        let agent_index = index_of(AGENT).expect("agent inside grid");

        match to_target[agent_index] {
            None => prop_assert_eq!(outcome, PathOutcome::Unreachable),
            Some(distance) => {
                let PathOutcome::Step { direction, destination } = outcome else {
                    return Err(TestCaseError::fail(format!("expected a step, got {outcome:?}")));
                };
                prop_assert_eq!(destination, target);

                let next = AGENT.step(direction);
                let next_index = index_of(next).expect("first hop stays on the grid");
                prop_assert!(open[next_index], "first hop must be floor");
                prop_assert_eq!(to_target[next_index], Some(distance - 1));
            }
        }
    }

    #[test]
    fn exploration_reaches_a_nearest_frontier(open in grid()) {
        let world = build_world(&open);
        let mut search = PathSearch::default();
        let outcome = search.search(&query::memory_view(&world), SearchMode::Exploration);

        // Every cell of the grid is known, so only floor on the border touches Unknown.
        let from_agent = brute_force_distances(&open, AGENT);
        let nearest = (0..CELL_COUNT)
            .filter(|&index| open[index])
            .filter(|&index| {
                let cell = cell_at(index);
                cell.x() == 0 || cell.y() == 0 || cell.x() == SIZE - 1 || cell.y() == SIZE - 1
            })
            .filter_map(|index| from_agent[index])
            .min();

        match nearest {
            None => prop_assert_eq!(outcome, PathOutcome::Unreachable),
            Some(best) => {
                let PathOutcome::Step { destination, .. } = outcome else {
                    return Err(TestCaseError::fail(format!("expected a step, got {outcome:?}")));
                };
                let destination_index = index_of(destination).expect("destination on grid");
                prop_assert!(query::memory_view(&world).is_frontier(destination));
                prop_assert_eq!(from_agent[destination_index], Some(best));
            }
        }
    }
}
