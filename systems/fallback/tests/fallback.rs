use gem_scout_core::{CellCoord, Command, Direction, TickState};
use gem_scout_system_fallback::Fallback;
use gem_scout_world::{self as world, query, World};

fn world_with_walls(agent: CellCoord, walls: &[Direction]) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ObserveTick {
            state: TickState {
                agent,
                walls: walls.iter().map(|direction| agent.step(*direction)).collect(),
                ..TickState::default()
            },
        },
        &mut events,
    );
    world
}

#[test]
fn repeats_previous_action_when_open() {
    let world = world_with_walls(CellCoord::new(0, 0), &[Direction::North]);
    let fallback = Fallback::new();

    assert_eq!(
        fallback.choose(&query::memory_view(&world), Some(Direction::South)),
        Some(Direction::South)
    );
}

#[test]
fn skips_previous_action_blocked_by_wall() {
    let world = world_with_walls(CellCoord::new(0, 0), &[Direction::West]);
    let fallback = Fallback::new();

    assert_eq!(
        fallback.choose(&query::memory_view(&world), Some(Direction::West)),
        Some(Direction::North)
    );
}

#[test]
fn follows_north_east_south_west_priority() {
    let world = world_with_walls(
        CellCoord::new(3, 3),
        &[Direction::North, Direction::East],
    );
    let fallback = Fallback::new();

    assert_eq!(
        fallback.choose(&query::memory_view(&world), None),
        Some(Direction::South)
    );
}

#[test]
fn treats_unknown_destinations_as_open() {
    let world = world_with_walls(CellCoord::new(0, 0), &[]);
    let fallback = Fallback::new();

    assert_eq!(
        fallback.choose(&query::memory_view(&world), None),
        Some(Direction::North)
    );
}

#[test]
fn never_returns_a_known_wall() {
    let fallback = Fallback::new();
    let agent = CellCoord::new(0, 0);

    for mask in 0u8..15 {
        let walls: Vec<Direction> = Direction::ALL
            .into_iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, direction)| direction)
            .collect();
        let world = world_with_walls(agent, &walls);
        let view = query::memory_view(&world);

        for previous in [None, Some(Direction::North), Some(Direction::West)] {
            let chosen = fallback
                .choose(&view, previous)
                .expect("at least one neighbour is open");
            assert!(
                !view.is_wall(agent.step(chosen)),
                "mask {mask:#06b} chose wall {chosen:?}"
            );
        }
    }
}

#[test]
fn boxed_in_agent_gets_no_candidate() {
    let world = world_with_walls(CellCoord::new(0, 0), &Direction::ALL);
    let fallback = Fallback::new();

    assert_eq!(
        fallback.choose(&query::memory_view(&world), Some(Direction::East)),
        None
    );
}

#[test]
fn no_agent_means_no_candidate() {
    let world = World::new();
    assert_eq!(Fallback::new().choose(&query::memory_view(&world), None), None);
}
