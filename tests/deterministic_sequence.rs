use grid_snake::config::GridSize;
use grid_snake::game::{DeathReason, GameState, RunState};
use grid_snake::input::Direction;
use grid_snake::snake::{Position, Snake};

fn board() -> GridSize {
    GridSize::square(20)
}

#[test]
fn five_ticks_without_input_slide_the_snake_right() {
    let mut state = GameState::from_parts(
        board(),
        Snake::new(Position::new(5, 5)),
        Direction::Right,
        Position::new(10, 10),
        42,
    )
    .expect("scenario should be valid");

    for _ in 0..5 {
        state.tick();
    }

    assert_eq!(state.run_state(), RunState::Running);
    assert_eq!(state.snapshot().snake, vec![Position::new(10, 5)]);
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::from_parts(
        GridSize {
            width: 6,
            height: 4,
        },
        Snake::new(Position::new(1, 1)),
        Direction::Right,
        Position::new(2, 1),
        42,
    )
    .expect("scenario should be valid");

    state.tick();
    assert_eq!(state.run_state(), RunState::Running);
    assert_eq!(state.snake().len(), 2);
    assert_eq!(state.head(), Position::new(2, 1));

    state.set_direction(Direction::Up);
    state.tick();
    assert_eq!(state.head(), Position::new(2, 0));
    assert!(state.snake().occupies(Position::new(2, 1)));

    state.tick();
    assert_eq!(state.run_state(), RunState::Terminated);
    assert_eq!(state.death_reason(), Some(DeathReason::Wall));
    assert_eq!(state.head(), Position::new(2, 0));
}

#[test]
fn snake_that_grows_into_a_loop_bites_itself() {
    let mut state = GameState::from_parts(
        board(),
        Snake::from_segments(vec![
            Position::new(4, 5),
            Position::new(3, 5),
            Position::new(2, 5),
            Position::new(1, 5),
            Position::new(0, 5),
        ])
        .expect("segments are non-empty"),
        Direction::Right,
        Position::new(19, 19),
        7,
    )
    .expect("scenario should be valid");

    state.set_direction(Direction::Down);
    state.tick();
    state.set_direction(Direction::Left);
    state.tick();
    state.set_direction(Direction::Up);
    state.tick();

    assert_eq!(state.run_state(), RunState::Terminated);
    assert_eq!(state.death_reason(), Some(DeathReason::SelfCollision));
    assert_eq!(state.head(), Position::new(3, 6));
}

#[test]
fn seeded_games_are_reproducible() {
    let mut first = GameState::new_with_seed(board(), 1234);
    let mut second = GameState::new_with_seed(board(), 1234);
    let script = [
        Direction::Down,
        Direction::Right,
        Direction::Down,
        Direction::Right,
    ];

    for (step, direction) in script.iter().cycle().take(40).enumerate() {
        if step % 3 == 0 {
            first.set_direction(*direction);
            second.set_direction(*direction);
        }
        first.tick();
        second.tick();
    }

    assert_eq!(first.snapshot(), second.snapshot());
}
