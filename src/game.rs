use std::collections::HashSet;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GridSize, START_POSITION};
use crate::food::Food;
use crate::input::{Direction, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Whether the game still accepts ticks and input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    Running,
    /// Absorbing: no tick or direction change has any effect afterwards.
    Terminated,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
}

impl DeathReason {
    /// Short message for the status bar and logs.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfCollision => "ran into itself",
        }
    }
}

/// Copy of everything a host needs to draw one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSnapshot {
    pub bounds: GridSize,
    /// Segments from head to tail.
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub run_state: RunState,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
}

/// Complete game state for one session.
///
/// One instance is one game; hosts create a fresh one to play again.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Food,
    direction: Direction,
    run_state: RunState,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Starts a game with entropy-seeded food placement.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::new(START_POSITION.clamped(bounds));
        let food = Food::spawn(&mut rng, bounds);

        Self {
            snake,
            food,
            direction: Direction::Right,
            run_state: RunState::Running,
            death_reason: None,
            tick_count: 0,
            bounds,
            rng,
        }
    }

    /// Builds a running game from explicit parts.
    ///
    /// `seed` drives food spawned after the first meal. Returns `None` when a
    /// segment or the food lies off the grid, or two segments share a cell.
    #[must_use]
    pub fn from_parts(
        bounds: GridSize,
        snake: Snake,
        direction: Direction,
        food: Position,
        seed: u64,
    ) -> Option<Self> {
        if !food.is_within_bounds(bounds)
            || !snake.segments().all(|s| s.is_within_bounds(bounds))
            || snake.segments().collect::<HashSet<_>>().len() != snake.len()
        {
            return None;
        }

        Some(Self {
            snake,
            food: Food::new(food),
            direction,
            run_state: RunState::Running,
            death_reason: None,
            tick_count: 0,
            bounds,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Requests a new travel direction.
    ///
    /// Takes effect immediately. Reversals of the current direction and any
    /// request after termination are dropped.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.run_state == RunState::Terminated {
            return;
        }

        if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.run_state == RunState::Terminated {
            return;
        }

        let next_head = self.snake.head().step(self.direction);

        if !next_head.is_within_bounds(self.bounds) {
            self.terminate(DeathReason::Wall);
            return;
        }

        // The tail has not moved yet, so stepping onto it is a collision.
        if self.snake.occupies(next_head) {
            self.terminate(DeathReason::SelfCollision);
            return;
        }

        let ate = next_head == self.food.position;
        if ate {
            self.food = Food::spawn(&mut self.rng, self.bounds);
            debug!(
                "food eaten at ({}, {}), next food at ({}, {})",
                next_head.x, next_head.y, self.food.position.x, self.food.position.y
            );
        }

        self.snake.advance(next_head, ate);
        self.tick_count += 1;
    }

    fn terminate(&mut self, reason: DeathReason) {
        self.run_state = RunState::Terminated;
        self.death_reason = Some(reason);
        info!(
            "game over after {} ticks: snake {} at length {}",
            self.tick_count,
            reason.describe(),
            self.snake.len()
        );
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food.position
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Number of ticks that moved the snake.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Copies the drawable state out of the engine.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            bounds: self.bounds,
            snake: self.snake.segments().copied().collect(),
            food: self.food.position,
            direction: self.direction,
            run_state: self.run_state,
            death_reason: self.death_reason,
            tick_count: self.tick_count,
        }
    }
}
