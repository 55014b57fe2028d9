use std::sync::{Arc, Mutex, MutexGuard};

use crate::game::{GameSnapshot, GameState, RunState};
use crate::input::Direction;

/// Cloneable handle that serializes every access to one game.
///
/// Input callbacks and a timer thread can each hold a clone; `tick`,
/// `set_direction` and `snapshot` never interleave.
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Forwards a direction request to the engine.
    pub fn set_direction(&self, requested: Direction) {
        self.lock().set_direction(requested);
    }

    /// Advances the engine by one tick and reports the resulting run state.
    pub fn tick(&self) -> RunState {
        let mut state = self.lock();
        state.tick();
        state.run_state()
    }

    /// Copies the current drawable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    /// Replaces the game with a fresh one, keeping every handle valid.
    pub fn replace(&self, state: GameState) {
        *self.lock() = state;
    }

    // The engine never panics halfway through a mutation, so a poisoned
    // lock still guards a consistent state.
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
