//! Single-writer store for hosts that touch the game from several threads.

use std::time::Duration;

use parking_lot::Mutex;

use crate::core::{Command, GameState};
use crate::rules::{CommandResult, GameMachine, Outcome};
use crate::timer::TurnClock;

struct Inner {
    machine: GameMachine,
    clock: TurnClock,
}

/// A machine and its turn clock behind one lock.
///
/// The whole machine is one critical section: every command, tick batch, or
/// read takes the lock once. Readers get owned snapshots, never references
/// into the live state.
///
/// ```
/// use std::sync::Arc;
/// use fishbowl_engine::{Command, GameConfig, GameMachine, Phase};
/// use fishbowl_engine::store::GameStore;
///
/// let store = Arc::new(GameStore::new(GameMachine::new(GameConfig::default(), 1)));
/// store.dispatch(Command::OpenSetup).unwrap();
/// assert_eq!(store.snapshot().phase(), Phase::Setup);
/// ```
pub struct GameStore {
    inner: Mutex<Inner>,
}

impl GameStore {
    /// Wrap a machine.
    #[must_use]
    pub fn new(machine: GameMachine) -> Self {
        Self {
            inner: Mutex::new(Inner {
                machine,
                clock: TurnClock::new(),
            }),
        }
    }

    /// Apply one command.
    pub fn dispatch(&self, command: Command) -> CommandResult {
        let mut inner = self.inner.lock();
        let result = inner.machine.dispatch(command);
        if !inner.machine.is_timer_running() {
            inner.clock.reset();
        }
        result
    }

    /// Feed elapsed wall time to the turn clock.
    pub fn advance_clock(&self, elapsed: Duration) -> Vec<Outcome> {
        let mut inner = self.inner.lock();
        let Inner { machine, clock } = &mut *inner;
        clock.advance(elapsed, machine)
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.inner.lock().machine.snapshot()
    }

    /// Run a read-only query against the machine.
    pub fn read<R>(&self, f: impl FnOnce(&GameMachine) -> R) -> R {
        f(&self.inner.lock().machine)
    }

    /// Take the machine back out of the store.
    #[must_use]
    pub fn into_inner(self) -> GameMachine {
        self.inner.into_inner().machine
    }
}

impl std::fmt::Debug for GameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStore")
            .field("phase", &self.read(GameMachine::phase))
            .finish()
    }
}
