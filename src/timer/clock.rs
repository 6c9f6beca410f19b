//! Turns wall-clock time into one-second game ticks.

use std::time::Duration;

use tracing::trace;

use crate::rules::{GameMachine, Outcome};

const TICK: Duration = Duration::from_secs(1);

/// Accumulates elapsed time and ticks the machine once per whole second.
///
/// - Each second is exactly one `decrement_timer` call; ticks are never
///   merged.
/// - Time only accumulates while the machine's timer is running. When the
///   turn stops (paused, ended) the leftover fraction is dropped, so it is
///   never replayed into a later turn.
/// - Accumulated time belongs to one turn. If a different turn is running
///   at the next `advance` (the previous one ended through a command in
///   between), the leftover is dropped first.
///
/// ```
/// use std::time::Duration;
/// use fishbowl_engine::{GameConfig, GameMachine, Note};
/// use fishbowl_engine::timer::TurnClock;
///
/// let mut machine = GameMachine::new(GameConfig::default().with_min_notes(1), 7);
/// machine.open_setup().unwrap();
/// machine.add_team("Red").unwrap();
/// machine.add_team("Blue").unwrap();
/// machine.set_notes(vec![Note::new("Titanic")]).unwrap();
/// machine.start_game().unwrap();
/// machine.start_turn().unwrap();
///
/// let mut clock = TurnClock::new();
/// clock.advance(Duration::from_millis(2500), &mut machine);
/// assert_eq!(machine.state().turn_time_left(), 58);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TurnClock {
    carried: Duration,
    /// `turn_number` of the turn `carried` was measured in.
    turn: Option<u64>,
}

impl TurnClock {
    /// Create a clock with nothing accumulated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated toward the next tick.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.carried
    }

    /// Drop any accumulated time.
    pub fn reset(&mut self) {
        self.carried = Duration::ZERO;
        self.turn = None;
    }

    /// Feed elapsed time and tick the machine for every whole second.
    ///
    /// Returns the outcome of each tick, in order.
    pub fn advance(&mut self, elapsed: Duration, machine: &mut GameMachine) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        if !machine.is_timer_running() {
            self.reset();
            return outcomes;
        }

        let turn = machine.state().turn_number();
        if self.turn != Some(turn) {
            self.reset();
            self.turn = Some(turn);
        }

        self.carried += elapsed;
        while self.carried >= TICK {
            match machine.decrement_timer() {
                Ok(outcome) => outcomes.push(outcome),
                Err(_) => break,
            }
            self.carried -= TICK;
            if !machine.is_timer_running() {
                break;
            }
        }

        if !machine.is_timer_running() {
            self.reset();
        }
        trace!(ticks = outcomes.len(), pending = ?self.carried, "clock advanced");
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Note, Phase};

    fn playing_machine(turn_seconds: u32) -> GameMachine {
        let config = GameConfig::default()
            .with_turn_seconds(turn_seconds)
            .with_min_notes(1);
        let mut machine = GameMachine::new(config, 11);
        machine.open_setup().unwrap();
        machine.add_team("Red").unwrap();
        machine.add_team("Blue").unwrap();
        machine
            .set_notes((0..5).map(|i| Note::new(format!("n{}", i))))
            .unwrap();
        machine.start_game().unwrap();
        machine.start_turn().unwrap();
        machine
    }

    #[test]
    fn test_whole_seconds_tick() {
        let mut machine = playing_machine(60);
        let mut clock = TurnClock::new();

        let outcomes = clock.advance(Duration::from_secs(3), &mut machine);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(machine.state().turn_time_left(), 57);
        assert_eq!(clock.pending(), Duration::ZERO);
    }

    #[test]
    fn test_fractions_accumulate() {
        let mut machine = playing_machine(60);
        let mut clock = TurnClock::new();

        assert!(clock.advance(Duration::from_millis(600), &mut machine).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(600), &mut machine).len(), 1);
        assert_eq!(clock.pending(), Duration::from_millis(200));
        assert_eq!(machine.state().turn_time_left(), 59);
    }

    #[test]
    fn test_paused_does_not_tick() {
        let mut machine = playing_machine(60);
        let mut clock = TurnClock::new();
        clock.advance(Duration::from_millis(900), &mut machine);

        machine.pause_game().unwrap();
        assert!(clock.advance(Duration::from_secs(10), &mut machine).is_empty());
        assert_eq!(clock.pending(), Duration::ZERO);

        machine.resume_game().unwrap();
        assert!(clock.advance(Duration::from_millis(200), &mut machine).is_empty());
        assert_eq!(machine.state().turn_time_left(), 60);
    }

    #[test]
    fn test_leftover_not_carried_into_next_turn() {
        let mut machine = playing_machine(60);
        let mut clock = TurnClock::new();
        assert!(clock.advance(Duration::from_millis(900), &mut machine).is_empty());

        // The turn ends and the next begins without the clock seeing it.
        machine.end_turn().unwrap();
        machine.next_turn().unwrap();
        machine.start_turn().unwrap();

        assert!(clock.advance(Duration::from_millis(200), &mut machine).is_empty());
        assert_eq!(machine.state().turn_time_left(), 60);
        assert_eq!(clock.pending(), Duration::from_millis(200));
    }

    #[test]
    fn test_leftover_kept_within_turn() {
        let mut machine = playing_machine(60);
        let mut clock = TurnClock::new();
        clock.advance(Duration::from_millis(900), &mut machine);

        // Commands that keep the same turn running leave the fraction alone.
        machine.correct_guess().unwrap();

        assert_eq!(clock.advance(Duration::from_millis(200), &mut machine).len(), 1);
        assert_eq!(machine.state().turn_time_left(), 59);
    }

    #[test]
    fn test_stops_at_turn_end() {
        let mut machine = playing_machine(3);
        let mut clock = TurnClock::new();

        let outcomes = clock.advance(Duration::from_secs(10), &mut machine);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[2].entered(), Some(Phase::TurnEnd));
        assert_eq!(machine.state().turn_time_left(), 0);
        assert_eq!(clock.pending(), Duration::ZERO);
    }
}
