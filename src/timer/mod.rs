//! Timer driver for the per-turn countdown.
//!
//! The machine never reads a clock. Hosts measure elapsed time however their
//! event loop does and feed it to a `TurnClock`, which issues exactly one
//! `decrement_timer` per second while the turn is running.

mod clock;

pub use clock::TurnClock;
