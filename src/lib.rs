//! Top-down action game core.
//!
//! The simulation is strictly single-threaded: one `Session::tick` per
//! frame advances every entity exactly once.  All randomness is injected
//! through a `rand::Rng` handle so tests can seed it.  Terminal I/O lives
//! exclusively in `display` and the binary.

pub mod dialog;
pub mod display;
pub mod enemy;
pub mod geometry;
pub mod level;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod weapons;
