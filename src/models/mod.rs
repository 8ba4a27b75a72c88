//! Core data models for the league dashboard.

mod matches;
mod pitch;
mod player;
mod ranking;

pub use matches::*;
pub use pitch::*;
pub use player::*;
pub use ranking::*;
