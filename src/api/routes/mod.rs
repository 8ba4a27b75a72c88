pub mod health;
pub mod matches;
pub mod pitch;
pub mod players;
