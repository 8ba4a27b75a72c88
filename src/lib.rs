//! # League Dashboard
//!
//! Backend for a football league statistics dashboard.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (pitch spec and geometry, player rows, rankings, matches)
//! - **pitch**: Pitch geometry generation
//! - **calculate**: Stat filtering, competition ranking and classification
//! - **storage**: Filesystem dataset access (CSV, JSON, JSONL, logos)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod pitch;
pub mod storage;

pub use models::*;
