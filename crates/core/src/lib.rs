//! # recurslot core
//!
//! Domain types for mentor availability slots and the pure parts of the
//! recurring scheduler: expanding a weekly pattern into concrete slots and
//! folding stored slots back into the patterns they came from.

pub mod errors;
pub mod generator;
pub mod grouping;
pub mod models;
