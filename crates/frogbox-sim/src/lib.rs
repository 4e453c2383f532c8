//! Simulation engine for frogbox.
//!
//! Owns the hecs world of frogs, resolves drag selections through a paced
//! state machine, and produces GameStateSnapshots for the frontend.

pub mod camera;
pub mod engine;
pub mod error;
pub mod field;
pub mod resolution;
pub mod selection;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use frogbox_core as core;
