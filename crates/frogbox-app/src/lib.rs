//! Headless frogbox runner.
//!
//! Wires the simulation engine to a fixed-rate game loop thread, a JSON-lines
//! command bridge and a session-event output stream.

pub mod error;
pub mod game_loop;
pub mod ipc;
pub mod state;

pub use frogbox_core as core;
