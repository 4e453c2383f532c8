//! Color-cycle behavior for frogbox.
//!
//! Implements the per-frog color state machine and the hold-time
//! profiles it draws from.

pub mod fsm;
pub mod profiles;

pub use frogbox_core as core;

#[cfg(test)]
mod tests;
