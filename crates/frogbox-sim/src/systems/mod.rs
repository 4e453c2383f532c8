//! Systems that operate on the field each tick.
//!
//! Systems are plain functions over the field and session. They do not own
//! state beyond what is passed in; the freeze buff is the one stateful helper.

pub mod cleanup;
pub mod color_cycle;
pub mod conversion;
pub mod countdown;
pub mod explosion;
pub mod freeze;
pub mod snapshot;
pub mod spatial;
