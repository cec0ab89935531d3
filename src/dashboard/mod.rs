//! The interactive detail dashboard shown by a desktop host.

pub mod cell;
pub mod detail;
pub mod error;
pub mod feedback;
pub mod host;
pub mod perception;
