//! Simulation core for a side-scrolling bird-versus-cannons arcade game.
//!
//! The core never reads a clock or touches the terminal.  Callers feed it
//! input events and timestamps through [`frame::Game`] (or the pure
//! [`frame::tick`]) and read back immutable [`entities::WorldSnapshot`]s.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod frame;
pub mod geometry;
pub mod notify;
pub mod state;
pub mod store;
