//! Deterministic simulation module
//!
//! All marble logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, passed in by the caller
//! - Each generation computed from one board snapshot
//! - Stable iteration order (by marble ID)
//! - No rendering, audio or platform dependencies

pub mod board;
pub mod momentum;
pub mod state;
pub mod step;
pub mod tick;
pub mod tile;

pub use board::{Board, OCCLUSION_OFFSETS, Tile};
pub use momentum::Momentum;
pub use state::{Marble, MarbleState, RngState, Track};
pub use step::{FALL_VECTOR, step};
pub use tick::{MarbleEvent, TickInput, step_generation, tick};
pub use tile::{BlockBehavior, Output, Rule, TileKind, lookup, resolve_output};
