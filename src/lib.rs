//! Marble Drop - marbles rolling over track tiles on a wrapping isometric grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile behaviors, marble transitions, track state)
//! - `settings`: Tick cadence, projection and audio preferences
//! - `audio`: Sound cues keyed off marble state transitions
//! - `clock`: Fixed-cadence tick scheduling

pub mod audio;
pub mod clock;
pub mod settings;
pub mod sim;

pub use clock::TickClock;
pub use settings::Settings;

use glam::{IVec2, Vec2};

/// Simulation configuration constants
pub mod consts {
    /// Grid bounds (inclusive on both axes)
    pub const GRID_MIN: i32 = -10;
    pub const GRID_MAX: i32 = 10;
    /// Number of addressable cells per axis
    pub const GRID_WIDTH: i32 = GRID_MAX - GRID_MIN + 1;

    /// Rotation added per rolling step (degrees)
    pub const ROLL_ROTATION_STEP: f32 = 15.0;

    /// Hue shift applied when a marble starts falling (degrees, inclusive)
    pub const HUE_SHIFT_MIN: f32 = 30.0;
    pub const HUE_SHIFT_MAX: f32 = 140.0;

    /// Default isometric cell size (pixels)
    pub const CELL_WIDTH: f32 = 32.0;
    pub const CELL_HEIGHT: f32 = 16.0;

    /// Default tick period (milliseconds)
    pub const TICK_INTERVAL_MS: u32 = 150;
}

use consts::*;

/// Wrap a single coordinate into [GRID_MIN, GRID_MAX]
///
/// Works in i64 so coordinates near the i32 limits can't overflow.
#[inline]
pub fn wrap_coord(c: i32) -> i32 {
    let min = GRID_MIN as i64;
    ((c as i64 - min).rem_euclid(GRID_WIDTH as i64) + min) as i32
}

/// Wrap a grid position onto the torus
#[inline]
pub fn wrap_position(pos: IVec2) -> IVec2 {
    IVec2::new(wrap_coord(pos.x), wrap_coord(pos.y))
}

/// Move `pos` by a small `delta`, wrapping before and after
#[inline]
pub fn offset_position(pos: IVec2, delta: IVec2) -> IVec2 {
    wrap_position(wrap_position(pos) + delta)
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a grid position to isometric screen coordinates
#[inline]
pub fn grid_to_screen(pos: IVec2, cell_width: f32, cell_height: f32) -> Vec2 {
    Vec2::new(
        (pos.x - pos.y) as f32 * cell_width,
        (pos.x + pos.y) as f32 * cell_height,
    )
}

/// Painter's-order depth of a grid position (larger draws later, in front)
#[inline]
pub fn screen_depth(pos: IVec2) -> i32 {
    pos.x + pos.y
}
