//! Marble and track state
//!
//! Everything the driver needs to replay a run lives here: the RNG seed, the tick
//! counter, the board snapshot and the marbles (kept sorted by id).

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::momentum::Momentum;
use crate::consts::*;
use crate::{screen_depth, wrap_degrees, wrap_position};

/// What a marble is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarbleState {
    /// On a tile, following its momentum rule
    Rolling,
    /// In open space, dropping forward
    Falling,
    /// Dropped backward off a tile and hidden under the track
    Behind {
        /// Where the marble left the track (draw depth only)
        origin: IVec2,
    },
}

impl MarbleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarbleState::Rolling => "rolling",
            MarbleState::Falling => "falling",
            MarbleState::Behind { .. } => "behind",
        }
    }

    /// Same variant, ignoring `Behind` coordinates
    pub fn same_kind(&self, other: &MarbleState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A marble entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marble {
    pub id: u32,
    pub position: IVec2,
    pub state: MarbleState,
    pub momentum: Momentum,
    /// Spin angle in degrees, [0, 360)
    pub rotation: f32,
    /// Color in degrees, [0, 360)
    pub hue: f32,
}

impl Marble {
    /// Create a freshly dropped marble with a random hue
    pub fn new<R: Rng + ?Sized>(id: u32, position: IVec2, rng: &mut R) -> Self {
        Self {
            id,
            position: wrap_position(position),
            state: MarbleState::Falling,
            momentum: Momentum::Zero,
            rotation: 0.0,
            hue: wrap_degrees(rng.random_range(0.0..360.0)),
        }
    }

    pub fn behind_coordinates(&self) -> Option<IVec2> {
        match self.state {
            MarbleState::Behind { origin } => Some(origin),
            _ => None,
        }
    }

    /// Shift hue by a random amount, used whenever a fall begins
    pub fn shift_hue<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let shift = rng.random_range(HUE_SHIFT_MIN..=HUE_SHIFT_MAX);
        self.hue = wrap_degrees(self.hue + shift);
    }

    /// Painter's-order depth; behind marbles sort with the tile they fell from
    pub fn draw_depth(&self) -> i32 {
        match self.state {
            MarbleState::Behind { origin } => screen_depth(origin) - 1,
            _ => screen_depth(self.position),
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Independent stream for one marble on one tick
    ///
    /// Draws on one marble never shift another marble's sequence.
    pub fn marble_rng(&self, tick: u64, marble_id: u32) -> Pcg32 {
        Pcg32::seed_from_u64(mix(mix(self.seed, tick), marble_id as u64))
    }

    /// Stream used when a marble is created
    pub fn spawn_rng(&self, marble_id: u32) -> Pcg32 {
        Pcg32::seed_from_u64(mix(self.seed ^ 0xA5A5_A5A5_A5A5_A5A5, marble_id as u64))
    }
}

/// SplitMix64 finalizer over two words
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Complete track state: the board being edited and the marbles on it
#[derive(Debug, Clone)]
pub struct Track {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Editing still works while paused; marbles hold still
    pub paused: bool,
    pub board: Board,
    /// Active marbles (sorted by id for determinism)
    pub marbles: Vec<Marble>,
    next_id: u32,
}

impl Track {
    pub fn new(seed: u64) -> Self {
        Self {
            rng_state: RngState::new(seed),
            time_ticks: 0,
            paused: false,
            board: Board::new(),
            marbles: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_board(seed: u64, board: Board) -> Self {
        Self {
            board,
            ..Self::new(seed)
        }
    }

    /// Allocate a new marble ID
    pub fn next_marble_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop a new marble at `position`, returning its id
    pub fn drop_marble(&mut self, position: IVec2) -> u32 {
        let id = self.next_marble_id();
        let marble = Marble::new(id, position, &mut self.rng_state.spawn_rng(id));
        log::debug!(
            "Marble {} dropped at ({}, {}) hue {:.0}",
            id,
            marble.position.x,
            marble.position.y,
            marble.hue
        );
        self.marbles.push(marble);
        id
    }

    pub fn remove_marble(&mut self, id: u32) -> Option<Marble> {
        let idx = self.marbles.iter().position(|m| m.id == id)?;
        Some(self.marbles.remove(idx))
    }

    pub fn clear_marbles(&mut self) {
        self.marbles.clear();
    }

    pub fn marble(&self, id: u32) -> Option<&Marble> {
        self.marbles.iter().find(|m| m.id == id)
    }

    /// Ensure marbles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.marbles.sort_by_key(|m| m.id);
    }
}
