//! Fixed tick over the whole track
//!
//! Advances every marble by one generation from a single board snapshot.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Marble, MarbleState, Track};
use super::step::step;

/// Commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
    /// Remove every marble before stepping
    pub clear_marbles: bool,
    /// Drop new marbles at these positions before stepping
    pub drop_at: Vec<IVec2>,
    /// Advance one generation even while paused (manual step)
    pub single_step: bool,
}

/// Emitted when a marble changes between rolling, falling and behind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarbleEvent {
    pub id: u32,
    pub from: MarbleState,
    pub state: MarbleState,
}

/// Advance the track by one tick, returning the state changes it produced
pub fn tick(track: &mut Track, input: &TickInput) -> Vec<MarbleEvent> {
    if input.pause {
        track.paused = !track.paused;
        log::info!(
            "Track {}",
            if track.paused { "paused" } else { "resumed" }
        );
    }

    if input.clear_marbles {
        log::info!("Clearing {} marbles", track.marbles.len());
        track.clear_marbles();
    }

    for &pos in &input.drop_at {
        track.drop_marble(pos);
    }

    if track.paused && !input.single_step {
        return Vec::new();
    }

    let next = step_generation(track);
    let events: Vec<MarbleEvent> = track
        .marbles
        .iter()
        .zip(&next)
        .filter(|(before, after)| !before.state.same_kind(&after.state))
        .map(|(before, after)| MarbleEvent {
            id: after.id,
            from: before.state,
            state: after.state,
        })
        .collect();

    for event in &events {
        log::debug!(
            "Marble {}: {} -> {}",
            event.id,
            event.from.as_str(),
            event.state.as_str()
        );
    }

    track.marbles = next;
    track.time_ticks += 1;

    // Ensure deterministic ordering
    track.normalize_order();

    events
}

/// Compute every marble's next state without touching the track
pub fn step_generation(track: &Track) -> Vec<Marble> {
    track
        .marbles
        .iter()
        .map(|marble| {
            let mut rng = track.rng_state.marble_rng(track.time_ticks, marble.id);
            step(marble, &track.board, &mut rng)
        })
        .collect()
}
