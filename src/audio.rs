//! Sound cues keyed off marble state transitions
//!
//! Only decides *which* cue to play and how loud. A front end owns the actual
//! audio device and turns each `CueTone` into sound.

use crate::Settings;
use crate::sim::{MarbleEvent, MarbleState};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Marble lands on a tile
    Roll,
    /// Marble leaves the track forward
    Drop,
    /// Marble falls back underneath the track
    Tuck,
    /// Marble comes out from under the track
    Emerge,
}

impl SoundCue {
    /// Cue for a change of state, if it deserves one
    pub fn for_transition(from: MarbleState, to: MarbleState) -> Option<Self> {
        match (from, to) {
            (MarbleState::Rolling, MarbleState::Rolling)
            | (MarbleState::Falling, MarbleState::Falling) => None,
            (MarbleState::Behind { .. }, MarbleState::Behind { .. }) => None,
            (_, MarbleState::Rolling) => Some(SoundCue::Roll),
            (MarbleState::Behind { .. }, MarbleState::Falling) => Some(SoundCue::Emerge),
            (_, MarbleState::Falling) => Some(SoundCue::Drop),
            (_, MarbleState::Behind { .. }) => Some(SoundCue::Tuck),
        }
    }

    pub fn for_event(event: &MarbleEvent) -> Option<Self> {
        Self::for_transition(event.from, event.state)
    }

    /// (frequency Hz, duration ms, relative gain)
    fn voice(&self) -> (f32, u32, f32) {
        match self {
            SoundCue::Roll => (440.0, 60, 0.5),
            SoundCue::Drop => (220.0, 120, 0.4),
            SoundCue::Tuck => (150.0, 180, 0.3),
            SoundCue::Emerge => (330.0, 90, 0.35),
        }
    }
}

/// A tone the front end should play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueTone {
    pub cue: SoundCue,
    pub frequency_hz: f32,
    pub duration_ms: u32,
    pub volume: f32,
}

/// Volume and mute state for cues
#[derive(Debug, Clone)]
pub struct CueMixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for CueMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl CueMixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut mixer = Self::new();
        mixer.apply_settings(settings);
        mixer
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Tone for a cue, or `None` when nothing would be heard
    pub fn cue_tone(&self, cue: SoundCue) -> Option<CueTone> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }
        let (frequency_hz, duration_ms, gain) = cue.voice();
        Some(CueTone {
            cue,
            frequency_hz,
            duration_ms,
            volume: vol * gain,
        })
    }

    /// Tones for a batch of tick events, in event order
    pub fn tones_for(&self, events: &[MarbleEvent]) -> Vec<CueTone> {
        events
            .iter()
            .filter_map(SoundCue::for_event)
            .filter_map(|cue| self.cue_tone(cue))
            .collect()
    }
}
