//! Marble Drop entry point
//!
//! Native headless demo: builds a small track, drops a few marbles and logs
//! every state change. Pass a settings JSON path as the first argument.

use std::path::PathBuf;

use glam::IVec2;
use marble_drop::audio::CueMixer;
use marble_drop::sim::{Board, TickInput, Tile, TileKind, Track, tick};
use marble_drop::{Settings, TickClock, grid_to_screen};

/// Simulated frame time for the headless loop (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;

fn demo_board() -> Board {
    let mut board = Board::new();
    // A run along +x that turns onto +y and ends in a junction
    for x in -4..=0 {
        board.place(Tile::new(IVec2::new(x, -3), TileKind::StraightX));
    }
    board.place(Tile::new(IVec2::new(1, -3), TileKind::TurnNegXPosY));
    for y in -2..=1 {
        board.place(Tile::new(IVec2::new(1, y), TileKind::StraightY));
    }
    board.place(Tile::new(IVec2::new(1, 2), TileKind::JunctionNoPosY));
    // A landing pad that throws marbles backward under the track
    board.place(Tile::new(IVec2::new(-2, 2), TileKind::LandingNegX).with_hue(200.0));
    board.place(Tile::new(IVec2::new(4, 4), TileKind::Cross));
    board
}

fn main() {
    env_logger::init();
    log::info!("Marble Drop (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };

    let mut track = Track::with_board(settings.seed, demo_board());
    track.paused = settings.start_paused;
    let mixer = CueMixer::from_settings(&settings);
    let mut clock = TickClock::from_settings(&settings);

    let mut input = TickInput {
        drop_at: vec![IVec2::new(-6, -5), IVec2::new(-4, 0), IVec2::new(2, 2)],
        single_step: settings.start_paused,
        ..Default::default()
    };

    let mut ticks_run = 0;
    while ticks_run < settings.demo_ticks {
        for _ in 0..clock.advance(FRAME_DT) {
            let events = tick(&mut track, &input);
            input = TickInput::default();
            ticks_run += 1;

            for event in &events {
                log::info!(
                    "tick {:>3}: marble {} {} -> {}",
                    track.time_ticks,
                    event.id,
                    event.from.as_str(),
                    event.state.as_str()
                );
            }
            for tone in mixer.tones_for(&events) {
                log::debug!(
                    "cue {:?} {:.0} Hz {} ms vol {:.2}",
                    tone.cue,
                    tone.frequency_hz,
                    tone.duration_ms,
                    tone.volume
                );
            }
            if ticks_run >= settings.demo_ticks || track.paused {
                break;
            }
        }
        if track.paused {
            log::info!("Track is paused, stopping demo");
            break;
        }
    }

    println!("After {} ticks:", track.time_ticks);
    for marble in &track.marbles {
        let screen = grid_to_screen(marble.position, settings.cell_width, settings.cell_height);
        println!(
            "  marble {:>2}  grid ({:>3}, {:>3})  screen ({:>6.1}, {:>6.1})  {:<8} momentum {:<2}  hue {:>5.1}",
            marble.id,
            marble.position.x,
            marble.position.y,
            screen.x,
            screen.y,
            marble.state.as_str(),
            marble.momentum,
            marble.hue
        );
    }
}
