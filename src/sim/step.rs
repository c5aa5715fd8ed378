//! Marble transition engine
//!
//! One call advances one marble by one tick against a board snapshot.
//! The only impurity is the random source, which the caller supplies.

use glam::IVec2;
use rand::Rng;

use super::board::Board;
use super::momentum::Momentum;
use super::state::{Marble, MarbleState};
use super::tile::resolve_output;
use crate::consts::ROLL_ROTATION_STEP;
use crate::{offset_position, wrap_degrees, wrap_position};

/// Gravity in this projection: one cell straight down the screen
pub const FALL_VECTOR: IVec2 = IVec2::ONE;

/// Compute the next state of `marble` on `board`
pub fn step<R: Rng + ?Sized>(marble: &Marble, board: &Board, rng: &mut R) -> Marble {
    let mut next = marble.clone();

    // Behind marbles keep dropping until nothing covers them
    if let MarbleState::Behind { .. } = marble.state {
        next.position = offset_position(marble.position, FALL_VECTOR);
        next.momentum = Momentum::Zero;
        if !board.is_occluded(next.position) {
            next.state = MarbleState::Falling;
            next.shift_hue(rng);
        }
        return next;
    }

    if let Some(tile) = board.tile_at(marble.position) {
        match tile.behavior() {
            Some(behavior) => {
                let momentum = resolve_output(marble.momentum, behavior, rng);
                if !momentum.is_zero() {
                    next.state = MarbleState::Rolling;
                    next.momentum = momentum;
                    next.position = offset_position(marble.position, momentum.unit_vector());
                    next.rotation = wrap_degrees(marble.rotation + ROLL_ROTATION_STEP);
                    return next;
                }
                log::warn!(
                    "{} at ({}, {}) resolved {} to no momentum, marble {} falls through",
                    tile.block_name,
                    tile.position.x,
                    tile.position.y,
                    marble.momentum,
                    marble.id
                );
            }
            None => {
                log::warn!(
                    "Unknown tile type {:?} at ({}, {}), marble {} falls through",
                    tile.block_name,
                    tile.position.x,
                    tile.position.y,
                    marble.id
                );
            }
        }
    }

    // Free fall. Rolling backward off the track tucks the marble behind it.
    if marble.state == MarbleState::Rolling && marble.momentum.is_negative() {
        next.state = MarbleState::Behind {
            origin: wrap_position(marble.position),
        };
    } else {
        if marble.state != MarbleState::Falling {
            next.shift_hue(rng);
        }
        next.state = MarbleState::Falling;
    }
    next.momentum = Momentum::Zero;
    next.position = offset_position(marble.position, FALL_VECTOR);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::Tile;
    use crate::sim::tile::TileKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn marble_at(x: i32, y: i32, state: MarbleState, momentum: Momentum) -> Marble {
        Marble {
            id: 1,
            position: IVec2::new(x, y),
            state,
            momentum,
            rotation: 0.0,
            hue: 100.0,
        }
    }

    fn board_with(tiles: &[(i32, i32, TileKind)]) -> Board {
        tiles
            .iter()
            .map(|&(x, y, kind)| Tile::new(IVec2::new(x, y), kind))
            .collect()
    }

    fn hue_delta(before: f32, after: f32) -> f32 {
        (after - before).rem_euclid(360.0)
    }

    #[test]
    fn test_straight_pass_through() {
        let board = board_with(&[(0, 0, TileKind::StraightX)]);
        let m = marble_at(0, 0, MarbleState::Rolling, Momentum::PosX);
        let mut rng = Pcg32::seed_from_u64(1);
        let next = step(&m, &board, &mut rng);
        assert_eq!(next.state, MarbleState::Rolling);
        assert_eq!(next.momentum, Momentum::PosX);
        assert_eq!(next.position, IVec2::new(1, 0));
        assert_eq!(next.rotation, ROLL_ROTATION_STEP);
        assert_eq!(next.hue, m.hue);
    }

    #[test]
    fn test_pass_through_wraps_at_edge() {
        let board = board_with(&[(10, 3, TileKind::StraightX)]);
        let m = marble_at(10, 3, MarbleState::Rolling, Momentum::PosX);
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.position, IVec2::new(-10, 3));
    }

    #[test]
    fn test_free_fall() {
        let board = Board::new();
        let m = marble_at(5, 5, MarbleState::Falling, Momentum::Zero);
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.state, MarbleState::Falling);
        assert_eq!(next.position, IVec2::new(6, 6));
        assert_eq!(next.momentum, Momentum::Zero);
        // Already falling: hue is left alone
        assert_eq!(next.hue, m.hue);
    }

    #[test]
    fn test_fall_wraps_corner() {
        let m = marble_at(10, 10, MarbleState::Falling, Momentum::Zero);
        let next = step(&m, &Board::new(), &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.position, IVec2::new(-10, -10));
    }

    #[test]
    fn test_rolling_forward_off_track_falls_with_new_hue() {
        let m = marble_at(2, 0, MarbleState::Rolling, Momentum::PosX);
        let next = step(&m, &Board::new(), &mut Pcg32::seed_from_u64(9));
        assert_eq!(next.state, MarbleState::Falling);
        assert_eq!(next.momentum, Momentum::Zero);
        assert_eq!(next.position, IVec2::new(3, 1));
        let delta = hue_delta(m.hue, next.hue);
        assert!((29.99..=140.01).contains(&delta), "delta {delta}");
    }

    #[test]
    fn test_backward_roll_off_goes_behind() {
        // Tile at (0,0) sends the marble to (-1,0), which is empty
        let board = board_with(&[(0, 0, TileKind::StraightX)]);
        let m = marble_at(0, 0, MarbleState::Rolling, Momentum::NegX);
        let mut rng = Pcg32::seed_from_u64(3);

        let on_edge = step(&m, &board, &mut rng);
        assert_eq!(on_edge.state, MarbleState::Rolling);
        assert_eq!(on_edge.position, IVec2::new(-1, 0));

        let tucked = step(&on_edge, &board, &mut rng);
        assert_eq!(
            tucked.state,
            MarbleState::Behind {
                origin: IVec2::new(-1, 0)
            }
        );
        assert_eq!(tucked.behind_coordinates(), Some(IVec2::new(-1, 0)));
        assert_eq!(tucked.momentum, Momentum::Zero);
        assert_eq!(tucked.position, IVec2::new(0, 1));
        assert_eq!(tucked.hue, on_edge.hue);
    }

    #[test]
    fn test_behind_stays_while_occluded() {
        // Next position (1,1) is covered by the tile at (0,0) via offset (-1,-1)
        let board = board_with(&[(0, 0, TileKind::Cross)]);
        let m = marble_at(
            0,
            0,
            MarbleState::Behind {
                origin: IVec2::new(-1, 0),
            },
            Momentum::Zero,
        );
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.position, IVec2::new(1, 1));
        assert_eq!(
            next.state,
            MarbleState::Behind {
                origin: IVec2::new(-1, 0)
            }
        );
        assert_eq!(next.hue, m.hue);
    }

    #[test]
    fn test_behind_ignores_tile_underneath() {
        // A behind marble sitting on a tile still just drops
        let board = board_with(&[(3, 3, TileKind::LandingPosX), (2, 3, TileKind::Cross)]);
        let m = marble_at(
            3,
            3,
            MarbleState::Behind {
                origin: IVec2::new(0, 0),
            },
            Momentum::Zero,
        );
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.position, IVec2::new(4, 4));
        assert_eq!(next.momentum, Momentum::Zero);
        assert_ne!(next.state, MarbleState::Rolling);
    }

    #[test]
    fn test_re_emergence() {
        let board = board_with(&[(0, 0, TileKind::Cross)]);
        let m = marble_at(
            4,
            4,
            MarbleState::Behind {
                origin: IVec2::new(-1, 0),
            },
            Momentum::Zero,
        );
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(21));
        assert_eq!(next.state, MarbleState::Falling);
        assert_eq!(next.position, IVec2::new(5, 5));
        assert!(next.behind_coordinates().is_none());
        let delta = hue_delta(m.hue, next.hue);
        assert!((29.99..=140.01).contains(&delta), "delta {delta}");
    }

    #[test]
    fn test_landing_on_tile_starts_rolling() {
        let board = board_with(&[(6, 6, TileKind::LandingNegY)]);
        let m = marble_at(6, 6, MarbleState::Falling, Momentum::Zero);
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.state, MarbleState::Rolling);
        assert_eq!(next.momentum, Momentum::NegY);
        assert_eq!(next.position, IVec2::new(6, 5));
    }

    #[test]
    fn test_unknown_tile_is_inert() {
        let mut board = Board::new();
        board.place(Tile::named(IVec2::new(1, 1), "trampoline", "t.png"));
        let m = marble_at(1, 1, MarbleState::Falling, Momentum::Zero);
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.state, MarbleState::Falling);
        assert_eq!(next.position, IVec2::new(2, 2));
        assert_eq!(next.momentum, Momentum::Zero);
    }

    #[test]
    fn test_rotation_wraps() {
        let board = board_with(&[(0, 0, TileKind::StraightY)]);
        let mut m = marble_at(0, 0, MarbleState::Rolling, Momentum::PosY);
        m.rotation = 350.0;
        let next = step(&m, &board, &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.rotation, 5.0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let board = board_with(&[(0, 0, TileKind::Cross)]);
        let m = marble_at(0, 0, MarbleState::Falling, Momentum::Zero);
        for seed in 0..50 {
            let a = step(&m, &board, &mut Pcg32::seed_from_u64(seed));
            let b = step(&m, &board, &mut Pcg32::seed_from_u64(seed));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_positions_near_i32_limits_wrap() {
        let board = board_with(&[(0, 0, TileKind::StraightX)]);
        let mut rng = Pcg32::seed_from_u64(1);
        for (x, y) in [(i32::MAX, 0), (i32::MIN, i32::MAX), (0, i32::MIN)] {
            for state in [
                MarbleState::Rolling,
                MarbleState::Falling,
                MarbleState::Behind { origin: IVec2::ZERO },
            ] {
                let m = marble_at(x, y, state, Momentum::NegX);
                let next = step(&m, &board, &mut rng);
                assert_eq!(
                    next.position,
                    wrap_position(wrap_position(m.position) + FALL_VECTOR)
                );
                if let Some(origin) = next.behind_coordinates() {
                    assert!((-10..=10).contains(&origin.x) && (-10..=10).contains(&origin.y));
                }
            }
        }
    }

    #[test]
    fn test_id_preserved() {
        let mut m = marble_at(0, 0, MarbleState::Falling, Momentum::Zero);
        m.id = 42;
        let next = step(&m, &Board::new(), &mut Pcg32::seed_from_u64(1));
        assert_eq!(next.id, 42);
    }
}
