//! Track tiles placed on the grid
//!
//! The board is owned by the editor. The simulation only ever reads it.

use std::collections::HashMap;

use glam::IVec2;

use super::tile::{BlockBehavior, TileKind};
use crate::{offset_position, wrap_position};

/// Offsets from a position at which a tile hides a marble travelling behind
pub const OCCLUSION_OFFSETS: [IVec2; 6] = [
    IVec2::new(-1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, -1),
    IVec2::new(-2, -1),
    IVec2::new(-1, -2),
    IVec2::new(-2, -2),
];

/// A placed track tile
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub position: IVec2,
    /// Block name as supplied by the editor
    pub block_name: String,
    /// Resolved kind; `None` for names the registry doesn't know
    pub kind: Option<TileKind>,
    /// Rendering only
    pub sprite_path: String,
    pub hue: Option<f32>,
}

impl Tile {
    pub fn new(position: IVec2, kind: TileKind) -> Self {
        Self {
            position: wrap_position(position),
            block_name: kind.name().to_string(),
            kind: Some(kind),
            sprite_path: kind.default_sprite_path(),
            hue: None,
        }
    }

    /// Build a tile from an editor-supplied block name
    ///
    /// Unknown names still produce a tile; it just has no behavior.
    pub fn named(position: IVec2, block_name: &str, sprite_path: &str) -> Self {
        let kind = TileKind::from_name(block_name);
        if kind.is_none() {
            log::warn!(
                "Unknown tile type {:?} at ({}, {}), tile will be inert",
                block_name,
                position.x,
                position.y
            );
        }
        Self {
            position: wrap_position(position),
            block_name: block_name.to_string(),
            kind,
            sprite_path: sprite_path.to_string(),
            hue: None,
        }
    }

    pub fn with_hue(mut self, hue: f32) -> Self {
        self.hue = Some(hue);
        self
    }

    pub fn behavior(&self) -> Option<&'static BlockBehavior> {
        self.kind.map(|k| k.behavior())
    }
}

/// All tiles on the grid, at most one per position
#[derive(Debug, Clone, Default)]
pub struct Board {
    tiles: HashMap<IVec2, Tile>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a tile, replacing whatever was at its position
    ///
    /// Returns the replaced tile, if any.
    pub fn place(&mut self, tile: Tile) -> Option<Tile> {
        let position = wrap_position(tile.position);
        let tile = Tile { position, ..tile };
        let previous = self.tiles.insert(position, tile);
        if let Some(prev) = &previous {
            log::debug!(
                "Replaced {} at ({}, {})",
                prev.block_name,
                position.x,
                position.y
            );
        }
        previous
    }

    /// Place a tile only if its position is free
    ///
    /// Returns the rejected tile when the cell is occupied.
    pub fn try_place(&mut self, tile: Tile) -> Result<(), Tile> {
        let position = wrap_position(tile.position);
        if self.tiles.contains_key(&position) {
            return Err(tile);
        }
        self.tiles.insert(position, Tile { position, ..tile });
        Ok(())
    }

    pub fn remove(&mut self, position: IVec2) -> Option<Tile> {
        self.tiles.remove(&wrap_position(position))
    }

    /// Update a tile's hue. Returns false if no tile is there.
    pub fn set_hue(&mut self, position: IVec2, hue: Option<f32>) -> bool {
        match self.tiles.get_mut(&wrap_position(position)) {
            Some(tile) => {
                tile.hue = hue;
                true
            }
            None => false,
        }
    }

    pub fn tile_at(&self, position: IVec2) -> Option<&Tile> {
        self.tiles.get(&wrap_position(position))
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// True if a tile sits at any occlusion offset from `position`
    ///
    /// A tile exactly at `position` does not count.
    pub fn is_occluded(&self, position: IVec2) -> bool {
        OCCLUSION_OFFSETS
            .iter()
            .any(|&offset| self.tiles.contains_key(&offset_position(position, offset)))
    }
}

impl FromIterator<Tile> for Board {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut board = Board::new();
        for tile in iter {
            board.place(tile);
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_replaces() {
        let mut board = Board::new();
        assert!(board.place(Tile::new(IVec2::new(1, 1), TileKind::Cross)).is_none());
        let prev = board.place(Tile::new(IVec2::new(1, 1), TileKind::StraightX));
        assert_eq!(prev.map(|t| t.kind), Some(Some(TileKind::Cross)));
        assert_eq!(board.len(), 1);
        assert_eq!(
            board.tile_at(IVec2::new(1, 1)).and_then(|t| t.kind),
            Some(TileKind::StraightX)
        );
    }

    #[test]
    fn test_try_place_rejects_occupied() {
        let mut board = Board::new();
        assert!(board.try_place(Tile::new(IVec2::ZERO, TileKind::Cross)).is_ok());
        let rejected = board.try_place(Tile::new(IVec2::ZERO, TileKind::StraightY));
        assert_eq!(rejected.map_err(|t| t.kind), Err(Some(TileKind::StraightY)));
        assert_eq!(
            board.tile_at(IVec2::ZERO).and_then(|t| t.kind),
            Some(TileKind::Cross)
        );
    }

    #[test]
    fn test_positions_wrap() {
        let mut board = Board::new();
        board.place(Tile::new(IVec2::new(11, 0), TileKind::Cross));
        assert!(board.tile_at(IVec2::new(-10, 0)).is_some());
        assert!(board.tile_at(IVec2::new(32, 21)).is_some());
        assert!(board.remove(IVec2::new(-10, 0)).is_some());
        assert!(board.is_empty());
    }

    #[test]
    fn test_set_hue() {
        let mut board = Board::new();
        board.place(Tile::new(IVec2::new(2, 3), TileKind::Cross));
        assert!(board.set_hue(IVec2::new(2, 3), Some(200.0)));
        assert_eq!(board.tile_at(IVec2::new(2, 3)).and_then(|t| t.hue), Some(200.0));
        assert!(!board.set_hue(IVec2::new(0, 0), Some(10.0)));
    }

    #[test]
    fn test_unknown_name_is_inert() {
        let tile = Tile::named(IVec2::ZERO, "trampoline", "sprites/trampoline.png");
        assert!(tile.kind.is_none());
        assert!(tile.behavior().is_none());
        assert_eq!(tile.block_name, "trampoline");
    }

    #[test]
    fn test_occlusion_offsets() {
        let p = IVec2::new(4, 4);
        for offset in OCCLUSION_OFFSETS {
            let board: Board = [Tile::new(p + offset, TileKind::Cross)].into_iter().collect();
            assert!(board.is_occluded(p), "offset {offset} should occlude");
        }
    }

    #[test]
    fn test_occlusion_near_i32_limits() {
        let board: Board = [Tile::new(IVec2::new(0, 0), TileKind::Cross)].into_iter().collect();
        assert!(!board.is_occluded(IVec2::new(i32::MAX, i32::MIN)));
        assert!(board.tile_at(IVec2::new(i32::MIN, i32::MAX)).is_none());
    }

    #[test]
    fn test_own_position_never_occludes() {
        let p = IVec2::new(4, 4);
        let board: Board = [Tile::new(p, TileKind::Cross)].into_iter().collect();
        assert!(!board.is_occluded(p));
    }

    #[test]
    fn test_front_tiles_do_not_occlude() {
        let p = IVec2::new(0, 0);
        let board: Board = [(1, 0), (0, 1), (1, 1), (-2, 0), (0, -2)]
            .into_iter()
            .map(|(x, y)| Tile::new(IVec2::new(x, y), TileKind::Cross))
            .collect();
        assert!(!board.is_occluded(p));
    }

    #[test]
    fn test_occlusion_wraps() {
        // (-10, -10) is covered by a tile at (10, 10) via offset (-1, -1)
        let board: Board = [Tile::new(IVec2::new(10, 10), TileKind::Cross)].into_iter().collect();
        assert!(board.is_occluded(IVec2::new(-10, -10)));
    }
}
