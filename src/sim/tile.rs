//! Tiles, their hit state machines, and the grid index used for explosions

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Tile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// One hit
    Regular,
    /// Cracks on the first hit, shatters on the second without deflecting the ball
    Glass,
    /// Indestructible by normal balls; doesn't count for level clear
    Brick,
    /// Arms on the first hit, explodes on the second
    Unstable,
    /// Explodes on the first hit
    Explosive,
}

/// Level-file alias table
pub const TILE_ALIASES: [(&str, TileKind); 5] = [
    ("r", TileKind::Regular),
    ("g", TileKind::Glass),
    ("b", TileKind::Brick),
    ("u", TileKind::Unstable),
    ("e", TileKind::Explosive),
];

impl TileKind {
    pub fn from_alias(alias: &str) -> Option<Self> {
        TILE_ALIASES
            .iter()
            .find(|(a, _)| *a == alias)
            .map(|(_, kind)| *kind)
    }

    pub fn alias(&self) -> &'static str {
        TILE_ALIASES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(a, _)| *a)
            .unwrap_or("?")
    }

    /// Destruction sets off a 3x3 blast
    pub fn explodes(&self) -> bool {
        matches!(self, TileKind::Unstable | TileKind::Explosive)
    }

    /// Points awarded when destroyed
    pub fn destroy_points(&self) -> u32 {
        if self.explodes() {
            TILE_POINTS + BLAST_POINTS
        } else {
            TILE_POINTS
        }
    }
}

/// A cell in the 16x16 tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub col: usize,
    pub row: usize,
}

impl GridPos {
    /// Checked constructor
    pub fn new(col: usize, row: usize) -> Option<Self> {
        (col < GRID_COLS && row < GRID_ROWS).then_some(Self { col, row })
    }

    /// Neighbor at a signed offset, if it lies on the grid
    pub fn offset(&self, dc: i32, dr: i32) -> Option<Self> {
        let col = self.col as i32 + dc;
        let row = self.row as i32 + dr;
        if col < 0 || row < 0 {
            return None;
        }
        Self::new(col as usize, row as usize)
    }

    /// The 3x3 neighborhood (self included), off-grid cells skipped
    pub fn blast_area(self) -> impl Iterator<Item = GridPos> {
        (-1..=1).flat_map(move |dc| (-1..=1).filter_map(move |dr| self.offset(dc, dr)))
    }

    /// Screen rectangle of the cell
    pub fn rect(&self) -> Rect {
        Rect::new(
            MARGIN + TILE_WIDTH * self.col as i32,
            3 * MARGIN + TILE_HEIGHT * self.row as i32,
            TILE_WIDTH,
            TILE_HEIGHT,
        )
    }

    /// Cell containing a screen point, if any
    pub fn containing(point: IVec2) -> Option<Self> {
        let x = point.x - MARGIN;
        let y = point.y - 3 * MARGIN;
        if x < 0 || y < 0 {
            return None;
        }
        Self::new((x / TILE_WIDTH) as usize, (y / TILE_HEIGHT) as usize)
    }
}

/// What a hit did to a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Intermediate state reached (cracked / armed); points awarded
    Damaged { points: u32 },
    /// The tile must be destroyed
    Destroyed,
    /// Nothing changes (brick)
    Absorbed,
}

/// A tile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub kind: TileKind,
    pub cell: GridPos,
    pub rect: Rect,
    /// Cracked (Glass) or armed (Unstable)
    pub hit: bool,
    /// Optional color from the level record
    #[serde(default)]
    pub tint: Option<String>,
}

impl Tile {
    pub fn new(id: u32, kind: TileKind, cell: GridPos) -> Self {
        Self {
            id,
            kind,
            cell,
            rect: cell.rect(),
            hit: false,
            tint: None,
        }
    }

    /// Run the variant's hit state machine
    pub fn on_hit(&mut self) -> HitOutcome {
        match self.kind {
            TileKind::Regular | TileKind::Explosive => HitOutcome::Destroyed,
            TileKind::Brick => HitOutcome::Absorbed,
            TileKind::Glass | TileKind::Unstable => {
                if self.hit {
                    HitOutcome::Destroyed
                } else {
                    self.hit = true;
                    HitOutcome::Damaged {
                        points: TILE_POINTS,
                    }
                }
            }
        }
    }

    /// Cracked glass lets the ball through without deflection
    pub fn is_softened(&self) -> bool {
        self.kind == TileKind::Glass && self.hit
    }

    /// Must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.kind != TileKind::Brick
    }
}

/// Non-owning cell -> tile id index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    cells: Vec<Option<u32>>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            cells: vec![None; GRID_COLS * GRID_ROWS],
        }
    }
}

impl TileGrid {
    #[inline]
    fn index(pos: GridPos) -> usize {
        pos.row * GRID_COLS + pos.col
    }

    pub fn get(&self, pos: GridPos) -> Option<u32> {
        self.cells[Self::index(pos)]
    }

    /// Claim a cell; returns false if it was already taken
    pub fn insert(&mut self, pos: GridPos, id: u32) -> bool {
        let slot = &mut self.cells[Self::index(pos)];
        if slot.is_some() {
            return false;
        }
        *slot = Some(id);
        true
    }

    pub fn remove(&mut self, pos: GridPos) -> Option<u32> {
        self.cells[Self::index(pos)].take()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(kind: TileKind) -> Tile {
        Tile::new(1, kind, GridPos::new(0, 0).unwrap())
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(TileKind::from_alias("g"), Some(TileKind::Glass));
        assert_eq!(TileKind::from_alias("x"), None);
        assert_eq!(TileKind::Unstable.alias(), "u");
    }

    #[test]
    fn test_regular_single_hit() {
        assert_eq!(tile(TileKind::Regular).on_hit(), HitOutcome::Destroyed);
    }

    #[test]
    fn test_glass_two_stage() {
        let mut glass = tile(TileKind::Glass);
        assert!(!glass.is_softened());
        assert_eq!(glass.on_hit(), HitOutcome::Damaged { points: 5 });
        assert!(glass.is_softened());
        assert_eq!(glass.on_hit(), HitOutcome::Destroyed);
    }

    #[test]
    fn test_brick_absorbs_forever() {
        let mut brick = tile(TileKind::Brick);
        for _ in 0..10 {
            assert_eq!(brick.on_hit(), HitOutcome::Absorbed);
        }
        assert!(!brick.counts_for_clear());
    }

    #[test]
    fn test_unstable_arms_then_explodes() {
        let mut unstable = tile(TileKind::Unstable);
        assert_eq!(unstable.on_hit(), HitOutcome::Damaged { points: 5 });
        assert!(unstable.hit);
        assert!(!unstable.is_softened());
        assert_eq!(unstable.on_hit(), HitOutcome::Destroyed);
        assert!(unstable.kind.explodes());
        assert_eq!(unstable.kind.destroy_points(), 15);
    }

    #[test]
    fn test_explosive_first_hit() {
        assert_eq!(tile(TileKind::Explosive).on_hit(), HitOutcome::Destroyed);
    }

    #[test]
    fn test_blast_area_clips_at_corner() {
        let corner = GridPos::new(0, 0).unwrap();
        assert_eq!(corner.blast_area().count(), 4);
        let inner = GridPos::new(5, 5).unwrap();
        assert_eq!(inner.blast_area().count(), 9);
        let far = GridPos::new(GRID_COLS - 1, GRID_ROWS - 1).unwrap();
        assert_eq!(far.blast_area().count(), 4);
    }

    #[test]
    fn test_cell_geometry_round_trip() {
        let pos = GridPos::new(3, 7).unwrap();
        let rect = pos.rect();
        assert_eq!(rect.top_left(), IVec2::new(MARGIN + 180, 3 * MARGIN + 210));
        assert_eq!(GridPos::containing(rect.center()), Some(pos));
        assert_eq!(GridPos::containing(IVec2::new(0, 0)), None);
    }

    #[test]
    fn test_grid_rejects_double_occupancy() {
        let mut grid = TileGrid::default();
        let pos = GridPos::new(2, 2).unwrap();
        assert!(grid.insert(pos, 7));
        assert!(!grid.insert(pos, 8));
        assert_eq!(grid.get(pos), Some(7));
        assert_eq!(grid.remove(pos), Some(7));
        assert_eq!(grid.occupied(), 0);
    }
}
