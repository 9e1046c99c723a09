//! Plain-text level definitions
//!
//! One tile per line: `alias col row [tint ...]`. Blank lines and lines
//! starting with `#` are ignored.
//!
//! ```text
//! # a row of glass over a brick floor
//! g 0 0 cyan
//! g 1 0 cyan
//! b 0 5
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::LevelSource;
use crate::consts::{GRID_COLS, GRID_ROWS};
use crate::error::LevelError;
use crate::sim::tile::{GridPos, TileKind};

/// One tile placement from a level file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// 1-based source line, for error messages
    pub line: usize,
    pub kind: TileKind,
    pub cell: GridPos,
    pub tint: Option<String>,
}

/// A parsed level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelDef {
    pub number: u32,
    pub tiles: Vec<TileRecord>,
}

/// Parse a level file's text.
///
/// Lines with missing fields or non-numeric coordinates are skipped with a
/// warning. An unknown alias, an off-grid cell or a cell used twice fails
/// the whole level.
pub fn parse_level(number: u32, text: &str) -> Result<LevelDef, LevelError> {
    let mut tiles = Vec::new();
    let mut used = BTreeSet::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < 3 {
            log::warn!("level {number} line {line}: expected `alias col row`, skipping");
            continue;
        }
        let (Ok(col), Ok(row)) = (fields[1].parse::<i64>(), fields[2].parse::<i64>()) else {
            log::warn!("level {number} line {line}: bad coordinates, skipping");
            continue;
        };

        let kind = TileKind::from_alias(fields[0]).ok_or_else(|| LevelError::UnknownAlias {
            line,
            alias: fields[0].to_string(),
        })?;

        let in_grid = (0..GRID_COLS as i64).contains(&col) && (0..GRID_ROWS as i64).contains(&row);
        let cell = in_grid
            .then(|| GridPos::new(col as usize, row as usize))
            .flatten()
            .ok_or(LevelError::OutOfGrid { line, col, row })?;

        if !used.insert(cell) {
            return Err(LevelError::DuplicateCell {
                line,
                col: cell.col,
                row: cell.row,
            });
        }

        tiles.push(TileRecord {
            line,
            kind,
            cell,
            tint: fields.get(3).map(|s| s.to_string()),
        });
    }

    Ok(LevelDef { number, tiles })
}

/// Levels stored as `<dir>/<n>.lvl`
#[derive(Debug, Clone)]
pub struct LevelDir {
    root: PathBuf,
}

impl LevelDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, number: u32) -> PathBuf {
        self.root.join(format!("{number}.lvl"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LevelSource for LevelDir {
    fn load(&self, number: u32) -> Result<Option<LevelDef>, LevelError> {
        let path = self.path_for(number);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no level file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        parse_level(number, &text).map(Some)
    }
}

/// Levels held in memory, keyed by number
#[derive(Debug, Clone, Default)]
pub struct StaticLevels {
    levels: BTreeMap<u32, String>,
}

impl StaticLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, number: u32, text: impl Into<String>) -> Self {
        self.levels.insert(number, text.into());
        self
    }
}

impl LevelSource for StaticLevels {
    fn load(&self, number: u32) -> Result<Option<LevelDef>, LevelError> {
        self.levels
            .get(&number)
            .map(|text| parse_level(number, text))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_and_tint() {
        let def = parse_level(1, "# header\n\nr 0 0\ng 15 15 cyan extra\n").unwrap();
        assert_eq!(def.tiles.len(), 2);
        assert_eq!(def.tiles[0].kind, TileKind::Regular);
        assert_eq!(def.tiles[0].line, 3);
        assert_eq!(def.tiles[1].cell, GridPos::new(15, 15).unwrap());
        assert_eq!(def.tiles[1].tint.as_deref(), Some("cyan"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let def = parse_level(1, "r 1\nr x 2\nb 3 4\n").unwrap();
        assert_eq!(def.tiles.len(), 1);
        assert_eq!(def.tiles[0].kind, TileKind::Brick);
    }

    #[test]
    fn test_unknown_alias_is_fatal() {
        let err = parse_level(1, "r 0 0\nz 1 1\n").unwrap_err();
        assert!(matches!(err, LevelError::UnknownAlias { line: 2, ref alias } if alias == "z"));
    }

    #[test]
    fn test_out_of_grid_is_fatal() {
        let err = parse_level(1, "r 16 0\n").unwrap_err();
        assert!(matches!(err, LevelError::OutOfGrid { line: 1, col: 16, row: 0 }));
        let err = parse_level(1, "r -1 3\n").unwrap_err();
        assert!(matches!(err, LevelError::OutOfGrid { col: -1, .. }));
    }

    #[test]
    fn test_duplicate_cell_is_fatal() {
        let err = parse_level(1, "r 2 2\nu 2 2\n").unwrap_err();
        assert!(matches!(err, LevelError::DuplicateCell { line: 2, col: 2, row: 2 }));
    }

    #[test]
    fn test_static_levels() {
        let levels = StaticLevels::new().with(1, "e 4 4");
        assert_eq!(levels.load(1).unwrap().unwrap().tiles.len(), 1);
        assert!(levels.load(2).unwrap().is_none());
    }

    #[test]
    fn test_missing_level_file_is_none() {
        let dir = LevelDir::new(std::env::temp_dir().join("ballz-no-such-dir"));
        assert!(dir.load(1).unwrap().is_none());
        assert!(dir.path_for(3).ends_with("3.lvl"));
    }
}
