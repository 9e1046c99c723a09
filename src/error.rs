//! Error types for level loading, persistence and the game loop

use std::fmt;

/// Errors raised while reading a level definition.
#[derive(Debug)]
pub enum LevelError {
    /// A record names a tile alias that is not registered.
    UnknownAlias { line: usize, alias: String },
    /// A record places a tile outside the 16x16 grid.
    OutOfGrid { line: usize, col: i64, row: i64 },
    /// Two records target the same grid cell.
    DuplicateCell { line: usize, col: usize, row: usize },
    /// Standard I/O error.
    Io(std::io::Error),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::UnknownAlias { line, alias } => {
                write!(f, "line {line}: invalid tile type: {alias}")
            }
            LevelError::OutOfGrid { line, col, row } => {
                write!(f, "line {line}: cell ({col}, {row}) is outside the grid")
            }
            LevelError::DuplicateCell { line, col, row } => {
                write!(f, "line {line}: cell ({col}, {row}) is already occupied")
            }
            LevelError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::Io(e)
    }
}

/// Errors raised by ranking and settings storage.
#[derive(Debug)]
pub enum PersistenceError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "IO error: {e}"),
            PersistenceError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Json(e)
    }
}

/// Errors that stop the game loop.
#[derive(Debug)]
pub enum GameError {
    /// A level definition could not be loaded.
    Level { number: u32, source: LevelError },
    /// The configured start level does not exist.
    NoLevel(u32),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Level { number, source } => write!(f, "level {number}: {source}"),
            GameError::NoLevel(number) => write!(f, "level {number} does not exist"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Level { source, .. } => Some(source),
            GameError::NoLevel(_) => None,
        }
    }
}
