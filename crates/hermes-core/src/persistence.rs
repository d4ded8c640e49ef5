//! Save/Load for the game state snapshot.
//!
//! Bincode over any reader/writer, with a version byte checked on load.
//! Only the [`GameState`] snapshot is persisted; travel sessions are
//! ephemeral and the engine re-arms countdown and scene from the saved
//! destination and ETA.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::store::GameState;

/// Version number for the save format (increment when the format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable envelope around a snapshot.
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// When the save was written
    pub saved_at: DateTime<Utc>,
    /// The complete snapshot
    pub state: GameState,
}

/// Write a snapshot to a writer.
pub fn save_game<W: Write>(
    writer: W,
    state: &GameState,
    now: DateTime<Utc>,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        saved_at: now,
        state: state.clone(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Read a snapshot back from a reader.
pub fn load_game<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(LoadedGame {
        state: save_data.state,
        saved_at: save_data.saved_at,
    })
}

/// Result of loading a save.
pub struct LoadedGame {
    pub state: GameState,
    pub saved_at: DateTime<Utc>,
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
