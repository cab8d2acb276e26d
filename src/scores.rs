use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ScoreSettings;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Scores sorted from best to worst, at most `capacity` of them.
///
/// Equal scores keep the order they were added in. When the board has a
/// path, every change is written back immediately.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl ScoreBoard {
    pub fn in_memory() -> Self {
        ScoreBoard {
            entries: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            path: None,
        }
    }

    /// Loads the board stored at `path`. A missing or unreadable file gives
    /// an empty board that will be written on the next change.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let entries = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Vec<ScoreEntry>>(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "score file is corrupt, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no score file yet");
                Vec::new()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read score file, starting empty");
                Vec::new()
            }
        };
        let mut board = ScoreBoard {
            entries,
            capacity: DEFAULT_CAPACITY,
            path: Some(path.to_path_buf()),
        };
        board.normalize();
        board
    }

    pub fn from_settings(settings: &ScoreSettings) -> Self {
        ScoreBoard::open(&settings.path).with_capacity(settings.capacity)
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self.normalize();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn add_score(&mut self, name: &str, score: u64) -> Result<()> {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
        self.normalize();
        debug!(name, score, size = self.entries.len(), "recorded score");
        self.save()
    }

    pub fn top(&self, limit: usize) -> &[ScoreEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn player_best(&self, name: &str) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.name == name)
            .map(|entry| entry.score)
            .max()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    /// Writes to a sibling temp file first, then renames over the target.
    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    // sort_by is stable, so ties stay in insertion order
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        ScoreBoard::in_memory()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
