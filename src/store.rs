//! JSON file persistence for the live tournament and the history archive.
//!
//! Both aggregates are stored as separate files. Loading never fails: a missing
//! file yields the default, a file that is not JSON at all is logged and replaced by
//! the default. Inside a readable file, malformed fields fall back to their defaults
//! and unreadable list entries are dropped, each with a warning.

use crate::logic::recalculate_stats;
use crate::models::{Tournament, TournamentHistory, TournamentStatus};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TOURNAMENT_FILE: &str = "tournament.json";
const HISTORY_FILE: &str = "history.json";

/// Directory-backed store.
#[derive(Clone, Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store in `dir`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_tournament(&self, tournament: &Tournament) -> io::Result<()> {
        self.save(TOURNAMENT_FILE, tournament)
    }

    pub fn save_history(&self, history: &TournamentHistory) -> io::Result<()> {
        self.save(HISTORY_FILE, history)
    }

    /// Load the live tournament, migrating older records. Stats are rebuilt from the rounds.
    pub fn load_tournament(&self) -> Tournament {
        let mut tournament: Tournament = self.load_or_default(TOURNAMENT_FILE);
        tournament.normalize();
        recalculate_stats(&mut tournament);
        tournament
    }

    /// Load the archive, migrating every archived tournament. Archived stats are kept as saved.
    pub fn load_history(&self) -> TournamentHistory {
        let mut history: TournamentHistory = self.load_or_default(HISTORY_FILE);
        for t in &mut history.tournaments {
            t.normalize();
            t.status = TournamentStatus::Completed;
        }
        history
    }

    fn save<T: Serialize>(&self, file: &str, data: &T) -> io::Result<()> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(data)?;
        // Replace atomically: readers see the old file or the new one.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> T {
        let path = self.dir.join(file);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return T::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(data) => {
                log::info!("Loaded {}", path.display());
                data
            }
            Err(e) => {
                log::warn!("Discarding unreadable {}: {}", path.display(), e);
                T::default()
            }
        }
    }
}
