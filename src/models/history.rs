//! Archive of ended tournaments and the cross-tournament player view.

use crate::models::lenient;
use crate::models::player::{GamesPlayed, PlayerId};
use crate::models::tournament::Tournament;
use serde::{Deserialize, Serialize};

/// Ended tournaments, oldest first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentHistory {
    #[serde(deserialize_with = "lenient::records")]
    pub tournaments: Vec<Tournament>,
}

impl TournamentHistory {
    pub fn archive(&mut self, tournament: Tournament) {
        self.tournaments.push(tournament);
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }
}

/// A player's totals over the live tournament and every archived one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPlayerStats {
    pub player_id: PlayerId,
    pub player_name: String,
    pub player_number: u32,
    pub skill_rating: u8,
    pub total_points: u32,
    pub total_games: u32,
    pub games_played_by_format: GamesPlayed,
    pub tournaments_participated: u32,
    pub average_points_per_game: f64,
    pub average_points_per_tournament: f64,
}
