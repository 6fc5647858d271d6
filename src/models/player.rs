//! Player, per-format games counters, and the snapshot embedded in games.

use crate::models::game::GameFormat;
use crate::models::lenient;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in games and lookups).
pub type PlayerId = Uuid;

pub const MIN_SKILL_RATING: u8 = 1;
pub const MAX_SKILL_RATING: u8 = 5;
pub const DEFAULT_SKILL_RATING: u8 = 3;

/// Clamp a requested skill rating into `1..=5`.
pub fn clamp_skill_rating(rating: u8) -> u8 {
    rating.clamp(MIN_SKILL_RATING, MAX_SKILL_RATING)
}

/// Completed games per format plus the overall total.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesPlayed {
    #[serde(rename = "2vs2", deserialize_with = "lenient::value")]
    pub two_vs_two: u32,
    #[serde(rename = "3vs3", deserialize_with = "lenient::value")]
    pub three_vs_three: u32,
    #[serde(rename = "4+1vs4+1", deserialize_with = "lenient::value")]
    pub four_plus_one: u32,
    #[serde(deserialize_with = "lenient::value")]
    pub total: u32,
}

impl GamesPlayed {
    pub fn get(&self, format: GameFormat) -> u32 {
        match format {
            GameFormat::TwoVsTwo => self.two_vs_two,
            GameFormat::ThreeVsThree => self.three_vs_three,
            GameFormat::FourPlusOne => self.four_plus_one,
        }
    }

    /// Count one more completed game in `format` (and in the total).
    pub fn record(&mut self, format: GameFormat) {
        match format {
            GameFormat::TwoVsTwo => self.two_vs_two += 1,
            GameFormat::ThreeVsThree => self.three_vs_three += 1,
            GameFormat::FourPlusOne => self.four_plus_one += 1,
        }
        self.total += 1;
    }

    /// Add another counter set onto this one (cross-tournament totals).
    pub fn merge(&mut self, other: &GamesPlayed) {
        self.two_vs_two += other.two_vs_two;
        self.three_vs_three += other.three_vs_three;
        self.four_plus_one += other.four_plus_one;
        self.total += other.total;
    }
}

/// A player on the roster.
///
/// `points` and `games_played` are derived: they are rebuilt from completed rounds
/// by [`crate::logic::recalculate_stats`] and never edited by hand.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    #[serde(deserialize_with = "lenient::id")]
    pub id: PlayerId,
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    /// Jersey number.
    #[serde(deserialize_with = "lenient::value")]
    pub number: u32,
    #[serde(deserialize_with = "lenient::skill_rating")]
    pub skill_rating: u8,
    /// Only active players are considered when generating a round.
    #[serde(deserialize_with = "lenient::flag_on")]
    pub active: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub points: u32,
    #[serde(deserialize_with = "lenient::value")]
    pub games_played: GamesPlayed,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            number: 0,
            skill_rating: DEFAULT_SKILL_RATING,
            active: true,
            points: 0,
            games_played: GamesPlayed::default(),
        }
    }
}

impl Player {
    /// Create an active player with zeroed stats. The skill rating is clamped to `1..=5`.
    pub fn new(name: impl Into<String>, number: u32, skill_rating: u8) -> Self {
        Self {
            name: name.into(),
            number,
            skill_rating: clamp_skill_rating(skill_rating),
            ..Self::default()
        }
    }

    /// Fairness ordering key: current points plus twice the skill rating.
    pub fn combined_rating(&self) -> u32 {
        self.points + u32::from(self.skill_rating) * 2
    }

    /// Zero the derived stats.
    pub fn reset_stats(&mut self) {
        self.points = 0;
        self.games_played = GamesPlayed::default();
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            name: self.name.clone(),
            number: self.number,
        }
    }
}

/// Display copy of a player as it was when a game was paired.
///
/// Games hold snapshots for display only; stats are always computed against the
/// roster's canonical [`Player`] records, matched by id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(deserialize_with = "lenient::id")]
    pub id: PlayerId,
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub number: u32,
}
