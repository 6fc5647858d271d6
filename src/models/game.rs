//! Game formats, games, and rounds.

use crate::models::lenient;
use crate::models::player::{PlayerId, PlayerSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

pub const MAX_GAMES_PER_FORMAT: u8 = 10;

/// Supported game shapes. The "+1" in `4+1vs4+1` is part of the name only:
/// the format fields five players per team like any other.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum GameFormat {
    #[serde(rename = "2vs2")]
    TwoVsTwo,
    #[serde(rename = "3vs3")]
    ThreeVsThree,
    #[serde(rename = "4+1vs4+1")]
    FourPlusOne,
}

impl GameFormat {
    pub const ALL: [GameFormat; 3] = [
        GameFormat::TwoVsTwo,
        GameFormat::ThreeVsThree,
        GameFormat::FourPlusOne,
    ];

    /// Fixed team size for this format.
    pub fn players_per_team(self) -> usize {
        match self {
            GameFormat::TwoVsTwo => 2,
            GameFormat::ThreeVsThree => 3,
            GameFormat::FourPlusOne => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameFormat::TwoVsTwo => "2vs2",
            GameFormat::ThreeVsThree => "3vs3",
            GameFormat::FourPlusOne => "4+1vs4+1",
        }
    }
}

impl std::fmt::Display for GameFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How many games of a format each round contains.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatConfig {
    pub format: GameFormat,
    #[serde(default, deserialize_with = "lenient::value")]
    pub games_count: u8,
    #[serde(default, deserialize_with = "lenient::value")]
    pub players_per_team: usize,
}

impl FormatConfig {
    pub fn new(format: GameFormat, games_count: u8) -> Self {
        Self {
            format,
            games_count: games_count.min(MAX_GAMES_PER_FORMAT),
            players_per_team: format.players_per_team(),
        }
    }

    /// Default setup: two 2vs2, two 3vs3, one 4+1vs4+1 per round.
    pub fn defaults() -> Vec<FormatConfig> {
        vec![
            FormatConfig::new(GameFormat::TwoVsTwo, 2),
            FormatConfig::new(GameFormat::ThreeVsThree, 2),
            FormatConfig::new(GameFormat::FourPlusOne, 1),
        ]
    }

    /// Players needed to fill every game of this format.
    pub fn players_needed(&self) -> usize {
        self.players_per_team * 2 * usize::from(self.games_count)
    }
}

/// A single game: two teams with optional substitutes, and the score once played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default = "Uuid::new_v4", deserialize_with = "lenient::id")]
    pub id: GameId,
    /// Round this game belongs to (0 until stamped by round generation).
    #[serde(default, deserialize_with = "lenient::value")]
    pub round: u32,
    pub format: GameFormat,
    #[serde(default, deserialize_with = "lenient::records")]
    pub team_a: Vec<PlayerSnapshot>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub team_b: Vec<PlayerSnapshot>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub substitutes_a: Vec<PlayerSnapshot>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub substitutes_b: Vec<PlayerSnapshot>,
    /// None if not yet played.
    #[serde(default, deserialize_with = "lenient::value")]
    pub score_a: Option<u32>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub score_b: Option<u32>,
}

impl Game {
    pub fn new(
        format: GameFormat,
        team_a: Vec<PlayerSnapshot>,
        team_b: Vec<PlayerSnapshot>,
        substitutes_a: Vec<PlayerSnapshot>,
        substitutes_b: Vec<PlayerSnapshot>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round: 0,
            format,
            team_a,
            team_b,
            substitutes_a,
            substitutes_b,
            score_a: None,
            score_b: None,
        }
    }

    /// Both scores, if the game has been played.
    pub fn score(&self) -> Option<(u32, u32)> {
        self.score_a.zip(self.score_b)
    }

    pub fn is_completed(&self) -> bool {
        self.score().is_some()
    }

    /// Starters and substitutes of side A.
    pub fn side_a(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_a.iter().chain(&self.substitutes_a).map(|p| p.id)
    }

    /// Starters and substitutes of side B.
    pub fn side_b(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_b.iter().chain(&self.substitutes_b).map(|p| p.id)
    }

    /// Starters of both teams (substitutes excluded).
    pub fn starters(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_a.iter().chain(&self.team_b).map(|p| p.id)
    }

    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.side_a().chain(self.side_b()).any(|id| id == player_id)
    }
}

/// One generation pass: the games of every configured format, played together.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 1-based.
    #[serde(default, deserialize_with = "lenient::value")]
    pub round_number: u32,
    #[serde(default, deserialize_with = "lenient::records")]
    pub games: Vec<Game>,
}

impl Round {
    pub fn new(round_number: u32, games: Vec<Game>) -> Self {
        Self { round_number, games }
    }

    /// A round counts towards stats only once it has games and every one of them is scored.
    pub fn is_completed(&self) -> bool {
        !self.games.is_empty() && self.games.iter().all(Game::is_completed)
    }

    pub fn completed_games(&self) -> usize {
        self.games.iter().filter(|g| g.is_completed()).count()
    }
}
