//! Tournament aggregate, its status, and the errors its operations report.

use crate::models::game::{FormatConfig, Game, GameFormat, GameId, Round, MAX_GAMES_PER_FORMAT};
use crate::models::lenient;
use crate::models::player::{clamp_skill_rating, Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// Every operation that returns one of these has left the tournament unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Roster and formats are frozen once the tournament has started.
    AlreadyStarted,
    /// Rounds can only be generated for a running tournament.
    NotStarted,
    /// No format has a games count above zero.
    NoFormatConfigured,
    /// Fewer active players than the configured formats need.
    NotEnoughPlayers { required: usize, active: usize },
    /// Reset is refused once any round has been fully scored.
    RoundsCompleted,
    PlayerNotFound(PlayerId),
    GameNotFound(GameId),
    /// Player and tournament names must not be blank.
    EmptyName,
    /// Jersey numbers are unique within a roster.
    DuplicateNumber(u32),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::AlreadyStarted => write!(f, "Tournament has already started"),
            TournamentError::NotStarted => write!(f, "Tournament has not started"),
            TournamentError::NoFormatConfigured => {
                write!(f, "At least one format needs a games count above zero")
            }
            TournamentError::NotEnoughPlayers { required, active } => write!(
                f,
                "Need at least {} active players (currently {})",
                required, active
            ),
            TournamentError::RoundsCompleted => {
                write!(f, "Cannot reset a tournament with completed rounds")
            }
            TournamentError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            TournamentError::GameNotFound(id) => write!(f, "Game {} not found", id),
            TournamentError::EmptyName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateNumber(number) => {
                write!(f, "Number {} is already taken", number)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle phase of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Roster and formats editable; no rounds yet.
    #[default]
    Draft,
    /// Rounds being played.
    #[serde(alias = "running")]
    Active,
    /// Ended and archived in history.
    Completed,
}

/// Full tournament state: roster, format setup, and every round generated so far.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tournament {
    #[serde(deserialize_with = "lenient::id")]
    pub id: TournamentId,
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "lenient::value")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::value")]
    pub status: TournamentStatus,
    #[serde(deserialize_with = "lenient::records")]
    pub players: Vec<Player>,
    #[serde(deserialize_with = "lenient::records")]
    pub format_configs: Vec<FormatConfig>,
    /// Ordered by round number; append-only while running.
    #[serde(deserialize_with = "lenient::records")]
    pub rounds: Vec<Round>,
    /// Number of the latest round (equals `rounds.len()`).
    #[serde(deserialize_with = "lenient::value")]
    pub current_round: u32,
    #[serde(deserialize_with = "lenient::value")]
    pub started: bool,
    /// Use rating-bucketed pairing instead of a plain shuffle.
    #[serde(deserialize_with = "lenient::flag_on")]
    pub fair_roll: bool,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}

impl Tournament {
    /// Create a draft tournament with no players and the default formats.
    pub fn new() -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: Self::default_name(created_at),
            created_at,
            ended_at: None,
            status: TournamentStatus::Draft,
            players: Vec::new(),
            format_configs: FormatConfig::defaults(),
            rounds: Vec::new(),
            current_round: 0,
            started: false,
            fair_roll: true,
        }
    }

    /// Create a draft tournament with an initial roster.
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players,
            ..Self::new()
        }
    }

    pub fn default_name(created_at: DateTime<Utc>) -> String {
        format!("Turnier {}", created_at.format("%d.%m.%Y"))
    }

    /// Re-establish invariants on data loaded from older saves: fixed team sizes,
    /// clamped counts and ratings, every format present once, rounds numbered from 1,
    /// `current_round` in step, and a started save without a status marked active.
    pub fn normalize(&mut self) {
        let mut configs = Vec::with_capacity(GameFormat::ALL.len());
        for format in GameFormat::ALL {
            let games_count = self
                .format_configs
                .iter()
                .find(|c| c.format == format)
                .map_or_else(
                    || {
                        FormatConfig::defaults()
                            .into_iter()
                            .find(|c| c.format == format)
                            .map_or(0, |c| c.games_count)
                    },
                    |c| c.games_count,
                );
            configs.push(FormatConfig::new(format, games_count));
        }
        self.format_configs = configs;
        for p in &mut self.players {
            p.skill_rating = clamp_skill_rating(p.skill_rating);
        }
        for (round_number, round) in (1u32..).zip(&mut self.rounds) {
            round.round_number = round_number;
            for game in &mut round.games {
                game.round = round_number;
            }
        }
        self.current_round = self.rounds.len() as u32;
        if self.started && self.status == TournamentStatus::Draft {
            self.status = TournamentStatus::Active;
        }
        if self.name.trim().is_empty() {
            self.name = Self::default_name(self.created_at);
        }
    }

    pub fn find_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Active players in roster order.
    pub fn active_players(&self) -> Vec<Player> {
        self.players.iter().filter(|p| p.active).cloned().collect()
    }

    /// Formats that have at least one game configured, in configured order.
    pub fn qualifying_formats(&self) -> Vec<FormatConfig> {
        self.format_configs
            .iter()
            .filter(|c| c.games_count > 0)
            .copied()
            .collect()
    }

    pub fn format_config(&self, format: GameFormat) -> Option<&FormatConfig> {
        self.format_configs.iter().find(|c| c.format == format)
    }

    fn ensure_not_started(&self) -> Result<(), TournamentError> {
        if self.started {
            return Err(TournamentError::AlreadyStarted);
        }
        Ok(())
    }

    /// Add an active player (draft only). Returns the new player's id.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        number: u32,
        skill_rating: u8,
    ) -> Result<PlayerId, TournamentError> {
        self.ensure_not_started()?;
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.players.iter().any(|p| p.number == number) {
            return Err(TournamentError::DuplicateNumber(number));
        }
        let player = Player::new(name, number, skill_rating);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id (draft only).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        self.ensure_not_started()?;
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Flip whether a player takes part in round generation (draft only).
    pub fn toggle_active(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        self.ensure_not_started()?;
        let p = self
            .get_player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.active = !p.active;
        Ok(())
    }

    /// Set a player's skill rating, clamped to `1..=5` (draft only).
    pub fn update_skill_rating(
        &mut self,
        player_id: PlayerId,
        rating: u8,
    ) -> Result<(), TournamentError> {
        self.ensure_not_started()?;
        let p = self
            .get_player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.skill_rating = clamp_skill_rating(rating);
        Ok(())
    }

    /// Rename a player (draft only). Names are trimmed and must not be blank.
    pub fn rename_player(
        &mut self,
        player_id: PlayerId,
        name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        self.ensure_not_started()?;
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        let p = self
            .get_player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.name = name.to_string();
        Ok(())
    }

    /// Change how many games of `format` each round has, clamped to `0..=10` (draft only).
    pub fn update_format_config(
        &mut self,
        format: GameFormat,
        games_count: u8,
    ) -> Result<(), TournamentError> {
        self.ensure_not_started()?;
        match self.format_configs.iter_mut().find(|c| c.format == format) {
            Some(config) => config.games_count = games_count.min(MAX_GAMES_PER_FORMAT),
            None => self.format_configs.push(FormatConfig::new(format, games_count)),
        }
        Ok(())
    }

    /// Switch between fair (rating-bucketed) and plain random pairing. Applies to the next round.
    pub fn set_fair_roll(&mut self, fair_roll: bool) {
        self.fair_roll = fair_roll;
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        self.name = name.to_string();
        Ok(())
    }

    /// The latest round, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// True when the latest round exists and every game in it is scored.
    pub fn current_round_completed(&self) -> bool {
        self.current_round().is_some_and(Round::is_completed)
    }

    /// True when any game has at least one score entered.
    pub fn has_games_in_progress(&self) -> bool {
        self.rounds
            .iter()
            .flat_map(|r| &r.games)
            .any(|g| g.score_a.is_some() || g.score_b.is_some())
    }

    pub fn has_completed_rounds(&self) -> bool {
        self.rounds.iter().any(Round::is_completed)
    }

    pub fn find_game(&self, game_id: GameId) -> Option<&Game> {
        self.rounds
            .iter()
            .flat_map(|r| &r.games)
            .find(|g| g.id == game_id)
    }

    pub fn find_game_mut(&mut self, game_id: GameId) -> Option<&mut Game> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.games.iter_mut())
            .find(|g| g.id == game_id)
    }

    /// Zero points and games counters of every player.
    pub fn reset_player_stats(&mut self) {
        for p in &mut self.players {
            p.reset_stats();
        }
    }
}
