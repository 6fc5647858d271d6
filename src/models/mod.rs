//! Data structures for the football tournament: players, games, rounds, tournament, history.

mod game;
mod history;
mod lenient;
mod player;
mod tournament;

pub use game::{FormatConfig, Game, GameFormat, GameId, Round, MAX_GAMES_PER_FORMAT};
pub use history::{HistoricalPlayerStats, TournamentHistory};
pub use lenient::stable_id;
pub use player::{
    clamp_skill_rating, GamesPlayed, Player, PlayerId, PlayerSnapshot, DEFAULT_SKILL_RATING,
    MAX_SKILL_RATING, MIN_SKILL_RATING,
};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentStatus};
