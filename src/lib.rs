//! Football tournament organizer: library with models, round/scoring logic and persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    build_round, check_can_start, end_tournament, export_standings_csv, format_min_players,
    generate_games, generate_next_round, historical_stats, leaderboard, points_for,
    recalculate_stats, required_players, reset_tournament, start_tournament, update_game_score,
    Standing,
};
pub use models::{
    FormatConfig, Game, GameFormat, GameId, GamesPlayed, HistoricalPlayerStats, Player, PlayerId,
    PlayerSnapshot, Round, Tournament, TournamentError, TournamentHistory, TournamentId,
    TournamentStatus,
};
