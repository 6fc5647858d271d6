//! Tournament business logic: pairing, round generation, scoring, lifecycle, standings.

mod lifecycle;
mod pairing;
mod rounds;
mod scoring;
mod standings;

pub use lifecycle::{end_tournament, reset_tournament};
pub use pairing::{generate_games, order_pool};
pub use rounds::{build_round, generate_next_round, start_tournament};
pub use scoring::{points_for, recalculate_stats, update_game_score, DRAW_BONUS, WIN_BONUS};
pub use standings::{
    check_can_start, export_standings_csv, format_min_players, historical_stats, leaderboard,
    required_players, Standing,
};
