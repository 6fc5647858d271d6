//! Score recording and the full rebuild of player stats from completed rounds.

use crate::models::{GameFormat, GameId, Player, PlayerId, Tournament, TournamentError};

/// Bonus per player on the winning side.
pub const WIN_BONUS: u32 = 5;
/// Bonus per player on either side of a draw.
pub const DRAW_BONUS: u32 = 2;

/// Points one player earns from a game: their side's goals plus the result bonus.
pub fn points_for(own_score: u32, other_score: u32) -> u32 {
    let bonus = match own_score.cmp(&other_score) {
        std::cmp::Ordering::Greater => WIN_BONUS,
        std::cmp::Ordering::Equal => DRAW_BONUS,
        std::cmp::Ordering::Less => 0,
    };
    own_score + bonus
}

/// Set (or correct) both scores of a game and rebuild every player's stats.
pub fn update_game_score(
    tournament: &mut Tournament,
    game_id: GameId,
    score_a: u32,
    score_b: u32,
) -> Result<(), TournamentError> {
    let game = tournament
        .find_game_mut(game_id)
        .ok_or(TournamentError::GameNotFound(game_id))?;
    game.score_a = Some(score_a);
    game.score_b = Some(score_b);
    log::info!(
        "Round {} {} game scored {}:{}",
        game.round,
        game.format,
        score_a,
        score_b
    );
    recalculate_stats(tournament);
    Ok(())
}

/// Rebuild `points` and `games_played` of every player from scratch.
///
/// Only completed rounds count, and within them every game (all are scored). Starters
/// and substitutes of a side earn the same. Running it twice gives the same result.
pub fn recalculate_stats(tournament: &mut Tournament) {
    let Tournament { players, rounds, .. } = tournament;

    for p in players.iter_mut() {
        p.reset_stats();
    }

    for round in rounds.iter().filter(|r| r.is_completed()) {
        for game in &round.games {
            let Some((score_a, score_b)) = game.score() else {
                continue;
            };
            let award_a = points_for(score_a, score_b);
            let award_b = points_for(score_b, score_a);
            for pid in game.side_a() {
                credit(players, pid, award_a, game.format);
            }
            for pid in game.side_b() {
                credit(players, pid, award_b, game.format);
            }
        }
    }
    log::debug!("Recalculated stats for {} players", players.len());
}

/// Players removed from the roster since pairing are skipped.
fn credit(players: &mut [Player], player_id: PlayerId, points: u32, format: GameFormat) {
    if let Some(p) = players.iter_mut().find(|p| p.id == player_id) {
        p.points += points;
        p.games_played.record(format);
    }
}
