//! Round generation: start the tournament and produce each following round.

use crate::logic::pairing::generate_games;
use crate::models::{Game, Round, Tournament, TournamentError, TournamentStatus};
use rand::Rng;

/// Start the tournament and generate round 1.
///
/// Requires a draft tournament with at least one format configured. The minimum-player
/// check is the caller's (see [`crate::logic::check_can_start`]); formats that cannot
/// fill even one game are skipped here.
pub fn start_tournament<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.started {
        return Err(TournamentError::AlreadyStarted);
    }
    let round = build_round(tournament, 1, rng)?;
    log::info!(
        "Tournament '{}' started with {} games in round 1",
        tournament.name,
        round.games.len()
    );
    tournament.rounds = vec![round];
    tournament.current_round = 1;
    tournament.started = true;
    tournament.status = TournamentStatus::Active;
    Ok(())
}

/// Append the next round to a running tournament.
pub fn generate_next_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if !tournament.started {
        return Err(TournamentError::NotStarted);
    }
    let round_number = tournament.rounds.len() as u32 + 1;
    let round = build_round(tournament, round_number, rng)?;
    log::info!(
        "Generated round {} with {} games",
        round_number,
        round.games.len()
    );
    tournament.rounds.push(round);
    tournament.current_round = round_number;
    Ok(())
}

/// Build one round from the tournament's active players without modifying it.
///
/// Formats are processed in configured order. Each takes the first
/// `players_per_team * 2 * games_count` still-available players; starters placed by
/// one format are unavailable to the formats after it. A format with fewer than one
/// game's worth of players left is skipped for this round.
pub fn build_round<R: Rng + ?Sized>(
    tournament: &Tournament,
    round_number: u32,
    rng: &mut R,
) -> Result<Round, TournamentError> {
    let formats = tournament.qualifying_formats();
    if formats.is_empty() {
        return Err(TournamentError::NoFormatConfigured);
    }

    let mut available = tournament.active_players();
    let mut games: Vec<Game> = Vec::new();

    for config in formats {
        let per_game = config.players_per_team * 2;
        if available.len() < per_game {
            log::debug!(
                "Skipping {} in round {}: {} players left, {} needed per game",
                config.format,
                round_number,
                available.len(),
                per_game
            );
            continue;
        }
        let take = config.players_needed().min(available.len());
        let mut format_games = generate_games(
            &available[..take],
            config.players_per_team,
            usize::from(config.games_count),
            config.format,
            tournament.fair_roll,
            rng,
        );

        let mut used = Vec::new();
        for game in &mut format_games {
            game.round = round_number;
            used.extend(game.starters());
        }
        available.retain(|p| !used.contains(&p.id));
        games.append(&mut format_games);
    }

    Ok(Round::new(round_number, games))
}
