//! Standings: start requirements, leaderboard ranks, and cross-tournament stats.

use crate::models::{
    GameFormat, GamesPlayed, HistoricalPlayerStats, Player, PlayerId, Tournament,
    TournamentError, TournamentHistory,
};
use serde::Serialize;
use std::collections::HashMap;

/// Players needed to fill every game of `format` as currently configured (0 if unknown).
pub fn format_min_players(tournament: &Tournament, format: GameFormat) -> usize {
    tournament
        .format_config(format)
        .map_or(0, |c| c.players_needed())
}

/// Active players needed to start: the largest single-format requirement.
pub fn required_players(tournament: &Tournament) -> usize {
    tournament
        .qualifying_formats()
        .iter()
        .map(|c| c.players_needed())
        .max()
        .unwrap_or(0)
}

/// The collaborator's start check: draft, some format configured, enough active players.
pub fn check_can_start(tournament: &Tournament) -> Result<(), TournamentError> {
    if tournament.started {
        return Err(TournamentError::AlreadyStarted);
    }
    if tournament.qualifying_formats().is_empty() {
        return Err(TournamentError::NoFormatConfigured);
    }
    let required = required_players(tournament);
    let active = tournament.players.iter().filter(|p| p.active).count();
    if active < required {
        return Err(TournamentError::NotEnoughPlayers { required, active });
    }
    Ok(())
}

/// Standard competition ranks for values already sorted descending: ties share a rank,
/// the next distinct value skips ahead (1, 2, 2, 4).
fn competition_ranks(sorted: &[u32]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted.len());
    for (i, value) in sorted.iter().enumerate() {
        let rank = if i > 0 && sorted[i - 1] == *value {
            ranks[i - 1]
        } else {
            i as u32 + 1
        };
        ranks.push(rank);
    }
    ranks
}

/// One leaderboard line.
#[derive(Debug, Serialize)]
pub struct Standing<'a> {
    pub rank: u32,
    pub player: &'a Player,
}

/// Players by points (highest first, ties by jersey number) with competition ranks.
pub fn leaderboard(players: &[Player]) -> Vec<Standing<'_>> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points).then(a.number.cmp(&b.number)));
    let points: Vec<u32> = sorted.iter().map(|p| p.points).collect();
    competition_ranks(&points)
        .into_iter()
        .zip(sorted)
        .map(|(rank, player)| Standing { rank, player })
        .collect()
}

/// Merge the live tournament with every archived one, per player id.
///
/// Name, number and skill come from the most recent tournament the player appears in.
/// The result is ordered by total points (highest first), ties by jersey number.
pub fn historical_stats(
    current: &Tournament,
    history: &TournamentHistory,
) -> Vec<HistoricalPlayerStats> {
    let mut by_id: HashMap<PlayerId, HistoricalPlayerStats> = HashMap::new();

    for tournament in history.tournaments.iter().chain(std::iter::once(current)) {
        for p in &tournament.players {
            let entry = by_id.entry(p.id).or_insert_with(|| HistoricalPlayerStats {
                player_id: p.id,
                player_name: String::new(),
                player_number: 0,
                skill_rating: p.skill_rating,
                total_points: 0,
                total_games: 0,
                games_played_by_format: GamesPlayed::default(),
                tournaments_participated: 0,
                average_points_per_game: 0.0,
                average_points_per_tournament: 0.0,
            });
            entry.player_name = p.name.clone();
            entry.player_number = p.number;
            entry.skill_rating = p.skill_rating;
            entry.total_points += p.points;
            entry.total_games += p.games_played.total;
            entry.games_played_by_format.merge(&p.games_played);
            entry.tournaments_participated += 1;
        }
    }

    let mut stats: Vec<HistoricalPlayerStats> = by_id
        .into_values()
        .map(|mut s| {
            s.average_points_per_game = if s.total_games > 0 {
                f64::from(s.total_points) / f64::from(s.total_games)
            } else {
                0.0
            };
            s.average_points_per_tournament = if s.tournaments_participated > 0 {
                f64::from(s.total_points) / f64::from(s.tournaments_participated)
            } else {
                0.0
            };
            s
        })
        .collect();
    stats.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then(a.player_number.cmp(&b.player_number))
            .then(a.player_id.cmp(&b.player_id))
    });
    stats
}

#[derive(Serialize)]
struct StandingsRow<'a> {
    rank: u32,
    number: u32,
    name: &'a str,
    skill_rating: u8,
    points: u32,
    games: u32,
    #[serde(rename = "2vs2")]
    two_vs_two: u32,
    #[serde(rename = "3vs3")]
    three_vs_three: u32,
    #[serde(rename = "4+1vs4+1")]
    four_plus_one: u32,
    tournaments: u32,
    avg_per_game: String,
    avg_per_tournament: String,
}

/// Render historical stats (as ordered by [`historical_stats`]) as CSV with a header row.
pub fn export_standings_csv(stats: &[HistoricalPlayerStats]) -> Result<String, csv::Error> {
    let points: Vec<u32> = stats.iter().map(|s| s.total_points).collect();
    let ranks = competition_ranks(&points);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    for (s, rank) in stats.iter().zip(ranks) {
        wtr.serialize(StandingsRow {
            rank,
            number: s.player_number,
            name: &s.player_name,
            skill_rating: s.skill_rating,
            points: s.total_points,
            games: s.total_games,
            two_vs_two: s.games_played_by_format.two_vs_two,
            three_vs_three: s.games_played_by_format.three_vs_three,
            four_plus_one: s.games_played_by_format.four_plus_one,
            tournaments: s.tournaments_participated,
            avg_per_game: format!("{:.1}", s.average_points_per_game),
            avg_per_tournament: format!("{:.1}", s.average_points_per_tournament),
        })?;
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
