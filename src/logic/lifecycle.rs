//! Reset and end: leave a running tournament, either discarding it or archiving it.

use crate::models::{
    FormatConfig, Tournament, TournamentError, TournamentHistory, TournamentId, TournamentStatus,
};
use chrono::Utc;

/// Return to draft: clear rounds and stats, keep roster, name and format setup.
///
/// Refused once any round is completed; results that already count are not thrown away.
pub fn reset_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.has_completed_rounds() {
        return Err(TournamentError::RoundsCompleted);
    }
    tournament.rounds.clear();
    tournament.current_round = 0;
    tournament.started = false;
    tournament.status = TournamentStatus::Draft;
    tournament.reset_player_stats();
    log::info!("Tournament '{}' reset to draft", tournament.name);
    Ok(())
}

/// Archive the running tournament into `history` and replace it with a fresh draft.
///
/// The draft keeps the roster (stats zeroed) and the fair-roll setting, with a new id,
/// default name and default formats. Returns the id of the archived tournament.
pub fn end_tournament(
    tournament: &mut Tournament,
    history: &mut TournamentHistory,
) -> Result<TournamentId, TournamentError> {
    if !tournament.started {
        return Err(TournamentError::NotStarted);
    }

    let mut players = tournament.players.clone();
    for p in &mut players {
        p.reset_stats();
    }
    let fresh = Tournament {
        players,
        fair_roll: tournament.fair_roll,
        format_configs: FormatConfig::defaults(),
        ..Tournament::new()
    };

    let mut archived = std::mem::replace(tournament, fresh);
    archived.status = TournamentStatus::Completed;
    archived.ended_at = Some(Utc::now());
    let id = archived.id;
    log::info!(
        "Tournament '{}' ended after {} rounds",
        archived.name,
        archived.rounds.len()
    );
    history.archive(archived);
    Ok(id)
}
