//! Integration tests for score recording and the stats rebuild.

use football_tournament_web::{
    generate_next_round, recalculate_stats, start_tournament, update_game_score, GameFormat,
    Player, PlayerId, Tournament, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Eight active players, a single 2vs2 format with two games, plain shuffle.
fn eight_player_tournament() -> Tournament {
    let players: Vec<Player> = (1..=8).map(|i| Player::new(format!("P{i}"), i, 3)).collect();
    let mut t = Tournament::with_players(players);
    t.update_format_config(GameFormat::TwoVsTwo, 2).unwrap();
    t.update_format_config(GameFormat::ThreeVsThree, 0).unwrap();
    t.update_format_config(GameFormat::FourPlusOne, 0).unwrap();
    t.set_fair_roll(false);
    t
}

fn player(t: &Tournament, id: PlayerId) -> &Player {
    t.find_player(id).unwrap()
}

#[test]
fn end_to_end_first_round() {
    let mut t = eight_player_tournament();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(1)).unwrap();

    assert!(t.started);
    assert_eq!(t.current_round, 1);
    assert_eq!(t.rounds.len(), 1);
    let round = &t.rounds[0];
    assert_eq!(round.round_number, 1);
    assert_eq!(round.games.len(), 2);
    let mut placed: Vec<PlayerId> = round.games.iter().flat_map(|g| g.starters()).collect();
    placed.sort();
    placed.dedup();
    assert_eq!(placed.len(), 8);
    assert!(round
        .games
        .iter()
        .all(|g| g.round == 1 && g.substitutes_a.is_empty() && g.substitutes_b.is_empty()));

    let game1 = round.games[0].clone();
    let game2 = round.games[1].clone();
    update_game_score(&mut t, game1.id, 2, 0).unwrap();
    update_game_score(&mut t, game2.id, 1, 1).unwrap();

    for s in &game1.team_a {
        assert_eq!(player(&t, s.id).points, 7);
    }
    for s in &game1.team_b {
        assert_eq!(player(&t, s.id).points, 0);
    }
    for s in game2.team_a.iter().chain(&game2.team_b) {
        assert_eq!(player(&t, s.id).points, 3);
    }
    for p in &t.players {
        assert_eq!(p.games_played.total, 1);
        assert_eq!(p.games_played.get(GameFormat::TwoVsTwo), 1);
        assert_eq!(p.games_played.get(GameFormat::ThreeVsThree), 0);
    }
}

#[test]
fn incomplete_round_does_not_count() {
    let mut t = eight_player_tournament();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(2)).unwrap();
    let game1 = t.rounds[0].games[0].clone();

    update_game_score(&mut t, game1.id, 3, 1).unwrap();

    assert!(!t.rounds[0].is_completed());
    assert_eq!(t.rounds[0].completed_games(), 1);
    assert!(t.has_games_in_progress());
    assert_eq!(t.find_game(game1.id).and_then(|g| g.score()), Some((3, 1)));
    assert!(t.players.iter().all(|p| p.points == 0 && p.games_played.total == 0));
}

#[test]
fn correcting_a_score_replaces_the_old_result() {
    let mut t = eight_player_tournament();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(3)).unwrap();
    let game1 = t.rounds[0].games[0].clone();
    let game2 = t.rounds[0].games[1].clone();
    update_game_score(&mut t, game2.id, 0, 0).unwrap();
    update_game_score(&mut t, game1.id, 3, 1).unwrap();
    let winner = game1.team_a[0].id;
    let loser = game1.team_b[0].id;
    assert_eq!(player(&t, winner).points, 8);
    assert_eq!(player(&t, loser).points, 1);

    update_game_score(&mut t, game1.id, 1, 3).unwrap();
    assert_eq!(player(&t, winner).points, 1);
    assert_eq!(player(&t, loser).points, 8);
    assert_eq!(player(&t, winner).games_played.total, 1);
}

#[test]
fn recalculation_is_idempotent() {
    let mut t = eight_player_tournament();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(4)).unwrap();
    let ids: Vec<_> = t.rounds[0].games.iter().map(|g| g.id).collect();
    update_game_score(&mut t, ids[0], 4, 2).unwrap();
    update_game_score(&mut t, ids[1], 1, 0).unwrap();

    let before = t.players.clone();
    recalculate_stats(&mut t);
    recalculate_stats(&mut t);
    assert_eq!(t.players, before);
}

#[test]
fn completed_round_stays_completed_when_later_round_is_scored() {
    let mut t = eight_player_tournament();
    let mut rng = StdRng::seed_from_u64(5);
    start_tournament(&mut t, &mut rng).unwrap();
    let first: Vec<_> = t.rounds[0].games.iter().map(|g| g.id).collect();
    for id in &first {
        update_game_score(&mut t, *id, 2, 1).unwrap();
    }
    assert!(t.current_round_completed());

    generate_next_round(&mut t, &mut rng).unwrap();
    assert_eq!(t.current_round, 2);
    assert_eq!(t.rounds[1].round_number, 2);
    assert!(!t.current_round_completed());

    let second = t.rounds[1].games[0].id;
    update_game_score(&mut t, second, 0, 5).unwrap();
    assert!(t.rounds[0].is_completed());
    assert!(!t.rounds[1].is_completed());
    assert!(t.players.iter().all(|p| p.games_played.total == 1));
}

#[test]
fn unknown_game_leaves_state_unchanged() {
    let mut t = eight_player_tournament();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(6)).unwrap();
    let rounds_before = t.rounds.clone();
    let missing = uuid::Uuid::new_v4();

    assert_eq!(
        update_game_score(&mut t, missing, 1, 0),
        Err(TournamentError::GameNotFound(missing))
    );
    assert_eq!(t.rounds, rounds_before);
}

#[test]
fn substitutes_score_like_starters() {
    let mut t = eight_player_tournament();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(7)).unwrap();
    // Move one player of game 2 onto game 1's bench, as a collaborator editing lineups would.
    let bench = t.rounds[0].games[1].team_a[0].clone();
    t.rounds[0].games[1].team_a.remove(0);
    t.rounds[0].games[0].substitutes_a.push(bench.clone());
    let ids: Vec<_> = t.rounds[0].games.iter().map(|g| g.id).collect();

    update_game_score(&mut t, ids[1], 0, 0).unwrap();
    update_game_score(&mut t, ids[0], 3, 1).unwrap();

    let starter = t.rounds[0].games[0].team_a[0].id;
    assert_eq!(player(&t, bench.id).points, player(&t, starter).points);
    assert_eq!(player(&t, bench.id).games_played.total, 1);
}
