//! Integration tests for JSON persistence and migration of older saves.

use football_tournament_web::models::stable_id;
use football_tournament_web::store::JsonStore;
use football_tournament_web::{
    start_tournament, update_game_score, GameFormat, Player, Tournament, TournamentHistory,
    TournamentStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("football_tournament_{name}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_files_load_defaults() {
    let dir = temp_dir("missing");
    let store = JsonStore::new(&dir).unwrap();
    let t = store.load_tournament();
    assert!(!t.started);
    assert!(t.players.is_empty());
    assert_eq!(t.format_configs.len(), 3);
    assert!(store.load_history().is_empty());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn saved_state_loads_back() {
    let dir = temp_dir("roundtrip");
    let store = JsonStore::new(&dir).unwrap();

    let players = (1..=8).map(|i| Player::new(format!("P{i}"), i, 2)).collect();
    let mut t = Tournament::with_players(players);
    t.update_format_config(GameFormat::ThreeVsThree, 0).unwrap();
    t.update_format_config(GameFormat::FourPlusOne, 0).unwrap();
    start_tournament(&mut t, &mut StdRng::seed_from_u64(8)).unwrap();
    let ids: Vec<_> = t.rounds[0].games.iter().map(|g| g.id).collect();
    for id in ids {
        update_game_score(&mut t, id, 2, 0).unwrap();
    }
    store.save_tournament(&t).unwrap();
    let mut history = TournamentHistory::default();
    history.archive(Tournament::new());
    store.save_history(&history).unwrap();

    let loaded = store.load_tournament();
    assert_eq!(loaded.id, t.id);
    assert_eq!(loaded.rounds, t.rounds);
    assert_eq!(loaded.players, t.players);
    assert_eq!(loaded.status, TournamentStatus::Active);
    assert_eq!(store.load_history().len(), 1);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn older_records_are_migrated_with_defaults() {
    let dir = temp_dir("migrate");
    let legacy = r#"{
        "gamesPerRound": 5,
        "rounds": [],
        "currentRound": 0,
        "started": false,
        "players": [
            { "id": "6f1c2d3e-4b5a-4978-8a6b-1c2d3e4f5a6b", "name": "Alex", "number": 1,
              "points": 0, "active": true, "gamesPlayed": { "2vs2": 0, "total": 0 } }
        ],
        "formatConfigs": [ { "format": "3vs3", "gamesCount": 4 } ]
    }"#;
    fs::write(dir.join("tournament.json"), legacy).unwrap();
    let store = JsonStore::new(&dir).unwrap();

    let t = store.load_tournament();
    assert_eq!(t.status, TournamentStatus::Draft);
    assert!(t.fair_roll);
    assert_eq!(t.players.len(), 1);
    assert_eq!(t.players[0].skill_rating, 3);
    assert_eq!(t.players[0].games_played.three_vs_three, 0);
    let three = t.format_config(GameFormat::ThreeVsThree).unwrap();
    assert_eq!(three.games_count, 4);
    assert_eq!(three.players_per_team, 3);
    assert_eq!(t.format_config(GameFormat::FourPlusOne).unwrap().players_per_team, 5);
    assert!(!t.name.is_empty());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn running_status_alias_is_accepted() {
    let dir = temp_dir("alias");
    fs::write(
        dir.join("tournament.json"),
        r#"{ "status": "running", "started": true }"#,
    )
    .unwrap();
    let store = JsonStore::new(&dir).unwrap();
    assert_eq!(store.load_tournament().status, TournamentStatus::Active);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = temp_dir("malformed");
    fs::write(dir.join("tournament.json"), "{ not json").unwrap();
    fs::write(dir.join("history.json"), "[1, 2").unwrap();
    let store = JsonStore::new(&dir).unwrap();

    let t = store.load_tournament();
    assert!(t.players.is_empty());
    assert!(!t.started);
    assert!(store.load_history().is_empty());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn short_legacy_ids_keep_games_linked_to_the_roster() {
    let dir = temp_dir("short_ids");
    let legacy = r#"{
        "started": true,
        "currentRound": 1,
        "players": [
            { "id": "1", "name": "Alex", "number": 1, "active": true },
            { "id": "2", "name": "Sam", "number": 2, "active": true },
            { "id": 3, "name": "Kim", "number": 3, "active": true },
            { "id": "1700000000004", "name": "Lou", "number": 4, "active": true }
        ],
        "rounds": [
            { "roundNumber": 1, "games": [
                { "id": "17000000001abc", "round": 1, "format": "2vs2",
                  "teamA": [ { "id": "1", "name": "Alex", "number": 1 },
                             { "id": "2", "name": "Sam", "number": 2 } ],
                  "teamB": [ { "id": 3, "name": "Kim", "number": 3 },
                             { "id": "1700000000004", "name": "Lou", "number": 4 } ],
                  "scoreA": 3, "scoreB": 1 }
            ] }
        ]
    }"#;
    fs::write(dir.join("tournament.json"), legacy).unwrap();
    let store = JsonStore::new(&dir).unwrap();

    let t = store.load_tournament();
    assert_eq!(t.players.len(), 4);
    assert_eq!(t.players[0].id, stable_id("1"));
    assert_ne!(t.players[0].id, t.players[1].id);
    let game = &t.rounds[0].games[0];
    assert_eq!(game.id, stable_id("17000000001abc"));
    assert_eq!(game.team_a[0].id, t.players[0].id);
    assert_eq!(game.team_b[0].id, t.players[2].id);

    // Winners get 3 goals + 5 bonus, losers their 1 goal.
    let points: Vec<u32> = t.players.iter().map(|p| p.points).collect();
    assert_eq!(points, vec![8, 8, 1, 1]);
    assert!(t.players.iter().all(|p| p.games_played.two_vs_two == 1));

    // Saved again, the derived ids are written as UUIDs and load back unchanged.
    store.save_tournament(&t).unwrap();
    assert_eq!(store.load_tournament().players, t.players);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_fields_fall_back_without_losing_the_tournament() {
    let dir = temp_dir("bad_fields");
    let saved = r#"{
        "name": "Sommercup",
        "fairRoll": "yes",
        "createdAt": "yesterday",
        "players": [
            { "id": "1", "name": "Alex", "number": 1, "skillRating": "five", "active": "no" },
            { "id": "2", "name": "Sam", "number": "two", "skillRating": 4 },
            42,
            { "id": "3", "name": ["Kim"], "number": 3, "gamesPlayed": "lots" }
        ],
        "formatConfigs": [
            { "format": "3vs3", "gamesCount": "many" },
            { "format": "5vs5", "gamesCount": 1 }
        ],
        "rounds": "none"
    }"#;
    fs::write(dir.join("tournament.json"), saved).unwrap();
    let store = JsonStore::new(&dir).unwrap();

    let t = store.load_tournament();
    assert_eq!(t.name, "Sommercup");
    assert!(t.fair_roll);
    assert!(t.rounds.is_empty());
    assert_eq!(t.players.len(), 3);
    assert_eq!(t.players[0].name, "Alex");
    assert_eq!(t.players[0].skill_rating, 3);
    assert!(t.players[0].active);
    assert_eq!(t.players[1].number, 0);
    assert_eq!(t.players[1].skill_rating, 4);
    assert_eq!(t.players[2].name, "");
    assert_eq!(t.players[2].games_played.total, 0);
    assert_eq!(t.format_config(GameFormat::ThreeVsThree).unwrap().games_count, 0);
    assert_eq!(t.format_configs.len(), 3);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn started_save_without_status_loads_as_active() {
    let dir = temp_dir("no_status");
    fs::write(
        dir.join("tournament.json"),
        r#"{ "started": true, "rounds": [] }"#,
    )
    .unwrap();
    fs::write(
        dir.join("history.json"),
        r#"{ "tournaments": [ { "started": true, "name": "Alt" } ] }"#,
    )
    .unwrap();
    let store = JsonStore::new(&dir).unwrap();

    assert_eq!(store.load_tournament().status, TournamentStatus::Active);
    let history = store.load_history();
    assert_eq!(history.tournaments[0].status, TournamentStatus::Completed);
    fs::remove_dir_all(&dir).unwrap();
}
