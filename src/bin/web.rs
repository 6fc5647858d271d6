//! Single binary web server: JSON REST API over one live tournament and its history.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default and keeps its data in ./data.
//! Override with env: HOST, PORT, DATA_DIR.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use football_tournament_web::config::ServerConfig;
use football_tournament_web::models::DEFAULT_SKILL_RATING;
use football_tournament_web::store::JsonStore;
use football_tournament_web::{
    check_can_start, end_tournament, export_standings_csv, generate_next_round,
    historical_stats, leaderboard, reset_tournament, start_tournament, update_game_score,
    GameFormat, GameId, PlayerId, Tournament, TournamentError, TournamentHistory,
};
use serde::Deserialize;
use std::sync::RwLock;

/// Live tournament, archive, and where both are saved.
struct AppData {
    tournament: Tournament,
    history: TournamentHistory,
    store: JsonStore,
}

impl AppData {
    fn persist(&self) -> std::io::Result<()> {
        self.store.save_tournament(&self.tournament)?;
        self.store.save_history(&self.history)
    }
}

/// All state transitions go through this single lock.
type AppState = Data<RwLock<AppData>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

fn default_skill_rating() -> u8 {
    DEFAULT_SKILL_RATING
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddPlayerBody {
    name: String,
    number: u32,
    #[serde(default = "default_skill_rating")]
    skill_rating: u8,
}

#[derive(Deserialize)]
struct SkillRatingBody {
    rating: u8,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatConfigBody {
    format: GameFormat,
    games_count: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FairRollBody {
    fair_roll: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Path segment: game id (e.g. /api/games/{id}/score)
#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::PlayerNotFound(_) | TournamentError::GameNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Apply one state transition under the write lock, persist, and return the tournament.
fn mutate<F>(state: &AppState, op: F) -> HttpResponse
where
    F: FnOnce(&mut AppData) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Err(e) = op(&mut *g) {
        return error_response(&e);
    }
    if let Err(e) = g.persist() {
        log::error!("Failed to save tournament data: {}", e);
        return HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": format!("Could not save data: {}", e) }));
    }
    HttpResponse::Ok().json(&g.tournament)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-tournament-web",
    })
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(&g.tournament),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/history")]
async fn api_get_history(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(&g.history),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Ranked live standings.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(leaderboard(&g.tournament.players)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Cross-tournament player stats.
#[get("/api/stats")]
async fn api_stats(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(historical_stats(&g.tournament, &g.history)),
        Err(_) => HttpResponse::InternalServerError().body("lock error"),
    }
}

#[get("/api/stats.csv")]
async fn api_stats_csv(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match export_standings_csv(&historical_stats(&g.tournament, &g.history)) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, |d| {
        d.tournament
            .add_player(body.name, body.number, body.skill_rating)
            .map(|_| ())
    })
}

#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    mutate(&state, |d| d.tournament.remove_player(path.id))
}

#[post("/api/players/{id}/toggle")]
async fn api_toggle_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    mutate(&state, |d| d.tournament.toggle_active(path.id))
}

#[put("/api/players/{id}/skill")]
async fn api_set_skill_rating(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<SkillRatingBody>,
) -> HttpResponse {
    mutate(&state, |d| d.tournament.update_skill_rating(path.id, body.rating))
}

#[put("/api/players/{id}/name")]
async fn api_rename_player(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<NameBody>,
) -> HttpResponse {
    let name = body.into_inner().name;
    mutate(&state, |d| d.tournament.rename_player(path.id, name))
}

#[put("/api/formats")]
async fn api_update_format(state: AppState, body: Json<FormatConfigBody>) -> HttpResponse {
    mutate(&state, |d| {
        d.tournament
            .update_format_config(body.format, body.games_count)
    })
}

#[put("/api/fair-roll")]
async fn api_set_fair_roll(state: AppState, body: Json<FairRollBody>) -> HttpResponse {
    mutate(&state, |d| {
        d.tournament.set_fair_roll(body.fair_roll);
        Ok(())
    })
}

#[put("/api/name")]
async fn api_rename_tournament(state: AppState, body: Json<NameBody>) -> HttpResponse {
    let name = body.into_inner().name;
    mutate(&state, |d| d.tournament.rename(name))
}

/// Start the tournament (checks formats and minimum active players first).
#[post("/api/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    mutate(&state, |d| {
        check_can_start(&d.tournament)?;
        start_tournament(&mut d.tournament, &mut rand::thread_rng())
    })
}

#[post("/api/rounds")]
async fn api_generate_round(state: AppState) -> HttpResponse {
    mutate(&state, |d| {
        generate_next_round(&mut d.tournament, &mut rand::thread_rng())
    })
}

#[put("/api/games/{id}/score")]
async fn api_set_score(
    state: AppState,
    path: Path<GamePath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    mutate(&state, |d| {
        update_game_score(&mut d.tournament, path.id, body.score_a, body.score_b)
    })
}

#[post("/api/reset")]
async fn api_reset_tournament(state: AppState) -> HttpResponse {
    mutate(&state, |d| reset_tournament(&mut d.tournament))
}

/// End and archive the tournament; responds with the fresh draft.
#[post("/api/end")]
async fn api_end_tournament(state: AppState) -> HttpResponse {
    mutate(&state, |d| {
        end_tournament(&mut d.tournament, &mut d.history).map(|_| ())
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = JsonStore::new(&config.data_dir)?;
    let tournament = store.load_tournament();
    let history = store.load_history();
    log::info!(
        "Loaded tournament '{}' ({} players, {} rounds) and {} archived tournament(s) from {}",
        tournament.name,
        tournament.players.len(),
        tournament.rounds.len(),
        history.len(),
        store.dir().display()
    );

    let state = Data::new(RwLock::new(AppData {
        tournament,
        history,
        store,
    }));

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_get_history)
            .service(api_leaderboard)
            .service(api_stats)
            .service(api_stats_csv)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_toggle_player)
            .service(api_set_skill_rating)
            .service(api_rename_player)
            .service(api_update_format)
            .service(api_set_fair_roll)
            .service(api_rename_tournament)
            .service(api_start_tournament)
            .service(api_generate_round)
            .service(api_set_score)
            .service(api_reset_tournament)
            .service(api_end_tournament)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
