//! Single binary web server: the tournament engine behind a JSON REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Tournament layout via env: ZONES (comma-separated, e.g. "A,B"),
//! QUALIFIERS_PER_ZONE (e.g. 8).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use cup_tournament_web::{
    MemoryStore, TournamentEngine, TournamentRules,
};
use serde::Deserialize;
use std::sync::RwLock;
use uuid::Uuid;

/// Single-user tool: one tournament per process.
type AppState = Data<RwLock<TournamentEngine<MemoryStore>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamBody {
    name: String,
    zone: String,
}

#[derive(Deserialize)]
struct ResultBody {
    home_goals: u32,
    away_goals: u32,
}

/// Path segment: team id (e.g. /api/teams/{team_id})
#[derive(Deserialize)]
struct TeamPath {
    team_id: Uuid,
}

/// Path segment: match id (e.g. /api/matches/{match_id}/result)
#[derive(Deserialize)]
struct MatchPath {
    match_id: Uuid,
}

/// Path segment: zone name (e.g. /api/zones/{zone}/standings)
#[derive(Deserialize)]
struct ZonePath {
    zone: String,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cup-tournament-web",
    })
}

#[get("/api/state")]
async fn api_state(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(serde_json::json!({ "state": g.state() }))
}

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.teams())
}

/// Add a team (before the group stage locks the list).
#[post("/api/teams")]
async fn api_add_team(state: AppState, body: Json<TeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_team(&body.name, &body.zone) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Rename / move a team.
#[put("/api/teams/{team_id}")]
async fn api_update_team(state: AppState, path: Path<TeamPath>, body: Json<TeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_team(path.team_id, &body.name, &body.zone) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a team (rejected while any match references it).
#[delete("/api/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_team(path.team_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "removed": path.team_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Generate a zone's round-robin fixtures.
#[post("/api/zones/{zone}/fixtures")]
async fn api_generate_fixtures(state: AppState, path: Path<ZonePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.generate_zone_fixtures(&path.zone) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Current ranking table for a zone.
#[get("/api/zones/{zone}/standings")]
async fn api_standings(state: AppState, path: Path<ZonePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_standings(&path.zone) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.matches())
}

/// Record (or correct) a match result.
#[put("/api/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.record_result(path.match_id, body.home_goals, body.away_goals) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Advance to the next tournament phase (guards validated by the engine).
#[post("/api/advance")]
async fn api_advance(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.advance_phase() {
        Ok(next) => HttpResponse::Ok().json(serde_json::json!({ "state": next })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Elimination-tree snapshot (empty rounds list before seeding).
#[get("/api/bracket")]
async fn api_bracket(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.get_bracket())
}

#[get("/api/champion")]
async fn api_champion(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(serde_json::json!({ "champion": g.get_champion() }))
}

/// Reopen the team list (discards generated fixtures; only before results).
#[post("/api/unlock-teams")]
async fn api_unlock_teams(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.unlock_teams() {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "state": g.state() })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Wipe group results (and the bracket built on them).
#[post("/api/reset/group")]
async fn api_reset_group(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.reset_group_stage() {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "state": g.state() })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Discard the knockout bracket, back to the completed group stage.
#[post("/api/reset/knockout")]
async fn api_reset_knockout(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.reset_knockout() {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "state": g.state() })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Full reset: teams, matches, and state flags.
#[post("/api/reset/all")]
async fn api_reset_all(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.reset_all();
    HttpResponse::Ok().json(serde_json::json!({ "state": g.state() }))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Tournament layout from env, falling back to two zones of eight qualifiers.
fn rules_from_env() -> TournamentRules {
    let zones: Vec<String> = std::env::var("ZONES")
        .ok()
        .map(|v| {
            v.split(',')
                .map(|z| z.trim().to_string())
                .filter(|z| !z.is_empty())
                .collect()
        })
        .filter(|z: &Vec<String>| !z.is_empty())
        .unwrap_or_else(|| vec!["A".to_string(), "B".to_string()]);
    let qualifiers: usize = std::env::var("QUALIFIERS_PER_ZONE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8);
    TournamentRules::with_zones(zones, qualifiers)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let rules = rules_from_env();
    log::info!(
        "Starting server at http://{}:{} (zones {:?}, {} qualifiers per zone)",
        bind.0,
        bind.1,
        rules.zones,
        rules.qualifiers_per_zone
    );

    let state = Data::new(RwLock::new(TournamentEngine::new(
        MemoryStore::new(),
        rules,
    )));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_state)
            .service(api_list_teams)
            .service(api_add_team)
            .service(api_update_team)
            .service(api_remove_team)
            .service(api_generate_fixtures)
            .service(api_standings)
            .service(api_list_matches)
            .service(api_record_result)
            .service(api_advance)
            .service(api_bracket)
            .service(api_champion)
            .service(api_unlock_teams)
            .service(api_reset_group)
            .service(api_reset_knockout)
            .service(api_reset_all)
    })
    .bind(bind)?
    .run()
    .await
}
