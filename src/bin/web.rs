//! JSON API over the tournament service, backed by the in-memory repository.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, patch, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use football_tournament::{
    CreateTournament, ErrorKind, InMemoryRepository, MatchUpdate, NewMember, NewTeam, Tournament,
    TournamentError, TournamentId, TournamentPatch, TournamentService, UuidIds,
};
use serde::Deserialize;

type AppState = Data<TournamentService<InMemoryRepository, UuidIds>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct UpdateTeamBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    logo: Option<String>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id (e.g. /api/tournaments/{id}/teams/{team_id})
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: String,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::InvalidState => HttpResponse::Conflict().json(body),
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
    }
}

fn respond(result: Result<Tournament, TournamentError>) -> HttpResponse {
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => {
            log::debug!("Request rejected: {}", e);
            error_response(&e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-tournament",
    })
}

/// Create a new tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournament>) -> HttpResponse {
    respond(state.create_tournament(body.into_inner()))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.get(path.id))
}

/// Edit name, organizer or description.
#[patch("/api/tournaments/{id}")]
async fn api_update_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentPatch>,
) -> HttpResponse {
    respond(state.update_details(path.id, body.into_inner()))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.delete(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// Register a team (tournament must be upcoming).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<NewTeam>,
) -> HttpResponse {
    respond(state.add_team(path.id, body.into_inner()))
}

/// Register teams from a CSV body (`name,logo` header).
#[post("/api/tournaments/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    respond(state.import_teams(path.id, body.as_bytes()))
}

#[put("/api/tournaments/{id}/teams/{team_id}")]
async fn api_update_team(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<UpdateTeamBody>,
) -> HttpResponse {
    let body = body.into_inner();
    respond(state.update_team(path.id, &path.team_id, body.name, body.logo))
}

#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    respond(state.remove_team(path.id, &path.team_id))
}

#[post("/api/tournaments/{id}/teams/{team_id}/members")]
async fn api_add_member(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<NewMember>,
) -> HttpResponse {
    respond(state.add_member(path.id, &path.team_id, body.into_inner()))
}

/// Generate the schedule and move to ongoing.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.start(path.id))
}

/// Partial match update (scores, kickoff, date, lineups, events).
#[put("/api/tournaments/{id}/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchUpdate>,
) -> HttpResponse {
    respond(state.update_match(path.id, &path.match_id, body.into_inner()))
}

/// Build (or rebuild) the knockout stage from the group tables.
#[post("/api/tournaments/{id}/knockout")]
async fn api_generate_knockout(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.generate_knockout_stage(path.id))
}

#[post("/api/tournaments/{id}/complete")]
async fn api_complete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.complete(path.id))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(TournamentService::new(InMemoryRepository::new(), UuidIds));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_update_tournament)
            .service(api_delete_tournament)
            .service(api_import_teams)
            .service(api_add_team)
            .service(api_update_team)
            .service(api_remove_team)
            .service(api_add_member)
            .service(api_start_tournament)
            .service(api_update_match)
            .service(api_generate_knockout)
            .service(api_complete_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
