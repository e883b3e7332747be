//! JSON API over the roster and the matchup generator.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! ROSTER_PATH and SCHEDULE_PATH pick the CSV tables; REFRESH_SECS re-reads the roster
//! periodically so edits made directly to the table show up.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_scheduler::{
    generate_schedule, generate_schedule_seeded, schedule_rows, CourtPolicy, CsvRosterStore,
    CsvScheduleSink, PlayerId, PlayerStatus, Roster, RosterError, RosterStore, Schedule,
    ScheduleConfig, ScheduleError, ScheduleRow, ScheduleSink, SplitStrategy, StoreError,
    DEFAULT_TRIALS,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Shared state: the roster as last loaded/saved, the last generated schedule, and the tables.
struct AppState {
    roster: RwLock<Roster>,
    /// Held from reading the roster through saving it and committing, so edits, reloads and
    /// refreshes apply one at a time.
    roster_edit: tokio::sync::Mutex<()>,
    last_schedule: RwLock<Option<ScheduleResponse>>,
    store: Arc<dyn RosterStore>,
    sink: Arc<dyn ScheduleSink>,
}

impl AppState {
    fn new(roster: Roster, store: Arc<dyn RosterStore>, sink: Arc<dyn ScheduleSink>) -> Self {
        Self {
            roster: RwLock::new(roster),
            roster_edit: tokio::sync::Mutex::new(()),
            last_schedule: RwLock::new(None),
            store,
            sink,
        }
    }
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Clone, Serialize)]
struct ScheduleResponse {
    schedule: Schedule,
    rows: Vec<ScheduleRow>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    early_leave: bool,
    #[serde(default)]
    leave_after_round: Option<u32>,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: PlayerStatus,
}

#[derive(Deserialize)]
struct SetDepartureBody {
    leave_after_round: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateBody {
    num_rounds: u32,
    num_courts: u32,
    #[serde(default)]
    min_rest: u32,
    #[serde(default)]
    court_policy: CourtPolicy,
    #[serde(default)]
    split: SplitStrategy,
    #[serde(default)]
    trials: Option<usize>,
    /// Fixed seed for a reproducible schedule.
    #[serde(default)]
    seed: Option<u64>,
}

/// Path segment: player id (e.g. /api/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: PlayerId,
}

fn error_json(message: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn roster_error_response(e: RosterError) -> HttpResponse {
    match e {
        RosterError::PlayerNotFound(_) => HttpResponse::NotFound().json(error_json(e)),
        _ => HttpResponse::BadRequest().json(error_json(e)),
    }
}

fn store_unavailable(e: StoreError) -> HttpResponse {
    log::error!("{}", e);
    HttpResponse::ServiceUnavailable().json(error_json(e))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Run blocking table I/O off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
}

async fn load_roster(store: Arc<dyn RosterStore>) -> Result<Roster, StoreError> {
    let rows = blocking(move || store.load()).await?;
    Ok(Roster::from_rows(rows))
}

/// Apply `edit` to a copy of the roster, save the copy, and only then replace the shared roster.
/// A failed save leaves the in-memory roster untouched.
async fn update_roster<F>(state: &AppState, edit: F) -> HttpResponse
where
    F: FnOnce(&mut Roster) -> Result<(), RosterError>,
{
    let _edit = state.roster_edit.lock().await;
    let mut draft = match state.roster.read() {
        Ok(guard) => guard.clone(),
        Err(_) => return lock_error(),
    };
    if let Err(e) = edit(&mut draft) {
        return roster_error_response(e);
    }
    let rows = draft.to_rows();
    let store = state.store.clone();
    if let Err(e) = blocking(move || store.save(&rows)).await {
        return store_unavailable(e);
    }
    match state.roster.write() {
        Ok(mut guard) => {
            *guard = draft;
            HttpResponse::Ok().json(&*guard)
        }
        Err(_) => lock_error(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-scheduler",
    })
}

/// Current roster (as last loaded or saved).
#[get("/api/players")]
async fn api_get_players(state: State) -> HttpResponse {
    match state.roster.read() {
        Ok(guard) => HttpResponse::Ok().json(&*guard),
        Err(_) => lock_error(),
    }
}

/// Add a player. The name is cleaned and must be unique.
#[post("/api/players")]
async fn api_add_player(state: State, body: Json<AddPlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    update_roster(&state, move |roster| {
        let id = roster.add_player(&body.name, body.early_leave, body.leave_after_round)?;
        log::info!("Added player {} ({})", body.name.trim(), id);
        Ok(())
    })
    .await
}

#[delete("/api/players/{player_id}")]
async fn api_remove_player(state: State, path: Path<PlayerPath>) -> HttpResponse {
    let player_id = path.player_id;
    update_roster(&state, move |roster| {
        let removed = roster.remove_player(player_id)?;
        log::info!("Removed player {}", removed.name);
        Ok(())
    })
    .await
}

/// Mark a player attending or absent.
#[put("/api/players/{player_id}/status")]
async fn api_set_status(
    state: State,
    path: Path<PlayerPath>,
    body: Json<SetStatusBody>,
) -> HttpResponse {
    let (player_id, status) = (path.player_id, body.status);
    update_roster(&state, move |roster| roster.set_status(player_id, status)).await
}

/// Set or clear the round after which a player leaves.
#[put("/api/players/{player_id}/departure")]
async fn api_set_departure(
    state: State,
    path: Path<PlayerPath>,
    body: Json<SetDepartureBody>,
) -> HttpResponse {
    let (player_id, leave_after_round) = (path.player_id, body.leave_after_round);
    update_roster(&state, move |roster| {
        roster.set_departure(player_id, leave_after_round)
    })
    .await
}

/// Re-read the roster from the table, dropping any unsaved in-memory view.
#[post("/api/roster/reload")]
async fn api_reload_roster(state: State) -> HttpResponse {
    let _edit = state.roster_edit.lock().await;
    let roster = match load_roster(state.store.clone()).await {
        Ok(r) => r,
        Err(e) => return store_unavailable(e),
    };
    match state.roster.write() {
        Ok(mut guard) => {
            *guard = roster;
            HttpResponse::Ok().json(&*guard)
        }
        Err(_) => lock_error(),
    }
}

/// Generate a schedule for the attending players and write it to the schedule table.
#[post("/api/schedule")]
async fn api_generate_schedule(state: State, body: Json<GenerateBody>) -> HttpResponse {
    let config = ScheduleConfig::new(body.num_rounds, body.num_courts)
        .with_min_rest(body.min_rest)
        .with_court_policy(body.court_policy)
        .with_split(body.split)
        .with_trials(body.trials.unwrap_or(DEFAULT_TRIALS));
    if let Err(e) = config.validate() {
        return HttpResponse::BadRequest().json(error_json(e));
    }

    let players = match state.roster.read() {
        Ok(guard) => guard.attending(),
        Err(_) => return lock_error(),
    };
    if players.is_empty() {
        return HttpResponse::BadRequest().json(error_json(ScheduleError::NoPlayers));
    }

    let schedule = match body.seed {
        Some(seed) => generate_schedule_seeded(&players, config, seed),
        None => generate_schedule(&players, config),
    };
    let rows = schedule_rows(&schedule.rounds, &players);

    let sink = state.sink.clone();
    let to_write = rows.clone();
    if let Err(e) = blocking(move || sink.write(&to_write)).await {
        return store_unavailable(e);
    }

    let response = ScheduleResponse { schedule, rows };
    match state.last_schedule.write() {
        Ok(mut guard) => *guard = Some(response.clone()),
        Err(_) => return lock_error(),
    }
    HttpResponse::Ok().json(response)
}

/// Last generated schedule (404 if none yet).
#[get("/api/schedule")]
async fn api_get_schedule(state: State) -> HttpResponse {
    match state.last_schedule.read() {
        Ok(guard) => match guard.as_ref() {
            Some(s) => HttpResponse::Ok().json(s),
            None => HttpResponse::NotFound().json(error_json("No schedule yet")),
        },
        Err(_) => lock_error(),
    }
}

/// Re-read the roster table and replace the shared roster if its rows changed.
/// Ids are assigned on load, so unchanged rows keep the current ids.
async fn refresh_roster(state: &AppState) -> Result<bool, StoreError> {
    let _edit = state.roster_edit.lock().await;
    let roster = load_roster(state.store.clone()).await?;
    let mut g = state
        .roster
        .write()
        .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
    if g.to_rows() == roster.to_rows() {
        return Ok(false);
    }
    log::info!("Roster refreshed ({} player(s))", roster.len());
    *g = roster;
    Ok(true)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_roster_path() -> String {
    "roster.csv".to_string()
}

fn default_schedule_path() -> String {
    "schedule.csv".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let roster_path = std::env::var("ROSTER_PATH").unwrap_or_else(|_| default_roster_path());
    let schedule_path = std::env::var("SCHEDULE_PATH").unwrap_or_else(|_| default_schedule_path());
    let refresh_secs: Option<u64> = std::env::var("REFRESH_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&s| s > 0);

    let csv_store = CsvRosterStore::open(&roster_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let roster_file = csv_store.path().display().to_string();
    let store: Arc<dyn RosterStore> = Arc::new(csv_store);
    let sink: Arc<dyn ScheduleSink> = Arc::new(CsvScheduleSink::new(&schedule_path));

    let roster = match load_roster(store.clone()).await {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Starting with an empty roster: {}", e);
            Roster::new()
        }
    };
    log::info!("Loaded {} player(s) from {}", roster.len(), roster_file);

    let state = Data::new(AppState::new(roster, store, sink));

    // Background task: periodically re-read the roster table
    if let Some(secs) = refresh_secs {
        let state_refresh = state.clone();
        actix_web::rt::spawn(async move {
            let mut interval = actix_web::rt::time::interval(Duration::from_secs(secs));
            loop {
                interval.tick().await;
                if let Err(e) = refresh_roster(&state_refresh).await {
                    log::warn!("Roster refresh failed: {}", e);
                }
            }
        });
    }

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_get_players)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_status)
            .service(api_set_departure)
            .service(api_reload_roster)
            .service(api_generate_schedule)
            .service(api_get_schedule)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use badminton_scheduler::{MemoryRosterStore, MemoryScheduleSink, RosterRow};

    /// Memory store whose saves take a while, so overlapping edits actually overlap.
    struct SlowStore {
        inner: MemoryRosterStore,
        delay: Duration,
    }

    impl RosterStore for SlowStore {
        fn create_if_absent(&self) -> Result<(), StoreError> {
            self.inner.create_if_absent()
        }

        fn load(&self) -> Result<Vec<RosterRow>, StoreError> {
            self.inner.load()
        }

        fn save(&self, rows: &[RosterRow]) -> Result<(), StoreError> {
            std::thread::sleep(self.delay);
            self.inner.save(rows)
        }
    }

    fn state_with(store: Arc<dyn RosterStore>, roster: Roster) -> AppState {
        AppState::new(roster, store, Arc::new(MemoryScheduleSink::new()))
    }

    fn add(name: &'static str) -> impl FnOnce(&mut Roster) -> Result<(), RosterError> {
        move |roster| roster.add_player(name, false, None).map(|_| ())
    }

    #[tokio::test]
    async fn concurrent_edits_are_both_kept() {
        let store = Arc::new(SlowStore {
            inner: MemoryRosterStore::new(),
            delay: Duration::from_millis(100),
        });
        let state = state_with(store.clone(), Roster::new());

        let (a, b) = tokio::join!(
            update_roster(&state, add("Alice")),
            update_roster(&state, add("Bob"))
        );
        assert_eq!(a.status(), StatusCode::OK);
        assert_eq!(b.status(), StatusCode::OK);

        let names: Vec<String> = state
            .roster
            .read()
            .unwrap()
            .players
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(store.inner.load().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_save_leaves_roster_untouched() {
        let store = Arc::new(MemoryRosterStore::with_rows(vec![RosterRow::new("Alice")]));
        let roster = Roster::from_rows(store.load().unwrap());
        let state = state_with(store.clone(), roster.clone());

        store.set_online(false);
        let resp = update_roster(&state, add("Bob")).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(*state.roster.read().unwrap(), roster);

        store.set_online(true);
        assert_eq!(store.load().unwrap(), vec![RosterRow::new("Alice")]);
    }

    #[tokio::test]
    async fn rejected_edit_is_not_saved() {
        let store = Arc::new(MemoryRosterStore::with_rows(vec![RosterRow::new("Alice")]));
        let state = state_with(store.clone(), Roster::from_rows(store.load().unwrap()));

        let resp = update_roster(&state, add("ALICE")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.roster.read().unwrap().len(), 1);
        assert_eq!(store.load().unwrap(), vec![RosterRow::new("Alice")]);
    }

    #[tokio::test]
    async fn refresh_replaces_roster_only_when_rows_change() {
        let store = Arc::new(MemoryRosterStore::with_rows(vec![RosterRow::new("Alice")]));
        let state = state_with(store.clone(), Roster::from_rows(store.load().unwrap()));
        let before = state.roster.read().unwrap().clone();

        assert!(!refresh_roster(&state).await.unwrap());
        assert_eq!(*state.roster.read().unwrap(), before);

        store
            .save(&[RosterRow::new("Alice"), RosterRow::new("Bob")])
            .unwrap();
        assert!(refresh_roster(&state).await.unwrap());
        assert_eq!(state.roster.read().unwrap().len(), 2);
    }
}
