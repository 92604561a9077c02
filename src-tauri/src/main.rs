#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use product_scanner::bridge::{self, ConfigLoadOutcome, ConfigOutcome, LoadOutcome, SaveOutcome};
use product_scanner::i18n::get_translations;
use product_scanner::persist::{self, SaveJob, AUTOSAVE_INTERVAL};
use product_scanner::{Config, ConfigStore, Confirm, Language, Session, SessionView, SystemClock};
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct AppState {
    session: Arc<Mutex<Session>>,
    config_store: ConfigStore,
}

#[derive(Serialize)]
struct PickFolderResult {
    ok: bool,
    canceled: bool,
    path: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct ConfirmResult {
    status: &'static str,
    view: SessionView,
}

#[derive(Serialize)]
struct SaveNowResult {
    ok: bool,
    message: String,
    path: Option<String>,
}

#[derive(Deserialize)]
struct EntryInputRequest {
    value: String,
}

/// Confirm carries the field's current text so a fast scanner cannot
/// overtake its own keystrokes.
#[derive(Deserialize)]
struct EntryConfirmRequest {
    value: Option<String>,
}

#[derive(Deserialize)]
struct RecordUpdateRequest {
    index: usize,
    field: String,
    value: String,
}

#[derive(Deserialize)]
struct RecordDeleteRequest {
    index: usize,
}

#[derive(Deserialize)]
struct LanguageRequest {
    language: String,
}

#[derive(Deserialize)]
struct SaveRecordsRequest {
    filename: String,
    content: String,
}

#[derive(Deserialize)]
struct LoadRecordsRequest {
    filename: String,
}

fn lock_session<'a>(state: &'a State<'_, AppState>) -> Result<MutexGuard<'a, Session>, String> {
    state
        .session
        .lock()
        .map_err(|_| "Session state unavailable.".to_string())
}

fn save_detached(job: Option<SaveJob>) {
    if let Some(job) = job {
        let _ = persist::spawn_save(job);
    }
}

fn pick_folder() -> Option<PathBuf> {
    rfd::FileDialog::new().pick_folder()
}

#[tauri::command]
fn session_snapshot(state: State<'_, AppState>) -> Result<SessionView, String> {
    Ok(lock_session(&state)?.snapshot())
}

#[tauri::command]
fn entry_input(
    state: State<'_, AppState>,
    payload: EntryInputRequest,
) -> Result<SessionView, String> {
    let mut session = lock_session(&state)?;
    session.input(payload.value);
    Ok(session.snapshot())
}

#[tauri::command]
async fn entry_confirm(
    state: State<'_, AppState>,
    payload: EntryConfirmRequest,
) -> Result<ConfirmResult, String> {
    let mut session = lock_session(&state)?;
    if let Some(value) = payload.value {
        session.input(value);
    }
    let (outcome, job) = session.confirm();
    save_detached(job);
    let status = match outcome {
        Confirm::Rejected => "rejected",
        Confirm::Advanced(_) => "advanced",
        Confirm::Committed(_) => "committed",
    };
    Ok(ConfirmResult {
        status,
        view: session.snapshot(),
    })
}

#[tauri::command]
async fn record_update(
    state: State<'_, AppState>,
    payload: RecordUpdateRequest,
) -> Result<SessionView, String> {
    let mut session = lock_session(&state)?;
    let job = session
        .update_record(payload.index, payload.field.as_str(), payload.value)
        .map_err(|err| err.to_string())?;
    save_detached(job);
    Ok(session.snapshot())
}

#[tauri::command]
async fn record_delete(
    state: State<'_, AppState>,
    payload: RecordDeleteRequest,
) -> Result<SessionView, String> {
    let mut session = lock_session(&state)?;
    let (_, job) = session
        .delete_record(payload.index)
        .map_err(|err| err.to_string())?;
    save_detached(job);
    Ok(session.snapshot())
}

#[tauri::command]
async fn save_now(state: State<'_, AppState>) -> Result<SaveNowResult, String> {
    let (job, language) = {
        let session = lock_session(&state)?;
        (
            session.save_job().map_err(|err| err.to_string())?,
            session.language(),
        )
    };
    let outcome = persist::spawn_save(job)
        .await
        .map_err(|err| err.to_string())?;
    let t = get_translations(language);
    let message = if outcome.ok {
        t.save_success().to_string()
    } else {
        t.save_failed(outcome.error.as_deref().unwrap_or_default())
    };
    Ok(SaveNowResult {
        ok: outcome.ok,
        message,
        path: outcome.path,
    })
}

#[tauri::command]
fn select_folder() -> Option<String> {
    pick_folder().map(|path| path.to_string_lossy().to_string())
}

#[tauri::command]
fn select_data_folder(state: State<'_, AppState>) -> Result<PickFolderResult, String> {
    let Some(path) = pick_folder() else {
        return Ok(PickFolderResult {
            ok: false,
            canceled: true,
            path: None,
            error: None,
        });
    };
    let mut session = lock_session(&state)?;
    let error = session
        .set_data_folder(path.clone())
        .err()
        .map(|err| err.to_string());
    Ok(PickFolderResult {
        ok: error.is_none(),
        canceled: false,
        path: Some(path.to_string_lossy().to_string()),
        error,
    })
}

#[tauri::command]
fn set_language(
    state: State<'_, AppState>,
    payload: LanguageRequest,
) -> Result<SessionView, String> {
    let mut session = lock_session(&state)?;
    if let Err(err) = session.set_language(Language::from_code(payload.language.as_str())) {
        warn!(error = %err, "language preference not persisted");
    }
    Ok(session.snapshot())
}

#[tauri::command]
fn save_records(
    state: State<'_, AppState>,
    payload: SaveRecordsRequest,
) -> Result<SaveOutcome, String> {
    let folder = lock_session(&state)?.data_folder();
    Ok(bridge::save_records(
        folder.as_path(),
        payload.filename.as_str(),
        payload.content.as_str(),
    ))
}

#[tauri::command]
fn load_records(
    state: State<'_, AppState>,
    payload: LoadRecordsRequest,
) -> Result<LoadOutcome, String> {
    let folder = lock_session(&state)?.data_folder();
    Ok(bridge::load_records(folder.as_path(), payload.filename.as_str()))
}

#[tauri::command]
fn save_config(state: State<'_, AppState>, config: Config) -> ConfigOutcome {
    bridge::save_config(&state.config_store, &config)
}

#[tauri::command]
fn load_config(state: State<'_, AppState>) -> ConfigLoadOutcome {
    bridge::load_config(&state.config_store)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn config_store() -> ConfigStore {
    ConfigStore::at_home().unwrap_or_else(|err| {
        let fallback = std::env::temp_dir().join(".product-scanner-config.json");
        warn!(error = %err, path = %fallback.display(), "using fallback config location");
        ConfigStore::new(fallback)
    })
}

fn main() {
    init_tracing();

    let config_store = config_store();
    let session = Session::start(config_store.clone(), Arc::new(SystemClock));
    info!(
        configured = session.is_configured(),
        file = %session.today_file_name(),
        "session started"
    );
    let session = Arc::new(Mutex::new(session));
    let autosave_session = session.clone();

    tauri::Builder::default()
        .manage(AppState {
            session,
            config_store,
        })
        .setup(move |_app| {
            tauri::async_runtime::spawn(async move {
                let _ = persist::spawn_autosave(autosave_session, AUTOSAVE_INTERVAL).await;
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            session_snapshot,
            entry_input,
            entry_confirm,
            record_update,
            record_delete,
            save_now,
            select_folder,
            select_data_folder,
            set_language,
            save_records,
            load_records,
            save_config,
            load_config
        ])
        .run(tauri::generate_context!())
        .expect("failed to run Product Scanner");
}
