//! Background day file writes.
//!
//! Saves are fire-and-forget for the UI but every one is a tokio task, so
//! callers that care (tests, "save now") can await the outcome. Each job
//! carries the whole rendered file, so overlapping writes are last-write-wins.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, warn};

use crate::bridge::{self, SaveOutcome};
use crate::session::Session;

pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// A rendered day file and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveJob {
    pub folder: PathBuf,
    pub filename: String,
    pub content: String,
}

impl SaveJob {
    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }

    /// Blocking write.
    pub fn run(&self) -> SaveOutcome {
        bridge::save_records(&self.folder, &self.filename, &self.content)
    }
}

/// Runs the job on the blocking pool. Must be called inside a tokio runtime.
pub fn spawn_save(job: SaveJob) -> JoinHandle<SaveOutcome> {
    tokio::task::spawn_blocking(move || job.run())
}

/// One autosave pass: spawns a save when there are records.
pub fn autosave_tick(session: &Mutex<Session>) -> Option<JoinHandle<SaveOutcome>> {
    let job = match session.lock() {
        Ok(guard) => guard.autosave_job()?,
        Err(_) => {
            warn!("session lock poisoned; autosave skipped");
            return None;
        }
    };
    debug!(path = %job.path().display(), "autosave");
    Some(spawn_save(job))
}

/// Periodic autosave. The first pass runs one `period` after start.
pub fn spawn_autosave(session: Arc<Mutex<Session>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let Some(handle) = autosave_tick(&session) else {
                continue;
            };
            match handle.await {
                Ok(outcome) if !outcome.ok => {
                    warn!(error = ?outcome.error, "autosave failed");
                }
                Ok(_) => {}
                Err(err) => error!(error = %err, "autosave task panicked"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::{Config, ConfigStore};
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn session(dir: &tempfile::TempDir) -> Session {
        let store = ConfigStore::new(dir.path().join("config.json"));
        store
            .save(&Config {
                data_folder: Some(dir.path().join("scans")),
                ..Config::default()
            })
            .unwrap();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 7, 1, 14, 0, 0).unwrap());
        Session::start(store, Arc::new(clock))
    }

    fn commit(session: &mut Session, code: &str) -> SaveJob {
        let mut job = None;
        for value in [code, "LOT", ""] {
            session.input(value);
            job = session.confirm().1;
        }
        job.unwrap()
    }

    fn day_file(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("scans").join("products-2025-07-01.csv")
    }

    #[tokio::test]
    async fn background_save_completes_observably() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let job = commit(&mut session, "ABC");

        let outcome = spawn_save(job).await.unwrap();
        assert!(outcome.ok, "{outcome:?}");
        assert_eq!(outcome.path.as_deref(), day_file(&dir).to_str());
        assert!(fs::read_to_string(day_file(&dir)).unwrap().contains("\"ABC\""));
    }

    #[tokio::test]
    async fn later_save_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session(&dir);
        let first = spawn_save(commit(&mut session, "FIRST"));
        let second = commit(&mut session, "SECOND");
        first.await.unwrap();
        spawn_save(second).await.unwrap();

        let content = fs::read_to_string(day_file(&dir)).unwrap();
        assert!(content.contains("\"FIRST\""));
        assert!(content.contains("\"SECOND\""));
    }

    #[tokio::test]
    async fn autosave_tick_skips_empty_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let session = Mutex::new(session(&dir));
        assert!(autosave_tick(&session).is_none());

        commit(&mut session.lock().unwrap(), "ABC");
        let outcome = autosave_tick(&session).unwrap().await.unwrap();
        assert!(outcome.ok);
        assert!(day_file(&dir).is_file());
    }

    #[tokio::test]
    async fn autosave_loop_writes_periodically() {
        let dir = tempfile::tempdir().unwrap();
        let shared = Arc::new(Mutex::new(session(&dir)));
        commit(&mut shared.lock().unwrap(), "ABC");

        let task = spawn_autosave(shared.clone(), Duration::from_millis(20));
        let mut written = false;
        for _ in 0..200 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if day_file(&dir).is_file() {
                written = true;
                break;
            }
        }
        task.abort();
        assert!(written, "autosave never wrote the day file");
    }
}
