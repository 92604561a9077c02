//! Running scanner session.
//!
//! Owns the config, the entry cycle and today's record list. Mutations are
//! synchronous and hand back the [`SaveJob`] that rewrites today's file; the
//! caller decides where it runs (see [`crate::persist::spawn_save`]).

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::config::{default_data_folder, Config, ConfigStore};
use crate::day_file::{self, RecordFileStore};
use crate::entry::{Confirm, EntryMachine, PendingEntry};
use crate::error::{ConfigError, RecordError, StoreError};
use crate::i18n::{get_translations, Language};
use crate::persist::SaveJob;
use crate::records::{Record, RecordList};
use crate::schema::{Schema, TIMESTAMP_HEADER};

pub struct Session {
    config_store: ConfigStore,
    config: Config,
    machine: EntryMachine,
    records: RecordList,
    clock: Arc<dyn Clock>,
    /// Day file that failed to load and could not be moved aside.
    unreadable: Option<PathBuf>,
}

impl Session {
    /// Loads preferences, then today's day file.
    pub fn start(config_store: ConfigStore, clock: Arc<dyn Clock>) -> Self {
        let config = config_store.load().unwrap_or_default();
        let schema = Schema::new(config.field_set_or_default());
        let mut session = Self {
            config_store,
            config,
            machine: EntryMachine::new(schema),
            records: RecordList::new(),
            clock,
            unreadable: None,
        };
        match session.load_today() {
            Ok(records) => {
                info!(
                    count = records.len(),
                    folder = %session.data_folder().display(),
                    "loaded today's records"
                );
                session.records = RecordList::from_records(records);
            }
            Err(err) => {
                error!(error = %err, "failed to load today's records");
                session.unreadable = session.set_aside_today();
            }
        }
        session
    }

    /// Moves an unloadable day file out of the way. Returns its path when it
    /// is still in place, which blocks saves to it.
    fn set_aside_today(&self) -> Option<PathBuf> {
        let today = self.clock.today();
        let stamp = self.clock.now().format("%Y%m%dT%H%M%S%.3f").to_string();
        let store = self.file_store();
        match store.set_aside(today, &stamp) {
            Ok(_) => None,
            Err(err) => {
                error!(error = %err, "saves to today's file disabled");
                Some(store.path_for(today))
            }
        }
    }

    fn load_today(&self) -> Result<Vec<Record>, StoreError> {
        self.file_store().load(
            &self.schema(),
            self.clock.today(),
            self.clock.now_iso8601().as_str(),
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn schema(&self) -> Schema {
        self.machine.schema()
    }

    pub fn language(&self) -> Language {
        self.config.language_or_default()
    }

    /// True once the operator has picked a data folder.
    pub fn is_configured(&self) -> bool {
        self.config.data_folder.is_some()
    }

    pub fn data_folder(&self) -> PathBuf {
        self.config
            .data_folder
            .clone()
            .unwrap_or_else(default_data_folder)
    }

    pub fn file_store(&self) -> RecordFileStore {
        RecordFileStore::new(self.data_folder())
    }

    pub fn today_file_name(&self) -> String {
        day_file::file_name(self.clock.today())
    }

    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn pending(&self) -> &PendingEntry {
        self.machine.pending()
    }

    pub fn input(&mut self, value: impl Into<String>) {
        self.machine.input(value);
    }

    /// Confirm the active field. A commit appends the record to the list
    /// and comes with the job that writes it out.
    pub fn confirm(&mut self) -> (Confirm, Option<SaveJob>) {
        let outcome = self.machine.confirm(self.clock.as_ref());
        let Confirm::Committed(record) = &outcome else {
            return (outcome, None);
        };
        info!(id = %record.id, "record committed");
        self.records.append(record.clone());
        let job = self.rewrite_job();
        (outcome, job)
    }

    /// Edit one content field of a committed record, by field key.
    pub fn update_record(
        &mut self,
        index: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<Option<SaveJob>, RecordError> {
        let position = self
            .schema()
            .position(field)
            .ok_or_else(|| RecordError::UnknownField(field.to_string()))?;
        self.records
            .update(index, position, value.into())
            .inspect_err(|err| warn!(error = %err, "record update ignored"))?;
        Ok(self.rewrite_job())
    }

    pub fn delete_record(
        &mut self,
        index: usize,
    ) -> Result<(Record, Option<SaveJob>), RecordError> {
        let removed = self
            .records
            .delete(index)
            .inspect_err(|err| warn!(error = %err, "record delete ignored"))?;
        Ok((removed, self.rewrite_job()))
    }

    /// Full rewrite of today's file from the current list.
    pub fn save_job(&self) -> Result<SaveJob, StoreError> {
        let job = SaveJob {
            folder: self.data_folder(),
            filename: self.today_file_name(),
            content: day_file::encode(&self.schema(), self.records.as_slice())?,
        };
        if let Some(path) = self.unreadable.as_ref().filter(|path| **path == job.path()) {
            return Err(StoreError::Unreadable { path: path.clone() });
        }
        Ok(job)
    }

    fn rewrite_job(&self) -> Option<SaveJob> {
        self.save_job()
            .inspect_err(|err| error!(error = %err, "day file not rewritten"))
            .ok()
    }

    /// Job for the periodic save; nothing to do while the list is empty.
    pub fn autosave_job(&self) -> Option<SaveJob> {
        if self.records.is_empty() {
            return None;
        }
        self.save_job()
            .inspect_err(|err| error!(error = %err, "autosave skipped"))
            .ok()
    }

    /// Switch the data folder. Records stay in memory and go to the new
    /// folder with the next save.
    pub fn set_data_folder(&mut self, folder: PathBuf) -> Result<(), ConfigError> {
        info!(folder = %folder.display(), "data folder changed");
        self.update_config(move |config| config.data_folder = Some(folder.clone()))
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), ConfigError> {
        self.update_config(|config| config.language = Some(language))
    }

    /// Read-modify-write of the config file. The in-memory config changes
    /// even when the write fails.
    fn update_config(&mut self, change: impl Fn(&mut Config)) -> Result<(), ConfigError> {
        let mut stored = self
            .config_store
            .load()
            .unwrap_or_else(|| self.config.clone());
        change(&mut stored);
        change(&mut self.config);
        self.config_store.save(&stored)
    }

    pub fn snapshot(&self) -> SessionView {
        let t = get_translations(self.language());
        let schema = self.schema();
        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldView {
                key: field.key,
                label: t.field_label(field.key),
                prompt: t.field_prompt(field.key),
                placeholder: t.field_placeholder(field.key),
                required: field.required,
            })
            .collect();
        SessionView {
            configured: self.is_configured(),
            language: self.language(),
            data_folder: self.data_folder().to_string_lossy().to_string(),
            file_name: self.today_file_name(),
            fields,
            pending: self.pending().clone(),
            records: self.records.as_slice().to_vec(),
            texts: UiTexts {
                app_title: t.app_title(),
                setup_title: t.setup_title(),
                setup_description: t.setup_description(),
                select_data_folder: t.select_data_folder(),
                data_folder: t.data_folder(),
                total_entries: t.total_entries(),
                auto_save: t.auto_save(),
                no_entries: t.no_entries(),
                time: t.time(),
                timestamp_header: TIMESTAMP_HEADER,
                delete: t.delete(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    pub placeholder: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTexts {
    pub app_title: &'static str,
    pub setup_title: &'static str,
    pub setup_description: &'static str,
    pub select_data_folder: &'static str,
    pub data_folder: &'static str,
    pub total_entries: &'static str,
    pub auto_save: &'static str,
    pub no_entries: &'static str,
    pub time: &'static str,
    pub timestamp_header: &'static str,
    pub delete: &'static str,
}

/// Everything the UI needs to render the current state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub configured: bool,
    pub language: Language,
    pub data_folder: String,
    pub file_name: String,
    pub fields: Vec<FieldView>,
    pub pending: PendingEntry,
    pub records: Vec<Record>,
    pub texts: UiTexts,
}
