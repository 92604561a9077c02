//! One CSV file per calendar day.
//!
//! Layout: a header row (field headers then `Timestamp`), then one row per
//! record in list order. Every field is quoted and inner quotes are doubled,
//! so values may carry commas, quotes and line breaks. Files are always
//! rewritten whole from the in-memory list.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::records::{positional_id, Record};
use crate::schema::Schema;

const FILE_PREFIX: &str = "products-";
const FILE_EXTENSION: &str = "csv";

pub fn file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}{}.{FILE_EXTENSION}", date.format("%Y-%m-%d"))
}

pub fn encode(schema: &Schema, records: &[Record]) -> Result<String, StoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(schema.header_row())?;
    for record in records {
        let mut row: Vec<&str> = (0..schema.len()).map(|field| record.value(field)).collect();
        row.push(record.timestamp.as_str());
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    let mut content = String::from_utf8_lossy(&bytes).into_owned();
    // Rows are joined by newlines; no terminator after the last one.
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}

/// Best-effort parse of a day file.
///
/// Short rows are padded with empty values, rows without any content are
/// dropped, a missing timestamp becomes `now_iso`. Unreadable rows are skipped.
pub fn decode(schema: &Schema, content: &str, now_iso: &str) -> Vec<Record> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (position, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(position, error = %err, "skipping malformed day file row");
                continue;
            }
        };
        let values: Vec<String> = (0..schema.len())
            .map(|field| row.get(field).unwrap_or("").to_string())
            .collect();
        let timestamp = row
            .get(schema.len())
            .filter(|value| !value.is_empty())
            .unwrap_or(now_iso)
            .to_string();
        let record = Record {
            id: positional_id(position),
            values,
            timestamp,
        };
        if record.has_content() {
            records.push(record);
        }
    }
    records
}

/// Day files under one data folder.
#[derive(Debug, Clone)]
pub struct RecordFileStore {
    folder: PathBuf,
}

impl RecordFileStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.folder.join(file_name(date))
    }

    /// Records of `date`; a day without a file is an empty day.
    pub fn load(
        &self,
        schema: &Schema,
        date: NaiveDate,
        now_iso: &str,
    ) -> Result<Vec<Record>, StoreError> {
        let path = self.path_for(date);
        if !path.exists() {
            debug!(path = %path.display(), "no day file yet");
            return Ok(Vec::new());
        }
        let bytes = fs::read(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(path = %path.display(), "day file is not valid UTF-8; bad bytes replaced");
        }
        Ok(decode(schema, &content, now_iso))
    }

    /// Renames the day file of `date` to `<name>.unreadable-<stamp>` so a
    /// later save cannot clobber rows that failed to load.
    pub fn set_aside(&self, date: NaiveDate, stamp: &str) -> Result<PathBuf, StoreError> {
        let path = self.path_for(date);
        let target = self
            .folder
            .join(format!("{}.unreadable-{stamp}", file_name(date)));
        fs::rename(&path, &target).map_err(|source| StoreError::SetAside {
            path: path.clone(),
            source,
        })?;
        warn!(from = %path.display(), to = %target.display(), "unreadable day file set aside");
        Ok(target)
    }

    pub fn save(
        &self,
        schema: &Schema,
        date: NaiveDate,
        records: &[Record],
    ) -> Result<PathBuf, StoreError> {
        let path = self.path_for(date);
        let content = encode(schema, records)?;
        write_text_file(&path, &content).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

pub(crate) fn write_text_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
