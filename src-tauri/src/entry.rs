//! Scan cycle: one input per schema field, confirmed in order.
//!
//! The cursor names the field awaiting input. Confirming a required field
//! with an empty value is ignored. Confirming the last field commits the
//! pending values as a [`Record`] and starts over at the first field.

use serde::Serialize;

use crate::clock::Clock;
use crate::records::Record;
use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEntry {
    pub values: Vec<String>,
    pub cursor: usize,
}

impl PendingEntry {
    fn empty(len: usize) -> Self {
        Self {
            values: vec![String::new(); len],
            cursor: 0,
        }
    }

    pub fn active_value(&self) -> &str {
        self.values
            .get(self.cursor)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Result of a confirm action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    /// Required field still empty; nothing changed.
    Rejected,
    /// Cursor moved to the given field.
    Advanced(usize),
    Committed(Record),
}

#[derive(Debug, Clone)]
pub struct EntryMachine {
    schema: Schema,
    pending: PendingEntry,
}

impl EntryMachine {
    pub fn new(schema: Schema) -> Self {
        Self {
            pending: PendingEntry::empty(schema.len()),
            schema,
        }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn pending(&self) -> &PendingEntry {
        &self.pending
    }

    pub fn cursor(&self) -> usize {
        self.pending.cursor
    }

    /// Free-text edit of the active field.
    pub fn input(&mut self, value: impl Into<String>) {
        let cursor = self.pending.cursor;
        if let Some(slot) = self.pending.values.get_mut(cursor) {
            *slot = value.into();
        }
    }

    pub fn confirm(&mut self, clock: &dyn Clock) -> Confirm {
        let cursor = self.pending.cursor;
        let Some(field) = self.schema.field(cursor) else {
            return Confirm::Rejected;
        };
        if field.required && self.pending.active_value().is_empty() {
            return Confirm::Rejected;
        }

        if cursor + 1 < self.schema.len() {
            self.pending.cursor = cursor + 1;
            return Confirm::Advanced(self.pending.cursor);
        }

        let values = std::mem::take(&mut self.pending.values);
        let record = Record::new(values, clock.now_iso8601());
        self.reset();
        Confirm::Committed(record)
    }

    pub fn reset(&mut self) {
        self.pending = PendingEntry::empty(self.schema.len());
    }
}
