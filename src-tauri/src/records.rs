//! Committed records and the ordered list the session edits.

use serde::Serialize;
use uuid::Uuid;

use crate::error::RecordError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    /// Content values in schema order.
    pub values: Vec<String>,
    pub timestamp: String,
}

impl Record {
    /// Record committed now, with a fresh identifier.
    pub fn new(values: Vec<String>, timestamp: String) -> Self {
        Self {
            id: new_id(),
            values,
            timestamp,
        }
    }

    pub fn value(&self, field: usize) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn has_content(&self) -> bool {
        self.values.iter().any(|value| !value.is_empty())
    }
}

pub fn new_id() -> String {
    format!("entry-{}", Uuid::new_v4().simple())
}

/// Identifier for a record read back from a day file, which stores none.
pub fn positional_id(position: usize) -> String {
    format!("entry-{position}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordList {
    records: Vec<Record>,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Replaces one content value. Missing trailing values are padded with
    /// empty strings so short rows loaded from disk stay editable.
    pub fn update(&mut self, index: usize, field: usize, value: String) -> Result<(), RecordError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange { index, len })?;
        if record.values.len() <= field {
            record.values.resize(field + 1, String::new());
        }
        record.values[field] = value;
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<Record, RecordError> {
        let len = self.records.len();
        if index >= len {
            return Err(RecordError::IndexOutOfRange { index, len });
        }
        Ok(self.records.remove(index))
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str) -> Record {
        Record::new(
            vec![code.to_string(), "L1".to_string(), String::new()],
            "2025-01-15T10:30:00.000Z".to_string(),
        )
    }

    fn sample() -> RecordList {
        RecordList::from_records(vec![record("A"), record("B"), record("C")])
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(record("A").id, record("A").id);
        assert!(record("A").id.starts_with("entry-"));
    }

    #[test]
    fn update_touches_only_target_field() {
        let mut list = sample();
        let before = list.clone();
        list.update(1, 2, "10".to_string()).unwrap();

        let changed = list.get(1).unwrap();
        assert_eq!(changed.values, vec!["B", "L1", "10"]);
        assert_eq!(changed.id, before.get(1).unwrap().id);
        assert_eq!(changed.timestamp, before.get(1).unwrap().timestamp);
        assert_eq!(list.get(0), before.get(0));
        assert_eq!(list.get(2), before.get(2));
    }

    #[test]
    fn delete_shifts_later_indices() {
        let mut list = sample();
        let removed = list.delete(0).unwrap();
        assert_eq!(removed.value(0), "A");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().value(0), "B");
    }

    #[test]
    fn out_of_range_edits_are_reported_and_leave_list_alone() {
        let mut list = sample();
        let before = list.clone();
        assert_eq!(
            list.update(3, 0, "X".to_string()),
            Err(RecordError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            list.delete(7).unwrap_err(),
            RecordError::IndexOutOfRange { index: 7, len: 3 }
        );
        assert_eq!(list, before);
    }

    #[test]
    fn update_pads_short_rows() {
        let mut list = RecordList::from_records(vec![Record::new(
            vec!["A".to_string()],
            "t".to_string(),
        )]);
        list.update(0, 2, "5".to_string()).unwrap();
        assert_eq!(list.get(0).unwrap().values, vec!["A", "", "5"]);
    }
}
