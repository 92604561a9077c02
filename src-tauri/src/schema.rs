//! Field sets the entry cycle walks through.
//!
//! A schema is an ordered list of content fields. The entry cycle visits them
//! in order, the day file stores them in order, followed by the timestamp.

use serde::{Deserialize, Serialize};

pub const TIMESTAMP_HEADER: &str = "Timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub header: &'static str,
    pub required: bool,
}

const PRODUCT_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "productCode",
        header: "Product Code",
        required: true,
    },
    FieldSpec {
        key: "lot",
        header: "Lot",
        required: true,
    },
    FieldSpec {
        key: "quantity",
        header: "Quantity",
        required: false,
    },
];

const SERIAL_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "serial",
        header: "Serial",
        required: true,
    },
    FieldSpec {
        key: "lot",
        header: "Lot",
        required: true,
    },
    FieldSpec {
        key: "notes",
        header: "Notes",
        required: false,
    },
];

/// Named field set stored in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSet {
    #[default]
    Product,
    Serial,
}

impl FieldSet {
    /// Unknown codes fall back to the default set.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "serial" => FieldSet::Serial,
            "product" => FieldSet::Product,
            _ => FieldSet::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    set: FieldSet,
    fields: &'static [FieldSpec],
}

impl Schema {
    pub fn new(set: FieldSet) -> Self {
        let fields: &'static [FieldSpec] = match set {
            FieldSet::Product => &PRODUCT_FIELDS,
            FieldSet::Serial => &SERIAL_FIELDS,
        };
        Self { set, fields }
    }

    pub fn set(&self) -> FieldSet {
        self.set
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&'static FieldSpec> {
        self.fields.get(index)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key == key)
    }

    /// Header row of the day file: content headers then the timestamp.
    pub fn header_row(&self) -> Vec<&'static str> {
        let mut row: Vec<&'static str> = self.fields.iter().map(|field| field.header).collect();
        row.push(TIMESTAMP_HEADER);
        row
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(FieldSet::default())
    }
}
