//! Product Scanner: barcode-driven data entry into one CSV file per day.
//!
//! The desktop shell (`main.rs`, feature `desktop`) forwards UI events to a
//! [`session::Session`]; everything below it is plain Rust and runs headless.

pub mod bridge;
pub mod clock;
pub mod config;
pub mod day_file;
pub mod entry;
pub mod error;
pub mod i18n;
pub mod persist;
pub mod records;
pub mod schema;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use config::{Config, ConfigStore};
pub use entry::Confirm;
pub use error::{ConfigError, RecordError, StoreError};
pub use i18n::Language;
pub use records::{Record, RecordList};
pub use schema::{FieldSet, Schema};
pub use session::{Session, SessionView};
