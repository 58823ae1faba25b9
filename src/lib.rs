//! # carkeep
//!
//! Keeps track of cars and their maintenance. Register cars with a model
//! year and an optional photo, schedule maintenance tasks, complete them
//! with a note, and look back at each car's history.
//!
//! Everything lives in one JSON document (`car_maintenance_data.json`) with
//! three top-level maps: `cars`, `maintenance` (pending tasks per car) and
//! `history` (completed tasks per car). Images are copied into an `uploads`
//! directory next to it.
//!
//! [`Garage`] is the entry point: open it once and pass it to whatever
//! presents the data. Each change re-reads the document and rewrites it in
//! full, so two processes editing at the same time overwrite each other's
//! changes; carkeep is meant for a single local user.

pub mod commands;
pub mod config;
pub mod due;
pub mod error;
pub mod garage;
pub mod logging;
pub mod maintenance;
pub mod models;
pub mod registry;
pub mod storage;
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};
pub use garage::Garage;
pub use logging::{init_logging, Verbosity};
pub use models::{Car, Dataset, MaintenanceTask};
pub use storage::{ImageUpload, JsonStore, UploadDir};
