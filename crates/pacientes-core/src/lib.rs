//! Pacientes Core Library
//!
//! Local-first patient registry: a record store mirrored to a single JSON
//! document, a view controller over it, CSV export, and a versioned offline
//! cache for static assets.
//!
//! # Architecture
//!
//! ```text
//! user action (form submit / delete / search / export)
//!         │
//!         ▼
//!   ViewController ──── notices, rendered views
//!         │
//!         ▼
//!    RecordStore ──── in-memory collection
//!         │
//!         ▼
//!  StorageBackend ──── whole-document JSON overwrite
//!
//!  AssetCache (independent): install / fetch / activate over a
//!  version-named cache of static assets — never patient data.
//! ```
//!
//! # Core Principle
//!
//! One session owns the collection exclusively. Every mutation validates,
//! applies in memory, then rewrites the whole persisted document; malformed
//! stored data loads as an empty collection rather than failing startup.
//!
//! # Modules
//!
//! - [`models`]: domain types (Patient, PatientInput, ListFilter, summary)
//! - [`store`]: record store and storage backends
//! - [`format`]: CPF/phone/date display formatting and digit normalization
//! - [`export`]: CSV export of the collection
//! - [`cache`]: versioned offline asset cache
//! - [`view`]: pure render projections and the view controller

pub mod cache;
pub mod export;
pub mod format;
pub mod models;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use cache::{AssetCache, AssetSource, CacheError, DirSource};
pub use export::{CsvExport, ExportError};
pub use models::{ListFilter, Patient, PatientInput, PatientStatus, RegistrySummary};
pub use store::{RecordStore, StoreError};
pub use view::{FormOutcome, ListView, Notice, PatientDetails, PatientRow, ViewController};
