//! Scene records stored in SQLite.
//!
//! The store only ever reads: the database is opened read-only and the one
//! query it issues lists the `scenes` table.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{RecordStore, SceneQuery, SceneRecord, SceneRows};
