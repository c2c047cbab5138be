//! Reactive data layer for an Olympic participation dashboard.
//!
//! ```text
//!   DatasetSource ──fetch──▶ DataStore ──watch──▶ Observer<T>
//!                                │
//!                                ▼ StoreSnapshot
//!                         stats / state ──▶ presenter
//! ```
//!
//! [`store::DataStore`] owns the dataset and publishes its load state;
//! [`stats`] derives the aggregates shown on the dashboard and details
//! pages; [`state`] turns a snapshot into the page a presenter renders.

pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod stats;
pub mod store;

pub use data::model::{Country, Dataset, Participation};
pub use data::source::{DatasetSource, FileSource, StaticSource};
pub use error::{ConfigError, LoadError};
pub use store::{DataStore, LoadResult, LoadStatus, Observer, StoreSnapshot, LOAD_ERROR_MESSAGE};
