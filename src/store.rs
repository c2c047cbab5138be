//! The data store: single owner of the dataset and its load state.
//!
//! [`DataStore`] performs the one-time load from a [`DatasetSource`] and
//! publishes every state change through a [`tokio::sync::watch`] channel.
//! Dataset, error message and load status travel together in one
//! [`StoreSnapshot`], so a subscriber can never observe fresh data next to a
//! stale error.
//!
//! # Lifecycle
//!
//! The store is an ordinary owned value, typically shared behind an `Arc`.
//! Dropping it ends every [`Observer`] stream.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, error, info};
use tokio::sync::{watch, Mutex};

use crate::data::model::Dataset;
use crate::data::source::DatasetSource;

/// Message published when a load attempt fails, whatever the cause.
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load the Olympic data. Please try again later.";

/// Where the store is in its load lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// `load()` has not been called yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl LoadStatus {
    /// Whether a load attempt has finished, successfully or not.
    pub fn is_settled(self) -> bool {
        matches!(self, LoadStatus::Loaded | LoadStatus::Failed)
    }
}

/// Everything the store publishes, as one consistent value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub status: LoadStatus,
    /// `None` until the first attempt settles; the empty dataset after a failure.
    pub dataset: Option<Arc<Dataset>>,
    pub error: Option<String>,
}

/// Outcome of [`DataStore::load`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResult {
    /// The source was queried and returned a dataset.
    Fetched(Arc<Dataset>),
    /// A previous load succeeded; the source was not queried again.
    Cached(Arc<Dataset>),
    /// The source failed; carries the published error message.
    Failed(String),
}

impl LoadResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, LoadResult::Failed(_))
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            LoadResult::Fetched(ds) | LoadResult::Cached(ds) => Some(ds),
            LoadResult::Failed(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DataStore
// ---------------------------------------------------------------------------

/// Owns the canonical dataset and exposes it as replay-latest state.
pub struct DataStore {
    source: Box<dyn DatasetSource>,
    state: watch::Sender<StoreSnapshot>,
    /// Serialises `load()` so concurrent callers never fetch twice.
    load_lock: Mutex<()>,
}

impl DataStore {
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    pub fn from_boxed(source: Box<dyn DatasetSource>) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            source,
            state,
            load_lock: Mutex::new(()),
        }
    }

    /// Load the dataset once.
    ///
    /// After a successful load every further call returns the cached
    /// dataset without touching the source. After a failure the next call
    /// fetches again. Failures are logged and published, never returned as
    /// an error.
    pub async fn load(&self) -> LoadResult {
        let _guard = self.load_lock.lock().await;

        if let Some(dataset) = self.cached() {
            debug!("dataset already loaded, skipping fetch");
            return LoadResult::Cached(dataset);
        }

        let in_flight = InFlight::start(&self.state);
        let fetched = self.source.fetch().await;
        in_flight.finish();

        match fetched {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                info!(
                    "Loaded {} countries from {}",
                    dataset.len(),
                    self.source.describe()
                );
                let published = Arc::clone(&dataset);
                self.state.send_modify(move |s| {
                    s.status = LoadStatus::Loaded;
                    s.dataset = Some(published);
                    s.error = None;
                });
                LoadResult::Fetched(dataset)
            }
            Err(e) => {
                error!(
                    "Failed to load dataset from {}: {:#}",
                    self.source.describe(),
                    anyhow::Error::new(e)
                );
                self.state.send_modify(|s| {
                    s.status = LoadStatus::Failed;
                    s.dataset = Some(Arc::new(Dataset::default()));
                    s.error = Some(LOAD_ERROR_MESSAGE.to_string());
                });
                LoadResult::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        }
    }

    fn cached(&self) -> Option<Arc<Dataset>> {
        let current = self.state.borrow();
        match current.status {
            LoadStatus::Loaded => current.dataset.clone(),
            _ => None,
        }
    }

    /// Current state, without subscribing.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    pub fn observe(&self) -> Observer<StoreSnapshot> {
        Observer::new(self.state.subscribe(), StoreSnapshot::clone)
    }

    /// The dataset: `None` until loaded, empty after a failed load.
    pub fn observe_dataset(&self) -> Observer<Option<Arc<Dataset>>> {
        Observer::new(self.state.subscribe(), |s| s.dataset.clone())
    }

    pub fn observe_error(&self) -> Observer<Option<String>> {
        Observer::new(self.state.subscribe(), |s| s.error.clone())
    }

    pub fn observe_status(&self) -> Observer<LoadStatus> {
        Observer::new(self.state.subscribe(), |s| s.status)
    }
}

/// Marks a fetch as in flight. Dropped before [`InFlight::finish`] (the
/// `load()` future was cancelled), it puts the previous status back.
struct InFlight<'a> {
    state: &'a watch::Sender<StoreSnapshot>,
    previous: LoadStatus,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a watch::Sender<StoreSnapshot>) -> Self {
        let previous = state.borrow().status;
        state.send_modify(|s| s.status = LoadStatus::Loading);
        Self {
            state,
            previous,
            armed: true,
        }
    }

    fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let previous = self.previous;
            debug!("load cancelled mid-fetch, status back to {previous:?}");
            self.state.send_modify(|s| s.status = previous);
        }
    }
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// A replay-latest view over one projection of the store state.
///
/// The latest value is always available through [`Observer::current`];
/// [`Observer::changed`] only wakes up when the projected value differs from
/// the last one this observer handed out.
pub struct Observer<T> {
    rx: watch::Receiver<StoreSnapshot>,
    project: fn(&StoreSnapshot) -> T,
    last: T,
}

impl<T: Clone + PartialEq> Observer<T> {
    fn new(mut rx: watch::Receiver<StoreSnapshot>, project: fn(&StoreSnapshot) -> T) -> Self {
        let last = project(&rx.borrow_and_update());
        Self { rx, project, last }
    }

    /// The most recent value.
    pub fn current(&self) -> T {
        (self.project)(&self.rx.borrow())
    }

    /// Wait for the next distinct value. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            let next = (self.project)(&self.rx.borrow_and_update());
            if next != self.last {
                self.last = next.clone();
                return Some(next);
            }
        }
    }

    /// The latest value immediately, then every distinct update.
    pub fn into_stream(mut self) -> BoxStream<'static, T>
    where
        T: Send + Sync + 'static,
    {
        let first = (self.project)(&self.rx.borrow_and_update());
        self.last = first.clone();
        let rest = stream::unfold(self, |mut obs| async move {
            let next = obs.changed().await?;
            Some((next, obs))
        });
        stream::once(async move { first }).chain(rest).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::StaticSource;

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let store = DataStore::new(StaticSource::new(Dataset::default()));
        assert_eq!(store.snapshot(), StoreSnapshot::default());
        assert_eq!(store.observe_dataset().current(), None);
        assert_eq!(store.observe_error().current(), None);
        assert_eq!(store.observe_status().current(), LoadStatus::Idle);
    }

    #[tokio::test]
    async fn failure_publishes_empty_dataset_and_message() {
        let store = DataStore::new(StaticSource::failing("offline"));
        let result = store.load().await;

        assert_eq!(result, LoadResult::Failed(LOAD_ERROR_MESSAGE.to_string()));
        assert!(!result.is_success());
        assert!(result.dataset().is_none());

        let snap = store.snapshot();
        assert_eq!(snap.status, LoadStatus::Failed);
        assert!(snap.dataset.unwrap().is_empty());
        assert_eq!(snap.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn cancelled_retry_keeps_failure_state() {
        struct Hang;

        #[async_trait::async_trait]
        impl DatasetSource for Hang {
            async fn fetch(&self) -> Result<Dataset, crate::error::LoadError> {
                std::future::pending().await
            }

            fn describe(&self) -> String {
                "hang".into()
            }
        }

        let store = DataStore::new(Hang);
        store.state.send_modify(|s| {
            s.status = LoadStatus::Failed;
            s.dataset = Some(Arc::new(Dataset::default()));
            s.error = Some(LOAD_ERROR_MESSAGE.to_string());
        });
        let before = store.snapshot();

        let timed_out = tokio::time::timeout(std::time::Duration::from_millis(20), store.load()).await;
        assert!(timed_out.is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn status_settles() {
        assert!(!LoadStatus::Idle.is_settled());
        assert!(!LoadStatus::Loading.is_settled());
        assert!(LoadStatus::Loaded.is_settled());
        assert!(LoadStatus::Failed.is_settled());
    }
}
