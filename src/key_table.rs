use dashmap::DashMap;

use crate::{Debouncer, QuiesceConfig, QuiesceError};
use std::{hash::Hash, sync::Arc, time::Duration};

/// Trait bound for keys of a [`KeyedDebouncer`].
///
/// Keys live in a concurrent map shared between threads, so they must be
/// `Send + Sync + 'static` on top of the usual map bounds. Blanket-implemented:
/// `usize`, `String`, `PathBuf`, `Arc<T>` and friends all qualify.
pub trait DebounceKey: Send + Sync + Clone + Hash + Eq + 'static {}

impl<T: Send + Sync + Clone + Hash + Eq + 'static> DebounceKey for T {}

/// A table of independent debouncers, one per key.
///
/// All entries share one delay and one configuration. A key's debouncer is
/// created on its first submission and lives until [`remove`](KeyedDebouncer::remove)
/// drops it. Typical use is coalescing per-path filesystem events before
/// kicking expensive downstream work.
///
/// Clones share the table.
///
/// ### Example
/// ```rust
/// use quiesce::{KeyedDebouncer, QuiesceConfig};
/// use std::time::Duration;
///
/// let reindex = KeyedDebouncer::new(Duration::from_millis(50), QuiesceConfig::default());
///
/// reindex.submit("config.toml", || println!("reindex config.toml")).unwrap();
/// reindex.submit("main.rs", || println!("reindex main.rs")).unwrap();
/// ```
pub struct KeyedDebouncer<K: DebounceKey> {
    table: Arc<DashMap<K, Debouncer>>,
    delay: Duration,
    config: QuiesceConfig,
}

impl<K: DebounceKey> Clone for KeyedDebouncer<K> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            delay: self.delay,
            config: self.config,
        }
    }
}

impl<K: DebounceKey> KeyedDebouncer<K> {
    pub fn new(delay: Duration, config: QuiesceConfig) -> Self {
        Self {
            table: Arc::new(DashMap::new()),
            delay,
            config,
        }
    }

    /// Debounces `action` under `key`, independently of every other key.
    ///
    /// The first submission for a key spawns that key's timer thread, which is
    /// the only step here that can fail.
    pub fn submit<F>(&self, key: K, action: F) -> Result<(), QuiesceError>
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(debouncer) = self.table.get(&key) {
            debouncer.submit(action);
            return Ok(());
        }

        let built = Debouncer::new(self.config).set_delay(self.delay).build()?;
        // Lost race with a concurrent first submission: or_insert keeps theirs.
        self.table.entry(key).or_insert(built).submit(action);
        Ok(())
    }

    /// Drops the debouncer under `key`, abandoning any action still waiting on
    /// its timer. Returns whether the key was present.
    pub fn remove(&self, key: &K) -> bool {
        self.table.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
