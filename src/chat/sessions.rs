use lru::LruCache;
use nanoid::nanoid;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::chat::ChatDispatcher;

/// Thread-safe LRU registry of live chat sessions.
///
/// Each session maps a nanoid to its [`ChatDispatcher`]. Eviction of the
/// least recently used session is the server-side equivalent of the portal
/// page being torn down: the transcript simply ceases to exist.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<LruCache<String, Arc<ChatDispatcher>>>>,
}

impl SessionStore {
    /// # Panics
    /// Panics if capacity is 0.
    pub fn new(capacity: usize) -> Self {
        let sessions =
            LruCache::new(NonZeroUsize::new(capacity).expect("Capacity must be non-zero"));
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    /// Register a new session and return its generated id.
    pub fn create(&self, dispatcher: ChatDispatcher) -> (String, Arc<ChatDispatcher>) {
        let id = nanoid!();
        let dispatcher = Arc::new(dispatcher);
        self.sessions
            .lock()
            .unwrap()
            .put(id.clone(), dispatcher.clone());
        (id, dispatcher)
    }

    /// Look up a session, refreshing its recency.
    pub fn get(&self, id: &str) -> Option<Arc<ChatDispatcher>> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }
}
