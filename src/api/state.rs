use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::{Catalog, MovieProvider};
use crate::views::{Action, ImageUrls, SelectionState};

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);
const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub provider: Arc<dyn MovieProvider>,
    pub images: Arc<ImageUrls>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(catalog: Catalog, provider: Arc<dyn MovieProvider>, images: ImageUrls) -> Self {
        Self {
            catalog: Arc::new(catalog),
            provider,
            images: Arc::new(images),
            sessions: SessionStore::new(DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS),
        }
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }
}

/// What one browser session remembers between interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Title the current selection state belongs to
    pub title: Option<String>,
    pub selection: SelectionState,
    pub last_seen: Instant,
}

impl Session {
    fn new(now: Instant) -> Self {
        Self {
            title: None,
            selection: SelectionState::default(),
            last_seen: now,
        }
    }

    /// Selection state for `title`, reset when the user picked another movie
    pub fn selection_for(&self, title: &str) -> SelectionState {
        match &self.title {
            Some(current) if current.to_lowercase() == title.to_lowercase() => self.selection,
            _ => SelectionState::default(),
        }
    }
}

/// Sessions keyed by id, with idle expiry and a size cap
///
/// Every mutation happens under a single write guard, so concurrent requests
/// on one session apply their actions in turn and never resurrect a session
/// removed in the meantime.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Registers a new session, evicting idle or least recently seen ones first
    pub async fn create(&self) -> (Uuid, Session) {
        self.create_at(Instant::now()).await
    }

    async fn create_at(&self, now: Instant) -> (Uuid, Session) {
        let mut sessions = self.inner.write().await;
        self.evict(&mut sessions, now);

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    tracing::debug!(session_id = %id, "Session evicted, store full");
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let session = Session::new(now);
        sessions.insert(id, session.clone());
        (id, session)
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.inner.read().await.contains_key(&id)
    }

    pub async fn remove(&self, id: Uuid) -> Option<Session> {
        self.inner.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Points the session at `title`, applies `action` to its current state and
    /// returns the resulting state
    ///
    /// Returns `None` if the session no longer exists; it is not recreated.
    pub async fn record(
        &self,
        id: Uuid,
        title: &str,
        action: Option<Action>,
    ) -> Option<SelectionState> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id)?;

        let mut selection = session.selection_for(title);
        if let Some(action) = action {
            selection = selection.apply(action);
        }

        session.title = Some(title.to_string());
        session.selection = selection;
        session.last_seen = Instant::now();
        Some(selection)
    }

    /// Drops sessions idle for longer than the timeout, returns how many
    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now()).await
    }

    async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.inner.write().await;
        self.evict(&mut sessions, now)
    }

    fn evict(&self, sessions: &mut HashMap<Uuid, Session>, now: Instant) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| {
            now.saturating_duration_since(session.last_seen) < self.idle_timeout
        });
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Idle sessions evicted");
        }

        evicted
    }
}
