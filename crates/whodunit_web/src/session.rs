//! Server-side storage of generated kits.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;
use whodunit_core::MysteryKit;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "whodunit_session";

/// Sessions kept when no other capacity is configured.
pub const DEFAULT_MAX_SESSIONS: usize = 100;

/// A kit plus the location it was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredKit {
    /// The generated kit
    pub kit: MysteryKit,
    /// Location entered in the form
    pub location: String,
}

#[derive(Debug, Default)]
struct Sessions {
    kits: HashMap<Uuid, StoredKit>,
    /// Least recently stored first
    order: VecDeque<Uuid>,
}

/// Kits keyed by session id, shared by every request handler.
///
/// Holds at most `capacity` sessions; storing beyond that drops the session
/// whose kit was stored longest ago.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<Sessions>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// An empty store with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store keeping at most `capacity` sessions (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    /// Maximum number of sessions kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a kit under `id`, replacing any earlier kit of that session.
    pub async fn insert(&self, id: Uuid, stored: StoredKit) {
        let mut sessions = self.sessions.write().await;
        let replaced = sessions.kits.insert(id, stored).is_some();
        if replaced {
            sessions.order.retain(|existing| *existing != id);
        }
        sessions.order.push_back(id);

        while sessions.kits.len() > self.capacity {
            let Some(oldest) = sessions.order.pop_front() else {
                break;
            };
            sessions.kits.remove(&oldest);
            debug!(session = %oldest, "Evicted oldest session");
        }
        debug!(session = %id, replaced, stored = sessions.kits.len(), "Stored kit");
    }

    /// The kit of a session, if any.
    pub async fn get(&self, id: &Uuid) -> Option<StoredKit> {
        self.sessions.read().await.kits.get(id).cloned()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.kits.len()
    }

    /// Whether no session is stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.kits.is_empty()
    }
}

/// Session id from a `Cookie` header value.
///
/// # Examples
///
/// ```
/// use whodunit_web::session_from_cookie;
///
/// let id = "5a3b9a3e-0c3f-4d0e-9a43-6f1f1e2b7c11";
/// let header = format!("theme=dark; whodunit_session={}", id);
/// assert_eq!(session_from_cookie(&header).map(|u| u.to_string()), Some(id.to_string()));
/// assert!(session_from_cookie("whodunit_session=garbage").is_none());
/// ```
pub fn session_from_cookie(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session id.
pub fn session_cookie(id: &Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
