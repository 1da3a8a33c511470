//! Client-held session state.
//!
//! A [`SessionContext`] is the single source of truth for the current
//! identity. It mirrors a pluggable [`SessionStore`] so the session survives
//! restarts when a file store is used, and keeps the live copy behind an
//! atomic pointer so readers always see either the whole session or none.

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

use super::role::UserType;
use crate::models::UserSummary;

/// The four persisted values that make up a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub auth_token: String,
    pub token_type: String,
    pub user_role: String,
    /// Serialized [`UserSummary`]
    pub user_info: String,
}

impl StoredSession {
    /// Build the persisted form of a freshly logged-in user.
    pub fn new(
        token: impl Into<String>,
        token_type: impl Into<String>,
        user: &UserSummary,
    ) -> Result<Self, SessionStoreError> {
        Ok(Self {
            auth_token: token.into(),
            token_type: token_type.into(),
            user_role: user.user_type.clone(),
            user_info: serde_json::to_string(user)?,
        })
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Backing storage for the session
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;
    fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Process-local store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// Stores the session as one JSON file, replaced atomically on every save
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(&dir)?;

        // Write next to the target, then rename over it
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, session)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session transitions published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login stored a new session
    Established,
    /// The user logged out
    LoggedOut,
    /// The backend answered 401; the session was torn down
    Expired,
    /// Token validation failed; the session was torn down
    Invalidated,
}

/// Injectable owner of the current session
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: ArcSwapOption<StoredSession>,
    events: broadcast::Sender<SessionEvent>,
    /// Held across store write plus swap so the store and the live copy agree
    writer: Mutex<()>,
}

impl SessionContext {
    /// Create a context over `store`, restoring whatever it already holds.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored session");
                None
            }
        };
        let (events, _) = broadcast::channel(16);
        Self {
            store,
            current: ArcSwapOption::new(restored.map(Arc::new)),
            events,
            writer: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Persist and activate a session. On failure the previous session stays.
    pub fn establish(&self, session: StoredSession) -> Result<(), SessionStoreError> {
        let _writer = self.writer.lock();
        self.store.save(&session)?;
        self.current.store(Some(Arc::new(session)));
        tracing::debug!("Session established");
        let _ = self.events.send(SessionEvent::Established);
        Ok(())
    }

    /// Drop the whole session. Never fails; clearing twice is a no-op.
    pub fn clear(&self, reason: SessionEvent) {
        let _writer = self.writer.lock();
        let previous = self.current.swap(None);
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        if previous.is_some() {
            tracing::info!(reason = ?reason, "Session cleared");
            let _ = self.events.send(reason);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> Option<Arc<StoredSession>> {
        self.current.load_full()
    }

    /// Bearer token, if a non-empty one is held
    pub fn token(&self) -> Option<String> {
        self.current
            .load_full()
            .map(|s| s.auth_token.clone())
            .filter(|t| !t.is_empty())
    }

    /// Raw persisted role string
    pub fn role(&self) -> Option<String> {
        self.current.load_full().map(|s| s.user_role.clone())
    }

    /// Summary captured at login; `None` when absent or unparsable
    pub fn current_user(&self) -> Option<UserSummary> {
        let session = self.current.load_full()?;
        match serde_json::from_str(&session.user_info) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "Stored user summary is unparsable");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn has_role(&self, role: UserType) -> bool {
        self.parsed_role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[UserType]) -> bool {
        self.parsed_role().is_some_and(|r| roles.contains(&r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserType::Admin)
    }

    pub fn is_organizer(&self) -> bool {
        self.has_role(UserType::Organizer)
    }

    pub fn is_competitor(&self) -> bool {
        self.has_role(UserType::Competitor)
    }

    fn parsed_role(&self) -> Option<UserType> {
        let session = self.current.load_full()?;
        if session.auth_token.is_empty() {
            return None;
        }
        session.user_role.parse().ok()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("role", &self.role())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(role: &str) -> UserSummary {
        UserSummary {
            user_id: 7,
            email: "ana@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            user_type: role.to_string(),
        }
    }

    fn session(role: &str) -> StoredSession {
        StoredSession::new("tok-123", "Bearer", &summary(role)).unwrap()
    }

    #[test]
    fn test_role_predicates() {
        let ctx = SessionContext::in_memory();
        ctx.establish(session("ORGANIZER")).unwrap();

        assert!(ctx.is_authenticated());
        assert!(ctx.is_organizer());
        assert!(!ctx.is_admin());
        assert!(!ctx.is_competitor());
        assert!(ctx.has_role(UserType::Organizer));
        assert!(ctx.has_any_role(&[UserType::Admin, UserType::Organizer]));
        assert!(!ctx.has_any_role(&[UserType::Admin, UserType::Competitor]));
    }

    #[test]
    fn test_unknown_role_keeps_session_but_fails_predicates() {
        for role in ["JUDGE", "admin", "", " ADMIN"] {
            let ctx = SessionContext::in_memory();
            ctx.establish(session(role)).unwrap();

            assert!(ctx.is_authenticated(), "role {:?}", role);
            assert!(!ctx.is_admin());
            assert!(!ctx.is_organizer());
            assert!(!ctx.is_competitor());
            assert!(!ctx.has_any_role(&[
                UserType::Admin,
                UserType::Organizer,
                UserType::Competitor
            ]));
        }
    }

    #[test]
    fn test_predicates_false_without_token() {
        let ctx = SessionContext::in_memory();
        let mut stored = session("ADMIN");
        stored.auth_token.clear();
        ctx.establish(stored).unwrap();

        assert!(!ctx.is_authenticated());
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let ctx = SessionContext::in_memory();
        let mut events = ctx.subscribe();
        ctx.establish(session("ADMIN")).unwrap();

        ctx.clear(SessionEvent::LoggedOut);
        ctx.clear(SessionEvent::LoggedOut);

        assert!(!ctx.is_authenticated());
        assert!(ctx.current_user().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Established);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_unparsable_user_info() {
        let ctx = SessionContext::in_memory();
        let mut stored = session("COMPETITOR");
        stored.user_info = "{not json".to_string();
        ctx.establish(stored).unwrap();

        assert!(ctx.current_user().is_none());
        assert!(ctx.is_competitor());
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        {
            let ctx = SessionContext::new(Arc::new(FileSessionStore::new(&path)));
            ctx.establish(session("ADMIN")).unwrap();
        }

        let ctx = SessionContext::new(Arc::new(FileSessionStore::new(&path)));
        assert!(ctx.is_admin());
        assert_eq!(ctx.current_user(), Some(summary("ADMIN")));

        ctx.clear(SessionEvent::LoggedOut);
        assert!(!path.exists());
    }

    #[test]
    fn test_concurrent_establish_and_clear_agree_with_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileSessionStore::new(dir.path().join("session.json")));
        let ctx = SessionContext::new(store.clone());

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..200 {
                    ctx.establish(session("ADMIN")).unwrap();
                }
            });
            scope.spawn(|| {
                for _ in 0..200 {
                    ctx.clear(SessionEvent::Expired);
                }
            });
        });

        let persisted = store.load().unwrap();
        assert_eq!(persisted.is_some(), ctx.is_authenticated());
        assert_eq!(persisted.as_ref(), ctx.snapshot().as_deref());
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        let ctx = SessionContext::new(Arc::new(FileSessionStore::new(&path)));
        assert!(!ctx.is_authenticated());
    }

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
            Ok(None)
        }

        fn save(&self, _session: &StoredSession) -> Result<(), SessionStoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn clear(&self) -> Result<(), SessionStoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_failed_save_keeps_previous_state() {
        let ctx = SessionContext::new(Arc::new(BrokenStore));
        assert!(ctx.establish(session("ADMIN")).is_err());
        assert!(!ctx.is_authenticated());

        // Clearing never fails even when the store does
        ctx.clear(SessionEvent::LoggedOut);
    }
}
