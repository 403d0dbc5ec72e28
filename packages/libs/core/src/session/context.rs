//! 세션 컨텍스트

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::watch;

use super::store::{KeyValueStore, MemoryStore};
use crate::error::{Error, Result};
use crate::models::UserIdentity;

/// 토큰이 저장되는 키
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// 사용자 정보(JSON)가 저장되는 키
pub const USER_KEY: &str = "user";

/// 현재 세션 스냅샷
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserIdentity>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// 세션 컨텍스트
///
/// 애플리케이션 시작 시 한 번 생성되어 파이프라인과 권한 게이트가 공유합니다.
/// 토큰과 사용자는 항상 한 번의 쓰기로 함께 바뀌며, 변경될 때마다
/// generation이 증가하고 identity 구독자에게 알림이 갑니다.
pub struct SessionContext {
    durable: Box<dyn KeyValueStore>,
    transient: MemoryStore,
    state: RwLock<Session>,
    generation: AtomicU64,
    identity_tx: watch::Sender<Option<UserIdentity>>,
}

impl SessionContext {
    /// 영속 저장소에서 세션 복원
    ///
    /// 토큰과 사용자 중 하나만 있거나 사용자 JSON을 해석할 수 없으면
    /// 손상된 세션으로 보고 저장소를 비운 뒤 로그아웃 상태로 시작합니다.
    pub fn open(durable: impl KeyValueStore + 'static) -> Result<Self> {
        let session = match load_session(&durable) {
            Ok(Some(session)) => session,
            Ok(None) => Session::default(),
            Err(Error::Json(e)) => {
                tracing::warn!("discarding corrupt persisted session: {}", e);
                durable.clear()?;
                Session::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self::with_state(Box::new(durable), session))
    }

    /// 메모리 전용 세션 (테스트, 일회성 실행용)
    pub fn in_memory() -> Self {
        Self::with_state(Box::new(MemoryStore::new()), Session::default())
    }

    fn with_state(durable: Box<dyn KeyValueStore>, session: Session) -> Self {
        let (identity_tx, _) = watch::channel(session.user.clone());
        Self {
            durable,
            transient: MemoryStore::new(),
            state: RwLock::new(session),
            generation: AtomicU64::new(0),
            identity_tx,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.read().user.clone()
    }

    /// 세션이 바뀔 때마다 증가하는 카운터
    ///
    /// 요청 전에 값을 기억해 두었다가 응답 후 비교하면, 그 사이에
    /// 로그아웃/재로그인이 있었는지 알 수 있습니다.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// 세션 범위 캐시. 세션이 지워지면 함께 비워집니다.
    pub fn transient(&self) -> &MemoryStore {
        &self.transient
    }

    /// 로그인 성공 시 토큰과 사용자를 함께 설정
    ///
    /// 영속화에 실패하면 메모리 상태도 바뀌지 않습니다.
    pub fn establish(&self, token: String, user: UserIdentity) -> Result<()> {
        let user_json = serde_json::to_string(&user)?;

        let mut state = self.write();
        self.durable
            .set_all(&[(AUTH_TOKEN_KEY, token.as_str()), (USER_KEY, user_json.as_str())])?;

        *state = Session {
            token: Some(token),
            user: Some(user.clone()),
        };
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.identity_tx.send_replace(Some(user));
        drop(state);

        tracing::debug!("session established");
        Ok(())
    }

    /// 세션 전체 삭제 (영속 저장소 + transient 캐시)
    ///
    /// 이미 비어 있으면 상태 변화도 알림도 없습니다. 영속 저장소 삭제가
    /// 실패해도 메모리 상태는 이미 비워진 뒤입니다.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.write();
        let was_active = !state.is_empty();

        *state = Session::default();
        self.transient.clear_entries();
        let persisted = self.durable.clear();

        if was_active {
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.identity_tx.send_replace(None);
            tracing::debug!("session cleared");
        }
        drop(state);

        persisted
    }

    /// 사용자 변경 구독
    pub fn watch(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.identity_tx.subscribe()
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_session(store: &dyn KeyValueStore) -> Result<Option<Session>> {
    let token = store.get(AUTH_TOKEN_KEY)?;
    let user = store.get(USER_KEY)?;

    match (token, user) {
        (None, None) => Ok(None),
        (Some(token), Some(user)) if !token.is_empty() => {
            let user: UserIdentity = serde_json::from_str(&user)?;
            Ok(Some(Session {
                token: Some(token),
                user: Some(user),
            }))
        }
        _ => {
            tracing::warn!("persisted session is incomplete; starting logged out");
            store.clear()?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FileStore;

    fn user(role: &str) -> UserIdentity {
        UserIdentity {
            id: 1,
            nombre: "Ana".to_string(),
            apellido: "Gómez".to_string(),
            role: role.to_string(),
            username: None,
        }
    }

    #[test]
    fn test_establish_and_clear() {
        let session = SessionContext::in_memory();
        assert!(session.snapshot().is_empty());
        assert_eq!(session.generation(), 0);

        session.establish("abc".to_string(), user("admin")).unwrap();
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert!(session.snapshot().is_authenticated());
        assert_eq!(session.generation(), 1);

        session.transient().insert("casos", "[]");
        session.clear().unwrap();
        assert!(session.snapshot().is_empty());
        assert!(session.transient().is_empty());
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let session = SessionContext::in_memory();
        session.establish("abc".to_string(), user("user")).unwrap();

        session.clear().unwrap();
        let generation = session.generation();
        session.clear().unwrap();

        assert!(session.snapshot().is_empty());
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn test_open_restores_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionContext::open(FileStore::new(&path)).unwrap();
        session.establish("abc".to_string(), user("admin")).unwrap();
        drop(session);

        let restored = SessionContext::open(FileStore::new(&path)).unwrap();
        assert_eq!(restored.token().as_deref(), Some("abc"));
        assert_eq!(restored.user().map(|u| u.role), Some("admin".to_string()));

        restored.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_open_discards_partial_session() {
        let store = MemoryStore::new();
        store.insert(AUTH_TOKEN_KEY, "abc");

        let session = SessionContext::open(store).unwrap();
        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_open_discards_undecodable_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::new(&path);
        store
            .set_all(&[(AUTH_TOKEN_KEY, "abc"), (USER_KEY, "{\"id\":")])
            .unwrap();

        let session = SessionContext::open(FileStore::new(&path)).unwrap();
        assert!(session.snapshot().is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_watch_reports_changes() {
        let session = SessionContext::in_memory();
        let mut rx = session.watch();

        session.establish("abc".to_string(), user("admin")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.id), Some(1));

        session.clear().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
