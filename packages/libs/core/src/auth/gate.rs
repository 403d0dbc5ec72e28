//! 권한 게이트

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::identity::{Identity, IdentityEvents};
use crate::error::{Error, Result};
use crate::models::UserIdentity;
use crate::session::SessionContext;

/// 기본 관리자 role
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

/// 로그인 자격 증명
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 인증 성공 결과
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub token: String,
    pub user: UserIdentity,
}

/// 외부 인증 서비스
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// 자격 증명을 검증하고 토큰과 사용자 정보를 발급받습니다.
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant>;
}

/// 권한 게이트
///
/// 세션으로부터 현재 identity를 계산합니다. 세션은 다른 API 호출의 401/403
/// 응답으로 언제든 비워질 수 있으므로 스냅샷을 캐시하지 않고 매번 다시 계산합니다.
pub struct AuthGate {
    session: Arc<SessionContext>,
    authenticator: Arc<dyn Authenticator>,
    admin_role: String,
}

impl AuthGate {
    pub fn new(session: Arc<SessionContext>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            session,
            authenticator,
            admin_role: DEFAULT_ADMIN_ROLE.to_string(),
        }
    }

    /// 관리자 role 설정
    pub fn with_admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = role.into();
        self
    }

    pub fn admin_role(&self) -> &str {
        &self.admin_role
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn current_identity(&self) -> Identity {
        Identity::derive(self.session.user(), &self.admin_role)
    }

    /// 로그인
    ///
    /// 실패하면 기존 세션은 그대로 남습니다.
    pub async fn login(&self, credentials: Credentials) -> Result<Identity> {
        tracing::debug!(username = %credentials.username, "login requested");

        let grant = self.authenticator.authenticate(&credentials).await?;
        if grant.token.trim().is_empty() {
            return Err(Error::Authentication {
                reason: "authentication service returned an empty token".to_string(),
            });
        }

        self.session.establish(grant.token, grant.user)?;
        let identity = self.current_identity();
        tracing::info!(
            user_id = identity.user_id(),
            is_admin = identity.is_admin(),
            "logged in"
        );
        Ok(identity)
    }

    /// 로그아웃 (이미 로그아웃 상태면 아무 일도 하지 않음)
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    /// 관리자 전용 화면 진입 검사
    pub fn require_admin(&self) -> Result<Identity> {
        let identity = self.current_identity();
        if identity.is_admin() {
            return Ok(identity);
        }

        let reason = if identity.is_authenticated() {
            "administrator role required"
        } else {
            "not logged in"
        };
        Err(Error::NotAuthorized {
            reason: reason.to_string(),
        })
    }

    /// identity 변경 구독
    pub fn subscribe(&self) -> IdentityEvents {
        IdentityEvents::new(self.session.watch(), self.admin_role.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubAuthenticator {
        grant: Option<LoginGrant>,
    }

    #[async_trait]
    impl Authenticator for StubAuthenticator {
        async fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant> {
            match &self.grant {
                Some(grant) if credentials.password() == "secret" => Ok(grant.clone()),
                _ => Err(Error::Authentication {
                    reason: "invalid credentials".to_string(),
                }),
            }
        }
    }

    fn user(id: i64, role: &str) -> UserIdentity {
        UserIdentity {
            id,
            nombre: "Ana".to_string(),
            apellido: "Gómez".to_string(),
            role: role.to_string(),
            username: None,
        }
    }

    fn gate_with(token: &str, role: &str) -> AuthGate {
        let authenticator = StubAuthenticator {
            grant: Some(LoginGrant {
                token: token.to_string(),
                user: user(1, role),
            }),
        };
        AuthGate::new(Arc::new(SessionContext::in_memory()), Arc::new(authenticator))
    }

    #[tokio::test]
    async fn test_login_sets_token_and_user() {
        let gate = gate_with("abc", "admin");

        let identity = gate.login(Credentials::new("ana", "secret")).await.unwrap();
        assert!(identity.is_admin());

        let session = gate.session().snapshot();
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.user.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let gate = gate_with("new-token", "admin");
        gate.session()
            .establish("old-token".to_string(), user(9, "user"))
            .unwrap();

        let err = gate
            .login(Credentials::new("ana", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));

        let session = gate.session().snapshot();
        assert_eq!(session.token.as_deref(), Some("old-token"));
        assert_eq!(session.user.map(|u| u.id), Some(9));
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let gate = gate_with("  ", "admin");

        let err = gate
            .login(Credentials::new("ana", "secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
        assert!(gate.session().snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let gate = gate_with("abc", "admin");
        gate.login(Credentials::new("ana", "secret")).await.unwrap();

        gate.logout().unwrap();
        let once = gate.session().snapshot();
        gate.logout().unwrap();
        let twice = gate.session().snapshot();

        assert_eq!(once, twice);
        assert_eq!(gate.current_identity(), Identity::anonymous());
    }

    #[tokio::test]
    async fn test_identity_recomputed_after_external_clear() {
        let gate = gate_with("abc", "admin");
        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        assert!(gate.current_identity().is_admin());

        // 다른 요청의 403 처리로 세션이 비워진 경우
        gate.session().clear().unwrap();
        let identity = gate.current_identity();
        assert!(!identity.is_admin());
        assert!(identity.user().is_none());
    }

    #[tokio::test]
    async fn test_admin_role_is_configurable() {
        let gate = gate_with("abc", "ADMIN").with_admin_role("ADMIN");
        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        assert!(gate.current_identity().is_admin());

        let gate = gate_with("abc", "ADMIN");
        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        assert!(!gate.current_identity().is_admin());
    }

    #[tokio::test]
    async fn test_require_admin() {
        let gate = gate_with("abc", "user");
        let err = gate.require_admin().unwrap_err();
        assert!(matches!(err, Error::NotAuthorized { .. }));

        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        assert!(gate.require_admin().is_err());

        let gate = gate_with("abc", "admin");
        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        assert!(gate.require_admin().unwrap().is_admin());
    }

    #[tokio::test]
    async fn test_subscribers_see_login_logout_and_clear() {
        let gate = gate_with("abc", "admin");
        let mut events = gate.subscribe();
        assert_eq!(events.latest(), Identity::anonymous());

        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        let identity = events.changed().await.unwrap();
        assert!(identity.is_admin());

        gate.logout().unwrap();
        let identity = events.changed().await.unwrap();
        assert!(!identity.is_authenticated());

        gate.login(Credentials::new("ana", "secret")).await.unwrap();
        events.changed().await.unwrap();
        gate.session().clear().unwrap();
        assert_eq!(events.changed().await.unwrap(), Identity::anonymous());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("ana", "secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ana"));
        assert!(!debug.contains("secret"));
    }
}
