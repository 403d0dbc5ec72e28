//! 현재 사용자 identity

use tokio::sync::watch;

use crate::models::UserIdentity;

/// 권한 게이트가 계산한 현재 identity
///
/// 생성자는 크레이트 내부 전용이며 `is_admin`은 항상 사용자 정보에서 파생됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user: Option<UserIdentity>,
    is_admin: bool,
}

impl Identity {
    pub(crate) fn derive(user: Option<UserIdentity>, admin_role: &str) -> Self {
        let is_admin = user.as_ref().is_some_and(|u| u.has_role(admin_role));
        Self { user, is_admin }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_admin: false,
        }
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// 사용자 ID (로그아웃 상태면 None)
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// identity 변경 구독
///
/// 로그인, 로그아웃, 파이프라인에 의한 세션 삭제 모두 알림 대상입니다.
pub struct IdentityEvents {
    rx: watch::Receiver<Option<UserIdentity>>,
    admin_role: String,
}

impl IdentityEvents {
    pub(crate) fn new(rx: watch::Receiver<Option<UserIdentity>>, admin_role: String) -> Self {
        Self { rx, admin_role }
    }

    /// 다음 변경까지 대기
    ///
    /// 세션 컨텍스트가 사라지면 `None`을 반환합니다.
    pub async fn changed(&mut self) -> Option<Identity> {
        self.rx.changed().await.ok()?;
        let user = self.rx.borrow_and_update().clone();
        Some(Identity::derive(user, &self.admin_role))
    }

    /// 마지막으로 알려진 identity
    pub fn latest(&self) -> Identity {
        Identity::derive(self.rx.borrow().clone(), &self.admin_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_identity_derivation() {
        let identity = Identity::derive(Some(user("admin")), "admin");
        assert!(identity.is_admin());
        assert_eq!(identity.user_id(), Some(1));

        let identity = Identity::derive(Some(user("user")), "admin");
        assert!(identity.is_authenticated());
        assert!(!identity.is_admin());

        let identity = Identity::derive(None, "admin");
        assert!(!identity.is_admin());
        assert_eq!(identity, Identity::anonymous());
    }
}
