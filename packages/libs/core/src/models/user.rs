use serde::{Deserialize, Serialize};

/// 로그인한 사용자
///
/// 세션이 단독으로 소유하며 다른 컴포넌트는 변경하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,

    #[serde(default)]
    pub nombre: String,

    #[serde(default)]
    pub apellido: String,

    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UserIdentity {
    /// 특정 role 보유 확인 (정확히 일치)
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// 표시용 이름 ("nombre apellido")
    pub fn display_name(&self) -> String {
        match (self.nombre.trim(), self.apellido.trim()) {
            ("", "") => self
                .username
                .clone()
                .unwrap_or_else(|| format!("#{}", self.id)),
            (nombre, "") => nombre.to_string(),
            ("", apellido) => apellido.to_string(),
            (nombre, apellido) => format!("{} {}", nombre, apellido),
        }
    }
}
