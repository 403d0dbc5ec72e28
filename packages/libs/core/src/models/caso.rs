use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

/// 신고된 사건 (목록/수정용 형태, camelCase)
///
/// 서버가 항상 보내는 속성도 `null`일 수 있으므로 `Option`으로 받고,
/// 수정 요청 시 `null` 그대로 돌려보냅니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caso {
    pub id: i64,

    #[serde(default)]
    pub fecha_hora: Option<String>,

    #[serde(default)]
    pub latitud: Option<f64>,

    #[serde(default)]
    pub longitud: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitud: Option<f64>,

    #[serde(default)]
    pub visible: Option<bool>,

    #[serde(default)]
    pub descripcion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_mapa: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmi_url: Option<String>,

    /// 신고한 사용자 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// 서버가 보낸 나머지 속성 (수정 시 그대로 반환)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Caso {
    pub fn reporter(&self) -> &str {
        self.username.as_deref().unwrap_or("Desconocido")
    }

    /// 공개 여부 (`null`은 비공개로 취급)
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(false)
    }
}

impl Record for Caso {
    const COLLECTION: &'static str = "/casos";
    type Draft = NewCaso;

    fn id(&self) -> i64 {
        self.id
    }
}

/// 사건 신고 요청 본문 (snake_case)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCaso {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_hora: Option<String>,
    pub latitud: f64,
    pub longitud: f64,
    pub altitud: f64,
    pub descripcion: String,
    pub url_mapa: String,
    pub rmi_url: String,
    pub delito_id: i64,
    pub user_id: i64,
}
