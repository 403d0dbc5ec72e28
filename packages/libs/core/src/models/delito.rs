use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;
use crate::error::{Result, ValidationErrors};

/// 범죄 유형 분류 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delito {
    pub id: i64,

    #[serde(default)]
    pub nombre: Option<String>,

    #[serde(default)]
    pub descripcion: Option<String>,

    /// 등록한 사용자
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<DelitoAutor>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelitoAutor {
    #[serde(default)]
    pub nombre: Option<String>,

    #[serde(default)]
    pub apellido: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Delito {
    pub fn nombre(&self) -> &str {
        self.nombre.as_deref().unwrap_or_default()
    }

    pub fn descripcion(&self) -> &str {
        self.descripcion.as_deref().unwrap_or_default()
    }

    pub fn creator(&self) -> String {
        let autor = self.usuario.as_ref();
        let nombre = autor.and_then(|u| u.nombre.as_deref()).unwrap_or_default();
        let apellido = autor.and_then(|u| u.apellido.as_deref()).unwrap_or_default();
        if nombre.is_empty() || apellido.is_empty() {
            "Desconocido".to_string()
        } else {
            format!("{} {}", nombre, apellido)
        }
    }
}

impl Record for Delito {
    const COLLECTION: &'static str = "/delitos";
    type Draft = NewDelito;

    fn id(&self) -> i64 {
        self.id
    }

    fn check_draft(draft: &NewDelito) -> Result<()> {
        draft.validate()
    }
}

/// 범죄 유형 생성 요청 본문
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewDelito {
    pub nombre: String,
    pub descripcion: String,
}

impl NewDelito {
    pub fn new(nombre: impl Into<String>, descripcion: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            descripcion: descripcion.into(),
        }
    }

    /// 제출 전 검증 (이름 필수)
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        if self.nombre.trim().is_empty() {
            errors.add("nombre", "Nombre requerido");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delito_creator() {
        let delito: Delito = serde_json::from_str(
            r#"{"id":1,"nombre":"Robo","descripcion":"Hurto","usuario":{"nombre":"Ana","apellido":"Gómez","id":3}}"#,
        )
        .unwrap();
        assert_eq!(delito.creator(), "Ana Gómez");

        let delito: Delito = serde_json::from_str(r#"{"id":1,"nombre":"Robo"}"#).unwrap();
        assert_eq!(delito.creator(), "Desconocido");
        assert_eq!(delito.descripcion(), "");
    }

    #[test]
    fn test_delito_keeps_null_attributes() {
        let raw = serde_json::json!({
            "id": 1,
            "nombre": "Robo",
            "descripcion": null,
            "usuario": {"nombre": "Ana", "apellido": null}
        });

        let delito: Delito = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(delito.nombre(), "Robo");
        assert_eq!(delito.descripcion, None);
        assert_eq!(delito.creator(), "Desconocido");

        assert_eq!(serde_json::to_value(&delito).unwrap(), raw);
    }

    #[test]
    fn test_new_delito_requires_nombre() {
        assert!(NewDelito::new("Robo", "").validate().is_ok());

        let err = NewDelito::new("  ", "Hurto").validate().unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
