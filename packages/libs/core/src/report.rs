//! 사건 신고 폼
//!
//! 지도 선택기가 넘겨준 좌표와 사용자가 입력한 값을 모아 `NewCaso`를 만듭니다.
//! 검증은 제출 전 UX 목적이며 실패하면 네트워크 요청을 보내지 않습니다.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, ValidationErrors};
use crate::models::{NewCaso, UserIdentity};

/// `fecha_hora` 전송 형식 (datetime-local)
pub const FECHA_HORA_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// 지도 선택 결과
#[derive(Debug, Clone, PartialEq)]
pub struct MapSelection {
    pub lat: f64,
    pub lng: f64,
    pub map_url: String,
    pub rmi_url: String,
}

/// 신고 작성 중인 사건
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasoDraft {
    pub fecha_hora: Option<NaiveDateTime>,
    pub latitud: f64,
    pub longitud: f64,
    pub altitud: f64,
    pub descripcion: String,
    pub url_mapa: String,
    pub rmi_url: String,
    pub delito_id: Option<i64>,
    pub user_id: i64,
}

impl CasoDraft {
    /// 로그인 사용자 기준 빈 초안 (로그아웃 상태면 user_id = 0)
    pub fn for_user(user: Option<&UserIdentity>) -> Self {
        Self {
            user_id: user.map(|u| u.id).unwrap_or(0),
            ..Self::default()
        }
    }

    pub fn apply_map_selection(&mut self, selection: MapSelection) {
        self.latitud = selection.lat;
        self.longitud = selection.lng;
        self.url_mapa = selection.map_url;
        self.rmi_url = selection.rmi_url;
    }

    /// 제출 전 검증
    ///
    /// 사건 일시는 선택 항목이지만 `today` 이후 날짜는 허용하지 않습니다.
    pub fn validate(&self, today: NaiveDate) -> Result<NewCaso> {
        let mut errors = ValidationErrors::new();

        if self.descripcion.trim().is_empty() {
            errors.add("descripcion", "Descripción requerida");
        }
        if let Some(fecha_hora) = self.fecha_hora {
            if fecha_hora.date() > today {
                errors.add("fecha_hora", "No puede ser mayor a hoy");
            }
        }
        if self.url_mapa.trim().is_empty() {
            errors.add("mapa", "Ubique un punto en el mapa");
        }
        let delito_id = self.delito_id.filter(|id| *id > 0);
        if delito_id.is_none() {
            errors.add("delito_id", "Seleccione delito");
        }
        errors.into_result()?;

        Ok(NewCaso {
            fecha_hora: self
                .fecha_hora
                .map(|dt| dt.format(FECHA_HORA_FORMAT).to_string()),
            latitud: self.latitud,
            longitud: self.longitud,
            altitud: self.altitud,
            descripcion: self.descripcion.trim().to_string(),
            url_mapa: self.url_mapa.clone(),
            rmi_url: self.rmi_url.clone(),
            delito_id: delito_id.unwrap_or_default(),
            user_id: self.user_id,
        })
    }

    /// 제출 성공 후 초기화 (신고자 ID는 유지)
    pub fn reset(&mut self) {
        *self = Self {
            user_id: self.user_id,
            ..Self::default()
        };
    }
}

/// `fecha_hora` 입력 파싱
///
/// `2024-03-01T10:30`, `2024-03-01T10:30:00`, `2024-03-01 10:30` 형식을 받습니다.
pub fn parse_fecha_hora(input: &str) -> Option<NaiveDateTime> {
    let trimmed = input.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}
