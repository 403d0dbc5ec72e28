//! 공통 에러 타입
//!
//! 클라이언트 전체에서 사용되는 에러 타입을 정의합니다.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// HelpMeIUD 클라이언트 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    /// 401/403 응답. 파이프라인이 세션을 비운 뒤 반환합니다.
    #[error("request rejected with HTTP {status}; session cleared")]
    Unauthorized { status: u16, body: String },

    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("not authorized: {reason}")]
    NotAuthorized { reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    // ─────────────────────────────────────────────────────────────────────────────
    // Transport Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("request failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("unexpected response: {message}")]
    UnexpectedResponse { message: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // IO/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 에러 분류
///
/// 호출자는 분류에 따라 재인증 안내, 필드 에러 표시, 일시적 실패 알림 중 하나를 선택합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 인증/인가 실패 (재로그인 필요)
    Authorization,
    /// 제출 전 클라이언트 검증 실패 (네트워크에 도달하지 않음)
    Validation,
    /// 네트워크/서버 실패 (사용자 재시도로 복구)
    Transient,
    /// 설정, 저장소 등 내부 문제
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthorized { .. }
            | Error::Authentication { .. }
            | Error::NotAuthorized { .. } => ErrorKind::Authorization,

            Error::Validation(_) => ErrorKind::Validation,

            Error::Status { .. } | Error::Transport { .. } | Error::UnexpectedResponse { .. } => {
                ErrorKind::Transient
            }

            Error::InvalidRequest { .. }
            | Error::Config { .. }
            | Error::Storage(_)
            | Error::Json(_) => ErrorKind::Internal,
        }
    }

    /// 응답 기반 에러의 HTTP 상태 코드
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { status, .. } | Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 에러 코드 (출력/로그용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Unauthorized { status: 403, .. } => "FORBIDDEN",
            Error::Unauthorized { .. } => "UNAUTHORIZED",
            Error::Authentication { .. } => "AUTHENTICATION_FAILED",
            Error::NotAuthorized { .. } => "NOT_AUTHORIZED",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Status { .. } => "HTTP_ERROR",
            Error::Transport { .. } => "TRANSPORT_ERROR",
            Error::UnexpectedResponse { .. } => "UNEXPECTED_RESPONSE",
            Error::InvalidRequest { .. } => "INVALID_REQUEST",
            Error::Config { .. } => "CONFIG_ERROR",
            Error::Storage(_) => "STORAGE_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        self.kind() == ErrorKind::Authorization
    }
}

/// 필드별 검증 에러 (필드 이름 → 메시지)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// 에러가 있으면 `Error::Validation`으로 변환
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}
