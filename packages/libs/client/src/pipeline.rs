//! 인증 요청 파이프라인
//!
//! 모든 요청은 같은 순서의 단계를 거칩니다.
//!
//! 1. URL 결정: base URL + 상대 경로
//! 2. 인증 헤더: 세션에 토큰이 있으면 `Authorization: Bearer <token>`
//! 3. 전송
//! 4. 응답 검사: 401/403이면 세션 전체 삭제 후 `Error::Unauthorized`
//!
//! 파이프라인은 재시도하지 않으며 화면 이동도 강제하지 않습니다.

use std::sync::Arc;

use helpme_core::session::SessionContext;
use helpme_core::{Error, Result};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::request::{ApiRequest, ApiResponse, OutgoingRequest};
use crate::transport::{ReqwestTransport, Transport};

/// 인증 API 클라이언트
///
/// 복제 비용이 낮으며 복제본은 같은 세션과 전송 계층을 공유합니다.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: Url,
    session: Arc<SessionContext>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionContext>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url: config.base_url.clone(),
                session,
                transport,
            }),
        }
    }

    /// reqwest 전송 계층 사용
    pub fn with_reqwest(config: &ClientConfig, session: Arc<SessionContext>) -> Self {
        Self::new(config, session, Arc::new(ReqwestTransport::new()))
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.inner.session
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    /// 요청 전송
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = resolve_url(&self.inner.base_url, &request.path)?;
        let outgoing = OutgoingRequest::new(request.method, url).with_body(request.body);
        let outgoing = self.attach_auth(outgoing)?;

        tracing::debug!(
            method = %outgoing.method,
            url = %outgoing.url,
            authenticated = outgoing.authorization().is_some(),
            "sending request"
        );

        let response = self.inner.transport.execute(outgoing).await?;
        self.inspect(response)
    }

    fn attach_auth(&self, mut outgoing: OutgoingRequest) -> Result<OutgoingRequest> {
        match self.inner.session.token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    Error::InvalidRequest {
                        message: "session token is not a valid header value".to_string(),
                    }
                })?;
                value.set_sensitive(true);
                outgoing.headers.insert(AUTHORIZATION, value);
            }
            None => {
                outgoing.headers.remove(AUTHORIZATION);
            }
        }
        Ok(outgoing)
    }

    fn inspect(&self, response: ApiResponse) -> Result<ApiResponse> {
        let status = response.status;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if let Err(e) = self.inner.session.clear() {
                tracing::warn!("failed to clear persisted session: {}", e);
            }
            tracing::warn!(status = status.as_u16(), "request rejected; session cleared");
            return Err(Error::Unauthorized {
                status: status.as_u16(),
                body: response.text(),
            });
        }

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: response.text(),
            });
        }

        Ok(response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::delete(path)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path).await?.json()
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post(path, body).await?.json()
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put(path, body).await?.json()
    }
}

/// base URL에 상대 경로를 붙입니다.
///
/// 절대 URL은 거부합니다. 파이프라인은 설정된 서버로만 요청을 보냅니다.
pub(crate) fn resolve_url(base: &Url, path: &str) -> Result<Url> {
    if path.contains("://") || path.starts_with("//") {
        return Err(Error::InvalidRequest {
            message: format!("expected a path relative to the base URL, got '{}'", path),
        });
    }

    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| Error::InvalidRequest {
        message: format!("invalid request path '{}': {}", path, e),
    })
}
