//! HTTP 전송 계층
//!
//! 파이프라인은 [`Transport`]만 알고 있으며, 실제 네트워크 호출은
//! [`ReqwestTransport`]가 담당합니다.

use async_trait::async_trait;
use helpme_core::{Error, Result};
use reqwest::Client;

use crate::request::{ApiResponse, OutgoingRequest};

/// 요청을 보내고 상태 코드와 본문을 돌려받는 전송 계층
///
/// 상태 코드 해석은 하지 않습니다. 연결 실패 등 응답을 받지 못한 경우만
/// `Error::Transport`를 반환합니다.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: OutgoingRequest) -> Result<ApiResponse>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(transport_error)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(transport_error)?;
        Ok(ApiResponse::new(status, body))
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport {
        message: e.to_string(),
    }
}
