//! HTTP 인증 서비스

use std::sync::Arc;

use async_trait::async_trait;
use helpme_core::auth::{Authenticator, Credentials, LoginGrant};
use helpme_core::models::UserIdentity;
use helpme_core::{Error, Result};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::pipeline::resolve_url;
use crate::request::OutgoingRequest;
use crate::transport::Transport;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    user: UserIdentity,
}

/// 로그인 엔드포인트 호출
///
/// 파이프라인을 거치지 않고 전송 계층을 직접 사용합니다. 잘못된 비밀번호로
/// 받은 401이 현재 세션을 지우면 안 되기 때문입니다.
pub struct HttpAuthenticator {
    login_url: Url,
    transport: Arc<dyn Transport>,
}

impl HttpAuthenticator {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            login_url: resolve_url(&config.base_url, &config.login_path)?,
            transport,
        })
    }

    pub fn login_url(&self) -> &Url {
        &self.login_url
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginGrant> {
        let body = serde_json::to_value(LoginRequest {
            username: &credentials.username,
            password: credentials.password(),
        })?;
        let request =
            OutgoingRequest::new(Method::POST, self.login_url.clone()).with_body(Some(body));

        let response = self.transport.execute(request).await?;
        if response.is_success() {
            let login: LoginResponse = response.json()?;
            return Ok(LoginGrant {
                token: login.token,
                user: login.user,
            });
        }

        match response.status.as_u16() {
            400 | 401 | 403 => {
                tracing::debug!(status = response.status.as_u16(), "login rejected");
                Err(Error::Authentication {
                    reason: "invalid username or password".to_string(),
                })
            }
            status => Err(Error::Status {
                status,
                body: response.text(),
            }),
        }
    }
}
