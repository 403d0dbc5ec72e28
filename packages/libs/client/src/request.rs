//! 요청/응답 타입

use bytes::Bytes;
use helpme_core::{Error, Result};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// 파이프라인 입력 (base URL 기준 상대 경로)
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// JSON 본문 설정
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// 전송 직전의 요청
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl OutgoingRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// `Authorization` 헤더 값
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// 전송 결과 (상태 코드 + 원본 본문)
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 본문 텍스트 (UTF-8이 아니면 손실 변환)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// 본문을 JSON으로 해석
    ///
    /// 빈 본문은 `null`로 취급합니다.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(bytes).map_err(|e| Error::UnexpectedResponse {
            message: format!("invalid JSON body (HTTP {}): {}", self.status.as_u16(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::delete("/casos/5");
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.path, "/casos/5");
        assert!(req.body.is_none());

        let req = ApiRequest::post("/delitos")
            .json(&json!({"nombre": "Robo"}))
            .unwrap();
        assert_eq!(req.body, Some(json!({"nombre": "Robo"})));
    }

    #[test]
    fn test_response_json() {
        let resp = ApiResponse::new(StatusCode::OK, r#"[{"id":1,"nombre":"Robo"}]"#);
        let value: Value = resp.json().unwrap();
        assert_eq!(value, json!([{"id": 1, "nombre": "Robo"}]));

        let empty = ApiResponse::new(StatusCode::NO_CONTENT, "");
        assert_eq!(empty.json::<Value>().unwrap(), Value::Null);

        let broken = ApiResponse::new(StatusCode::OK, "<html>");
        assert!(matches!(
            broken.json::<Value>(),
            Err(Error::UnexpectedResponse { .. })
        ));
    }
}
