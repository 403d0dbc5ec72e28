//! 테스트용 전송 계층

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use helpme_core::models::UserIdentity;
use helpme_core::{Error, Result};
use reqwest::StatusCode;
use serde_json::Value;

use crate::request::{ApiResponse, OutgoingRequest};
use crate::transport::Transport;

type Hook = Box<dyn Fn(&OutgoingRequest) + Send + Sync>;

/// 보낸 요청을 기록하고 미리 넣어둔 응답을 순서대로 돌려줍니다.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    responses: Mutex<VecDeque<std::result::Result<ApiResponse, String>>>,
    requests: Mutex<Vec<OutgoingRequest>>,
    hook: Mutex<Option<Hook>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body.into())));
    }

    pub(crate) fn respond_json(&self, status: u16, body: Value) {
        self.respond(status, body.to_string());
    }

    pub(crate) fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// 응답을 돌려주기 직전에 실행할 동작 (응답 지연 중 세션 변경 흉내)
    pub(crate) fn on_execute(&self, hook: impl Fn(&OutgoingRequest) + Send + Sync + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> OutgoingRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<ApiResponse> {
        if let Some(hook) = self.hook.lock().unwrap().as_ref() {
            hook(&request);
        }
        self.requests.lock().unwrap().push(request);

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(Error::Transport { message }),
            None => Err(Error::Transport {
                message: "no response queued".to_string(),
            }),
        }
    }
}

pub(crate) fn user(id: i64, role: &str) -> UserIdentity {
    UserIdentity {
        id,
        nombre: "Ana".to_string(),
        apellido: "Gómez".to_string(),
        role: role.to_string(),
        username: Some("ana".to_string()),
    }
}
