//! 레코드 서비스
//!
//! `GET/POST {collection}`, `PUT/DELETE {collection}/{id}` 엔드포인트 호출.
//! 모든 호출은 [`ApiClient`] 파이프라인을 통과합니다.

use std::marker::PhantomData;

use helpme_core::models::{Caso, Delito, Record};
use helpme_core::{Error, Result};
use serde_json::Value;

use crate::pipeline::ApiClient;

pub type CasoService = RecordService<Caso>;
pub type DelitoService = RecordService<Delito>;

pub struct RecordService<R: Record> {
    api: ApiClient,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for RecordService<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<R: Record> RecordService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _record: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// 전체 목록
    ///
    /// 배열이 아닌 응답은 경고를 남기고 빈 목록으로 취급합니다.
    pub async fn list(&self) -> Result<Vec<R>> {
        let body: Value = self.api.get_json(R::COLLECTION).await?;
        let items = match body {
            Value::Array(items) => items,
            other => {
                tracing::warn!(
                    collection = R::COLLECTION,
                    kind = json_kind(&other),
                    "list response is not an array; treating as empty"
                );
                return Ok(Vec::new());
            }
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| Error::UnexpectedResponse {
                    message: format!("invalid {} entry: {}", R::COLLECTION, e),
                })
            })
            .collect()
    }

    /// 생성
    ///
    /// 2xx 응답이면 성공입니다. 서버가 돌려준 본문이 레코드로 해석될 때만
    /// `Some`을 반환합니다.
    pub async fn create(&self, draft: &R::Draft) -> Result<Option<R>> {
        R::check_draft(draft)?;
        let response = self.api.post(R::COLLECTION, draft).await?;
        match response.json::<R>() {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::debug!(
                    collection = R::COLLECTION,
                    status = response.status.as_u16(),
                    error = %e,
                    "create response carries no record"
                );
                Ok(None)
            }
        }
    }

    /// 수정 (레코드 전체를 보내고 서버 응답 반환)
    pub async fn update(&self, record: &R) -> Result<R> {
        self.api.put_json(&R::path_for(record.id()), record).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete(&R::path_for(id)).await?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
