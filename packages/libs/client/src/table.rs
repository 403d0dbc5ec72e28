//! 관리자 화면의 레코드 목록 상태
//!
//! 로컬 행은 서버 응답으로만 갱신됩니다. 생성된 행은 서버가 돌려준 값,
//! 수정된 행은 서버 응답으로 교체, 삭제는 서버 확인 후에만 제거합니다.
//!
//! 요청 중에 세션이 바뀌면(로그아웃, 401/403으로 인한 삭제, 재로그인)
//! 늦게 도착한 응답은 적용하지 않고 [`Outcome::Stale`]을 돌려줍니다.

use std::sync::Arc;

use helpme_core::auth::AuthGate;
use helpme_core::models::{Caso, Delito, Record};
use helpme_core::Result;

use crate::records::RecordService;

pub type CasoTable = RecordTable<Caso>;
pub type DelitoTable = RecordTable<Delito>;

/// 테이블 작업 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// 응답이 로컬 상태에 반영됨
    Applied(T),
    /// 요청 중 세션이 바뀌어 응답을 버림
    Stale,
}

impl<T> Outcome<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Outcome::Stale)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Stale => None,
        }
    }
}

pub struct RecordTable<R: Record> {
    service: RecordService<R>,
    gate: Arc<AuthGate>,
    rows: Vec<R>,
}

impl<R: Record> RecordTable<R> {
    pub fn new(service: RecordService<R>, gate: Arc<AuthGate>) -> Self {
        Self {
            service,
            gate,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// 목록 새로고침
    pub async fn load(&mut self) -> Result<Outcome<usize>> {
        let generation = self.begin()?;
        let rows = self.service.list().await?;
        if self.is_stale(generation) {
            return Ok(Outcome::Stale);
        }

        self.rows = rows;
        Ok(Outcome::Applied(self.rows.len()))
    }

    /// 생성
    ///
    /// 서버가 레코드를 돌려주지 않으면 목록을 다시 받아 로컬 행을 맞춥니다.
    pub async fn create(&mut self, draft: &R::Draft) -> Result<Outcome<Option<R>>> {
        let generation = self.begin()?;
        let created = self.service.create(draft).await?;
        if self.is_stale(generation) {
            return Ok(Outcome::Stale);
        }

        match created {
            Some(created) => {
                self.rows.push(created.clone());
                Ok(Outcome::Applied(Some(created)))
            }
            None => {
                let rows = self.service.list().await?;
                if self.is_stale(generation) {
                    return Ok(Outcome::Stale);
                }
                self.rows = rows;
                Ok(Outcome::Applied(None))
            }
        }
    }

    pub async fn update(&mut self, record: &R) -> Result<Outcome<R>> {
        let generation = self.begin()?;
        let updated = self.service.update(record).await?;
        if self.is_stale(generation) {
            return Ok(Outcome::Stale);
        }

        match self.rows.iter_mut().find(|row| row.id() == updated.id()) {
            Some(row) => *row = updated.clone(),
            None => self.rows.push(updated.clone()),
        }
        Ok(Outcome::Applied(updated))
    }

    pub async fn delete(&mut self, id: i64) -> Result<Outcome<i64>> {
        let generation = self.begin()?;
        self.service.delete(id).await?;
        if self.is_stale(generation) {
            return Ok(Outcome::Stale);
        }

        self.rows.retain(|row| row.id() != id);
        Ok(Outcome::Applied(id))
    }

    /// 관리자 확인 후 현재 세션 generation 기록
    fn begin(&self) -> Result<u64> {
        self.gate.require_admin()?;
        Ok(self.gate.session().generation())
    }

    fn is_stale(&self, generation: u64) -> bool {
        let stale = self.gate.session().generation() != generation;
        if stale {
            tracing::debug!(
                collection = R::COLLECTION,
                "session changed during request; discarding response"
            );
        }
        stale
    }
}
