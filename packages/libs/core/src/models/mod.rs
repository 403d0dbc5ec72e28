//! 도메인 레코드
//!
//! 백엔드와 그대로 주고받는 속성 묶음입니다. 클라이언트는 서버 검증 이상의
//! 구조적 불변식을 강제하지 않으며, 알 수 없는 속성은 `extra`에 보존되어
//! 수정 요청 시 그대로 돌려보냅니다.

mod caso;
mod delito;
mod user;

pub use caso::{Caso, NewCaso};
pub use delito::{Delito, DelitoAutor, NewDelito};
pub use user::UserIdentity;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// REST 컬렉션으로 노출되는 레코드
///
/// `GET/POST {COLLECTION}`, `PUT/DELETE {COLLECTION}/{id}` 형태의 엔드포인트를 가정합니다.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// 컬렉션 경로 (예: `/casos`)
    const COLLECTION: &'static str;

    /// 생성 요청 본문
    type Draft: Serialize + Send + Sync;

    fn id(&self) -> i64;

    /// 단일 레코드 경로
    fn path_for(id: i64) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }

    /// 생성 요청 전 검증 (실패하면 요청을 보내지 않음)
    fn check_draft(_draft: &Self::Draft) -> Result<()> {
        Ok(())
    }
}
