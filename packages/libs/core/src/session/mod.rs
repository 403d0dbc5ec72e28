//! 세션 저장소 및 세션 컨텍스트
//!
//! # 개요
//!
//! 세션은 현재 인증 토큰과 사용자 정보의 쌍입니다. 두 값은 항상 함께 설정되고
//! 함께 지워집니다.
//!
//! - **Durable store**: 재시작 후에도 유지되는 키-값 저장소 (`authToken`, `user`)
//! - **Transient store**: 프로세스 수명 동안만 유지되는 캐시
//! - **SessionContext**: 두 저장소와 메모리 상태를 소유하는 단일 주체.
//!   파이프라인과 권한 게이트에 `Arc`로 주입됩니다.

mod context;
mod store;

pub use context::{Session, SessionContext, AUTH_TOKEN_KEY, USER_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
