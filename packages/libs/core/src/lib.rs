//! helpme-core: HelpMeIUD 클라이언트 공통 핵심 라이브러리
//!
//! 이 크레이트는 API 클라이언트와 CLI가 공유하는 핵심 타입과 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `session`: 세션 저장소(토큰 + 사용자) 및 세션 컨텍스트
//! - `auth`: 권한 게이트 (로그인/로그아웃, `is_admin` 판정, identity 이벤트)
//! - `models`: 백엔드와 주고받는 도메인 레코드 (Caso, Delito, 사용자)
//! - `report`: 사건 신고 폼 상태 및 제출 전 검증
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;
pub mod models;
pub mod report;
pub mod session;

pub use error::{Error, ErrorKind, Result, ValidationErrors};
