//! 인증/인가
//!
//! # 개요
//!
//! 인증 자체는 외부 서비스(`Authenticator`)에 위임하고, 이 모듈은 그 결과를
//! 세션에 반영하고 세션으로부터 "누가 로그인했는가 / 관리자인가"를 계산합니다.
//!
//! - **AuthGate**: 로그인/로그아웃, `current_identity()`, `require_admin()`
//! - **Identity**: `{ user, is_admin }`. 사용자 없이 `is_admin`이 참일 수 없음
//! - **IdentityEvents**: identity 변경 알림 구독

mod gate;
mod identity;

pub use gate::{AuthGate, Authenticator, Credentials, LoginGrant, DEFAULT_ADMIN_ROLE};
pub use identity::{Identity, IdentityEvents};
