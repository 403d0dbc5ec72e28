//! HelpMeIUD API 클라이언트
//!
//! 모든 백엔드 호출은 [`ApiClient`] 파이프라인을 통과합니다. 파이프라인은
//! 세션 토큰을 붙여 요청을 보내고, 401/403 응답을 받으면 세션을 비운 뒤
//! 에러를 돌려줍니다.

pub mod auth;
pub mod config;
pub mod pipeline;
pub mod records;
pub mod request;
pub mod stack;
pub mod table;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::HttpAuthenticator;
pub use config::{ClientConfig, EnvOverrides};
pub use pipeline::ApiClient;
pub use records::{CasoService, DelitoService, RecordService};
pub use request::{ApiRequest, ApiResponse, OutgoingRequest};
pub use stack::ClientStack;
pub use table::{CasoTable, DelitoTable, Outcome, RecordTable};
pub use transport::{ReqwestTransport, Transport};
