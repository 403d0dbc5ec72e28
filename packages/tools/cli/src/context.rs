//! 실행 컨텍스트
//!
//! 설정을 결정하고 `~/.helpme/session.json` 세션을 복원해 클라이언트를 조립합니다.

use helpme_client::ClientStack;
use helpme_core::session::{FileStore, SessionContext};

use crate::commands::output::OutputFormat;
use crate::config::CliConfig;

/// 명령 실행에 필요한 모든 것
pub struct AppContext {
    pub stack: ClientStack,
    pub format: OutputFormat,
}

/// 컨텍스트 결정 (CLI 옵션 > 설정 파일 > 환경변수)
pub fn resolve_context(
    config: &CliConfig,
    base_url: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<AppContext> {
    let client_config = config.client_config(base_url)?;
    let store = FileStore::new(CliConfig::session_path()?);
    let stack = ClientStack::open(&client_config, store)?;

    tracing::debug!(base_url = %client_config.base_url, "client configured");
    Ok(AppContext { stack, format })
}

/// 서버 설정 없이 세션만 열기 (로그아웃용)
pub fn open_session() -> anyhow::Result<SessionContext> {
    let store = FileStore::new(CliConfig::session_path()?);
    Ok(SessionContext::open(store)?)
}
