//! 클라이언트 구성 요소 조립
//!
//! 세션 컨텍스트 하나를 만들어 파이프라인과 권한 게이트가 공유하도록 연결합니다.

use std::sync::Arc;

use helpme_core::auth::AuthGate;
use helpme_core::session::{KeyValueStore, SessionContext};
use helpme_core::Result;

use crate::auth::HttpAuthenticator;
use crate::config::ClientConfig;
use crate::pipeline::ApiClient;
use crate::records::{CasoService, DelitoService};
use crate::table::{CasoTable, DelitoTable};
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct ClientStack {
    session: Arc<SessionContext>,
    gate: Arc<AuthGate>,
    api: ApiClient,
}

impl ClientStack {
    /// 영속 저장소에서 세션을 복원하고 reqwest 전송 계층으로 조립
    pub fn open(config: &ClientConfig, store: impl KeyValueStore + 'static) -> Result<Self> {
        let session = Arc::new(SessionContext::open(store)?);
        Self::with_transport(config, session, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        config: &ClientConfig,
        session: Arc<SessionContext>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let authenticator = HttpAuthenticator::new(config, transport.clone())?;
        let gate = AuthGate::new(session.clone(), Arc::new(authenticator))
            .with_admin_role(config.admin_role.clone());
        let api = ApiClient::new(config, session.clone(), transport);

        Ok(Self {
            session,
            gate: Arc::new(gate),
            api,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn gate(&self) -> &Arc<AuthGate> {
        &self.gate
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn casos(&self) -> CasoService {
        CasoService::new(self.api.clone())
    }

    pub fn delitos(&self) -> DelitoService {
        DelitoService::new(self.api.clone())
    }

    pub fn caso_table(&self) -> CasoTable {
        CasoTable::new(self.casos(), self.gate.clone())
    }

    pub fn delito_table(&self) -> DelitoTable {
        DelitoTable::new(self.delitos(), self.gate.clone())
    }
}
