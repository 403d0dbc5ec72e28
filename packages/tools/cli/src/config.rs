//! CLI 설정
//!
//! `~/.helpme/config.json`에 저장됩니다. 값 결정 순서는
//! 명령행 옵션 > 설정 파일 > 환경변수입니다.

use std::path::{Path, PathBuf};

use helpme_client::config::BASE_URL_VAR;
use helpme_client::{ClientConfig, EnvOverrides};
use serde::{Deserialize, Serialize};

/// CLI 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// 로그인 엔드포인트 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_path: Option<String>,

    /// 관리자 role 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<String>,
}

impl CliConfig {
    /// 설정 디렉터리 (`~/.helpme`)
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(home.join(".helpme"))
    }

    fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 세션 파일 경로
    pub fn session_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }

    /// 설정 로드
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: CliConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 설정 저장
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 클라이언트 설정 결정
    pub fn client_config(&self, base_url: Option<&str>) -> anyhow::Result<ClientConfig> {
        self.resolve(base_url, EnvOverrides::from_env())
    }

    fn resolve(&self, base_url: Option<&str>, env: EnvOverrides) -> anyhow::Result<ClientConfig> {
        let layered = EnvOverrides {
            base_url: base_url
                .map(str::to_string)
                .or_else(|| self.base_url.clone())
                .or(env.base_url),
            login_path: self.login_path.clone().or(env.login_path),
            admin_role: self.admin_role.clone().or(env.admin_role),
        };

        if layered.base_url.is_none() {
            anyhow::bail!(
                "Base URL not configured. Use 'hm config set --base-url <url>' or set {}",
                BASE_URL_VAR
            );
        }
        Ok(ClientConfig::from_overrides(layered)?)
    }
}
