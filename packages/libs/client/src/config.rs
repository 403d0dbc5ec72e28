//! 클라이언트 설정

use std::env;

use helpme_core::auth::DEFAULT_ADMIN_ROLE;
use helpme_core::{Error, Result};
use reqwest::Url;

/// 기본 로그인 경로
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (예: `http://localhost:8080/api/v1`)
    pub base_url: Url,

    /// 인증 엔드포인트 (base URL 기준 상대 경로)
    pub login_path: String,

    /// 관리자 role 이름
    pub admin_role: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            admin_role: DEFAULT_ADMIN_ROLE.to_string(),
        })
    }

    /// 환경변수에서 설정 로드
    ///
    /// `HELPME_BASE_URL`은 필수, `HELPME_LOGIN_PATH`와 `HELPME_ADMIN_ROLE`은 선택입니다.
    pub fn from_env() -> Result<Self> {
        Self::from_overrides(EnvOverrides::from_env())
    }

    pub fn from_overrides(env: EnvOverrides) -> Result<Self> {
        let base_url = env.base_url.ok_or_else(|| Error::Config {
            message: format!("{} is not set", BASE_URL_VAR),
        })?;

        let mut config = Self::new(&base_url)?;
        if let Some(path) = env.login_path {
            config.login_path = path;
        }
        if let Some(role) = env.admin_role {
            config.admin_role = role;
        }
        Ok(config)
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = role.into();
        self
    }
}

pub const BASE_URL_VAR: &str = "HELPME_BASE_URL";
pub const LOGIN_PATH_VAR: &str = "HELPME_LOGIN_PATH";
pub const ADMIN_ROLE_VAR: &str = "HELPME_ADMIN_ROLE";

/// 환경변수로 지정된 설정 값 (비어 있으면 지정하지 않은 것으로 봄)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub login_path: Option<String>,
    pub admin_role: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            base_url: var(BASE_URL_VAR),
            login_path: var(LOGIN_PATH_VAR),
            admin_role: var(ADMIN_ROLE_VAR),
        }
    }
}

/// base URL 검증 (http/https 절대 URL만 허용)
///
/// 요청 경로를 뒤에 이어 붙이므로 query와 fragment는 받지 않습니다.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::Config {
        message: format!("invalid base URL '{}': {}", raw, e),
    })?;

    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => {}
        scheme => {
            return Err(Error::Config {
                message: format!("unsupported base URL scheme '{}'", scheme),
            })
        }
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::Config {
            message: format!("base URL '{}' must not carry a query or fragment", raw),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:8080/api/v1").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api/v1");
        assert_eq!(config.login_path, DEFAULT_LOGIN_PATH);
        assert_eq!(config.admin_role, "admin");

        let config = config.with_admin_role("ADMIN").with_login_path("/login");
        assert_eq!(config.admin_role, "ADMIN");
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            ClientConfig::new("localhost:8080"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.com"),
            Err(Error::Config { .. })
        ));
        assert!(ClientConfig::new("not a url").is_err());
    }

    #[test]
    fn test_rejects_query_and_fragment() {
        for raw in [
            "http://api.test/v1?key=1",
            "http://api.test/v1?",
            "http://api.test/v1#top",
        ] {
            let err = ClientConfig::new(raw).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{raw}");
        }
        assert!(ClientConfig::new("http://api.test/v1/").is_ok());
    }

    #[test]
    fn test_env_overrides_skip_blank_values() {
        let env = EnvOverrides::from_lookup(|name| match name {
            BASE_URL_VAR => Some(" http://env.test ".to_string()),
            LOGIN_PATH_VAR => Some("   ".to_string()),
            ADMIN_ROLE_VAR => Some("ROLE_ADMIN".to_string()),
            _ => None,
        });
        assert_eq!(env.base_url.as_deref(), Some("http://env.test"));
        assert_eq!(env.login_path, None);

        let config = ClientConfig::from_overrides(env).unwrap();
        assert_eq!(config.base_url.as_str(), "http://env.test/");
        assert_eq!(config.login_path, DEFAULT_LOGIN_PATH);
        assert_eq!(config.admin_role, "ROLE_ADMIN");
    }

    #[test]
    fn test_env_overrides_require_base_url() {
        let err = ClientConfig::from_overrides(EnvOverrides::default()).unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));
    }
}
