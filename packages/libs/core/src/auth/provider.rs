//! 요청 컨텍스트 제공자

use crate::error::Result;
use crate::permissions::PrincipalAccessContext;

use super::claims::{AccessClaims, DEFAULT_SUPERUSER_ROLE};

/// 요청 단위 주체 컨텍스트 제공자
///
/// 요청마다 새 컨텍스트를 만들어야 하며, 요청 사이에 캐시하면 안 됩니다.
pub trait AccessContextProvider {
    fn current(&self) -> Result<PrincipalAccessContext>;
}

/// 검증된 claims 페이로드 기반 제공자
///
/// 페이로드가 없으면(미인증 요청) 익명 컨텍스트를 돌려줍니다.
#[derive(Debug, Clone)]
pub struct ClaimsContextProvider {
    payload: Option<serde_json::Value>,
    superuser_role: String,
}

impl ClaimsContextProvider {
    pub fn new(payload: Option<serde_json::Value>) -> Self {
        Self {
            payload,
            superuser_role: DEFAULT_SUPERUSER_ROLE.to_string(),
        }
    }

    pub fn with_superuser_role(mut self, role: impl Into<String>) -> Self {
        self.superuser_role = role.into();
        self
    }
}

impl AccessContextProvider for ClaimsContextProvider {
    fn current(&self) -> Result<PrincipalAccessContext> {
        match &self.payload {
            None => Ok(PrincipalAccessContext::anonymous()),
            Some(payload) => {
                let claims = AccessClaims::from_json(payload)?;
                PrincipalAccessContext::from_claims(&claims, &self.superuser_role)
            }
        }
    }
}

/// 고정 컨텍스트 제공자 (테스트/배치 작업용)
#[derive(Debug, Clone)]
pub struct StaticContextProvider(pub PrincipalAccessContext);

impl AccessContextProvider for StaticContextProvider {
    fn current(&self) -> Result<PrincipalAccessContext> {
        Ok(self.0.clone())
    }
}
