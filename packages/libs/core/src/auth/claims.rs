//! Access Token Claims
//!
//! 인증 서브시스템이 검증한 토큰 페이로드입니다. 서명/만료 검증은 여기서 하지 않습니다.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::permissions::{PrincipalAccessContext, RoleDataScope};
use crate::{OrgUnitId, PrincipalId};

/// 슈퍼유저 역할 코드 기본값
pub const DEFAULT_SUPERUSER_ROLE: &str = "ROOT";

const ROLE_PREFIX: &str = "ROLE_";

/// Access Token Claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// Subject (사용자명)
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// 사용자 ID
    pub user_id: PrincipalId,

    /// 소속 부서 ID
    #[serde(default)]
    pub dept_id: Option<OrgUnitId>,

    /// 역할별 데이터 스코프
    #[serde(default)]
    pub data_scopes: Vec<RoleDataScope>,

    /// 권한(역할) 목록, `ROLE_` 접두사 포함 가능
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl AccessClaims {
    /// JSON 페이로드에서 디코딩
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| Error::InvalidClaims {
            reason: e.to_string(),
        })
    }

    /// JSON 문자열에서 디코딩
    pub fn from_json_str(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::InvalidClaims {
            reason: e.to_string(),
        })
    }

    /// 특정 역할 보유 확인 (`ROLE_` 접두사 무시)
    pub fn has_role(&self, role: &str) -> bool {
        let role = role.strip_prefix(ROLE_PREFIX).unwrap_or(role);
        self.authorities
            .iter()
            .any(|a| a.strip_prefix(ROLE_PREFIX).unwrap_or(a) == role)
    }
}

impl PrincipalAccessContext {
    /// 검증된 claims로 컨텍스트 생성
    ///
    /// `superuser_role` 역할이 있으면 슈퍼유저입니다. 부서 ID가 없으면 에러입니다.
    pub fn from_claims(claims: &AccessClaims, superuser_role: &str) -> Result<Self> {
        let org_unit_id = claims.dept_id.ok_or_else(|| Error::InvalidClaims {
            reason: format!("user {} has no deptId", claims.user_id),
        })?;

        Ok(PrincipalAccessContext::new(claims.user_id, org_unit_id)
            .with_superuser(claims.has_role(superuser_role))
            .with_scopes(claims.data_scopes.clone()))
    }
}
