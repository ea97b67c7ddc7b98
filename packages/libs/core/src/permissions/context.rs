//! 요청 주체 컨텍스트
//!
//! 요청마다 새로 만들어지는 주체 정보 스냅샷입니다.
//! 생성 후에는 변경할 수 없고, 요청 간에 캐시하거나 전역 상태에 저장하지 않습니다.

use super::scope::{RoleDataScope, ScopeKind};
use crate::{OrgUnitId, PrincipalId};

/// 주체 접근 컨텍스트
#[derive(Debug, Clone)]
pub struct PrincipalAccessContext {
    principal_id: PrincipalId,
    org_unit_id: OrgUnitId,
    superuser: bool,
    scopes: Vec<RoleDataScope>,
    authenticated: bool,
}

impl PrincipalAccessContext {
    /// 인증된 주체 컨텍스트 생성
    pub fn new(principal_id: PrincipalId, org_unit_id: OrgUnitId) -> Self {
        Self {
            principal_id,
            org_unit_id,
            superuser: false,
            scopes: Vec::new(),
            authenticated: true,
        }
    }

    /// 미인증 컨텍스트
    pub fn anonymous() -> Self {
        Self {
            principal_id: 0,
            org_unit_id: 0,
            superuser: false,
            scopes: Vec::new(),
            authenticated: false,
        }
    }

    /// 스코프 목록 설정
    pub fn with_scopes(mut self, scopes: Vec<RoleDataScope>) -> Self {
        self.scopes = scopes;
        self
    }

    /// 스코프 추가
    pub fn with_scope(mut self, scope: RoleDataScope) -> Self {
        self.scopes.push(scope);
        self
    }

    /// 슈퍼유저 여부 설정
    pub fn with_superuser(mut self, superuser: bool) -> Self {
        self.superuser = superuser;
        self
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn org_unit_id(&self) -> OrgUnitId {
        self.org_unit_id
    }

    pub fn is_superuser(&self) -> bool {
        self.superuser
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn scopes(&self) -> &[RoleDataScope] {
        &self.scopes
    }

    /// `ALL` 스코프를 하나라도 가지고 있는지
    pub fn has_all_scope(&self) -> bool {
        self.scopes.iter().any(|s| s.kind == ScopeKind::All)
    }
}
