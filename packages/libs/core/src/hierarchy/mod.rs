//! 조직(부서) 계층 조회
//!
//! # 개요
//!
//! `DEPT_AND_SUB` 스코프는 부서의 하위 트리가 필요합니다. 엔진은 트리를 직접
//! 순회하지 않고 `OrgHierarchyResolver`에 물어봅니다. 응답은 구체적인 ID 목록이거나,
//! 부서 테이블에 저장된 조상 경로(materialized path)를 이용한 멤버십 조건입니다.
//!
//! 조회 실패는 `HierarchyError`로 올라가며, 필터 없이 실행되는 일은 없습니다.
//!
//! # 모듈 구조
//!
//! - `memory`: 부모 맵 기반 인메모리 구현 (픽스처/소규모 배포용)
//! - `path`: 조상 경로 컬럼 기반 구현
//! - `cache`: 읽기 위주 캐시 래퍼

mod cache;
mod memory;
mod path;

use std::sync::Arc;
use std::time::Duration;

use crate::OrgUnitId;

pub use cache::CachingResolver;
pub use memory::InMemoryHierarchy;
pub use path::MaterializedPathResolver;

/// 계층 조회 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("unknown org unit: {0}")]
    UnknownOrgUnit(OrgUnitId),

    #[error("hierarchy data unavailable: {0}")]
    Unavailable(String),

    #[error("hierarchy lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// 하위 트리 표현
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtreeFragment {
    /// 루트를 포함한 하위 부서 ID 목록
    Ids(Vec<OrgUnitId>),

    /// 조상 경로 멤버십 조건
    AncestorPath(AncestorPath),
}

/// 조상 경로 기반 하위 트리 조건
///
/// `table.id_column = root` 이거나 `table.path_column`(쉼표로 구분된 조상 ID 목록)에
/// `root`가 포함된 행이 하위 트리입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorPath {
    pub table: String,
    pub id_column: String,
    pub path_column: String,
    pub root: OrgUnitId,
}

/// 조직 계층 조회 인터페이스
///
/// 요청 스레드에서 동기적으로 호출됩니다. 구현체는 여러 요청에서 동시에 공유됩니다.
pub trait OrgHierarchyResolver: Send + Sync {
    /// 부서와 그 하위 부서 전체
    fn descendants_of(&self, org_unit: OrgUnitId) -> Result<SubtreeFragment, HierarchyError>;
}

impl<R: OrgHierarchyResolver + ?Sized> OrgHierarchyResolver for Arc<R> {
    fn descendants_of(&self, org_unit: OrgUnitId) -> Result<SubtreeFragment, HierarchyError> {
        (**self).descendants_of(org_unit)
    }
}

/// 계층 데이터가 없는 배포용 resolver
///
/// `DEPT_AND_SUB` 스코프가 나오면 항상 실패하여 요청을 중단시킵니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHierarchy;

impl OrgHierarchyResolver for NoHierarchy {
    fn descendants_of(&self, _org_unit: OrgUnitId) -> Result<SubtreeFragment, HierarchyError> {
        Err(HierarchyError::Unavailable(
            "no org hierarchy resolver configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hierarchy_fails_closed() {
        let err = NoHierarchy.descendants_of(10).unwrap_err();
        assert!(matches!(err, HierarchyError::Unavailable(_)));
    }

    #[test]
    fn test_arc_forwarding() {
        let resolver: Arc<dyn OrgHierarchyResolver> =
            Arc::new(InMemoryHierarchy::new().with_unit(10, None).with_unit(11, Some(10)));
        assert_eq!(
            resolver.descendants_of(10).unwrap(),
            SubtreeFragment::Ids(vec![10, 11])
        );
    }
}
