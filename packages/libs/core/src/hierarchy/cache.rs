//! 하위 트리 캐시
//!
//! 조회 결과를 부서 ID별로 보관합니다. 요청 간에 읽기 전용으로 공유하고,
//! 조직 구조가 바뀌면 외부에서 `invalidate`를 호출합니다. 실패는 캐시하지 않습니다.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{HierarchyError, OrgHierarchyResolver, SubtreeFragment};
use crate::OrgUnitId;

/// 캐시 래퍼
#[derive(Debug)]
pub struct CachingResolver<R> {
    inner: R,
    cache: RwLock<HashMap<OrgUnitId, SubtreeFragment>>,
}

impl<R: OrgHierarchyResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// 전체 무효화
    pub fn invalidate(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = cache.len();
        cache.clear();
        tracing::info!(dropped, "org hierarchy cache invalidated");
    }

    /// 특정 부서만 무효화
    pub fn invalidate_unit(&self, org_unit: OrgUnitId) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&org_unit);
    }

    /// 캐시된 항목 수
    pub fn cached(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: OrgHierarchyResolver> OrgHierarchyResolver for CachingResolver<R> {
    fn descendants_of(&self, org_unit: OrgUnitId) -> Result<SubtreeFragment, HierarchyError> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(fragment) = cache.get(&org_unit) {
                return Ok(fragment.clone());
            }
        }

        let fragment = self.inner.descendants_of(org_unit)?;
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(org_unit, fragment.clone());
        Ok(fragment)
    }
}
