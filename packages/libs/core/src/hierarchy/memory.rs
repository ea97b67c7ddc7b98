//! 부모 맵 기반 인메모리 계층

use std::collections::{HashMap, HashSet, VecDeque};

use super::{HierarchyError, OrgHierarchyResolver, SubtreeFragment};
use crate::OrgUnitId;

/// 인메모리 조직 계층
///
/// 부모 관계만 저장하고, 조회 시 하위 트리 ID 목록을 돌려줍니다.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHierarchy {
    parents: HashMap<OrgUnitId, Option<OrgUnitId>>,
    children: HashMap<OrgUnitId, Vec<OrgUnitId>>,
}

impl InMemoryHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// 부서 추가 (`parent`가 None이면 최상위)
    pub fn insert(&mut self, org_unit: OrgUnitId, parent: Option<OrgUnitId>) {
        if let Some(Some(old_parent)) = self.parents.insert(org_unit, parent) {
            if let Some(siblings) = self.children.get_mut(&old_parent) {
                siblings.retain(|c| *c != org_unit);
            }
        }
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(org_unit);
        }
    }

    pub fn with_unit(mut self, org_unit: OrgUnitId, parent: Option<OrgUnitId>) -> Self {
        self.insert(org_unit, parent);
        self
    }

    /// (부서, 부모) 목록에서 생성
    pub fn from_parents<I>(units: I) -> Self
    where
        I: IntoIterator<Item = (OrgUnitId, Option<OrgUnitId>)>,
    {
        let mut hierarchy = Self::new();
        for (org_unit, parent) in units {
            hierarchy.insert(org_unit, parent);
        }
        hierarchy
    }

    pub fn contains(&self, org_unit: OrgUnitId) -> bool {
        self.parents.contains_key(&org_unit)
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl OrgHierarchyResolver for InMemoryHierarchy {
    fn descendants_of(&self, org_unit: OrgUnitId) -> Result<SubtreeFragment, HierarchyError> {
        if !self.contains(org_unit) {
            return Err(HierarchyError::UnknownOrgUnit(org_unit));
        }

        let mut seen = HashSet::from([org_unit]);
        let mut queue = VecDeque::from([org_unit]);
        while let Some(current) = queue.pop_front() {
            for child in self.children.get(&current).into_iter().flatten() {
                // 순환 데이터가 있어도 종료
                if seen.insert(*child) {
                    queue.push_back(*child);
                }
            }
        }

        let mut ids: Vec<OrgUnitId> = seen.into_iter().collect();
        ids.sort_unstable();
        Ok(SubtreeFragment::Ids(ids))
    }
}
