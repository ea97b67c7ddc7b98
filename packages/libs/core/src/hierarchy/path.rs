//! 조상 경로 컬럼 기반 계층
//!
//! 부서 테이블이 `tree_path`(예: `0,1,10`) 같은 조상 경로를 저장하고 있을 때,
//! 하위 트리를 SQL 서브쿼리 조건으로 표현합니다. 트리를 메모리에 올리지 않습니다.

use super::{AncestorPath, HierarchyError, OrgHierarchyResolver, SubtreeFragment};
use crate::error::{Error, Result};
use crate::permissions::is_identifier;
use crate::OrgUnitId;

/// 조상 경로 resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedPathResolver {
    table: String,
    id_column: String,
    path_column: String,
}

impl Default for MaterializedPathResolver {
    fn default() -> Self {
        Self {
            table: "sys_dept".to_string(),
            id_column: "id".to_string(),
            path_column: "tree_path".to_string(),
        }
    }
}

impl MaterializedPathResolver {
    /// 기본 테이블(`sys_dept.id`, `sys_dept.tree_path`) 사용
    pub fn new() -> Self {
        Self::default()
    }

    /// 테이블/컬럼 지정 (식별자 검증)
    pub fn with_columns(
        table: impl Into<String>,
        id_column: impl Into<String>,
        path_column: impl Into<String>,
    ) -> Result<Self> {
        let resolver = Self {
            table: table.into(),
            id_column: id_column.into(),
            path_column: path_column.into(),
        };
        for name in [&resolver.table, &resolver.id_column, &resolver.path_column] {
            if !is_identifier(name) {
                return Err(Error::Configuration {
                    operation: "hierarchy".to_string(),
                    message: format!("'{name}' is not a plain identifier"),
                });
            }
        }
        Ok(resolver)
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl OrgHierarchyResolver for MaterializedPathResolver {
    fn descendants_of(&self, org_unit: OrgUnitId) -> std::result::Result<SubtreeFragment, HierarchyError> {
        Ok(SubtreeFragment::AncestorPath(AncestorPath {
            table: self.table.clone(),
            id_column: self.id_column.clone(),
            path_column: self.path_column.clone(),
            root: org_unit,
        }))
    }
}
