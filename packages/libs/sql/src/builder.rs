//! 스코프 필터 빌더
//!
//! 병합 결과(`MergeDecision`)와 정책 선언의 컬럼/별칭 설정으로 WHERE 조건을 만듭니다.
//! 계층 조회 외에는 부수 효과가 없습니다.

use sea_query::{Query, SimpleExpr};

use scope_core::hierarchy::{AncestorPath, OrgHierarchyResolver, SubtreeFragment};
use scope_core::permissions::{Atom, MergeDecision, PolicyDeclaration};

use crate::dialect::Dialect;
use crate::error::EngineError;
use crate::filter::{and_existing, Filter};
use crate::iden::{column, DynIden};

/// 병합 결과 → 필터
pub struct PredicateBuilder<'a> {
    resolver: &'a dyn OrgHierarchyResolver,
    dialect: Dialect,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(resolver: &'a dyn OrgHierarchyResolver, dialect: Dialect) -> Self {
        Self { resolver, dialect }
    }

    /// 필터 생성
    ///
    /// # Returns
    /// - `Bypass`: 기존 필터 그대로 (없으면 None)
    /// - `DenyAll`: `1 = 0` (기존 필터와 AND)
    /// - `Union`: 원자 조건들을 OR로 묶은 그룹 (기존 필터와 AND)
    pub fn build(
        &self,
        decision: &MergeDecision,
        declaration: &PolicyDeclaration,
        existing: Option<Filter>,
    ) -> Result<Option<Filter>, EngineError> {
        let scope = match decision {
            MergeDecision::Bypass(_) => return Ok(existing),
            MergeDecision::DenyAll => Filter::deny_all(),
            MergeDecision::Union(atoms) => self.union(atoms, declaration)?,
        };
        Ok(Some(and_existing(existing, scope)))
    }

    fn union(&self, atoms: &[Atom], declaration: &PolicyDeclaration) -> Result<Filter, EngineError> {
        let mut group: Option<SimpleExpr> = None;
        let mut terms = 0;
        for atom in atoms {
            let Some(expr) = self.atom(atom, declaration)? else {
                continue;
            };
            terms += 1;
            group = Some(match group {
                Some(group) => group.or(expr),
                None => expr,
            });
        }

        // 빈 합집합은 거부
        let Some(group) = group else {
            return Ok(Filter::deny_all());
        };
        // OR 그룹은 단독으로 렌더링해도 괄호로 묶음
        if terms > 1 {
            return Ok(Filter::new(SimpleExpr::Tuple(vec![group])));
        }
        Ok(Filter::new(group))
    }

    fn atom(&self, atom: &Atom, declaration: &PolicyDeclaration) -> Result<Option<SimpleExpr>, EngineError> {
        let org_unit = || {
            column(
                declaration.org_unit_alias.as_deref(),
                &declaration.org_unit_column,
            )
        };

        let expr = match atom {
            Atom::OrgUnitEquals(id) => org_unit().eq(*id),
            Atom::OwnerEquals(id) => {
                column(declaration.owner_alias.as_deref(), &declaration.owner_column).eq(*id)
            }
            Atom::OrgUnitIn(ids) => org_unit().is_in(ids.iter().copied()),
            Atom::OrgUnitInClosure(root) => match self.resolve(*root)? {
                SubtreeFragment::Ids(ids) => org_unit().is_in(ids),
                SubtreeFragment::AncestorPath(path) => org_unit().in_subquery(self.subtree_query(&path)),
            },
            Atom::AlwaysFalse => return Ok(None),
        };
        Ok(Some(expr))
    }

    fn resolve(&self, root: i64) -> Result<SubtreeFragment, EngineError> {
        self.resolver.descendants_of(root).map_err(|e| {
            tracing::error!(org_unit = root, error = %e, "org hierarchy resolution failed");
            EngineError::from(e)
        })
    }

    /// `SELECT id FROM sys_dept WHERE id = ? OR <path contains ?>`
    fn subtree_query(&self, path: &AncestorPath) -> sea_query::SelectStatement {
        let mut query = Query::select();
        query
            .column(DynIden(path.id_column.clone()))
            .from(DynIden(path.table.clone()))
            .and_where(
                column(None, &path.id_column)
                    .eq(path.root)
                    .or(self.dialect.path_contains(&path.path_column, path.root)),
            );
        query
    }
}

#[cfg(test)]
mod tests {
    use scope_core::hierarchy::{InMemoryHierarchy, MaterializedPathResolver, NoHierarchy};
    use scope_core::permissions::BypassReason;

    use super::*;

    fn render(filter: Option<Filter>) -> String {
        filter.map(|f| f.to_sql(Dialect::Postgres)).unwrap_or_default()
    }

    #[test]
    fn test_bypass_keeps_existing() {
        let builder = PredicateBuilder::new(&NoHierarchy, Dialect::Postgres);
        let decision = MergeDecision::Bypass(BypassReason::Superuser);
        let declaration = PolicyDeclaration::new();

        assert_eq!(builder.build(&decision, &declaration, None).unwrap(), None);
        assert_eq!(
            builder
                .build(&decision, &declaration, Some(Filter::raw("status = 1")))
                .unwrap(),
            Some(Filter::raw("status = 1"))
        );
    }

    #[test]
    fn test_union_with_aliases() {
        let builder = PredicateBuilder::new(&NoHierarchy, Dialect::Postgres);
        let declaration = PolicyDeclaration::new()
            .with_org_unit_column(Some("u"), "dept_id")
            .with_owner_column(Some("u"), "id");
        let decision = MergeDecision::Union(vec![
            Atom::OrgUnitIn(vec![10, 20]),
            Atom::OwnerEquals(100),
        ]);

        let sql = render(builder.build(&decision, &declaration, None).unwrap());
        assert!(sql.contains(r#""u"."dept_id" IN (10, 20)"#), "{sql}");
        assert!(sql.contains(r#""u"."id" = 100"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.starts_with('(') && sql.ends_with(')'), "{sql}");
    }

    #[test]
    fn test_single_atom_is_not_grouped() {
        let builder = PredicateBuilder::new(&NoHierarchy, Dialect::MySql);
        let decision = MergeDecision::Union(vec![Atom::OrgUnitEquals(10), Atom::AlwaysFalse]);
        let filter = builder
            .build(&decision, &PolicyDeclaration::new(), None)
            .unwrap()
            .map(|f| f.to_sql(Dialect::MySql))
            .unwrap_or_default();
        assert_eq!(filter, "`dept_id` = 10");
    }

    #[test]
    fn test_standalone_union_is_grouped() {
        let builder = PredicateBuilder::new(&NoHierarchy, Dialect::MySql);
        let decision = MergeDecision::Union(vec![Atom::OrgUnitEquals(10), Atom::OwnerEquals(100)]);
        let filter = builder
            .build(&decision, &PolicyDeclaration::new(), None)
            .unwrap()
            .map(|f| f.to_sql(Dialect::MySql))
            .unwrap_or_default();
        assert_eq!(filter, "(`dept_id` = 10 OR `create_by` = 100)");
    }

    #[test]
    fn test_empty_union_fails_closed() {
        let builder = PredicateBuilder::new(&NoHierarchy, Dialect::MySql);
        let decision = MergeDecision::Union(vec![Atom::AlwaysFalse]);
        let filter = builder
            .build(&decision, &PolicyDeclaration::new(), None)
            .unwrap();
        assert_eq!(filter, Some(Filter::deny_all()));
    }

    #[test]
    fn test_closure_as_id_list() {
        let hierarchy = InMemoryHierarchy::from_parents([(10, None), (11, Some(10)), (12, Some(11))]);
        let builder = PredicateBuilder::new(&hierarchy, Dialect::Postgres);
        let decision = MergeDecision::Union(vec![Atom::OrgUnitInClosure(10)]);

        let sql = render(builder.build(&decision, &PolicyDeclaration::new(), None).unwrap());
        assert_eq!(sql, r#""dept_id" IN (10, 11, 12)"#);
    }

    #[test]
    fn test_closure_as_ancestor_path() {
        let resolver = MaterializedPathResolver::new();
        let decision = MergeDecision::Union(vec![Atom::OrgUnitInClosure(10)]);

        let mysql = PredicateBuilder::new(&resolver, Dialect::MySql)
            .build(&decision, &PolicyDeclaration::new(), None)
            .unwrap()
            .map(|f| f.to_sql(Dialect::MySql))
            .unwrap_or_default();
        assert!(mysql.contains("`dept_id` IN (SELECT `id` FROM `sys_dept` WHERE"), "{mysql}");
        assert!(mysql.contains("FIND_IN_SET('10', tree_path)"), "{mysql}");

        let pg = render(
            PredicateBuilder::new(&resolver, Dialect::Postgres)
                .build(&decision, &PolicyDeclaration::new(), None)
                .unwrap(),
        );
        assert!(pg.contains("string_to_array(tree_path, ',')"), "{pg}");
    }

    #[test]
    fn test_resolver_failure_propagates() {
        let builder = PredicateBuilder::new(&NoHierarchy, Dialect::MySql);
        let decision = MergeDecision::Union(vec![Atom::OrgUnitEquals(10), Atom::OrgUnitInClosure(10)]);
        let err = builder
            .build(&decision, &PolicyDeclaration::new(), Some(Filter::raw("status = 1")))
            .unwrap_err();
        assert!(err.is_evaluation_failure());
        assert_eq!(err.status_code(), 500);
    }
}
