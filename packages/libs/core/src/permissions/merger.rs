//! 스코프 병합기
//!
//! 주체의 역할별 스코프 목록을 "제한 없음", "전부 거부", 또는
//! 합집합(OR)으로 묶을 원자 조건 목록으로 줄입니다.

use std::fmt;

use super::context::PrincipalAccessContext;
use super::policy::PolicyDeclaration;
use super::scope::ScopeKind;
use crate::{OrgUnitId, PrincipalId};

/// 원자 조건 (역할 스코프 하나의 기여분)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// 부서 컬럼 = 값
    OrgUnitEquals(OrgUnitId),

    /// 작성자 컬럼 = 값
    OwnerEquals(PrincipalId),

    /// 부서 컬럼 IN (목록)
    OrgUnitIn(Vec<OrgUnitId>),

    /// 부서 컬럼이 해당 부서의 하위 트리에 포함 (계층 조회 필요)
    OrgUnitInClosure(OrgUnitId),

    /// 항상 거짓
    AlwaysFalse,
}

/// 필터 없이 통과시키는 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
    /// 선언이 비활성
    Disabled,
    /// 미인증 (상위 단계에서 이미 거부되었어야 함)
    Unauthenticated,
    /// 슈퍼유저
    Superuser,
    /// 스코프가 하나도 없음
    NoScopes,
    /// `ALL` 스코프 보유
    AllScope,
}

/// 병합 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    /// 기존 필터를 그대로 사용
    Bypass(BypassReason),

    /// 모든 행 거부
    DenyAll,

    /// 원자 조건들의 합집합 (비어 있지 않음)
    Union(Vec<Atom>),
}

impl MergeDecision {
    /// Union일 때의 원자 조건 목록
    pub fn atoms(&self) -> &[Atom] {
        match self {
            MergeDecision::Union(atoms) => atoms,
            _ => &[],
        }
    }
}

/// 스코프 병합
///
/// 순서대로 평가하며 먼저 걸리는 규칙에서 끝납니다.
/// 여러 역할의 스코프는 항상 OR로 합쳐지고, 순위로 하나를 고르지 않습니다.
pub fn merge(context: &PrincipalAccessContext, declaration: &PolicyDeclaration) -> MergeDecision {
    if !declaration.enabled {
        return MergeDecision::Bypass(BypassReason::Disabled);
    }
    if !context.is_authenticated() {
        return MergeDecision::Bypass(BypassReason::Unauthenticated);
    }
    if context.is_superuser() {
        return MergeDecision::Bypass(BypassReason::Superuser);
    }
    if context.scopes().is_empty() {
        return MergeDecision::Bypass(BypassReason::NoScopes);
    }
    if context.has_all_scope() {
        return MergeDecision::Bypass(BypassReason::AllScope);
    }

    let mut atoms: Vec<Atom> = Vec::with_capacity(context.scopes().len());
    for scope in context.scopes() {
        let atom = match scope.kind {
            ScopeKind::Dept => Atom::OrgUnitEquals(context.org_unit_id()),
            ScopeKind::Own => Atom::OwnerEquals(context.principal_id()),
            ScopeKind::Custom if scope.custom_ids().is_empty() => Atom::AlwaysFalse,
            ScopeKind::Custom => Atom::OrgUnitIn(scope.custom_ids().to_vec()),
            ScopeKind::DeptAndSub => Atom::OrgUnitInClosure(context.org_unit_id()),
            // has_all_scope()에서 이미 처리됨
            ScopeKind::All => continue,
        };
        // 같은 조건은 한 번만 (합집합이므로 의미 변화 없음)
        if !atoms.contains(&atom) {
            atoms.push(atom);
        }
    }

    let decision = if atoms.iter().all(|a| *a == Atom::AlwaysFalse) {
        MergeDecision::DenyAll
    } else {
        atoms.retain(|a| *a != Atom::AlwaysFalse);
        MergeDecision::Union(atoms)
    };

    tracing::debug!(
        principal = context.principal_id(),
        scopes = context.scopes().len(),
        atoms = decision.atoms().len(),
        decision = %decision,
        "merged data scopes"
    );

    decision
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::OrgUnitEquals(id) => write!(f, "org_unit = {id}"),
            Atom::OwnerEquals(id) => write!(f, "owner = {id}"),
            Atom::OrgUnitIn(ids) => {
                let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "org_unit in [{}]", ids.join(", "))
            }
            Atom::OrgUnitInClosure(id) => write!(f, "org_unit in subtree({id})"),
            Atom::AlwaysFalse => f.write_str("false"),
        }
    }
}

impl fmt::Display for BypassReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BypassReason::Disabled => "declaration disabled",
            BypassReason::Unauthenticated => "unauthenticated",
            BypassReason::Superuser => "superuser",
            BypassReason::NoScopes => "no data scopes",
            BypassReason::AllScope => "ALL scope granted",
        };
        f.write_str(s)
    }
}

impl fmt::Display for MergeDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeDecision::Bypass(reason) => write!(f, "bypass ({reason})"),
            MergeDecision::DenyAll => f.write_str("deny all"),
            MergeDecision::Union(atoms) => {
                let parts: Vec<String> = atoms.iter().map(ToString::to_string).collect();
                write!(f, "union [{}]", parts.join(" OR "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::RoleDataScope;

    fn ctx(scopes: Vec<RoleDataScope>) -> PrincipalAccessContext {
        PrincipalAccessContext::new(100, 10).with_scopes(scopes)
    }

    fn decl() -> PolicyDeclaration {
        PolicyDeclaration::new()
    }

    #[test]
    fn test_bypass_rules_in_order() {
        let anon = PrincipalAccessContext::anonymous().with_scope(RoleDataScope::dept("X"));
        assert_eq!(merge(&anon, &decl()), MergeDecision::Bypass(BypassReason::Unauthenticated));

        let root = ctx(vec![RoleDataScope::own("USER")]).with_superuser(true);
        assert_eq!(merge(&root, &decl()), MergeDecision::Bypass(BypassReason::Superuser));

        assert_eq!(merge(&ctx(vec![]), &decl()), MergeDecision::Bypass(BypassReason::NoScopes));

        let disabled = PolicyDeclaration::disabled();
        assert_eq!(
            merge(&ctx(vec![RoleDataScope::dept("X")]), &disabled),
            MergeDecision::Bypass(BypassReason::Disabled)
        );
    }

    #[test]
    fn test_all_scope_overrides_others() {
        let c = ctx(vec![
            RoleDataScope::own("USER"),
            RoleDataScope::all("ADMIN"),
            RoleDataScope::custom("EMPTY", vec![]),
        ]);
        assert_eq!(merge(&c, &decl()), MergeDecision::Bypass(BypassReason::AllScope));
    }

    #[test]
    fn test_single_scope_atoms() {
        assert_eq!(
            merge(&ctx(vec![RoleDataScope::dept("M")]), &decl()),
            MergeDecision::Union(vec![Atom::OrgUnitEquals(10)])
        );
        assert_eq!(
            merge(&ctx(vec![RoleDataScope::own("U")]), &decl()),
            MergeDecision::Union(vec![Atom::OwnerEquals(100)])
        );
        assert_eq!(
            merge(&ctx(vec![RoleDataScope::custom("C", vec![10, 20, 30])]), &decl()),
            MergeDecision::Union(vec![Atom::OrgUnitIn(vec![10, 20, 30])])
        );
        assert_eq!(
            merge(&ctx(vec![RoleDataScope::dept_and_sub("M")]), &decl()),
            MergeDecision::Union(vec![Atom::OrgUnitInClosure(10)])
        );
    }

    #[test]
    fn test_empty_custom_alone_denies_all() {
        assert_eq!(
            merge(&ctx(vec![RoleDataScope::custom("C", vec![])]), &decl()),
            MergeDecision::DenyAll
        );

        // 목록 없음(None)도 동일
        let none = RoleDataScope::new("C", ScopeKind::Custom);
        assert_eq!(merge(&ctx(vec![none]), &decl()), MergeDecision::DenyAll);
    }

    #[test]
    fn test_empty_custom_contributes_nothing_to_union() {
        let c = ctx(vec![RoleDataScope::custom("C", vec![]), RoleDataScope::own("U")]);
        assert_eq!(merge(&c, &decl()), MergeDecision::Union(vec![Atom::OwnerEquals(100)]));
    }

    #[test]
    fn test_multiple_roles_are_unioned_not_ranked() {
        // DEPT(3)와 SELF(4): 순위가 높은 DEPT 하나만 고르지 않고 둘 다 포함
        let c = ctx(vec![RoleDataScope::dept("MANAGER"), RoleDataScope::own("USER")]);
        assert_eq!(
            merge(&c, &decl()),
            MergeDecision::Union(vec![Atom::OrgUnitEquals(10), Atom::OwnerEquals(100)])
        );

        let c = ctx(vec![
            RoleDataScope::custom("A", vec![10, 20]),
            RoleDataScope::custom("B", vec![30, 40]),
        ]);
        assert_eq!(
            merge(&c, &decl()),
            MergeDecision::Union(vec![Atom::OrgUnitIn(vec![10, 20]), Atom::OrgUnitIn(vec![30, 40])])
        );
    }

    #[test]
    fn test_duplicate_grants_collapse() {
        let c = ctx(vec![RoleDataScope::dept("A"), RoleDataScope::dept("B")]);
        assert_eq!(merge(&c, &decl()), MergeDecision::Union(vec![Atom::OrgUnitEquals(10)]));
    }

    #[test]
    fn test_adding_grant_never_narrows() {
        let base = vec![RoleDataScope::own("U")];
        let before = merge(&ctx(base.clone()), &decl());

        let mut widened = base;
        widened.push(RoleDataScope::custom("C", vec![7]));
        let after = merge(&ctx(widened), &decl());

        for atom in before.atoms() {
            assert!(after.atoms().contains(atom));
        }
        assert!(after.atoms().len() > before.atoms().len());
    }

    #[test]
    fn test_display() {
        let c = ctx(vec![RoleDataScope::dept("M"), RoleDataScope::own("U")]);
        assert_eq!(merge(&c, &decl()).to_string(), "union [org_unit = 10 OR owner = 100]");
        assert_eq!(MergeDecision::DenyAll.to_string(), "deny all");
    }
}
