//! 데이터 스코프 엔진
//!
//! 요청 흐름:
//!
//! 1. 레지스트리 조회 (대상 작업인지)
//! 2. 주체 컨텍스트 (명시적 인자 또는 `AccessContextProvider`)
//! 3. 스코프 병합
//! 4. 필터 생성 → 호출자가 쿼리에 결합
//!
//! 엔진은 요청 스레드에서 동기적으로 동작하며, 하나의 인스턴스를 모든 요청이 공유합니다.

use std::sync::Arc;

use sea_query::ConditionalStatement;

use scope_core::auth::AccessContextProvider;
use scope_core::hierarchy::OrgHierarchyResolver;
use scope_core::permissions::{merge, BypassReason, MergeDecision, PolicyRegistry, PrincipalAccessContext};

use crate::builder::PredicateBuilder;
use crate::dialect::Dialect;
use crate::error::EngineError;
use crate::filter::Filter;
use crate::splice::splice;

/// 데이터 스코프 엔진
#[derive(Clone)]
pub struct DataScopeEngine {
    registry: Arc<PolicyRegistry>,
    resolver: Arc<dyn OrgHierarchyResolver>,
    dialect: Dialect,
}

impl DataScopeEngine {
    pub fn new(registry: Arc<PolicyRegistry>, resolver: Arc<dyn OrgHierarchyResolver>) -> Self {
        Self {
            registry,
            resolver,
            dialect: Dialect::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// 병합 결과만 계산 (대상 작업이 아니면 None)
    pub fn decide(&self, operation: &str, context: &PrincipalAccessContext) -> Option<MergeDecision> {
        self.registry
            .lookup(operation)
            .map(|declaration| merge(context, declaration))
    }

    /// 작업에 대한 최종 필터
    ///
    /// 대상이 아니거나 제한이 없으면 `existing`을 그대로 돌려줍니다.
    /// 계층 조회가 실패하면 에러를 돌려주며, 호출자는 작업을 중단해야 합니다.
    pub fn evaluate(
        &self,
        operation: &str,
        context: &PrincipalAccessContext,
        existing: Option<Filter>,
    ) -> Result<Option<Filter>, EngineError> {
        let Some(declaration) = self.registry.lookup(operation) else {
            tracing::debug!(operation, "operation is not governed by a data scope policy");
            return Ok(existing);
        };

        let decision = merge(context, declaration);
        match &decision {
            MergeDecision::Bypass(BypassReason::NoScopes) => {
                tracing::warn!(
                    operation,
                    principal_id = context.principal_id(),
                    "principal has no data scopes; returning rows unrestricted"
                );
            }
            MergeDecision::Bypass(reason) => {
                tracing::debug!(operation, ?reason, "data scope bypassed");
            }
            _ => {}
        }

        PredicateBuilder::new(self.resolver.as_ref(), self.dialect).build(&decision, declaration, existing)
    }

    /// 제공자에서 컨텍스트를 가져와 평가
    ///
    /// 대상 작업이 아니면 제공자를 호출하지 않습니다.
    pub fn evaluate_with<P>(
        &self,
        operation: &str,
        provider: &P,
        existing: Option<Filter>,
    ) -> Result<Option<Filter>, EngineError>
    where
        P: AccessContextProvider + ?Sized,
    {
        if !self.registry.governs(operation) {
            return Ok(existing);
        }
        let context = provider.current()?;
        self.evaluate(operation, &context, existing)
    }

    /// 평가 결과를 SQL 문에 바로 결합
    pub fn apply<S>(
        &self,
        operation: &str,
        context: &PrincipalAccessContext,
        stmt: &mut S,
    ) -> Result<(), EngineError>
    where
        S: ConditionalStatement,
    {
        let filter = self.evaluate(operation, context, None)?;
        splice(stmt, filter);
        Ok(())
    }
}

impl std::fmt::Debug for DataScopeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataScopeEngine")
            .field("operations", &self.registry.len())
            .field("dialect", &self.dialect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use scope_core::hierarchy::NoHierarchy;
    use scope_core::permissions::{PolicyDeclaration, RoleDataScope};

    use super::*;

    fn engine() -> DataScopeEngine {
        let mut registry = PolicyRegistry::new();
        registry
            .register("system.user.list", PolicyDeclaration::new())
            .unwrap();
        registry
            .register("system.notice.list", PolicyDeclaration::disabled())
            .unwrap();
        DataScopeEngine::new(Arc::new(registry), Arc::new(NoHierarchy))
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataScopeEngine>();
    }

    #[test]
    fn test_ungoverned_and_disabled_are_untouched() {
        let engine = engine();
        let ctx = PrincipalAccessContext::new(100, 10).with_scope(RoleDataScope::dept("MANAGER"));

        for operation in ["system.role.list", "system.notice.list"] {
            let filter = engine
                .evaluate(operation, &ctx, Some(Filter::raw("status = 1")))
                .unwrap();
            assert_eq!(filter, Some(Filter::raw("status = 1")));
        }
        assert_eq!(engine.decide("system.role.list", &ctx), None);
    }

    #[test]
    fn test_decide() {
        let engine = engine();
        let ctx = PrincipalAccessContext::new(100, 10).with_scope(RoleDataScope::own("USER"));
        assert_eq!(
            engine.decide("system.user.list", &ctx),
            Some(MergeDecision::Union(vec![scope_core::permissions::Atom::OwnerEquals(100)]))
        );
    }
}
