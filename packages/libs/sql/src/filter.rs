//! 필터 조건
//!
//! 호출자의 기존 WHERE 조건과 엔진이 만든 스코프 조건을 같은 타입으로 다룹니다.

use sea_query::{Expr, SimpleExpr};

use crate::dialect::Dialect;

/// WHERE 조건 하나
#[derive(Debug, Clone, PartialEq)]
pub struct Filter(SimpleExpr);

impl Filter {
    pub fn new(expr: SimpleExpr) -> Self {
        Self(expr)
    }

    /// 호출자가 작성한 SQL 조건 (예: `status = 1`)
    pub fn raw(sql: impl Into<String>) -> Self {
        Self(Expr::cust(sql.into()))
    }

    /// 항상 거짓 (`1 = 0`)
    pub fn deny_all() -> Self {
        Self(Expr::val(1).eq(0))
    }

    pub fn and(self, other: Filter) -> Filter {
        Filter(self.0.and(other.0))
    }

    pub fn into_expr(self) -> SimpleExpr {
        self.0
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        dialect.render(&self.0)
    }
}

impl From<SimpleExpr> for Filter {
    fn from(expr: SimpleExpr) -> Self {
        Filter(expr)
    }
}

/// 기존 필터가 있으면 AND, 없으면 단독
pub(crate) fn and_existing(existing: Option<Filter>, filter: Filter) -> Filter {
    match existing {
        Some(existing) => existing.and(filter),
        None => filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_all() {
        assert_eq!(Filter::deny_all().to_sql(Dialect::MySql), "1 = 0");
    }

    #[test]
    fn test_and_existing() {
        let filter = and_existing(Some(Filter::raw("status = 1")), Filter::deny_all());
        let sql = filter.to_sql(Dialect::MySql);
        assert!(sql.contains("status = 1"));
        assert!(sql.contains("AND"));
        assert!(sql.ends_with("1 = 0"));

        assert_eq!(and_existing(None, Filter::deny_all()), Filter::deny_all());
    }
}
