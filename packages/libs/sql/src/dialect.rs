//! DB별 SQL 렌더링

use std::fmt;
use std::str::FromStr;

use sea_query::{Expr, MysqlQueryBuilder, PostgresQueryBuilder, Query, SimpleExpr};

use crate::error::EngineError;

/// SQL 방언
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// MySQL/MariaDB (DM 계열도 이 렌더링을 사용)
    #[default]
    MySql,
    Postgres,
}

impl Dialect {
    /// 설정값(`mysql`, `postgres`, `dm` 등)에서 변환
    pub fn from_db_type(db_type: &str) -> Result<Self, EngineError> {
        match db_type.trim().to_ascii_lowercase().as_str() {
            "" | "mysql" | "mariadb" | "dm" | "dameng" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            other => Err(EngineError::UnsupportedDialect(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::MySql => "mysql",
            Dialect::Postgres => "postgres",
        }
    }

    /// 조건식만 렌더링 (값 인라인)
    pub fn render(&self, expr: &SimpleExpr) -> String {
        let mut query = Query::select();
        query.expr(Expr::val(1)).and_where(expr.clone());

        let sql = match self {
            Dialect::MySql => query.to_string(MysqlQueryBuilder),
            Dialect::Postgres => query.to_string(PostgresQueryBuilder),
        };
        match sql.strip_prefix("SELECT 1 WHERE ") {
            Some(condition) => condition.to_string(),
            None => sql,
        }
    }

    /// 조상 경로 컬럼에 `id`가 포함되는지 검사하는 식
    pub(crate) fn path_contains(&self, path_column: &str, id: i64) -> SimpleExpr {
        match self {
            Dialect::MySql => Expr::cust(format!("FIND_IN_SET('{id}', {path_column})")),
            Dialect::Postgres => Expr::cust(format!(
                "'{id}' = ANY(string_to_array({path_column}, ','))"
            )),
        }
    }
}

impl FromStr for Dialect {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::from_db_type(s)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_db_type() {
        assert_eq!(Dialect::from_db_type("MySQL").unwrap(), Dialect::MySql);
        assert_eq!(Dialect::from_db_type("postgresql").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_db_type("dameng").unwrap(), Dialect::MySql);
        assert_eq!("pg".parse::<Dialect>().unwrap(), Dialect::Postgres);

        let err = Dialect::from_db_type("sqlite").unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_DIALECT");
    }

    #[test]
    fn test_identifier_quoting() {
        let expr = Expr::col(crate::iden::DynIden("dept_id".to_string())).eq(10);
        assert_eq!(Dialect::MySql.render(&expr), "`dept_id` = 10");
        assert_eq!(Dialect::Postgres.render(&expr), "\"dept_id\" = 10");
    }

    #[test]
    fn test_path_contains() {
        let mysql = Dialect::MySql.render(&Dialect::MySql.path_contains("tree_path", 10));
        assert!(mysql.contains("FIND_IN_SET('10', tree_path)"));

        let pg = Dialect::Postgres.render(&Dialect::Postgres.path_contains("tree_path", 10));
        assert!(pg.contains("'10' = ANY(string_to_array(tree_path, ','))"));
    }
}
