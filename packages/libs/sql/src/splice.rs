//! 필터를 SQL 문에 결합

use sea_query::ConditionalStatement;

use crate::filter::Filter;

/// SELECT/UPDATE/DELETE 문의 WHERE에 필터를 AND로 추가
///
/// 필터가 없으면(Bypass) 문을 그대로 둡니다.
pub fn splice<S>(stmt: &mut S, filter: Option<Filter>) -> &mut S
where
    S: ConditionalStatement,
{
    if let Some(filter) = filter {
        stmt.and_where(filter.into_expr());
    }
    stmt
}

#[cfg(test)]
mod tests {
    use sea_query::{Expr, MysqlQueryBuilder, Query};

    use super::*;
    use crate::iden::DynIden;

    #[test]
    fn test_splice_select() {
        let mut query = Query::select();
        query
            .column(DynIden("id".to_string()))
            .from(DynIden("sys_user".to_string()))
            .and_where(Expr::col(DynIden("status".to_string())).eq(1));

        splice(&mut query, Some(Filter::deny_all()));
        let sql = query.to_string(MysqlQueryBuilder);
        assert_eq!(
            sql,
            "SELECT `id` FROM `sys_user` WHERE `status` = 1 AND 1 = 0"
        );
    }

    #[test]
    fn test_splice_none_is_noop() {
        let mut query = Query::delete();
        query.from_table(DynIden("sys_notice".to_string()));

        splice(&mut query, None);
        assert_eq!(query.to_string(MysqlQueryBuilder), "DELETE FROM `sys_notice`");
    }
}
