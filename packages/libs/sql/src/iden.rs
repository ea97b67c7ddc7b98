//! 동적 테이블/컬럼 식별자

use sea_query::{Expr, Iden};

#[derive(Debug, Clone)]
pub(crate) struct DynIden(pub(crate) String);

impl Iden for DynIden {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        let _ = s.write_str(&self.0);
    }
}

/// `alias.column` 또는 `column`
pub(crate) fn column(alias: Option<&str>, column: &str) -> Expr {
    match alias {
        Some(alias) => Expr::col((DynIden(alias.to_string()), DynIden(column.to_string()))),
        None => Expr::col(DynIden(column.to_string())),
    }
}
