//! CLI 설정
//!
//! 환경변수(`.env` 포함)에서 읽고, 명령행 옵션이 있으면 덮어씁니다.

use std::env;

use scope_core::auth::DEFAULT_SUPERUSER_ROLE;
use scope_core::hierarchy::MaterializedPathResolver;
use scope_sql::Dialect;

/// CLI 설정
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// SQL 방언 (`SCOPE_DB_TYPE`)
    pub dialect: Dialect,

    /// 슈퍼유저 역할 코드 (`SCOPE_SUPERUSER_ROLE`)
    pub superuser_role: String,

    /// 부서 테이블 (`SCOPE_TREE_TABLE`)
    pub tree_table: String,

    /// 조상 경로 컬럼 (`SCOPE_TREE_PATH_COLUMN`)
    pub tree_path_column: String,
}

impl CliConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            dialect: Dialect::from_db_type(
                &env::var("SCOPE_DB_TYPE").unwrap_or_else(|_| "mysql".to_string()),
            )?,

            superuser_role: env::var("SCOPE_SUPERUSER_ROLE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUPERUSER_ROLE.to_string()),

            tree_table: env::var("SCOPE_TREE_TABLE").unwrap_or_else(|_| "sys_dept".to_string()),

            tree_path_column: env::var("SCOPE_TREE_PATH_COLUMN")
                .unwrap_or_else(|_| "tree_path".to_string()),
        })
    }

    /// `--db-type` 옵션 적용
    pub fn with_db_type(mut self, db_type: Option<&str>) -> anyhow::Result<Self> {
        if let Some(db_type) = db_type {
            self.dialect = Dialect::from_db_type(db_type)?;
        }
        Ok(self)
    }

    /// 계층 파일이 없을 때 사용하는 조상 경로 resolver
    pub fn path_resolver(&self) -> anyhow::Result<MaterializedPathResolver> {
        Ok(MaterializedPathResolver::with_columns(
            self.tree_table.as_str(),
            "id",
            self.tree_path_column.as_str(),
        )?)
    }
}
