//! 엔진 에러

use scope_core::hierarchy::HierarchyError;
use thiserror::Error;

/// 필터 생성 에러
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] scope_core::Error),

    #[error("unsupported database type: {0}")]
    UnsupportedDialect(String),
}

impl From<HierarchyError> for EngineError {
    fn from(err: HierarchyError) -> Self {
        EngineError::Core(scope_core::Error::from(err))
    }
}

impl EngineError {
    /// 계층 조회 실패 (요청 중단 대상)
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(self, EngineError::Core(scope_core::Error::PolicyEvaluation(_)))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Core(e) => e.status_code(),
            EngineError::UnsupportedDialect(_) => 400,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Core(e) => e.code(),
            EngineError::UnsupportedDialect(_) => "UNSUPPORTED_DIALECT",
        }
    }
}
