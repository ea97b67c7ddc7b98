//! 공통 에러 타입
//!
//! 데이터 권한 엔진 전체에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

use crate::hierarchy::HierarchyError;

pub type Result<T> = std::result::Result<T, Error>;

/// 데이터 권한 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Configuration Errors (등록 시점에 검출, 기동 실패)
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid policy declaration for '{operation}': {message}")]
    Configuration { operation: String, message: String },

    #[error("duplicate policy declaration: {operation}")]
    DuplicateDeclaration { operation: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Evaluation Errors (요청 시점, fail-closed)
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("policy evaluation failed: {0}")]
    PolicyEvaluation(#[from] HierarchyError),

    // ─────────────────────────────────────────────────────────────────────────────
    // Context Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("invalid claims: {reason}")]
    InvalidClaims { reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // IO/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 설정 단계 에러인지 (기동 중단 대상)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. } | Error::DuplicateDeclaration { .. } | Error::Yaml(_)
        )
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::Configuration { .. }
            | Error::DuplicateDeclaration { .. }
            | Error::InvalidClaims { .. }
            | Error::Yaml(_)
            | Error::Json(_) => 400,

            // 500 Internal Server Error: 필터 없이 실행하지 않고 요청 자체를 실패시킴
            Error::PolicyEvaluation(_) => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Configuration { .. } => "POLICY_CONFIGURATION_ERROR",
            Error::DuplicateDeclaration { .. } => "DUPLICATE_POLICY_DECLARATION",
            Error::PolicyEvaluation(_) => "POLICY_EVALUATION_ERROR",
            Error::InvalidClaims { .. } => "INVALID_CLAIMS",
            Error::Yaml(_) => "YAML_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }
}
