//! scope-core: 행 단위 데이터 권한(Data Scope) 핵심 라이브러리
//!
//! 이 크레이트는 SQL 엔진(`scope-sql`)과 운영 도구(`scopectl`)가 공유하는
//! 데이터 모델과 스코프 병합 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `permissions`: 스코프 종류, 요청 컨텍스트, 정책 선언 레지스트리, 스코프 병합
//! - `hierarchy`: 조직(부서) 계층 조회 인터페이스와 기본 구현
//! - `auth`: 검증이 끝난 토큰 claims 디코딩 및 컨텍스트 제공자
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;
pub mod hierarchy;
pub mod permissions;

pub use error::{Error, Result};

/// 조직 단위(부서) ID
pub type OrgUnitId = i64;

/// 사용자(주체) ID
pub type PrincipalId = i64;
