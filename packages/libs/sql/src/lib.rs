//! scope-sql: 데이터 스코프 필터 생성 라이브러리
//!
//! 스코프 병합 결과를 SQL WHERE 조건으로 바꾸고, 호출자의 기존 필터와 결합합니다.
//! 조건은 SeaQuery 식으로 만들어지므로 값은 문자열 결합 없이 렌더링됩니다.
//!
//! # 모듈 구조
//!
//! - `engine`: 요청 단위 진입점 (`DataScopeEngine::evaluate`)
//! - `builder`: 병합 결과 → 필터
//! - `filter`: 필터 래퍼
//! - `dialect`: DB별 렌더링
//! - `splice`: SELECT/UPDATE/DELETE 문에 필터 결합

pub mod builder;
pub mod dialect;
pub mod engine;
pub mod error;
pub mod filter;
pub mod splice;

mod iden;

pub use builder::PredicateBuilder;
pub use dialect::Dialect;
pub use engine::DataScopeEngine;
pub use error::EngineError;
pub use filter::Filter;
pub use splice::splice;
