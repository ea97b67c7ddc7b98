//! 데이터 권한 선언 및 스코프 병합
//!
//! # 개요
//!
//! 역할(Role)마다 선언된 데이터 스코프(ALL, DEPT_AND_SUB, DEPT, SELF, CUSTOM)를
//! 합집합(OR)으로 병합하여, 요청 주체가 볼 수 있는 행의 범위를 결정합니다.
//! 어떤 작업이 권한 필터 대상인지는 `PolicyRegistry`에 명시적으로 등록합니다.
//!
//! # 모듈 구조
//!
//! - `scope`: 스코프 종류와 역할별 데이터 스코프
//! - `context`: 요청 단위 주체 컨텍스트
//! - `policy`: 작업별 정책 선언과 레지스트리
//! - `merger`: 스코프 병합기

mod context;
mod merger;
mod policy;
mod scope;

pub use context::PrincipalAccessContext;
pub use merger::{merge, Atom, BypassReason, MergeDecision};
pub use policy::{PolicyDeclaration, PolicyRegistry};
pub(crate) use policy::is_identifier;
pub use scope::{RoleDataScope, ScopeKind};
