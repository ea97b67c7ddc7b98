//! 인증 결과 디코딩
//!
//! # 개요
//!
//! 토큰 검증과 발급은 인증 서브시스템의 몫입니다. 이 모듈은 이미 검증이 끝난
//! claims 페이로드를 받아 요청 단위 `PrincipalAccessContext`로 바꿉니다.
//!
//! - `claims`: access token 페이로드 구조 (`userId`, `deptId`, `dataScopes`, `authorities`)
//! - `provider`: 요청마다 컨텍스트를 공급하는 인터페이스

mod claims;
mod provider;

pub use claims::{AccessClaims, DEFAULT_SUPERUSER_ROLE};
pub use provider::{AccessContextProvider, ClaimsContextProvider, StaticContextProvider};
