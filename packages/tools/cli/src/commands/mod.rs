//! CLI 명령어 구현

pub mod check;
pub mod explain;
pub mod scopes;
