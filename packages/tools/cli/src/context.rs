//! 명령행 옵션 → 주체 컨텍스트

use std::path::Path;

use anyhow::Context as _;

use scope_core::auth::AccessClaims;
use scope_core::permissions::{PrincipalAccessContext, RoleDataScope, ScopeKind};

/// 옵션으로 지정한 스코프의 역할 코드
const CLI_ROLE: &str = "CLI";

/// 컨텍스트 지정 옵션
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ContextArgs {
    /// Verified claims payload (JSON file)
    #[arg(long, conflicts_with_all = ["user_id", "dept_id", "scope", "anonymous"])]
    pub claims: Option<std::path::PathBuf>,

    /// Principal id
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Principal org unit id
    #[arg(long)]
    pub dept_id: Option<i64>,

    /// Data scope grant (ALL, DEPT_AND_SUB, DEPT, SELF, CUSTOM:10,20 or numeric value)
    #[arg(long)]
    pub scope: Vec<String>,

    /// Treat principal as superuser
    #[arg(long)]
    pub superuser: bool,

    /// Unauthenticated request
    #[arg(long)]
    pub anonymous: bool,
}

impl ContextArgs {
    /// 컨텍스트 생성
    pub fn resolve(&self, superuser_role: &str) -> anyhow::Result<PrincipalAccessContext> {
        if self.anonymous {
            return Ok(PrincipalAccessContext::anonymous());
        }

        if let Some(path) = &self.claims {
            return load_claims(path, superuser_role);
        }

        let user_id = self
            .user_id
            .ok_or_else(|| anyhow::anyhow!("Principal not specified. Use --claims, --user-id or --anonymous"))?;
        let dept_id = self
            .dept_id
            .ok_or_else(|| anyhow::anyhow!("--dept-id is required with --user-id"))?;

        let scopes = self
            .scope
            .iter()
            .map(|s| parse_scope(s))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(PrincipalAccessContext::new(user_id, dept_id)
            .with_superuser(self.superuser)
            .with_scopes(scopes))
    }
}

fn load_claims(path: &Path, superuser_role: &str) -> anyhow::Result<PrincipalAccessContext> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let claims = AccessClaims::from_json_str(&content)?;
    Ok(PrincipalAccessContext::from_claims(&claims, superuser_role)?)
}

/// `KIND` 또는 `CUSTOM:id,id,...`
pub fn parse_scope(value: &str) -> anyhow::Result<RoleDataScope> {
    let (kind, ids) = match value.split_once(':') {
        Some((kind, ids)) => (kind.trim(), Some(ids)),
        None => (value.trim(), None),
    };

    let kind = kind
        .parse::<i32>()
        .ok()
        .and_then(ScopeKind::from_value)
        .or_else(|| ScopeKind::from_name(kind))
        .ok_or_else(|| anyhow::anyhow!("Unknown data scope: {kind}"))?;

    match (kind, ids) {
        (ScopeKind::Custom, Some(ids)) => {
            let ids = ids
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<i64>().with_context(|| format!("Invalid org unit id: {s}")))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(RoleDataScope::custom(CLI_ROLE, ids))
        }
        (_, Some(_)) => anyhow::bail!("Only CUSTOM scopes take org unit ids"),
        (kind, None) => Ok(RoleDataScope::new(CLI_ROLE, kind)),
    }
}
