//! 작업별 정책 선언
//!
//! `config/data-scopes.yaml`의 구조와 선언 레지스트리를 정의합니다.
//!
//! ```yaml
//! declarations:
//!   system.user.list:
//!     org_unit_alias: u
//!     owner_alias: u
//!   system.notice.list: true
//!   system.log.list: false
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_enabled() -> bool {
    true
}

fn default_org_unit_column() -> String {
    "dept_id".to_string()
}

fn default_owner_column() -> String {
    "create_by".to_string()
}

/// 권한 필터 대상 작업의 선언
///
/// 별칭(alias)이 있으면 `alias.column`, 없으면 `column`으로 필터를 생성합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyDeclaration {
    /// 활성화 여부 (false면 선언이 없는 것과 동일)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 부서 컬럼 이름
    #[serde(default = "default_org_unit_column", alias = "dept_id_column_name")]
    pub org_unit_column: String,

    /// 부서 컬럼의 테이블 별칭
    #[serde(default, alias = "dept_alias", skip_serializing_if = "Option::is_none")]
    pub org_unit_alias: Option<String>,

    /// 작성자 컬럼 이름
    #[serde(default = "default_owner_column", alias = "user_id_column_name")]
    pub owner_column: String,

    /// 작성자 컬럼의 테이블 별칭
    #[serde(default, alias = "user_alias", skip_serializing_if = "Option::is_none")]
    pub owner_alias: Option<String>,
}

impl Default for PolicyDeclaration {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            org_unit_column: default_org_unit_column(),
            org_unit_alias: None,
            owner_column: default_owner_column(),
            owner_alias: None,
        }
    }
}

impl PolicyDeclaration {
    /// 기본 컬럼(`dept_id`, `create_by`)을 쓰는 선언
    pub fn new() -> Self {
        Self::default()
    }

    /// 비활성 선언
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// 두 컬럼 모두에 같은 테이블 별칭 적용 (조인 쿼리)
    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.org_unit_alias = Some(alias.clone());
        self.owner_alias = Some(alias);
        self
    }

    /// 부서 컬럼 지정
    pub fn with_org_unit_column(mut self, alias: Option<&str>, column: impl Into<String>) -> Self {
        self.org_unit_alias = alias.map(str::to_string);
        self.org_unit_column = column.into();
        self
    }

    /// 작성자 컬럼 지정
    pub fn with_owner_column(mut self, alias: Option<&str>, column: impl Into<String>) -> Self {
        self.owner_alias = alias.map(str::to_string);
        self.owner_column = column.into();
        self
    }

    /// 선언 검증
    pub fn validate(&self, operation: &str) -> Result<()> {
        check_column(operation, "org_unit", self.org_unit_alias.as_deref(), &self.org_unit_column)?;
        check_column(operation, "owner", self.owner_alias.as_deref(), &self.owner_column)?;
        Ok(())
    }
}

fn check_column(operation: &str, field: &str, alias: Option<&str>, column: &str) -> Result<()> {
    let invalid = |message: String| Error::Configuration {
        operation: operation.to_string(),
        message,
    };

    if column.is_empty() {
        return Err(invalid(match alias {
            Some(alias) => format!("{field} alias '{alias}' given without a column name"),
            None => format!("{field} column name must not be empty"),
        }));
    }
    if !is_identifier(column) {
        return Err(invalid(format!("{field} column '{column}' is not a plain identifier")));
    }
    if let Some(alias) = alias {
        if !is_identifier(alias) {
            return Err(invalid(format!("{field} alias '{alias}' is not a plain identifier")));
        }
    }
    Ok(())
}

/// `[A-Za-z_][A-Za-z0-9_]*` 형태인지
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// 정책 선언 레지스트리
///
/// 기동 시 한 번 채우고 이후에는 읽기 전용으로 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    declarations: HashMap<String, PolicyDeclaration>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 선언 등록 (검증 실패 시 ConfigurationError)
    pub fn register(
        &mut self,
        operation: impl Into<String>,
        declaration: PolicyDeclaration,
    ) -> Result<()> {
        let operation = operation.into();
        if operation.trim().is_empty() {
            return Err(Error::Configuration {
                operation,
                message: "operation id must not be empty".to_string(),
            });
        }
        declaration.validate(&operation)?;

        if self.declarations.contains_key(&operation) {
            return Err(Error::DuplicateDeclaration { operation });
        }

        tracing::debug!(operation = %operation, enabled = declaration.enabled, "registered data scope declaration");
        self.declarations.insert(operation, declaration);
        Ok(())
    }

    /// 선언 조회
    pub fn lookup(&self, operation: &str) -> Option<&PolicyDeclaration> {
        self.declarations.get(operation)
    }

    /// 활성 선언이 있는 작업인지
    pub fn governs(&self, operation: &str) -> bool {
        self.lookup(operation).is_some_and(|d| d.enabled)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// 등록된 작업 ID (정렬)
    pub fn operations(&self) -> Vec<&str> {
        let mut ops: Vec<&str> = self.declarations.keys().map(String::as_str).collect();
        ops.sort_unstable();
        ops
    }

    /// 단일 YAML 문서에서 생성
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_yaml_documents(&[yaml])
    }

    /// 여러 YAML 문서를 합쳐서 생성 (문서 간 중복은 에러)
    pub fn from_yaml_documents(yamls: &[&str]) -> Result<Self> {
        let mut registry = Self::new();
        for yaml in yamls {
            let raw: RawDocument = serde_yaml::from_str(yaml)?;
            for (operation, raw_decl) in raw.declarations {
                registry.register(operation, raw_decl.into_declaration())?;
            }
        }
        Ok(registry)
    }
}

/// YAML 루트 구조
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    declarations: BTreeMap<String, RawDeclaration>,
}

/// 선언 항목 (shorthand 호환)
///
/// - `op: true` / `op: false` / `op:` (null) → 기본 컬럼
/// - `op: { ... }` → 전체 선언
#[derive(Debug)]
enum RawDeclaration {
    Flag(bool),
    Full(PolicyDeclaration),
}

impl RawDeclaration {
    fn into_declaration(self) -> PolicyDeclaration {
        match self {
            RawDeclaration::Flag(true) => PolicyDeclaration::new(),
            RawDeclaration::Flag(false) => PolicyDeclaration::disabled(),
            RawDeclaration::Full(decl) => decl,
        }
    }
}

impl<'de> Deserialize<'de> for RawDeclaration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct RawDeclarationVisitor;

        impl<'de> Visitor<'de> for RawDeclarationVisitor {
            type Value = RawDeclaration;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a boolean, null, or a policy declaration object")
            }

            fn visit_bool<E>(self, v: bool) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawDeclaration::Flag(v))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RawDeclaration::Flag(true))
            }

            fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let decl =
                    PolicyDeclaration::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(RawDeclaration::Full(decl))
            }
        }

        deserializer.deserialize_any(RawDeclarationVisitor)
    }
}
