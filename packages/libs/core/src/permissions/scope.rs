//! 데이터 스코프 정의
//!
//! 역할에 부여되는 행 가시성 범위입니다. 토큰 claims와 역할 레코드에는
//! 정수 값(1~5)으로 저장됩니다.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::OrgUnitId;

/// 데이터 스코프 종류
///
/// 값이 작을수록 범위가 넓지만, 이 순서는 표시용입니다.
/// 병합은 항상 조건의 합집합으로 이루어지며 순위로 하나를 고르지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// 모든 데이터
    All,

    /// 부서 및 하위 부서 데이터
    DeptAndSub,

    /// 본인 부서 데이터
    Dept,

    /// 본인 데이터
    Own,

    /// 지정 부서 데이터 (역할-부서 매핑 사용)
    Custom,
}

const SCOPE_NAMES: &[&str] = &["ALL", "DEPT_AND_SUB", "DEPT", "SELF", "CUSTOM"];

impl ScopeKind {
    /// 저장된 정수 값에서 변환
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(ScopeKind::All),
            2 => Some(ScopeKind::DeptAndSub),
            3 => Some(ScopeKind::Dept),
            4 => Some(ScopeKind::Own),
            5 => Some(ScopeKind::Custom),
            _ => None,
        }
    }

    /// 이름에서 변환 (`ALL`, `DEPT_AND_SUB`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "ALL" => Some(ScopeKind::All),
            "DEPT_AND_SUB" => Some(ScopeKind::DeptAndSub),
            "DEPT" => Some(ScopeKind::Dept),
            "SELF" => Some(ScopeKind::Own),
            "CUSTOM" => Some(ScopeKind::Custom),
            _ => None,
        }
    }

    /// 정수 값 (표시용 순위)
    pub fn value(&self) -> i32 {
        match self {
            ScopeKind::All => 1,
            ScopeKind::DeptAndSub => 2,
            ScopeKind::Dept => 3,
            ScopeKind::Own => 4,
            ScopeKind::Custom => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScopeKind::All => "ALL",
            ScopeKind::DeptAndSub => "DEPT_AND_SUB",
            ScopeKind::Dept => "DEPT",
            ScopeKind::Own => "SELF",
            ScopeKind::Custom => "CUSTOM",
        }
    }

    /// 화면 표시용 라벨
    pub fn label(&self) -> &'static str {
        match self {
            ScopeKind::All => "All data",
            ScopeKind::DeptAndSub => "Department and sub-departments",
            ScopeKind::Dept => "Own department",
            ScopeKind::Own => "Own data",
            ScopeKind::Custom => "Custom departments",
        }
    }

    /// 전체 데이터 스코프 값인지
    pub fn is_all(value: i32) -> bool {
        value == ScopeKind::All.value()
    }

    /// 전체 종류 (값 순서)
    pub fn iter() -> impl Iterator<Item = ScopeKind> {
        [
            ScopeKind::All,
            ScopeKind::DeptAndSub,
            ScopeKind::Dept,
            ScopeKind::Own,
            ScopeKind::Custom,
        ]
        .into_iter()
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ScopeKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.value())
    }
}

/// 정수 값 또는 이름 모두 허용
impl<'de> Deserialize<'de> for ScopeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScopeKindVisitor;

        impl<'de> Visitor<'de> for ScopeKindVisitor {
            type Value = ScopeKind;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a data scope value between 1 and 5 or a data scope name")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(v)
                    .ok()
                    .and_then(ScopeKind::from_value)
                    .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i32::try_from(v)
                    .ok()
                    .and_then(ScopeKind::from_value)
                    .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                ScopeKind::from_name(v).ok_or_else(|| E::unknown_variant(v, SCOPE_NAMES))
            }
        }

        deserializer.deserialize_any(ScopeKindVisitor)
    }
}

/// 역할별 데이터 스코프
///
/// `custom_org_unit_ids`는 `CUSTOM`일 때만 의미가 있습니다.
/// `None`(목록 없음)과 `Some(vec![])`(빈 목록)은 구분되어 보존됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDataScope {
    /// 역할 코드
    #[serde(rename = "roleCode")]
    pub role_code: String,

    /// 스코프 종류
    #[serde(rename = "dataScope")]
    pub kind: ScopeKind,

    /// 지정 부서 ID 목록
    #[serde(
        rename = "customDeptIds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_org_unit_ids: Option<Vec<OrgUnitId>>,
}

impl RoleDataScope {
    pub fn new(role_code: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            role_code: role_code.into(),
            kind,
            custom_org_unit_ids: None,
        }
    }

    /// "전체 데이터" 스코프
    pub fn all(role_code: impl Into<String>) -> Self {
        Self::new(role_code, ScopeKind::All)
    }

    /// "부서 및 하위 부서" 스코프
    pub fn dept_and_sub(role_code: impl Into<String>) -> Self {
        Self::new(role_code, ScopeKind::DeptAndSub)
    }

    /// "본인 부서" 스코프
    pub fn dept(role_code: impl Into<String>) -> Self {
        Self::new(role_code, ScopeKind::Dept)
    }

    /// "본인 데이터" 스코프
    pub fn own(role_code: impl Into<String>) -> Self {
        Self::new(role_code, ScopeKind::Own)
    }

    /// "지정 부서" 스코프
    pub fn custom(role_code: impl Into<String>, org_unit_ids: Vec<OrgUnitId>) -> Self {
        Self {
            role_code: role_code.into(),
            kind: ScopeKind::Custom,
            custom_org_unit_ids: Some(org_unit_ids),
        }
    }

    /// 지정 부서 목록 (없으면 빈 슬라이스)
    pub fn custom_ids(&self) -> &[OrgUnitId] {
        self.custom_org_unit_ids.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_roundtrip_and_unknown() {
        for kind in ScopeKind::iter() {
            assert_eq!(ScopeKind::from_value(kind.value()), Some(kind));
        }
        assert_eq!(ScopeKind::from_value(0), None);
        assert_eq!(ScopeKind::from_value(6), None);
        assert!(ScopeKind::is_all(1));
        assert!(!ScopeKind::is_all(2));
    }

    #[test]
    fn test_parse_claim_layout() {
        let json = r#"[
            {"roleCode": "ADMIN", "dataScope": 1},
            {"roleCode": "AUDITOR", "dataScope": 5, "customDeptIds": [10, 20]},
            {"roleCode": "EMPTY", "dataScope": 5, "customDeptIds": []},
            {"roleCode": "NULLS", "dataScope": 5, "customDeptIds": null},
            {"roleCode": "NAMED", "dataScope": "self"}
        ]"#;

        let scopes: Vec<RoleDataScope> = serde_json::from_str(json).unwrap();
        assert_eq!(scopes[0].kind, ScopeKind::All);
        assert_eq!(scopes[1].custom_ids(), &[10, 20]);

        // 빈 목록과 목록 없음은 구분된다
        assert_eq!(scopes[2].custom_org_unit_ids, Some(vec![]));
        assert_eq!(scopes[3].custom_org_unit_ids, None);
        assert!(scopes[3].custom_ids().is_empty());

        assert_eq!(scopes[4].kind, ScopeKind::Own);
    }

    #[test]
    fn test_reject_unknown_scope_value() {
        let json = r#"{"roleCode": "X", "dataScope": 9}"#;
        assert!(serde_json::from_str::<RoleDataScope>(json).is_err());

        let json = r#"{"roleCode": "X", "dataScope": "EVERYTHING"}"#;
        assert!(serde_json::from_str::<RoleDataScope>(json).is_err());
    }

    #[test]
    fn test_serialize_as_value() {
        let scope = RoleDataScope::custom("AUDITOR", vec![30]);
        let value = serde_json::to_value(&scope).unwrap();
        assert_eq!(value["dataScope"], 5);
        assert_eq!(value["customDeptIds"][0], 30);

        let value = serde_json::to_value(RoleDataScope::dept("MANAGER")).unwrap();
        assert!(value.get("customDeptIds").is_none());
    }
}
