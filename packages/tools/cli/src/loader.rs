//! 정책/계층 파일 로드

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use serde::Deserialize;

use scope_core::hierarchy::{CachingResolver, InMemoryHierarchy, OrgHierarchyResolver};
use scope_core::permissions::PolicyRegistry;
use scope_core::OrgUnitId;

use crate::config::CliConfig;

/// 정책 파일들을 읽어 하나의 레지스트리로 병합 (중복 선언은 에러)
pub fn load_policies(paths: &[PathBuf]) -> anyhow::Result<PolicyRegistry> {
    if paths.is_empty() {
        anyhow::bail!("No policy files given. Use --policies <FILE>");
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        documents.push(content);
    }
    let documents: Vec<&str> = documents.iter().map(String::as_str).collect();

    let registry = PolicyRegistry::from_yaml_documents(&documents)?;
    tracing::info!(operations = registry.len(), files = paths.len(), "loaded policy declarations");
    Ok(registry)
}

/// 계층 파일 형식
///
/// ```yaml
/// units:
///   1: ~
///   10: 1
///   11: 10
/// ```
#[derive(Debug, Deserialize)]
struct HierarchyFile {
    units: BTreeMap<OrgUnitId, Option<OrgUnitId>>,
}

fn parse_hierarchy(content: &str) -> anyhow::Result<InMemoryHierarchy> {
    let file: HierarchyFile = serde_yaml::from_str(content)?;
    Ok(InMemoryHierarchy::from_parents(file.units))
}

/// 계층 resolver 결정
///
/// 파일이 있으면 인메모리 계층, 없으면 조상 경로 서브쿼리를 사용합니다.
pub fn load_resolver(
    path: Option<&Path>,
    config: &CliConfig,
) -> anyhow::Result<Arc<dyn OrgHierarchyResolver>> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let hierarchy = parse_hierarchy(&content)
                .with_context(|| format!("Invalid hierarchy file {}", path.display()))?;
            tracing::info!(units = hierarchy.len(), "loaded org hierarchy");
            Ok(Arc::new(CachingResolver::new(hierarchy)))
        }
        None => Ok(Arc::new(config.path_resolver()?)),
    }
}

#[cfg(test)]
mod tests {
    use scope_core::hierarchy::SubtreeFragment;

    use super::*;

    #[test]
    fn test_parse_hierarchy() {
        let hierarchy = parse_hierarchy(
            r#"
units:
  1: ~
  10: 1
  11: 10
  20: 1
"#,
        )
        .unwrap();
        assert_eq!(hierarchy.len(), 4);
        assert_eq!(
            hierarchy.descendants_of(10).unwrap(),
            SubtreeFragment::Ids(vec![10, 11])
        );
    }

    #[test]
    fn test_no_policy_files() {
        assert!(load_policies(&[]).is_err());
    }
}
