//! 정책 선언 검증 명령어

use std::path::PathBuf;

use scope_core::permissions::PolicyDeclaration;

use crate::loader;
use crate::OutputFormat;

pub fn run(policies: &[PathBuf], format: OutputFormat) -> anyhow::Result<()> {
    // 선언 에러는 여기서 실패 (종료 코드 != 0)
    let registry = loader::load_policies(policies)?;

    match format {
        OutputFormat::Json => {
            let declarations: serde_json::Map<String, serde_json::Value> = registry
                .operations()
                .into_iter()
                .filter_map(|op| {
                    let decl = registry.lookup(op)?;
                    Some((op.to_string(), serde_json::to_value(decl).ok()?))
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "ok": true,
                    "declarations": declarations,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{} declarations OK", registry.len());
            for op in registry.operations() {
                if let Some(decl) = registry.lookup(op) {
                    println!("- {}: {}", op, describe(decl));
                }
            }
        }
    }

    Ok(())
}

fn describe(decl: &PolicyDeclaration) -> String {
    if !decl.enabled {
        return "disabled".to_string();
    }
    let qualified = |alias: &Option<String>, column: &str| match alias {
        Some(alias) => format!("{alias}.{column}"),
        None => column.to_string(),
    };
    format!(
        "org unit {}, owner {}",
        qualified(&decl.org_unit_alias, &decl.org_unit_column),
        qualified(&decl.owner_alias, &decl.owner_column)
    )
}
