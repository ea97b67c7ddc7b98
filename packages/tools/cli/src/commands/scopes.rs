//! 데이터 스코프 종류 출력

use scope_core::permissions::ScopeKind;

use crate::OutputFormat;

pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let kinds: Vec<serde_json::Value> = ScopeKind::iter()
                .map(|kind| {
                    serde_json::json!({
                        "value": kind.value(),
                        "name": kind.name(),
                        "label": kind.label(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&kinds)?);
        }
        OutputFormat::Text => {
            println!("{:<6} {:<14} LABEL", "VALUE", "NAME");
            for kind in ScopeKind::iter() {
                println!("{:<6} {:<14} {}", kind.value(), kind.name(), kind.label());
            }
        }
    }
    Ok(())
}
