//! 필터 설명 명령어
//!
//! 주어진 주체 컨텍스트로 작업을 평가하여 병합 결과와 최종 SQL 조건을 보여줍니다.

use std::path::{Path, PathBuf};

use scope_core::permissions::MergeDecision;
use scope_sql::{DataScopeEngine, Filter};

use crate::config::CliConfig;
use crate::context::ContextArgs;
use crate::loader;
use crate::OutputFormat;

pub struct ExplainArgs<'a> {
    pub policies: &'a [PathBuf],
    pub hierarchy: Option<&'a Path>,
    pub operation: &'a str,
    pub existing: Option<&'a str>,
    pub context: &'a ContextArgs,
}

pub fn run(config: &CliConfig, args: ExplainArgs<'_>, format: OutputFormat) -> anyhow::Result<()> {
    let registry = loader::load_policies(args.policies)?;
    let resolver = loader::load_resolver(args.hierarchy, config)?;
    let engine = DataScopeEngine::new(registry.into(), resolver).with_dialect(config.dialect);

    let context = args.context.resolve(&config.superuser_role)?;
    let decision = engine.decide(args.operation, &context);
    let filter = engine.evaluate(args.operation, &context, args.existing.map(Filter::raw))?;
    let sql = filter.as_ref().map(|f| f.to_sql(config.dialect));

    match format {
        OutputFormat::Json => {
            let report = json_report(&engine, args.operation, decision.as_ref(), sql.as_deref());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Operation: {}", args.operation);
            println!("Decision:  {}", describe(decision.as_ref()));
            println!("Dialect:   {}", config.dialect);
            match sql {
                Some(sql) => println!("Filter:    {sql}"),
                None => println!("Filter:    (none)"),
            }
        }
    }

    Ok(())
}

fn json_report(
    engine: &DataScopeEngine,
    operation: &str,
    decision: Option<&MergeDecision>,
    sql: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "operation": operation,
        "governed": engine.registry().governs(operation),
        "decision": decision.map(|d| d.to_string()),
        "dialect": engine.dialect().name(),
        "filter": sql,
    })
}

fn describe(decision: Option<&MergeDecision>) -> String {
    match decision {
        Some(decision) => decision.to_string(),
        None => "not governed".to_string(),
    }
}
