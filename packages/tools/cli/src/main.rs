//! Data scope CLI (`scopectl`)
//!
//! 정책 선언을 검증하고, 주체 컨텍스트별로 생성되는 필터를 확인하는 운영 도구입니다.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod context;
mod loader;

use config::CliConfig;
use context::ContextArgs;

#[derive(Parser)]
#[command(name = "scopectl")]
#[command(author, version, about = "Data scope policy tool", long_about = None)]
struct Cli {
    /// Policy declaration files (YAML, repeatable)
    #[arg(long = "policies", short = 'p', global = true)]
    policies: Vec<PathBuf>,

    /// Database type (overrides SCOPE_DB_TYPE)
    #[arg(long, global = true)]
    db_type: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate policy declarations
    Check,

    /// Show the filter produced for an operation and principal
    Explain {
        /// Operation id (e.g. system.user.list)
        operation: String,

        /// Existing filter to combine with (raw SQL)
        #[arg(long = "where")]
        existing: Option<String>,

        /// Org hierarchy file (YAML `units: {id: parent}`); tree_path subquery if absent
        #[arg(long)]
        hierarchy: Option<PathBuf>,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// List data scope kinds
    Scopes,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "scope_cli=info,scope_sql=info,scope_core=info".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // 설정 로드 (환경변수 < 명령행)
    let config = CliConfig::from_env()?.with_db_type(cli.db_type.as_deref())?;
    tracing::debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Check => commands::check::run(&cli.policies, cli.format),
        Commands::Explain {
            operation,
            existing,
            hierarchy,
            context,
        } => commands::explain::run(
            &config,
            commands::explain::ExplainArgs {
                policies: &cli.policies,
                hierarchy: hierarchy.as_deref(),
                operation: &operation,
                existing: existing.as_deref(),
                context: &context,
            },
            cli.format,
        ),
        Commands::Scopes => commands::scopes::run(cli.format),
    }
}
