use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use sdk_usage_indexer::gomod::read_sdk_modules;
use sdk_usage_indexer::indexer::parser::index_repository;
use sdk_usage_indexer::report::{calculate_statistics, output_results, write_index_file, IndexReport};
use sdk_usage_indexer::server::SdkUsageServer;
use sdk_usage_indexer::tools;

#[derive(Parser, Debug)]
#[command(
    name = "sdk-usage-indexer",
    about = "Index Microsoft Graph SDK usage across the Terraform provider's Go sources"
)]
struct Args {
    /// Root of the Terraform provider source tree
    repo_path: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write api_endpoint_index_go.json under the root and print a summary
    Index {
        /// Write the index here instead of under the repository root
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the Terraform entities that use an SDK symbol
    SdkUsages {
        /// Qualified symbol (models.User) or bare name (User)
        symbol: String,
    },
    /// Show the SDK dependencies of a Terraform entity
    Dependencies {
        /// Terraform type name, with or without the microsoft365_ prefix
        name: String,
    },
    /// Serve lookups over MCP on stdio
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON report or the MCP transport
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let repo_root = args.repo_path.canonicalize()?;

    tracing::info!("Indexing Go sources in {}", repo_root.display());
    let usage = index_repository(&repo_root)?;

    match args.command {
        None => {
            output_results(&usage, std::io::stdout().lock())?;
        }
        Some(Command::Index { output }) => {
            let sdk_modules = read_sdk_modules(&repo_root)?;
            let report = IndexReport::new(&repo_root, sdk_modules, &usage);
            let path = write_index_file(&repo_root, output.as_deref(), &report)?;
            println!("{}", report.statistics);
            println!("Index written to {}", path.display());
        }
        Some(Command::SdkUsages { symbol }) => {
            let results = tools::sdk_usages::sdk_usages(&usage, &symbol);
            println!("{}", tools::format_sdk_usages(&results));
        }
        Some(Command::Dependencies { name }) => {
            let results = tools::entity_dependencies::entity_dependencies(&usage, &name);
            println!("{}", tools::format_entity_dependencies(&results));
        }
        Some(Command::Serve) => {
            tracing::info!("{}", calculate_statistics(&usage).to_string().replace('\n', "; "));
            let server = SdkUsageServer::new(repo_root, usage);
            let service = server.serve(rmcp::transport::stdio()).await?;
            service.waiting().await?;
        }
    }

    Ok(())
}
