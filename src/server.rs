use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::indexer::parser::index_repository;
use crate::indexer::UsageMap;
use crate::report::calculate_statistics;

#[derive(Clone)]
pub struct SdkUsageServer {
    repo_root: PathBuf,
    usage: Arc<RwLock<UsageMap>>,
    tool_router: ToolRouter<Self>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SdkUsagesParams {
    #[schemars(description = "SDK symbol to look up, either qualified (e.g. 'models.User', 'models.NewUser.SetDisplayName') or a bare name (e.g. 'User')")]
    pub symbol: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EntityDependenciesParams {
    #[schemars(description = "Terraform type name, with or without the 'microsoft365_' prefix")]
    pub name: String,
}

#[tool_router]
impl SdkUsageServer {
    pub fn new(repo_root: PathBuf, usage: UsageMap) -> Self {
        Self {
            repo_root,
            usage: Arc::new(RwLock::new(usage)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List the Terraform resources, actions, list resources, ephemerals and data sources that use a Microsoft Graph or Kiota SDK symbol (type, method or enum).")]
    async fn sdk_usages(
        &self,
        Parameters(params): Parameters<SdkUsagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let usage = self.usage.read();
        let results = crate::tools::sdk_usages::sdk_usages(&usage, &params.symbol);
        let output = crate::tools::format_sdk_usages(&results);
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(description = "Show the SDK types, fields, methods and enums a Terraform entity uses.")]
    async fn entity_dependencies(
        &self,
        Parameters(params): Parameters<EntityDependenciesParams>,
    ) -> Result<CallToolResult, McpError> {
        let usage = self.usage.read();
        let results = crate::tools::entity_dependencies::entity_dependencies(&usage, &params.name);
        let output = crate::tools::format_entity_dependencies(&results);
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(description = "Summary counts of indexed Terraform entities and distinct SDK types, methods and enums.")]
    async fn statistics(&self) -> Result<CallToolResult, McpError> {
        let stats = calculate_statistics(&self.usage.read());
        Ok(CallToolResult::success(vec![Content::text(stats.to_string())]))
    }

    #[tool(description = "Re-index the provider source tree. Use this after changing the codebase.")]
    async fn reindex(&self) -> Result<CallToolResult, McpError> {
        info!("Re-indexing provider at {}", self.repo_root.display());

        match index_repository(&self.repo_root) {
            Ok(new_usage) => {
                let stats = calculate_statistics(&new_usage);
                *self.usage.write() = new_usage;
                Ok(CallToolResult::success(vec![Content::text(format!(
                    "Reindex complete.\n{}",
                    stats
                ))]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Reindex failed: {}",
                e
            ))])),
        }
    }
}

#[tool_handler]
impl ServerHandler for SdkUsageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sdk-usage-indexer".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Cross-reference between Terraform provider entities and the Microsoft Graph SDK \
                 symbols they use. Provides sdk_usages, entity_dependencies, statistics and reindex tools."
                    .to_string(),
            ),
        }
    }
}
