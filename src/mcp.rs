use std::sync::Arc;

use rmcp::{
    ServerHandler,
    ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult,
        Content,
        Implementation,
        ServerCapabilities,
        ServerInfo,
    },
    tool,
    tool_handler,
    tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error,
    index::RuleIndex,
    matcher::JaroWinklerScorer,
    search::{self, SearchOptions},
};

struct ServerState {
    index: RuleIndex,
    scorer: JaroWinklerScorer,
}

#[derive(Clone)]
pub struct RulesMcpServer {
    state: Arc<ServerState>,
    tool_router: ToolRouter<Self>,
}

impl RulesMcpServer {
    fn new(index: RuleIndex) -> Self {
        Self {
            state: Arc::new(ServerState {
                index,
                scorer: JaroWinklerScorer,
            }),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router(router = tool_router)]
impl RulesMcpServer {
    /// Fuzzy-search the rule index and return matched documents as text.
    #[tool(
        name = "pf2e_search",
        description = "Search all Pathfinder 2E rules (spells, feats, creatures, items, conditions). Use this for any general Pathfinder rules question."
    )]
    pub async fn pf2e_search(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let params = params.0;

        let options = SearchOptions {
            top_n: params.limit.unwrap_or(search::DEFAULT_TOP_N),
            min_score: params.min_score.unwrap_or(search::DEFAULT_MIN_SCORE),
        };

        let report = search::execute_search(
            &params.query,
            &self.state.index,
            &self.state.scorer,
            &options,
        );

        // Text in, text out: callers get one string, never structured
        // data.
        Ok(CallToolResult::success(vec![Content::text(report)]))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RulesMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(
                Implementation::new(
                    "rulefinder".to_string(),
                    env!("CARGO_PKG_VERSION").to_string(),
                )
                .with_title("rulefinder MCP".to_string()),
            )
            .with_instructions(
                "Use pf2e_search to look up Pathfinder 2E rules by approximate name. Queries are fuzzy-matched against document names."
                    .to_string(),
            )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text rule name to look up.
    pub query: String,
    /// Maximum number of ranked candidates (default: 3).
    pub limit: Option<usize>,
    /// Minimum similarity score on a 0-100 scale (default: 60).
    pub min_score: Option<f32>,
}

/// Build the index once, then serve the tool over stdio until the
/// client disconnects.
pub fn run_mcp(index: RuleIndex) -> error::Result<()> {
    let server = RulesMcpServer::new(index);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            error::Error::Config(format!("failed to start tokio runtime: {e}"))
        })?;

    runtime.block_on(async move {
        let transport = rmcp::transport::stdio();
        let running = server.serve(transport).await.map_err(|e| {
            error::Error::Config(format!(
                "MCP server initialization failed: {e}"
            ))
        })?;
        running.waiting().await.map_err(|e| {
            error::Error::Config(format!("MCP server error: {e}"))
        })?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_server() -> (RulesMcpServer, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let spells = tmp.path().join("spell");
        std::fs::create_dir_all(&spells).unwrap();
        std::fs::write(
            spells.join("fireball.json"),
            r#"{"name":"Fireball","level":3}"#,
        )
        .unwrap();

        let index = RuleIndex::build(tmp.path()).unwrap();
        (RulesMcpServer::new(index), tmp)
    }

    fn result_text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn search_tool_returns_matched_document() {
        let (server, _tmp) = fixture_server();

        let params = SearchParams {
            query: "firebal".to_string(),
            limit: None,
            min_score: None,
        };
        let result = server.pf2e_search(Parameters(params)).await.unwrap();

        assert_eq!(result.is_error, Some(false));
        assert!(result.structured_content.is_none());

        let text = result_text(&result);
        assert!(text.starts_with("--- MATCH: Fireball (spell) ---"));
        assert!(text.contains("\"name\": \"Fireball\""));
    }

    #[tokio::test]
    async fn search_tool_reports_no_results() {
        let (server, _tmp) = fixture_server();

        let params = SearchParams {
            query: "zzzzzz".to_string(),
            limit: None,
            min_score: None,
        };
        let result = server.pf2e_search(Parameters(params)).await.unwrap();

        assert_eq!(result_text(&result), "No rules found matching 'zzzzzz'.");
    }
}
