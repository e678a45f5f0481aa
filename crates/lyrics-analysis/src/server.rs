//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes lyrics analysis over stdio so assistants can analyze a payload
//! they already fetched. Each `#[tool]` method delegates to
//! `lyrics_analysis_core`; no analysis logic lives here.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use lyrics_analysis_core::analysis::{self, DEFAULT_TOP_WORDS};
use lyrics_analysis_core::catalog::{CatalogResponse, SearchQuery};
use lyrics_analysis_core::cloud::{CloudSource, WordCloudFrequencies};
use lyrics_analysis_core::config::Config;
use lyrics_analysis_core::{AnalysisError, LyricsPayload, check_input_size};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_lyrics` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeLyricsParams {
    /// Lyrics provider payload as JSON text: `{"lyrics": {"lines": [{"words": "..."}]}}`.
    pub payload: String,
    /// Number of entries in the top-words ranking.
    pub top: Option<usize>,
}

/// Parameters for the `word_cloud` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct WordCloudParams {
    /// Lyrics provider payload as JSON text.
    pub payload: String,
    /// Word list to draw: "top" (default) or "unique".
    #[serde(default)]
    pub kind: CloudSource,
}

/// Parameters for the `build_search_query` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BuildSearchQueryParams {
    /// Track title.
    pub track: Option<String>,
    /// Artist name.
    pub artist: Option<String>,
    /// Album name.
    pub album: Option<String>,
}

/// Parameters for the `summarize_tracks` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SummarizeTracksParams {
    /// Catalog search response as JSON text.
    pub response: String,
}

/// MCP server exposing lyrics analysis to AI assistants.
#[derive(Clone)]
pub struct LyricsServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    top_words: usize,
    max_input_bytes: Option<usize>,
}

impl Default for LyricsServer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[tool_router]
impl LyricsServer {
    /// Create a server using the analysis settings from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            top_words: config.top_words_limit(),
            max_input_bytes: config.input_limit(),
        }
    }

    fn decode_payload(&self, payload: &str) -> Result<LyricsPayload, McpError> {
        check_input_size(payload.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        LyricsPayload::from_json(payload).map_err(|e| match e {
            AnalysisError::InvalidPayload(reason) => {
                McpError::invalid_params(format!("no lyrics found: {reason}"), None)
            }
            other => McpError::internal_error(other.to_string(), None),
        })
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        if params.format == "json" {
            return to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "top_words": self.top_words,
            }));
        }
        let text = format!(
            "{} v{}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Analyze a lyrics payload.
    #[tool(
        description = "Analyze song lyrics: repeated lines, word count, top words, once-only words, and Korean/Chinese/Japanese character counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_lyrics(
        &self,
        Parameters(params): Parameters<AnalyzeLyricsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_lyrics", top = ?params.top, "executing MCP tool");

        let payload = self.decode_payload(&params.payload)?;
        let report = analysis::analyze_payload(&payload, params.top.unwrap_or(self.top_words));

        tracing::info!(
            tool = "analyze_lyrics",
            word_count = report.word_count,
            "MCP tool completed"
        );
        to_json(&report)
    }

    /// Build the word-cloud frequency table for a lyrics payload.
    #[tool(
        description = "Build a word-cloud frequency table (word and weight) from song lyrics, using either the top words or the once-only words."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn word_cloud(
        &self,
        Parameters(params): Parameters<WordCloudParams>,
    ) -> Result<CallToolResult, McpError> {
        let payload = self.decode_payload(&params.payload)?;
        let report = analysis::analyze_payload(&payload, self.top_words);
        let table = WordCloudFrequencies::from_report(&report, params.kind);

        tracing::info!(tool = "word_cloud", words = table.len(), "MCP tool completed");
        to_json(&table)
    }

    /// Build a catalog search query string.
    #[tool(
        description = "Build a music catalog search query (e.g. `track:Yellow artist:Coldplay`) from track, artist and album fields. At least one field is required."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn build_search_query(
        &self,
        Parameters(params): Parameters<BuildSearchQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = SearchQuery {
            track: params.track,
            artist: params.artist,
            album: params.album,
        };
        query
            .validate()
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        to_json(&serde_json::json!({ "query": query.to_query_string() }))
    }

    /// Summarize a catalog search response.
    #[tool(
        description = "Turn a music catalog search response into track summaries (id, track name, artists, cover image URL)."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn summarize_tracks(
        &self,
        Parameters(params): Parameters<SummarizeTracksParams>,
    ) -> Result<CallToolResult, McpError> {
        check_input_size(params.response.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let tracks = CatalogResponse::from_json(&params.response)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?
            .into_summaries();

        tracing::info!(tool = "summarize_tracks", tracks = tracks.len(), "MCP tool completed");
        to_json(&tracks)
    }
}

#[tool_handler]
impl ServerHandler for LyricsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Pass a lyrics provider payload to analyze_lyrics or word_cloud.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

impl LyricsServer {
    /// Top-words size used when a tool call does not set one.
    pub const fn default_top_words(&self) -> usize {
        self.top_words
    }
}
