//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the analysis functions and the state store to AI assistants over
//! stdio. Every `#[tool]` method delegates to `toshu_core`; no business logic
//! lives here.
//!
//! # State
//!
//! One [`StateStore`] is opened at startup and shared behind
//! `Arc<Mutex<_>>`. Each tool call holds the lock for its whole
//! read-modify-persist sequence, so concurrent calls never interleave writes.
//! Theme changes live for the life of the server process only.
//!
//! # Errors
//!
//! Caller mistakes (blank reference text, bad colors, oversized or blank
//! input) come back as `invalid_params`; I/O and serialization failures as
//! `internal_error`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use camino::Utf8PathBuf;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use toshu_core::{
    AnalysisError, CustomThemePatch, StateStore, StoreError, ThemeName, report, similarity, stats,
    style,
};

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

/// Parameters for the `compute_stats` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ComputeStatsParams {
    /// Text to measure. Omit to measure the stored document.
    pub text: Option<String>,
    /// Include character-without-spaces, sentence and paragraph counts.
    #[serde(default)]
    pub detailed: bool,
}

/// Parameters for the `check_style` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckStyleParams {
    /// Text to check. Omit to check the stored document.
    pub text: Option<String>,
}

/// Parameters for the `compare_texts` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CompareTextsParams {
    /// First text.
    pub text_a: String,
    /// Second text.
    pub text_b: String,
}

/// Parameters for the `set_document` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SetDocumentParams {
    /// New document content, markup included.
    pub content: String,
}

/// Parameters for the `add_reference` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddReferenceParams {
    /// Citation text.
    pub text: String,
}

/// Parameters for the `delete_reference` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DeleteReferenceParams {
    /// Id of the reference to remove.
    pub id: u64,
}

/// Parameters for the `set_sticky_notes` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SetStickyNotesParams {
    /// The complete new set of notes. Stored as given.
    pub notes: Vec<serde_json::Value>,
}

/// Parameters for the `set_theme` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SetThemeParams {
    /// One of "light", "dark", "bw", "paper".
    pub theme: ThemeName,
}

/// Parameters for the `save_report` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SaveReportParams {
    /// File name prefix, e.g. "similarity".
    pub prefix: String,
    /// Report body.
    pub content: String,
}

/// MCP server exposing toshu to AI assistants.
#[derive(Clone)]
pub struct ToshuServer {
    store: Arc<Mutex<StateStore>>,
    report_dir: Utf8PathBuf,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl ToshuServer {
    /// Create a server around an opened store.
    pub fn new(store: StateStore, report_dir: Utf8PathBuf, max_input_bytes: Option<usize>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            report_dir,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    /// The store stays usable after a panicking call; the files on disk are
    /// always whole.
    fn store(&self) -> MutexGuard<'_, StateStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_input_size(&self, text: &str) -> Result<(), McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(())
    }

    /// The given text, or a copy of the stored document.
    fn text_or_document(&self, text: Option<String>) -> Result<String, McpError> {
        match text {
            Some(text) => {
                self.check_input_size(&text)?;
                Ok(text)
            }
            None => Ok(self.store().document().to_string()),
        }
    }

    /// Get project information.
    #[tool(description = "Get toshu's name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Count words and characters and estimate pages (250 words/page) and reading time (200 words/min). Markup tags are ignored. Omit text to measure the stored document."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compute_stats(
        &self,
        Parameters(params): Parameters<ComputeStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.text_or_document(params.text)?;
        let report = stats::compute_detailed_stats(&text);
        tracing::info!(
            tool = "compute_stats",
            words = report.stats.word_count,
            "MCP tool completed"
        );
        if params.detailed {
            json_result(&report)
        } else {
            json_result(&report.stats)
        }
    }

    #[tool(
        description = "Flag sentences over 30 words, runs of 3+ spaces, and frequent 'was ...ed' passive voice. Returns at most 5 issues; texts under 10 words are not checked."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_style(
        &self,
        Parameters(params): Parameters<CheckStyleParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.text_or_document(params.text)?;
        let issues = style::check_style(&text);
        tracing::info!(tool = "check_style", count = issues.len(), "MCP tool completed");
        json_result(&issues)
    }

    #[tool(
        description = "Compare two texts. Returns Jaccard, cosine, and vocabulary-overlap similarity as percentages."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compare_texts(
        &self,
        Parameters(params): Parameters<CompareTextsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input_size(&params.text_a)?;
        self.check_input_size(&params.text_b)?;
        let score =
            similarity::compare(&params.text_a, &params.text_b).map_err(analysis_error)?;
        tracing::info!(
            tool = "compare_texts",
            jaccard = score.jaccard_percent,
            "MCP tool completed"
        );
        json_result(&score)
    }

    #[tool(description = "Get the stored document content.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_document(&self) -> Result<CallToolResult, McpError> {
        let store = self.store();
        json_result(&serde_json::json!({ "content": store.document() }))
    }

    #[tool(description = "Replace the stored document content and save it.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn set_document(
        &self,
        Parameters(params): Parameters<SetDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input_size(&params.content)?;
        let mut store = self.store();
        store.set_document(params.content).map_err(store_error)?;
        json_result(&serde_json::json!({ "success": true }))
    }

    #[tool(description = "List stored references in insertion order.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn list_references(&self) -> Result<CallToolResult, McpError> {
        let store = self.store();
        json_result(&store.references())
    }

    #[tool(description = "Add a reference. Returns the new reference with its id.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn add_reference(
        &self,
        Parameters(params): Parameters<AddReferenceParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut store = self.store();
        let reference = store.add_reference(params.text).map_err(store_error)?;
        json_result(&reference)
    }

    #[tool(description = "Delete the reference with the given id. Deleting an unknown id succeeds.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn delete_reference(
        &self,
        Parameters(params): Parameters<DeleteReferenceParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut store = self.store();
        let deleted = store.delete_reference(params.id).map_err(store_error)?;
        json_result(&serde_json::json!({ "success": true, "deleted": deleted }))
    }

    #[tool(description = "Get the stored sticky notes.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_sticky_notes(&self) -> Result<CallToolResult, McpError> {
        let store = self.store();
        json_result(&store.sticky_notes())
    }

    #[tool(description = "Replace all sticky notes and save them.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn set_sticky_notes(
        &self,
        Parameters(params): Parameters<SetStickyNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut store = self.store();
        store.set_sticky_notes(params.notes).map_err(store_error)?;
        json_result(&serde_json::json!({ "success": true }))
    }

    #[tool(description = "Get the current theme name.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_theme(&self) -> Result<CallToolResult, McpError> {
        let theme = self.store().theme();
        json_result(&serde_json::json!({ "theme": theme }))
    }

    #[tool(description = "Switch theme: light, dark, bw, or paper. Not saved between sessions.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn set_theme(
        &self,
        Parameters(params): Parameters<SetThemeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.store().set_theme(params.theme);
        json_result(&serde_json::json!({ "success": true, "theme": params.theme }))
    }

    #[tool(description = "Get the custom theme colors.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_custom_theme(&self) -> Result<CallToolResult, McpError> {
        let store = self.store();
        json_result(store.custom_theme())
    }

    #[tool(
        description = "Update some or all custom theme colors (#RGB or #RRGGBB). Returns the full theme. Not saved between sessions."
    )]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn merge_custom_theme(
        &self,
        Parameters(patch): Parameters<CustomThemePatch>,
    ) -> Result<CallToolResult, McpError> {
        let mut store = self.store();
        let theme = store.merge_custom_theme(&patch).map_err(store_error)?;
        json_result(theme)
    }

    #[tool(description = "Save text to a timestamped report file. Returns the file path.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", prefix = %params.prefix))]
    fn save_report(
        &self,
        Parameters(params): Parameters<SaveReportParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input_size(&params.content)?;
        let path = report::save_report(&self.report_dir, &params.prefix, &params.content)
            .map_err(store_error)?;
        json_result(&serde_json::json!({ "path": path }))
    }
}

fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn store_error(err: StoreError) -> McpError {
    match err {
        StoreError::EmptyReference | StoreError::InvalidColor { .. } => {
            McpError::invalid_params(err.to_string(), None)
        }
        StoreError::Io { .. } | StoreError::Serialize { .. } => {
            tracing::error!(error = %err, "store operation failed");
            McpError::internal_error(err.to_string(), None)
        }
    }
}

fn analysis_error(err: AnalysisError) -> McpError {
    match err {
        AnalysisError::EmptyInput => McpError::invalid_params(err.to_string(), None),
    }
}

#[tool_handler]
impl ServerHandler for ToshuServer {
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
                "{} MCP server. Measure and style-check text, compare two texts, and manage the \
                 stored document, references, sticky notes and theme.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
