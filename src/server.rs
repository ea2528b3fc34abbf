//! MCP server exposing the catalog as tools.

use crate::config::Config;
use crate::context::CodexContext;
use crate::dataset::CatalogState;
use crate::tools::{
    InspectGodRequest, ResolveItemRequest, SearchGodsRequest, SearchItemsRequest,
    SearchMechanicsRequest, TogglePinRequest, handle_inspect_god, handle_resolve_item,
    handle_search_gods, handle_search_items, handle_search_mechanics, handle_toggle_pin,
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for god, item and mechanic lookups
#[derive(Clone)]
pub struct CodexServer {
    /// Shared catalog, pins, assets and config
    context: CodexContext,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for CodexServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodexServer")
            .field("context", &self.context)
            .finish()
    }
}

#[tool_router]
impl CodexServer {
    /// Create a server over `catalog`, which may still be loading.
    pub fn with_catalog(config: Config, catalog: Arc<CatalogState>) -> Self {
        Self::with_context(CodexContext::with_catalog(config, catalog))
    }

    fn with_context(context: CodexContext) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    pub fn context(&self) -> &CodexContext {
        &self.context
    }

    #[tool(
        description = "List gods, optionally filtered by pantheon and lane (ADC, Solo, Support, Mid, Jungle) and searched by name. Without a query the listing is capped.",
        input_schema = inline_schema_for_type::<SearchGodsRequest>()
    )]
    async fn search_gods(
        &self,
        Parameters(request): Parameters<SearchGodsRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_gods(&self.context, request).await
    }

    #[tool(
        description = "List items, optionally filtered by stat and tier tag (Tier 1-3, Starter, Active, Relic, Consumable, God Specific) and searched by name or internal name.",
        input_schema = inline_schema_for_type::<SearchItemsRequest>()
    )]
    async fn search_items(
        &self,
        Parameters(request): Parameters<SearchItemsRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_items(&self.context, request).await
    }

    #[tool(
        description = "Search the gameplay mechanics glossary by name or description, optionally within one category.",
        input_schema = inline_schema_for_type::<SearchMechanicsRequest>()
    )]
    async fn search_mechanics(
        &self,
        Parameters(request): Parameters<SearchMechanicsRequest>,
    ) -> std::result::Result<String, String> {
        handle_search_mechanics(&self.context, request).await
    }

    #[tool(
        description = "Resolve a loosely written item name (typos in punctuation, spacing or case are fine) and show its stats, artwork and recipe tree. Suggests close names when nothing matches.",
        input_schema = inline_schema_for_type::<ResolveItemRequest>()
    )]
    async fn resolve_item(
        &self,
        Parameters(request): Parameters<ResolveItemRequest>,
    ) -> std::result::Result<String, String> {
        handle_resolve_item(&self.context, request).await
    }

    #[tool(
        description = "Show a god's roles, abilities, ability leveling order, base stats at a level, and curated builds with resolved items. An optional lane focuses leveling and builds.",
        input_schema = inline_schema_for_type::<InspectGodRequest>()
    )]
    async fn inspect_god(
        &self,
        Parameters(request): Parameters<InspectGodRequest>,
    ) -> std::result::Result<String, String> {
        handle_inspect_god(&self.context, request).await
    }

    #[tool(
        description = "Pin a god for a user, or unpin it if already pinned. Returns the user's pinned gods.",
        input_schema = inline_schema_for_type::<TogglePinRequest>()
    )]
    async fn toggle_pin(
        &self,
        Parameters(request): Parameters<TogglePinRequest>,
    ) -> std::result::Result<String, String> {
        handle_toggle_pin(&self.context, request).await
    }
}

#[tool_handler]
impl ServerHandler for CodexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "pantheon-codex: god, item and build reference. \
                 The dataset loads in the background; listings are empty until it is ready. \
                 Item names are matched loosely, so paste names as written in build notes.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline definitions instead of $ref patterns.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
