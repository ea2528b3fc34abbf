//! God listing handler.

use super::not_loaded_note;
use crate::context::CodexContext;
use crate::filter::{GodQuery, filter_gods};
use crate::format;
use crate::roles::CanonicalRole;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchGodsRequest {
    /// Case-insensitive substring of the god's name. Empty lists everything (capped).
    #[serde(default)]
    pub query: Option<String>,
    /// Exact pantheon name, e.g. "Greek"
    #[serde(default)]
    pub pantheon: Option<String>,
    /// Lane: ADC, Solo, Support, Mid or Jungle
    #[serde(default)]
    pub role: Option<String>,
}

pub async fn handle_search_gods(
    context: &CodexContext,
    request: SearchGodsRequest,
) -> Result<String, String> {
    let role = request
        .role
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .map(str::parse::<CanonicalRole>)
        .transpose()
        .map_err(|e| e.to_string())?;

    let query = GodQuery {
        search: request.query.unwrap_or_default(),
        pantheon: request.pantheon.filter(|p| !p.is_empty()),
        role,
    };

    let catalog = context.catalog().await;
    let gods = filter_gods(catalog.gods(), &query, context.config().limits.gods);

    if gods.is_empty() {
        let mut msg = "No gods match.".to_string();
        if let Some(note) = not_loaded_note(&context.catalog_state().status().await) {
            msg.push(' ');
            msg.push_str(note);
        }
        return Ok(msg);
    }

    let mut out = format!("Gods ({} of {}):\n", gods.len(), catalog.gods().len());
    for god in gods {
        let _ = write!(out, "• {}", god.display_name());
        if let Some(pantheon) = god.pantheon.as_deref() {
            let _ = write!(out, " ({})", pantheon);
        }
        let roles = format::god_roles(god);
        if !roles.is_empty() {
            let _ = write!(out, " · {}", roles);
        }
        out.push('\n');
    }
    Ok(out)
}
