//! Pin/unpin handler.

use crate::context::CodexContext;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TogglePinRequest {
    /// God to pin or unpin
    pub name: String,
    /// User whose pins change; becomes the current user. Defaults to the stored current user.
    #[serde(default)]
    pub user: Option<String>,
}

pub async fn handle_toggle_pin(
    context: &CodexContext,
    request: TogglePinRequest,
) -> Result<String, String> {
    let catalog = context.catalog().await;
    let god = catalog
        .god(&request.name)
        .ok_or_else(|| format!("No god named '{}'.", request.name.trim()))?;

    let pins = context.pins();
    let user = match request.user.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(user) => {
            // fire-and-forget
            drop(pins.set_current_user(user));
            user.to_string()
        }
        None => pins.current_user().await,
    };

    let toggle = pins.toggle_pin(&user, god).await;

    let mut out = format!(
        "{} {} for {}.\n",
        if toggle.is_pinned { "Pinned" } else { "Unpinned" },
        god.display_name(),
        user
    );
    if toggle.pinned.is_empty() {
        out.push_str("No pinned gods.\n");
    } else {
        out.push_str("Pinned gods:\n");
        for pinned in &toggle.pinned {
            let _ = writeln!(out, "• {}", pinned.display_name());
        }
    }
    Ok(out)
}
