//! Mapping dataset artwork paths to URLs.
//!
//! The core never builds URLs itself; it passes through whatever the
//! configured [`AssetResolver`] returns. A caller whose primary image fails to
//! load retries the fallback once.

use crate::config::AssetTemplates;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Item,
    God,
    Skin,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Item => "item",
            Self::God => "god",
            Self::Skin => "skin",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

pub trait AssetResolver: Send + Sync {
    /// URL(s) for the artwork at `path`, or `None` when there is nothing to show.
    fn resolve(&self, kind: AssetKind, path: &str) -> Option<ResolvedAsset>;
}

/// Substitutes `{path}` into per-kind URL templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    templates: AssetTemplates,
}

const PATH_PLACEHOLDER: &str = "{path}";

impl TemplateResolver {
    pub fn new(templates: AssetTemplates) -> Self {
        Self { templates }
    }

    fn templates(&self, kind: AssetKind) -> (Option<&str>, Option<&str>) {
        let t = &self.templates;
        match kind {
            AssetKind::Item => (t.item.as_deref(), t.item_fallback.as_deref()),
            AssetKind::God => (t.god.as_deref(), t.god_fallback.as_deref()),
            AssetKind::Skin => (t.skin.as_deref(), t.skin_fallback.as_deref()),
        }
    }
}

impl AssetResolver for TemplateResolver {
    fn resolve(&self, kind: AssetKind, path: &str) -> Option<ResolvedAsset> {
        let path = path.trim().trim_start_matches('/');
        if path.is_empty() {
            return None;
        }

        let (primary, fallback) = self.templates(kind);
        let fill = |template: &str| template.replace(PATH_PLACEHOLDER, path);
        match (primary, fallback) {
            (Some(primary), fallback) => Some(ResolvedAsset {
                primary: fill(primary),
                fallback: fallback.map(fill),
            }),
            // a lone fallback template still gives the caller something to show
            (None, Some(fallback)) => Some(ResolvedAsset {
                primary: fill(fallback),
                fallback: None,
            }),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn resolver() -> TemplateResolver {
        TemplateResolver::new(AssetTemplates {
            item: Some("https://cdn.example/items/{path}".into()),
            item_fallback: Some("https://mirror.example/items/{path}".into()),
            god: Some("https://cdn.example/gods/{path}".into()),
            skin_fallback: Some("https://mirror.example/skins/{path}".into()),
            ..AssetTemplates::default()
        })
    }

    #[test]
    fn fills_primary_and_fallback() {
        let_assert!(Some(asset) = resolver().resolve(AssetKind::Item, "/icons/sword.png"));
        check!(asset.primary == "https://cdn.example/items/icons/sword.png");
        check!(asset.fallback.as_deref() == Some("https://mirror.example/items/icons/sword.png"));
    }

    #[test]
    fn missing_fallback_is_none() {
        let_assert!(Some(asset) = resolver().resolve(AssetKind::God, "zeus.png"));
        check!(asset.fallback.is_none());
    }

    #[test]
    fn lone_fallback_becomes_primary() {
        let_assert!(Some(asset) = resolver().resolve(AssetKind::Skin, "zeus/base.png"));
        check!(asset.primary == "https://mirror.example/skins/zeus/base.png");
    }

    #[test]
    fn nothing_to_resolve() {
        check!(resolver().resolve(AssetKind::Item, "  ").is_none());
        check!(TemplateResolver::default().resolve(AssetKind::God, "zeus.png").is_none());
    }
}
