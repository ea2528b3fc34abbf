//! Lane role classification for gods and builds.
//!
//! Gods declare roles as free text ("Carry", "Solo Laner", "Guardian"), and
//! builds only describe theirs in prose notes. Both are mapped onto the five
//! canonical lanes. God-level labels that match no lane are kept, title-cased,
//! so they still show up in listings.

use crate::dataset::{Build, God};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// One of the five lanes. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalRole {
    #[serde(rename = "ADC")]
    Adc,
    Solo,
    Support,
    Mid,
    Jungle,
}

impl CanonicalRole {
    pub const ALL: [Self; 5] = [Self::Adc, Self::Solo, Self::Support, Self::Mid, Self::Jungle];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::Solo => "Solo",
            Self::Support => "Support",
            Self::Mid => "Mid",
            Self::Jungle => "Jungle",
        }
    }

    /// Substring rules for declared god roles, in priority order.
    fn from_declared(lower: &str) -> Option<Self> {
        if lower.contains("adc") || lower.contains("carry") {
            Some(Self::Adc)
        } else if lower.contains("solo") {
            Some(Self::Solo)
        } else if lower.contains("support") {
            Some(Self::Support)
        } else if lower.contains("mid") {
            // "middle" contains "mid"
            Some(Self::Mid)
        } else if lower.contains("jungle") {
            Some(Self::Jungle)
        } else {
            None
        }
    }
}

impl fmt::Display for CanonicalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for role names that do not map to a lane.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected ADC, Solo, Support, Mid or Jungle)")]
pub struct UnknownRole(pub String);

impl FromStr for CanonicalRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_declared(&s.trim().to_lowercase()).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A role as shown for a god: a lane, or a pass-through label.
///
/// Ordering puts lanes first in lane order, then other labels alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleLabel {
    Canonical(CanonicalRole),
    Other(String),
}

impl RoleLabel {
    /// Classifies one declared role string. Blank input yields `None`.
    pub fn classify(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        Some(match CanonicalRole::from_declared(&lower) {
            Some(role) => Self::Canonical(role),
            None => Self::Other(title_case(raw.trim())),
        })
    }

    pub const fn canonical(&self) -> Option<CanonicalRole> {
        match self {
            Self::Canonical(role) => Some(*role),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical(role) => fmt::Display::fmt(role, f),
            Self::Other(label) => f.write_str(label),
        }
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Declared roles of a god, in display order.
pub fn classify_god_roles(god: &God) -> BTreeSet<RoleLabel> {
    god.declared_roles()
        .iter()
        .filter_map(|raw| RoleLabel::classify(raw))
        .collect()
}

/// Lanes among a god's declared roles.
pub fn god_lanes(god: &God) -> BTreeSet<CanonicalRole> {
    classify_god_roles(god)
        .iter()
        .filter_map(RoleLabel::canonical)
        .collect()
}

/// Sorts labels for display: lanes in lane order, then the rest alphabetically.
pub fn display_order(labels: impl IntoIterator<Item = RoleLabel>) -> Vec<RoleLabel> {
    labels.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

static ADC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(adc|carry)\b").unwrap());
static MID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(mid|middle)\b").unwrap());
static SUPPORT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bsupport\b").unwrap());
static JUNGLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bjungle\b").unwrap());
static SOLO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bsolo\b").unwrap());

/// Lowercased `role lane notes title name` blob of a build.
pub fn build_text(build: &Build) -> String {
    build.text_fields().collect::<Vec<_>>().join(" ").to_lowercase()
}

fn is_solo_text(text: &str) -> bool {
    SOLO_RE.is_match(text)
        || ["bruiser solo", "solo bruiser", "solo-lane", "solo lane"]
            .iter()
            .any(|phrase| text.contains(phrase))
        // notes call solo builds "Bruiser" builds without a consistent word order
        || (text.contains("bruiser") && text.contains("solo"))
}

/// Every lane a build's text describes.
pub fn classify_build_roles(build: &Build) -> BTreeSet<CanonicalRole> {
    classify_text_roles(&build_text(build))
}

/// Every lane a lowercase text blob describes.
pub fn classify_text_roles(text: &str) -> BTreeSet<CanonicalRole> {
    let mut roles = BTreeSet::new();
    if ADC_RE.is_match(text) {
        roles.insert(CanonicalRole::Adc);
    }
    if MID_RE.is_match(text) {
        roles.insert(CanonicalRole::Mid);
    }
    if SUPPORT_RE.is_match(text) {
        roles.insert(CanonicalRole::Support);
    }
    if JUNGLE_RE.is_match(text) {
        roles.insert(CanonicalRole::Jungle);
    }
    if is_solo_text(text) {
        roles.insert(CanonicalRole::Solo);
    }
    roles
}

/// Primary lane of a build for display.
///
/// The hint wins when the build matches it; otherwise the first matching lane
/// in lane order.
pub fn classify_build_role(build: &Build, hint: Option<CanonicalRole>) -> Option<CanonicalRole> {
    let roles = classify_build_roles(build);
    match hint {
        Some(hint) if roles.contains(&hint) => Some(hint),
        _ => roles.first().copied(),
    }
}

/// A god plays a lane if it declares it or any of its builds describe it.
pub fn god_plays(god: &God, role: CanonicalRole) -> bool {
    god_lanes(god).contains(&role)
        || god
            .builds
            .iter()
            .any(|build| classify_build_roles(build).contains(&role))
}
