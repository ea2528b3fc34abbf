//! Key derivation shared by the item index and the search filters.

/// Lowercased, trimmed.
pub fn lower_trim(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lowercased with everything but ASCII letters and digits removed.
///
/// `"HEALTH-POTION"`, `"Health Potion"` and `"healthpotion"` share the key `"healthpotion"`.
pub fn alnum_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Lowercased, trimmed, with all whitespace removed.
pub fn no_space_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
