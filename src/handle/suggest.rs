use super::syntax::MIN_HANDLE_LEN;

/// Used when neither the display name nor the email yields a usable base.
pub const FALLBACK_HANDLE: &str = "user";
/// Highest numeric suffix probed before giving up.
pub const MAX_SUFFIX: u32 = 999;

const MAX_BASE_LEN: usize = 20;

/// Lowercases and keeps ASCII letters and digits only, truncated to 20.
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_BASE_LEN)
        .collect()
}

/// Display name first, then the email local part, then the fixed token.
/// A source that slugs to fewer than three characters is skipped.
pub fn base_handle(display_name: &str, email: &str) -> String {
    let local_part = email.split('@').next().unwrap_or_default();

    [display_name, local_part]
        .into_iter()
        .map(slugify)
        .find(|slug| slug.len() >= MIN_HANDLE_LEN)
        .unwrap_or_else(|| FALLBACK_HANDLE.to_string())
}

pub(crate) fn with_suffix(base: &str, suffix: u32) -> String {
    if suffix == 0 {
        base.to_string()
    } else {
        format!("{base}{suffix}")
    }
}
