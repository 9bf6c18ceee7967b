use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::HandleRejection;

pub const MIN_HANDLE_LEN: usize = 3;
pub const MAX_HANDLE_LEN: usize = 30;

static HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*[a-z0-9]$").expect("static handle pattern"));

const RESERVED_HANDLES: &[&str] = &[
    "admin",
    "administrator",
    "api",
    "app",
    "assets",
    "auth",
    "config",
    "dashboard",
    "debug",
    "demo",
    "help",
    "home",
    "index",
    "login",
    "logout",
    "p",
    "page",
    "pages",
    "profile",
    "profiles",
    "register",
    "root",
    "settings",
    "signup",
    "static",
    "support",
    "system",
    "test",
    "u",
    "user",
    "users",
    "www",
];

/// A handle that passed the syntax rules. Availability is not implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn parse(candidate: &str) -> Result<Self, HandleRejection> {
        let normalized = normalize(candidate);
        check_rules(&normalized)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandleCheck {
    pub handle: String,
    pub valid: bool,
    pub reason: Option<String>,
}

pub fn validate_handle_syntax(candidate: &str) -> HandleCheck {
    let handle = normalize(candidate);
    match check_rules(&handle) {
        Ok(()) => HandleCheck {
            handle,
            valid: true,
            reason: None,
        },
        Err(rejection) => HandleCheck {
            handle,
            valid: false,
            reason: Some(rejection.to_string()),
        },
    }
}

pub fn is_reserved_handle(handle: &str) -> bool {
    RESERVED_HANDLES.contains(&handle)
}

fn normalize(candidate: &str) -> String {
    candidate.trim().to_lowercase()
}

// Order matters: only the first failing rule is reported.
fn check_rules(handle: &str) -> Result<(), HandleRejection> {
    let len = handle.chars().count();
    if len == 0 {
        return Err(HandleRejection::Empty);
    }
    if len < MIN_HANDLE_LEN {
        return Err(HandleRejection::TooShort);
    }
    if len > MAX_HANDLE_LEN {
        return Err(HandleRejection::TooLong);
    }
    if !HANDLE_PATTERN.is_match(handle) {
        return Err(HandleRejection::InvalidCharacters);
    }
    if is_reserved_handle(handle) {
        return Err(HandleRejection::Reserved);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_handles() {
        for handle in ["abc", "alice", "a-b", "a_b", "x9z", "team-2026", "0ab"] {
            let check = validate_handle_syntax(handle);
            assert!(check.valid, "{handle} should be valid: {:?}", check.reason);
        }
    }

    #[test]
    fn accepts_maximum_length() {
        let handle = "a".repeat(MAX_HANDLE_LEN);
        assert!(validate_handle_syntax(&handle).valid);
    }

    #[test]
    fn rejects_too_short() {
        let check = validate_handle_syntax("ab");
        assert!(!check.valid);
        assert_eq!(check.reason.as_deref(), Some("handle must be at least 3 characters"));
    }

    #[test]
    fn rejects_too_long() {
        let handle = "a".repeat(MAX_HANDLE_LEN + 1);
        assert_eq!(Handle::parse(&handle), Err(HandleRejection::TooLong));
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Handle::parse("   "), Err(HandleRejection::Empty));
    }

    #[test]
    fn rejects_bad_edges_and_characters() {
        for handle in ["-abc", "abc-", "_abc", "ab c", "ab.c", "héllo"] {
            assert_eq!(
                Handle::parse(handle),
                Err(HandleRejection::InvalidCharacters),
                "{handle}"
            );
        }
    }

    #[test]
    fn reserved_words_are_rejected_after_lowercasing() {
        let check = validate_handle_syntax("Admin");
        assert!(!check.valid);
        assert_eq!(check.handle, "admin");
        assert_eq!(Handle::parse(" SETTINGS "), Err(HandleRejection::Reserved));
    }

    #[test]
    fn length_is_checked_before_pattern() {
        assert_eq!(Handle::parse("-"), Err(HandleRejection::TooShort));
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let handle = Handle::parse("  Alice_01 ").expect("valid handle");
        assert_eq!(handle.as_str(), "alice_01");
    }
}
