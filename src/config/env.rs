pub const DEFAULT_ENV: &str = "default";

pub fn resolve_env(requested: &str) -> String {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return DEFAULT_ENV.to_string();
    }

    trimmed.to_string()
}
