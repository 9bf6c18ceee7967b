use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handle::AvailabilityPolicy;
use crate::handle::sequencer::DEFAULT_DEBOUNCE;

const DEFAULT_HANDLE: &str = "lowcode";

pub const SETTING_KEYS: &[&str] = &[
    "supabase_url",
    "supabase_key",
    "default_handle",
    "handle_check_debounce_ms",
    "availability_policy",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_key: Option<String>,
    #[serde(default)]
    pub default_handle: Option<String>,
    #[serde(default)]
    pub handle_check_debounce_ms: Option<u64>,
    #[serde(default)]
    pub availability_policy: Option<AvailabilityPolicy>,
}

impl Settings {
    /// Url and key of the hosted store, when both are configured.
    pub fn remote(&self) -> Option<(&str, &str)> {
        let url = non_blank(self.supabase_url.as_deref())?;
        let key = non_blank(self.supabase_key.as_deref())?;
        Some((url, key))
    }

    pub fn default_handle(&self) -> String {
        non_blank(self.default_handle.as_deref())
            .unwrap_or(DEFAULT_HANDLE)
            .to_lowercase()
    }

    pub fn debounce(&self) -> Duration {
        self.handle_check_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    pub fn availability_policy(&self) -> AvailabilityPolicy {
        self.availability_policy.unwrap_or_default()
    }

    pub fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let value = value.trim();
        let text = (!value.is_empty()).then(|| value.to_string());

        match key {
            "supabase_url" => {
                if let Some(url) = &text {
                    url::Url::parse(url)?;
                }
                self.supabase_url = text;
            }
            "supabase_key" => self.supabase_key = text,
            "default_handle" => self.default_handle = text,
            "handle_check_debounce_ms" => {
                self.handle_check_debounce_ms = text
                    .map(|raw| {
                        raw.parse::<u64>().map_err(|_| {
                            AppError::InvalidInput(format!(
                                "handle_check_debounce_ms must be a whole number, got `{raw}`"
                            ))
                        })
                    })
                    .transpose()?;
            }
            "availability_policy" => {
                self.availability_policy = text.map(|raw| raw.parse()).transpose()?;
            }
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown setting `{other}`; expected one of {}",
                    SETTING_KEYS.join(", ")
                )));
            }
        }

        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    Ok(settings)
}

pub fn save(path: PathBuf, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(&path, payload)?;

    // The file holds the api key.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::default();
        assert_eq!(settings.default_handle(), "lowcode");
        assert_eq!(settings.debounce(), Duration::from_millis(500));
        assert_eq!(settings.availability_policy(), AvailabilityPolicy::FailOpen);
        assert!(settings.remote().is_none());
    }

    #[test]
    fn remote_requires_url_and_key() {
        let mut settings = Settings::default();
        settings.set("supabase_url", "https://demo.supabase.co").expect("valid url");
        assert!(settings.remote().is_none());

        settings.set("supabase_key", "anon-key").expect("any key");
        assert_eq!(
            settings.remote(),
            Some(("https://demo.supabase.co", "anon-key"))
        );
    }

    #[test]
    fn set_validates_values() {
        let mut settings = Settings::default();
        assert!(settings.set("handle_check_debounce_ms", "soon").is_err());
        assert!(settings.set("availability_policy", "sometimes").is_err());
        assert!(settings.set("supabase_url", "not a url").is_err());
        assert!(settings.set("colour", "blue").is_err());

        settings
            .set("availability_policy", "fail-closed")
            .expect("known policy");
        assert_eq!(settings.availability_policy(), AvailabilityPolicy::FailClosed);
    }

    #[test]
    fn blank_value_clears_setting() {
        let mut settings = Settings::default();
        settings.set("default_handle", "Alice").expect("set");
        assert_eq!(settings.default_handle(), "alice");
        settings.set("default_handle", " ").expect("clear");
        assert_eq!(settings.default_handle(), "lowcode");
    }
}
