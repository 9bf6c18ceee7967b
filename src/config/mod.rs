pub mod env;
pub mod paths;
pub mod settings;

pub use env::resolve_env;
pub use paths::AppPaths;
pub use settings::Settings;

use crate::error::AppResult;

pub fn load_settings(paths: &AppPaths, env: &str) -> AppResult<Settings> {
    settings::load(paths.settings_file(env))
}

pub fn save_settings(paths: &AppPaths, env: &str, settings: &Settings) -> AppResult<()> {
    settings::save(paths.settings_file(env), settings)
}
