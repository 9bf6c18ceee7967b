use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "contactme";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    envs_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;
        Self::at(config_root.join(APP_DIR))
    }

    pub fn at(config_dir: PathBuf) -> AppResult<Self> {
        let envs_dir = config_dir.join("envs");
        fs::create_dir_all(&envs_dir)?;

        Ok(Self {
            config_dir,
            envs_dir,
        })
    }

    pub fn settings_file(&self, env: &str) -> PathBuf {
        self.envs_dir.join(format!("{env}.json"))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
