use std::sync::Arc;

use tracing::info;

use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::handle::{HandleCheckSequencer, HandleResolver};
use crate::output::Output;
use crate::store::{MemoryStore, Profile, ProfileStore, SupabaseStore};

/// Everything a command needs, built once per invocation and passed down
/// explicitly.
#[derive(Debug)]
pub struct AppContext {
    pub env: String,
    pub paths: AppPaths,
    pub settings: Settings,
    pub resolver: HandleResolver<dyn ProfileStore>,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(env: String, json: bool) -> AppResult<Self> {
        let env = config::resolve_env(&env);
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &env)?;
        Ok(Self::from_parts(env, paths, settings, json))
    }

    pub fn from_parts(env: String, paths: AppPaths, settings: Settings, json: bool) -> Self {
        let store = build_store(&settings);
        let resolver = HandleResolver::new(store, settings.availability_policy());
        let output = Output::new(json);

        Self {
            env,
            paths,
            settings,
            resolver,
            output,
        }
    }

    pub fn default_handle(&self) -> String {
        self.settings.default_handle()
    }

    pub fn sequencer(&self) -> HandleCheckSequencer<dyn ProfileStore> {
        HandleCheckSequencer::new(self.resolver.clone(), self.settings.debounce())
    }
}

fn build_store(settings: &Settings) -> Arc<dyn ProfileStore> {
    match settings.remote() {
        Some((url, key)) => Arc::new(SupabaseStore::new(url, key)),
        None => {
            info!("supabase is not configured, serving built-in demo data");
            Arc::new(MemoryStore::with_profiles([Profile::demo(
                &settings.default_handle(),
            )]))
        }
    }
}
