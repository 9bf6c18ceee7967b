pub mod memory;
pub mod models;
pub mod supabase;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use models::{NewProfile, Profile, ProfileUpdate, ProfileView};
pub use supabase::SupabaseStore;

use crate::error::AppResult;

/// Source of truth for profile records. Handle uniqueness is ultimately
/// enforced here, not by callers checking `handle_exists` first.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Profile>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Profile>>;
    async fn handle_exists(&self, handle: &str, exclude_id: Option<&str>) -> AppResult<bool>;
    async fn insert(&self, profile: &NewProfile) -> AppResult<Profile>;
    async fn update(&self, id: &str, update: &ProfileUpdate) -> AppResult<Profile>;
    async fn record_page_view(&self, profile_id: &str) -> AppResult<()>;
}
