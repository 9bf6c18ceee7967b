use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

use super::ProfileStore;
use super::models::{NewProfile, Profile, ProfileUpdate};

#[derive(Debug, Default)]
struct MemoryState {
    profiles: BTreeMap<String, Profile>,
    page_views: Vec<String>,
    next_id: u64,
}

/// Process-local store. Enforces the same unique-handle constraint the
/// remote table does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            state: RwLock::new(MemoryState {
                profiles,
                ..MemoryState::default()
            }),
        }
    }

    pub async fn page_views(&self) -> Vec<String> {
        self.state.read().await.page_views.clone()
    }
}

fn handle_owner<'a>(state: &'a MemoryState, handle: &str) -> Option<&'a Profile> {
    state
        .profiles
        .values()
        .find(|profile| profile.handle.as_deref() == Some(handle))
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Profile>> {
        let state = self.state.read().await;
        Ok(handle_owner(&state, handle).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Profile>> {
        Ok(self.state.read().await.profiles.get(id).cloned())
    }

    async fn handle_exists(&self, handle: &str, exclude_id: Option<&str>) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.profiles.values().any(|profile| {
            profile.handle.as_deref() == Some(handle) && Some(profile.id.as_str()) != exclude_id
        }))
    }

    async fn insert(&self, new: &NewProfile) -> AppResult<Profile> {
        let mut state = self.state.write().await;
        if handle_owner(&state, &new.handle).is_some() {
            return Err(AppError::Conflict(format!(
                "handle `{}` already exists",
                new.handle
            )));
        }

        state.next_id += 1;
        let id = format!("mem-{}", state.next_id);
        let profile = Profile {
            id: id.clone(),
            user_id: Some(new.user_id.clone()),
            handle: Some(new.handle.clone()),
            name: new.name.clone(),
            title: new.title.clone(),
            bio: new.bio.clone(),
            avatar_url: None,
            tags: None,
            theme_color: None,
            cta_url: None,
            cta_label: None,
            brand: None,
            is_published: new.is_published,
            socials: Vec::new(),
            products: Vec::new(),
        };
        state.profiles.insert(id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> AppResult<Profile> {
        let mut state = self.state.write().await;
        let taken_by_other = update.handle.as_deref().is_some_and(|handle| {
            handle_owner(&state, handle).is_some_and(|owner| owner.id != id)
        });
        if taken_by_other {
            return Err(AppError::Conflict(format!(
                "handle `{}` already exists",
                update.handle.as_deref().unwrap_or_default()
            )));
        }

        let profile = state
            .profiles
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("profile `{id}`")))?;

        if let Some(handle) = &update.handle {
            profile.handle = Some(handle.clone());
        }
        if let Some(name) = &update.name {
            profile.name = Some(name.clone());
        }
        if let Some(title) = &update.title {
            profile.title = Some(title.clone());
        }
        if let Some(bio) = &update.bio {
            profile.bio = Some(bio.clone());
        }

        Ok(profile.clone())
    }

    async fn record_page_view(&self, profile_id: &str) -> AppResult<()> {
        self.state.write().await.page_views.push(profile_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profile(handle: &str) -> NewProfile {
        NewProfile {
            user_id: "user-1".to_string(),
            handle: handle.to_string(),
            name: Some("Alice".to_string()),
            is_published: true,
            ..NewProfile::default()
        }
    }

    #[tokio::test]
    async fn exclusion_hides_own_record() {
        let store = MemoryStore::new();
        let created = store.insert(&new_profile("alice")).await.expect("insert");

        assert!(store.handle_exists("alice", None).await.expect("query"));
        assert!(
            !store
                .handle_exists("alice", Some(created.id.as_str()))
                .await
                .expect("query")
        );
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict() {
        let store = MemoryStore::new();
        store.insert(&new_profile("alice")).await.expect("insert");

        let err = store
            .insert(&new_profile("alice"))
            .await
            .expect_err("duplicate handle");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_can_keep_own_handle() {
        let store = MemoryStore::new();
        let created = store.insert(&new_profile("alice")).await.expect("insert");

        let update = ProfileUpdate {
            handle: Some("alice".to_string()),
            title: Some("Maker".to_string()),
            ..ProfileUpdate::default()
        };
        let updated = store.update(&created.id, &update).await.expect("update");
        assert_eq!(updated.title.as_deref(), Some("Maker"));
    }

    #[tokio::test]
    async fn update_of_unknown_profile_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update("missing", &ProfileUpdate::default())
            .await
            .expect_err("unknown id");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
