use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::store::{Profile, ProfileStore};

use super::HandleRejection;
use super::route::{ProfileLookup, RouteQuery};
use super::suggest;
use super::syntax::Handle;

/// What to do when the store cannot answer an availability query.
///
/// `FailOpen` lets the save go through and relies on the storage-level
/// unique constraint; `FailClosed` blocks the save until the store answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityPolicy {
    #[default]
    FailOpen,
    FailClosed,
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityPolicy::FailOpen => f.write_str("fail-open"),
            AvailabilityPolicy::FailClosed => f.write_str("fail-closed"),
        }
    }
}

impl FromStr for AvailabilityPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(AvailabilityPolicy::FailOpen),
            "fail-closed" | "closed" => Ok(AvailabilityPolicy::FailClosed),
            other => Err(AppError::InvalidInput(format!(
                "unknown availability policy `{other}`; expected `fail-open` or `fail-closed`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Availability {
    Available,
    Taken,
    Unknown,
}

/// Outcome of resolving a request route to a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "profile", rename_all = "snake_case")]
pub enum ProfileResolution {
    Found(Profile),
    NotFound(ProfileLookup),
    /// The store failed; the built-in demo profile stands in.
    Fallback(Profile),
}

/// Validates, checks and resolves handles against a profile store.
///
/// Availability checks are advisory: nothing here holds a lock between the
/// check and the caller's write, so the store's unique constraint remains
/// the only guarantee against two profiles claiming one handle.
pub struct HandleResolver<S: ?Sized> {
    store: Arc<S>,
    policy: AvailabilityPolicy,
}

impl<S: ?Sized> Clone for HandleResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: self.policy,
        }
    }
}

impl<S: ?Sized> fmt::Debug for HandleResolver<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleResolver")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<S: ProfileStore + ?Sized> HandleResolver<S> {
    pub fn new(store: Arc<S>, policy: AvailabilityPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> AvailabilityPolicy {
        self.policy
    }

    pub async fn is_handle_taken(&self, candidate: &str, exclude_profile_id: Option<&str>) -> bool {
        match self.availability(candidate, exclude_profile_id).await {
            Availability::Available => false,
            Availability::Taken => true,
            Availability::Unknown => self.policy == AvailabilityPolicy::FailClosed,
        }
    }

    /// Syntax rules first, then availability. Success is a precondition
    /// for persisting the handle, not a reservation.
    pub async fn reserve_or_reject_handle(
        &self,
        candidate: &str,
        exclude_profile_id: Option<&str>,
    ) -> Result<Handle, HandleRejection> {
        let handle = Handle::parse(candidate)?;

        match self.availability(handle.as_str(), exclude_profile_id).await {
            Availability::Available => Ok(handle),
            Availability::Taken => Err(HandleRejection::Taken),
            Availability::Unknown => match self.policy {
                AvailabilityPolicy::FailOpen => Ok(handle),
                AvailabilityPolicy::FailClosed => Err(HandleRejection::Unverified),
            },
        }
    }

    pub async fn generate_default_handle(&self, display_name: &str, email: &str) -> String {
        let base = suggest::base_handle(display_name, email);
        let mut last = None;

        for suffix in 0..=suggest::MAX_SUFFIX {
            let attempt = suggest::with_suffix(&base, suffix);
            if Handle::parse(&attempt).is_ok() && !self.is_handle_taken(&attempt, None).await {
                return attempt;
            }
            last = Some(attempt);
        }

        let last = last.unwrap_or(base);
        warn!(%last, "no free handle within suffix ceiling, returning last attempt");
        last
    }

    pub async fn resolve_profile(
        &self,
        route: &RouteQuery,
        default_handle: &str,
    ) -> ProfileResolution {
        let lookup = route.lookup(default_handle);
        debug!(%lookup, "resolving profile");

        let result = match &lookup {
            ProfileLookup::ById(id) => self.store.find_by_id(id).await,
            ProfileLookup::ByHandle(handle) => self.store.find_by_handle(handle).await,
        };

        match result {
            Ok(Some(profile)) => ProfileResolution::Found(profile),
            Ok(None) => ProfileResolution::NotFound(lookup),
            Err(err) => {
                warn!(%lookup, error = %err, "profile lookup failed, using demo profile");
                ProfileResolution::Fallback(Profile::demo(default_handle))
            }
        }
    }

    /// Page views are best effort; failures are only logged.
    pub async fn record_page_view(&self, profile_id: &str) {
        match self.store.record_page_view(profile_id).await {
            Ok(()) => info!(profile_id, "page view recorded"),
            Err(err) => warn!(profile_id, error = %err, "failed to record page view"),
        }
    }

    async fn availability(&self, handle: &str, exclude_profile_id: Option<&str>) -> Availability {
        match self.store.handle_exists(handle, exclude_profile_id).await {
            Ok(true) => Availability::Taken,
            Ok(false) => Availability::Available,
            Err(err) => {
                warn!(
                    handle,
                    policy = %self.policy,
                    error = %err,
                    "handle availability check failed"
                );
                Availability::Unknown
            }
        }
    }
}
