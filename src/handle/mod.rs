//! Public profile handles: routing, syntax rules, availability and
//! default-handle derivation.

pub mod availability;
pub mod route;
pub mod sequencer;
pub mod suggest;
pub mod syntax;

use serde::Serialize;
use thiserror::Error;

pub use availability::{AvailabilityPolicy, HandleResolver, ProfileResolution};
pub use route::{ProfileLookup, RouteQuery, extract_handle_from_path, parse_route, share_url};
pub use sequencer::{CheckOutcome, HandleCheckSequencer};
pub use suggest::{FALLBACK_HANDLE, MAX_SUFFIX, base_handle, slugify};
pub use syntax::{Handle, HandleCheck, is_reserved_handle, validate_handle_syntax};

/// Why a proposed handle cannot be saved. Every variant is user-correctable
/// and carries the message shown next to the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleRejection {
    #[error("handle must not be empty")]
    Empty,
    #[error("handle must be at least 3 characters")]
    TooShort,
    #[error("handle must be at most 30 characters")]
    TooLong,
    #[error(
        "handle may only contain lowercase letters, digits, `-` and `_`, and must start and end with a letter or digit"
    )]
    InvalidCharacters,
    #[error("handle is reserved")]
    Reserved,
    #[error("handle is already taken")]
    Taken,
    #[error("handle availability could not be verified, try again")]
    Unverified,
}
