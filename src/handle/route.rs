use std::fmt;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Origin used to resolve bare paths such as `/p/alice?id=1`.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

const RESERVED_SEGMENTS: &[&str] = &[
    "index",
    "index.html",
    "404",
    "404.html",
    "profile",
    "profile.html",
    "profiles",
    "page",
    "pages",
    "p",
    "user",
    "users",
    "u",
    "login",
    "login.html",
    "dashboard",
    "dashboard.html",
    "home",
    "home.html",
    "demo",
    "demo.html",
    "redirect",
    "redirect.html",
    "debug",
    "debug.html",
    "test",
    "test.html",
    "test-db",
    "test-db.html",
    "test-upload",
    "test-upload.html",
    "test-preview",
    "test-preview.html",
    "check-config",
    "check-config.html",
    "config",
    "config.html",
    "config.js",
    "assets",
    "js",
    "api",
    "saas",
    "supabase",
    "favicon.ico",
    "favicon.svg",
    "robots.txt",
];

const HANDLE_PATH_PREFIXES: &[&str] = &[
    "p", "page", "pages", "profile", "profiles", "u", "user", "users",
];

const BLOCKED_PARENT_SEGMENTS: &[&str] = &[
    "assets", "js", "css", "vendor", "images", "static", "fonts",
];

/// Profile identifiers found in a request URL. Both may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteQuery {
    pub handle: Option<String>,
    pub id: Option<String>,
}

impl RouteQuery {
    pub fn is_empty(&self) -> bool {
        self.handle.is_none() && self.id.is_none()
    }

    /// An id always wins; without one the handle, then `default_handle`.
    pub fn lookup(&self, default_handle: &str) -> ProfileLookup {
        if let Some(id) = &self.id {
            return ProfileLookup::ById(id.clone());
        }

        let handle = self
            .handle
            .clone()
            .unwrap_or_else(|| default_handle.trim().to_lowercase());
        ProfileLookup::ByHandle(handle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum ProfileLookup {
    #[serde(rename = "id")]
    ById(String),
    #[serde(rename = "handle")]
    ByHandle(String),
}

impl fmt::Display for ProfileLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileLookup::ById(id) => write!(f, "id={id}"),
            ProfileLookup::ByHandle(handle) => write!(f, "handle={handle}"),
        }
    }
}

/// Parses an absolute URL or a bare path (with optional query string).
pub fn parse_location(input: &str) -> Result<Url, url::ParseError> {
    match Url::parse(input.trim()) {
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(PLACEHOLDER_ORIGIN)?.join(input.trim())
        }
        other => other,
    }
}

pub fn parse_route(url: &Url) -> RouteQuery {
    let handle = query_param(url, "handle").map(|value| value.to_lowercase());
    let id = query_param(url, "id");

    if handle.is_some() || id.is_some() {
        return RouteQuery { handle, id };
    }

    RouteQuery {
        handle: extract_handle_from_path(url.path()),
        id: None,
    }
}

/// Pulls a handle out of a path like `/alice` or `/p/alice/`. Static assets,
/// system routes and anything nested below an asset directory yield `None`.
pub fn extract_handle_from_path(path: &str) -> Option<String> {
    let decoded = match percent_decode_str(path).decode_utf8() {
        Ok(decoded) => decoded,
        Err(err) => {
            debug!(path, error = %err, "path is not valid utf-8, ignoring");
            return None;
        }
    };

    let segments = decoded
        .trim_end_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();
    let (candidate, parents) = segments.split_last()?;

    let normalized = candidate.trim().to_lowercase();
    if normalized.is_empty() || candidate.contains('.') || is_reserved_segment(&normalized) {
        return None;
    }

    let mut parents = parents
        .iter()
        .map(|segment| segment.trim().to_lowercase())
        .collect::<Vec<_>>();
    while parents
        .last()
        .is_some_and(|segment| HANDLE_PATH_PREFIXES.contains(&segment.as_str()))
    {
        parents.pop();
    }

    if parents.iter().any(|segment| {
        is_reserved_segment(segment) || BLOCKED_PARENT_SEGMENTS.contains(&segment.as_str())
    }) {
        return None;
    }

    Some(normalized)
}

pub fn is_reserved_segment(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}

/// Builds the public link for a profile next to `page_url`: `<dir>/<handle>`
/// when a handle is known, otherwise `<dir>/profile.html?id=<id>`.
pub fn share_url(page_url: &Url, handle: Option<&str>, id: Option<&str>) -> Option<Url> {
    let mut dir = page_url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();
    if !page_url.path().ends_with('/') {
        dir.pop();
    }

    let handle = handle.map(|h| h.trim().to_lowercase()).filter(|h| !h.is_empty());
    let id = id.map(str::trim).filter(|id| !id.is_empty());

    let mut url = page_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    if let Some(handle) = handle {
        dir.push(&handle);
        url.set_path(&format!("/{}", dir.join("/")));
        return Some(url);
    }

    let id = id?;
    dir.push("profile.html");
    url.set_path(&format!("/{}", dir.join("/")));
    url.query_pairs_mut().append_pair("id", id);
    Some(url)
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
