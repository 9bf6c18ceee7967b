use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult};

use super::ProfileStore;
use super::models::{NewProfile, Profile, ProfileUpdate};

const REST_PREFIX: &str = "/rest/v1";
const PROFILES_TABLE: &str = "profiles";
const PAGE_VIEWS_TABLE: &str = "page_views";
const PROFILE_SELECT: &str = "*,products(*),socials(*)";
const UNIQUE_VIOLATION: &str = "23505";

/// PostgREST client for the hosted profile tables.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn find_one(&self, column: &str, value: &str) -> AppResult<Option<Profile>> {
        let query = vec![
            ("select".to_string(), PROFILE_SELECT.to_string()),
            (column.to_string(), format!("eq.{value}")),
            ("limit".to_string(), "1".to_string()),
        ];
        let rows: Vec<Profile> = self.get_rows(PROFILES_TABLE, &query).await?;
        Ok(rows.into_iter().next())
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
    ) -> AppResult<Vec<T>> {
        let url = self.table_url(table)?;
        debug!(%url, ?query, "postgrest select");
        let response = self.request(Method::GET, url).query(query).send().await?;
        parse_json_response(response).await
    }

    async fn write_rows<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        table: &str,
        query: &[(String, String)],
        body: &B,
    ) -> AppResult<Vec<T>> {
        let url = self.table_url(table)?;
        debug!(%url, %method, ?query, "postgrest write");
        let response = self
            .request(method, url)
            .query(query)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        parse_json_response(response).await
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn table_url(&self, table: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}{REST_PREFIX}/{table}"));
        Ok(url)
    }
}

#[async_trait]
impl ProfileStore for SupabaseStore {
    async fn find_by_handle(&self, handle: &str) -> AppResult<Option<Profile>> {
        self.find_one("handle", handle).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Profile>> {
        self.find_one("id", id).await
    }

    async fn handle_exists(&self, handle: &str, exclude_id: Option<&str>) -> AppResult<bool> {
        let mut query = vec![
            ("select".to_string(), "id".to_string()),
            ("handle".to_string(), format!("eq.{handle}")),
            ("limit".to_string(), "1".to_string()),
        ];
        if let Some(exclude_id) = exclude_id {
            query.push(("id".to_string(), format!("neq.{exclude_id}")));
        }

        let rows: Vec<serde_json::Value> = self.get_rows(PROFILES_TABLE, &query).await?;
        Ok(!rows.is_empty())
    }

    async fn insert(&self, profile: &NewProfile) -> AppResult<Profile> {
        let rows: Vec<Profile> = self
            .write_rows(Method::POST, PROFILES_TABLE, &[], profile)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Api("insert returned no profile row".to_string()))
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> AppResult<Profile> {
        let query = [("id".to_string(), format!("eq.{id}"))];
        let rows: Vec<Profile> = self
            .write_rows(Method::PATCH, PROFILES_TABLE, &query, update)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("profile `{id}`")))
    }

    async fn record_page_view(&self, profile_id: &str) -> AppResult<()> {
        let url = self.table_url(PAGE_VIEWS_TABLE)?;
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(&PageViewRow { profile_id })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

#[derive(Debug, Serialize)]
struct PageViewRow<'a> {
    profile_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

async fn parse_json_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(map_api_error(status, &body))
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let parsed = serde_json::from_str::<PostgrestError>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(describe_error)
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                "no error details in response body".to_string()
            } else {
                body.to_string()
            }
        });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!(
            "supabase rejected the api key ({status}): {message}. check `supabase_key` in your settings"
        ));
    }

    let unique_violation = parsed
        .as_ref()
        .and_then(|error| error.code.as_deref())
        .is_some_and(|code| code == UNIQUE_VIOLATION);
    if unique_violation || status == StatusCode::CONFLICT {
        return AppError::Conflict(format!("supabase rejected the write ({status}): {message}"));
    }

    AppError::Api(format!("supabase request failed ({status}): {message}"))
}

fn describe_error(error: &PostgrestError) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(message) = &error.message {
        parts.push(message.clone());
    }

    if let Some(code) = &error.code {
        parts.push(format!("code={code}"));
    }

    if let Some(details) = &error.details {
        parts.push(format!("details={details}"));
    }

    if let Some(hint) = &error.hint {
        parts.push(format!("hint={hint}"));
    }

    if parts.is_empty() {
        return None;
    }

    Some(parts.join(", "))
}
