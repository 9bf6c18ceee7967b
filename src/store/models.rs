use serde::{Deserialize, Serialize};

const DEFAULT_THEME_COLOR: &str = "#0ea5e9";
const DEFAULT_CTA_LABEL: &str = "Get started";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub theme_color: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub socials: Vec<Social>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl Profile {
    /// Built-in profile shown when the remote store is unavailable.
    pub fn demo(handle: &str) -> Self {
        Self {
            id: "demo".to_string(),
            user_id: None,
            handle: Some(handle.to_string()),
            name: Some("Low-code Notes".to_string()),
            title: Some("Sharing practical low-code tips".to_string()),
            bio: Some(
                "Building apps faster with low-code tools. Reach out any time.".to_string(),
            ),
            avatar_url: None,
            tags: Some("low-code,automation,indie".to_string()),
            theme_color: Some(DEFAULT_THEME_COLOR.to_string()),
            cta_url: None,
            cta_label: None,
            brand: None,
            is_published: true,
            socials: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn view(&self) -> ProfileView {
        ProfileView {
            id: self.id.clone(),
            handle: self.handle.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            bio: self.bio.clone(),
            avatar: self.avatar_url.clone(),
            badges: self
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            theme_color: self
                .theme_color
                .clone()
                .filter(|color| !color.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_string()),
            cta: self.cta_url.as_ref().map(|url| CallToAction {
                url: url.clone(),
                label: self
                    .cta_label
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CTA_LABEL.to_string()),
            }),
            socials: self.socials.clone(),
            products: self.products.clone(),
            footer_name: self.brand.clone().or_else(|| self.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub platform: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon_class: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub qr_image_url: Option<String>,
    #[serde(default)]
    pub qr_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub share_text: Option<String>,
}

/// Insert payload. The store assigns the id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProfile {
    pub user_id: String,
    pub handle: String,
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub is_published: bool,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: String,
    pub handle: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub badges: Vec<String>,
    pub theme_color: String,
    pub cta: Option<CallToAction>,
    pub socials: Vec<Social>,
    pub products: Vec<Product>,
    pub footer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallToAction {
    pub url: String,
    pub label: String,
}
