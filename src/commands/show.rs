use serde::Serialize;

use crate::cli::ShowArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::handle::route::parse_location;
use crate::handle::{ProfileResolution, parse_route, share_url};
use crate::store::{Profile, ProfileView};

#[derive(Debug, Serialize)]
struct ShowResult {
    source: &'static str,
    profile: ProfileView,
    share_url: Option<String>,
}

pub async fn run(ctx: &AppContext, args: ShowArgs) -> AppResult<()> {
    let page = parse_location(&args.url)?;
    let route = parse_route(&page);

    let (source, profile) = match ctx.resolver.resolve_profile(&route, &ctx.default_handle()).await
    {
        ProfileResolution::Found(profile) => {
            if !args.no_track {
                ctx.resolver.record_page_view(&profile.id).await;
            }
            ("store", profile)
        }
        ProfileResolution::Fallback(profile) => ("fallback", profile),
        ProfileResolution::NotFound(lookup) => {
            return Err(AppError::NotFound(format!("no profile matches {lookup}")));
        }
    };

    let link = share_url(&page, profile.handle.as_deref(), Some(profile.id.as_str()));
    let result = ShowResult {
        source,
        profile: profile.view(),
        share_url: link.map(String::from),
    };

    let text = format_profile(&profile, &result);
    ctx.output.emit(&text, &result)
}

fn format_profile(profile: &Profile, result: &ShowResult) -> String {
    let view = &result.profile;
    let mut lines = vec![format!(
        "{} (@{})",
        view.name.as_deref().unwrap_or("(no name)"),
        view.handle.as_deref().unwrap_or("-")
    )];

    if let Some(title) = view.title.as_deref() {
        lines.push(format!("   {title}"));
    }
    if !view.badges.is_empty() {
        lines.push(format!("   tags: {}", view.badges.join(", ")));
    }
    if let Some(cta) = &view.cta {
        lines.push(format!("   {}: {}", cta.label, cta.url));
    }
    for social in &profile.socials {
        let label = social.label.as_deref().unwrap_or(&social.platform);
        lines.push(format!(
            "   {label}: {}",
            social.url.as_deref().unwrap_or("(no link)")
        ));
    }
    if let Some(url) = &result.share_url {
        lines.push(format!("   share: {url}"));
    }
    if result.source == "fallback" {
        lines.push("   (store unavailable, showing demo profile)".to_string());
    }

    lines.join("\n")
}
