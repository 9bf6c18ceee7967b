use serde::Serialize;

use crate::cli::{ConfigCommand, ConfigSetArgs};
use crate::config::{self, Settings};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::handle::AvailabilityPolicy;

#[derive(Debug, Serialize)]
struct SettingsView {
    env: String,
    path: String,
    supabase_url: Option<String>,
    supabase_key: Option<String>,
    default_handle: String,
    handle_check_debounce_ms: u128,
    availability_policy: AvailabilityPolicy,
}

impl SettingsView {
    fn new(ctx: &AppContext, settings: &Settings) -> Self {
        Self {
            env: ctx.env.clone(),
            path: ctx.paths.settings_file(&ctx.env).display().to_string(),
            supabase_url: settings.supabase_url.clone(),
            supabase_key: settings.supabase_key.as_deref().map(mask_secret),
            default_handle: settings.default_handle(),
            handle_check_debounce_ms: settings.debounce().as_millis(),
            availability_policy: settings.availability_policy(),
        }
    }

    fn lines(&self) -> String {
        [
            format!("env: {}", self.env),
            format!("path: {}", self.path),
            format!(
                "supabase_url: {}",
                self.supabase_url.as_deref().unwrap_or("(unset)")
            ),
            format!(
                "supabase_key: {}",
                self.supabase_key.as_deref().unwrap_or("(unset)")
            ),
            format!("default_handle: {}", self.default_handle),
            format!("handle_check_debounce_ms: {}", self.handle_check_debounce_ms),
            format!("availability_policy: {}", self.availability_policy),
        ]
        .join("\n")
    }
}

pub async fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let view = SettingsView::new(ctx, &ctx.settings);
            ctx.output.emit(&view.lines(), &view)
        }
        ConfigCommand::Set(args) => set(ctx, args),
    }
}

fn set(ctx: &AppContext, args: ConfigSetArgs) -> AppResult<()> {
    let mut settings = ctx.settings.clone();
    settings.set(&args.key, &args.value)?;
    config::save_settings(&ctx.paths, &ctx.env, &settings)?;

    let view = SettingsView::new(ctx, &settings);
    let text = format!("{}: updated {}", ctx.env, args.key);
    ctx.output.emit(&text, &view)
}

fn mask_secret(secret: &str) -> String {
    let visible = secret.chars().rev().take(4).collect::<Vec<_>>();
    if secret.chars().count() <= 8 {
        return "****".to_string();
    }
    format!("****{}", visible.into_iter().rev().collect::<String>())
}
