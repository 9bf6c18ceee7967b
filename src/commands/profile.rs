use crate::cli::{ProfileCommand, ProfileCreateArgs};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::store::NewProfile;

pub async fn run(ctx: &AppContext, command: ProfileCommand) -> AppResult<()> {
    match command {
        ProfileCommand::Create(args) => create(ctx, args).await,
    }
}

async fn create(ctx: &AppContext, args: ProfileCreateArgs) -> AppResult<()> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("--name must not be empty".to_string()));
    }

    let candidate = match args.handle.as_deref() {
        Some(handle) => handle.to_string(),
        None => {
            ctx.resolver
                .generate_default_handle(name, &args.email)
                .await
        }
    };

    let handle = ctx
        .resolver
        .reserve_or_reject_handle(&candidate, None)
        .await
        .map_err(|rejection| AppError::InvalidInput(format!("`{candidate}`: {rejection}")))?;

    let new_profile = NewProfile {
        user_id: args.user_id,
        handle: handle.into_inner(),
        name: Some(name.to_string()),
        title: args.title,
        bio: None,
        is_published: true,
    };
    let profile = ctx.resolver.store().insert(&new_profile).await?;

    let view = profile.view();
    let text = format!(
        "created profile {} with handle {}",
        view.id,
        view.handle.as_deref().unwrap_or("-")
    );
    ctx.output.emit(&text, &view)
}
