use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::warn;

use crate::cli::{HandleCheckArgs, HandleCommand, HandleSetArgs, HandleSuggestArgs, HandleWatchArgs};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::handle::{CheckOutcome, Handle, HandleRejection, validate_handle_syntax};
use crate::store::ProfileUpdate;

#[derive(Debug, Serialize)]
struct HandleVerdict {
    candidate: String,
    handle: Option<String>,
    available: bool,
    reason: Option<String>,
}

impl HandleVerdict {
    fn new(candidate: &str, verdict: &Result<Handle, HandleRejection>) -> Self {
        match verdict {
            Ok(handle) => Self {
                candidate: candidate.to_string(),
                handle: Some(handle.to_string()),
                available: true,
                reason: None,
            },
            Err(rejection) => Self {
                candidate: candidate.to_string(),
                handle: None,
                available: false,
                reason: Some(rejection.to_string()),
            },
        }
    }

    fn line(&self) -> String {
        match (&self.handle, &self.reason) {
            (Some(handle), _) => format!("{handle}: available"),
            (None, Some(reason)) => format!("{}: {reason}", self.candidate),
            (None, None) => format!("{}: unavailable", self.candidate),
        }
    }
}

#[derive(Debug, Serialize)]
struct SuggestResult {
    handle: String,
    name: String,
    email: String,
}

#[derive(Debug, Serialize)]
struct SetResult {
    id: String,
    handle: String,
    note: String,
}

pub async fn run(ctx: &AppContext, command: HandleCommand) -> AppResult<()> {
    match command {
        HandleCommand::Check(args) => check(ctx, args).await,
        HandleCommand::Suggest(args) => suggest(ctx, args).await,
        HandleCommand::Set(args) => set(ctx, args).await,
        HandleCommand::Watch(args) => watch(ctx, args).await,
    }
}

async fn check(ctx: &AppContext, args: HandleCheckArgs) -> AppResult<()> {
    if args.syntax_only {
        let check = validate_handle_syntax(&args.candidate);
        let text = match &check.reason {
            Some(reason) => format!("{}: {reason}", args.candidate),
            None => format!("{}: valid", check.handle),
        };
        return ctx.output.emit(&text, &check);
    }

    let verdict = ctx
        .resolver
        .reserve_or_reject_handle(&args.candidate, args.exclude_id.as_deref())
        .await;

    let verdict = HandleVerdict::new(&args.candidate, &verdict);
    ctx.output.emit(&verdict.line(), &verdict)
}

async fn suggest(ctx: &AppContext, args: HandleSuggestArgs) -> AppResult<()> {
    let handle = ctx
        .resolver
        .generate_default_handle(&args.name, &args.email)
        .await;

    let result = SuggestResult {
        handle,
        name: args.name,
        email: args.email,
    };
    ctx.output.emit(&result.handle, &result)
}

async fn set(ctx: &AppContext, args: HandleSetArgs) -> AppResult<()> {
    let handle = ctx
        .resolver
        .reserve_or_reject_handle(&args.candidate, Some(args.id.as_str()))
        .await
        .map_err(|rejection| {
            AppError::InvalidInput(format!("`{}`: {rejection}", args.candidate.trim()))
        })?;

    // Another writer may claim the handle between the check above and this
    // write; the store's unique constraint turns that into a conflict error.
    let update = ProfileUpdate {
        handle: Some(handle.into_inner()),
        ..ProfileUpdate::default()
    };
    let profile = ctx.resolver.store().update(&args.id, &update).await?;

    let result = SetResult {
        id: profile.id,
        handle: profile.handle.unwrap_or_default(),
        note: "profile handle updated".to_string(),
    };
    let text = format!("{}: handle set to {}", result.id, result.handle);
    ctx.output.emit(&text, &result)
}

async fn watch(ctx: &AppContext, args: HandleWatchArgs) -> AppResult<()> {
    let sequencer = ctx.sequencer();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = JoinSet::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let sequencer = sequencer.clone();
                let exclude_id = args.exclude_id.clone();
                pending.spawn(async move { sequencer.check(line, exclude_id).await });
            }
            Some(joined) = pending.join_next(), if !pending.is_empty() => {
                report_outcome(ctx, joined)?;
            }
        }
    }

    while let Some(joined) = pending.join_next().await {
        report_outcome(ctx, joined)?;
    }

    Ok(())
}

fn report_outcome(
    ctx: &AppContext,
    joined: Result<CheckOutcome, tokio::task::JoinError>,
) -> AppResult<()> {
    let outcome = match joined {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "handle check task failed");
            return Ok(());
        }
    };

    if let CheckOutcome::Completed {
        candidate, verdict, ..
    } = &outcome
    {
        let verdict = HandleVerdict::new(candidate, verdict);
        ctx.output.emit_record(&verdict.line(), &verdict)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_available_and_rejected_lines() {
        let ok = HandleVerdict::new(" Alice ", &Handle::parse("Alice"));
        assert_eq!(ok.line(), "alice: available");

        let taken = HandleVerdict::new("bob", &Err(HandleRejection::Taken));
        assert_eq!(taken.line(), "bob: handle is already taken");
        assert!(!taken.available);
    }
}
