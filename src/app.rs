use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        env, json, command, ..
    } = cli;

    let ctx = AppContext::bootstrap(env, json)?;

    match command {
        Command::Route(args) => commands::route::run(&ctx, args).await,
        Command::Show(args) => commands::show::run(&ctx, args).await,
        Command::Handle(args) => commands::handle::run(&ctx, args.command).await,
        Command::Profile(args) => commands::profile::run(&ctx, args.command).await,
        Command::Config(args) => commands::config::run(&ctx, args.command).await,
    }
}
