use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "contactme",
    version,
    about = "Resolve, validate and claim public profile handles"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Settings environment to use"
    )]
    pub env: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show which profile a URL routes to
    Route(RouteArgs),
    /// Resolve a URL and print the profile it points at
    Show(ShowArgs),
    Handle(HandleArgs),
    Profile(ProfileArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    #[arg(help = "Absolute URL or path such as /p/alice?id=1")]
    pub url: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(help = "Absolute URL or path such as /p/alice?id=1")]
    pub url: String,
    #[arg(long, help = "Do not record a page view")]
    pub no_track: bool,
}

#[derive(Debug, Args)]
pub struct HandleArgs {
    #[command(subcommand)]
    pub command: HandleCommand,
}

#[derive(Debug, Subcommand)]
pub enum HandleCommand {
    /// Validate a handle and check that it is free
    Check(HandleCheckArgs),
    /// Derive an available handle from a name and email
    Suggest(HandleSuggestArgs),
    /// Claim a handle for an existing profile
    Set(HandleSetArgs),
    /// Check handles typed on stdin, one per line, with debouncing
    Watch(HandleWatchArgs),
}

#[derive(Debug, Args)]
pub struct HandleCheckArgs {
    #[arg(help = "Proposed handle")]
    pub candidate: String,
    #[arg(long, help = "Profile id whose current handle does not count as taken")]
    pub exclude_id: Option<String>,
    #[arg(long, help = "Only apply the syntax rules, skip the store")]
    pub syntax_only: bool,
}

#[derive(Debug, Args)]
pub struct HandleSuggestArgs {
    #[arg(long, default_value = "", help = "Display name")]
    pub name: String,
    #[arg(long, default_value = "", help = "Email address")]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct HandleSetArgs {
    #[arg(help = "Proposed handle")]
    pub candidate: String,
    #[arg(long, help = "Profile id to update")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct HandleWatchArgs {
    #[arg(long, help = "Profile id whose current handle does not count as taken")]
    pub exclude_id: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Create a profile, deriving a handle when none is given
    Create(ProfileCreateArgs),
}

#[derive(Debug, Args)]
pub struct ProfileCreateArgs {
    #[arg(long, help = "Owning user id")]
    pub user_id: String,
    #[arg(long, help = "Display name")]
    pub name: String,
    #[arg(long, default_value = "", help = "Email address, used to derive a handle")]
    pub email: String,
    #[arg(long, help = "Handle to claim instead of a derived one")]
    pub handle: Option<String>,
    #[arg(long, help = "Headline shown under the name")]
    pub title: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    Set(ConfigSetArgs),
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    #[arg(help = "Setting name")]
    pub key: String,
    #[arg(help = "New value; empty clears the setting")]
    pub value: String,
}
