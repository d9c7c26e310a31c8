//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::commands::comments::CommentsArgs;
use crate::commands::config::ConfigCommand;
use crate::commands::posts::PostsArgs;
use crate::commands::up_voters::UpVotersArgs;

/// Browse paginated Talawa collections.
#[derive(Parser, Debug)]
#[command(name = "talawa")]
#[command(author, version = env!("TALAWA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read collections from. Falls back to the stored config.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// GraphQL endpoint (https://...) or snapshot directory (file://...)
    #[arg(long, env = "TALAWA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token sent to the GraphQL endpoint
    #[arg(long, env = "TALAWA_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts of an organization
    Posts(PostsArgs),

    /// List comments of a post
    Comments(CommentsArgs),

    /// List up-voters of a post or comment
    UpVoters(UpVotersArgs),

    /// Manage the stored endpoint and token
    Config(ConfigCommand),
}
