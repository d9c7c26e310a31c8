//! List up-voters command implementation.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};

use talawa_core::sources::UP_VOTERS_PAGE_SIZE;
use talawa_core::{CommentId, CommentUpVoters, PostId, PostUpVoters};

use super::ListArgs;
use crate::cli::ConnectionArgs;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["post", "comment"])))]
pub struct UpVotersArgs {
    /// Post whose up-voters to list
    #[arg(long)]
    pub post: Option<String>,

    /// Comment whose up-voters to list
    #[arg(long)]
    pub comment: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn run(args: UpVotersArgs, connection: &ConnectionArgs) -> Result<()> {
    match (&args.post, &args.comment) {
        (Some(post), _) => {
            let post = PostId::new(post).context("Invalid post id")?;
            let backend = super::connect(connection)?;
            super::list(
                PostUpVoters::new(backend, post),
                UP_VOTERS_PAGE_SIZE,
                &args.list,
            )
            .await
        }
        (None, Some(comment)) => {
            let comment = CommentId::new(comment).context("Invalid comment id")?;
            let backend = super::connect(connection)?;
            super::list(
                CommentUpVoters::new(backend, comment),
                UP_VOTERS_PAGE_SIZE,
                &args.list,
            )
            .await
        }
        (None, None) => anyhow::bail!("Either --post or --comment is required"),
    }
}
