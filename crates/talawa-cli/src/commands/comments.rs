//! List comments command implementation.

use anyhow::{Context, Result};
use clap::Args;

use talawa_core::sources::COMMENTS_PAGE_SIZE;
use talawa_core::{PostComments, PostId};

use super::ListArgs;
use crate::cli::ConnectionArgs;

#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Post id
    pub post: String,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn run(args: CommentsArgs, connection: &ConnectionArgs) -> Result<()> {
    let post = PostId::new(&args.post).context("Invalid post id")?;
    let backend = super::connect(connection)?;

    super::list(PostComments::new(backend, post), COMMENTS_PAGE_SIZE, &args.list).await
}
