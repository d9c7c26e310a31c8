//! List posts command implementation.

use anyhow::{Context, Result};
use clap::Args;

use talawa_core::sources::POSTS_PAGE_SIZE;
use talawa_core::{OrganizationId, OrganizationPosts};

use super::ListArgs;
use crate::cli::ConnectionArgs;

#[derive(Args, Debug)]
pub struct PostsArgs {
    /// Organization id
    pub organization: String,

    #[command(flatten)]
    pub list: ListArgs,
}

pub async fn run(args: PostsArgs, connection: &ConnectionArgs) -> Result<()> {
    let organization =
        OrganizationId::new(&args.organization).context("Invalid organization id")?;
    let backend = super::connect(connection)?;

    super::list(
        OrganizationPosts::new(backend, organization),
        POSTS_PAGE_SIZE,
        &args.list,
    )
    .await
}
