//! Subcommand implementations.

pub mod comments;
pub mod config;
pub mod posts;
pub mod up_voters;

use std::pin::pin;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use futures_util::StreamExt;
use serde::Serialize;

use talawa_core::{Collection, CollectionState, Cursor, PageSource};

use crate::backend::CliBackend;
use crate::cli::ConnectionArgs;
use crate::output;

/// Paging options shared by the listing commands.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Items per page (defaults to the collection's page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Continue after this cursor instead of starting from the beginning
    #[arg(long)]
    pub cursor: Option<String>,

    /// Keep loading until the collection is exhausted
    #[arg(long)]
    pub all: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Resolve the connection settings and open a backend.
pub fn connect(connection: &ConnectionArgs) -> Result<Arc<CliBackend>> {
    let resolved = crate::config::resolve(connection)?;
    tracing::info!(endpoint = %resolved.api_url, "Connecting");
    Ok(Arc::new(CliBackend::connect(resolved)?))
}

/// Load one page (or every page with `--all`) of `source` and print it.
pub async fn list<S>(source: S, default_page_size: u32, args: &ListArgs) -> Result<()>
where
    S: PageSource,
    S::Item: Serialize,
{
    let label = source.label().to_string();
    let page_size = args.page_size.unwrap_or(default_page_size);

    let collection = match &args.cursor {
        Some(cursor) => {
            let cursor = Cursor::new(cursor).context("Invalid cursor")?;
            let state = CollectionState {
                cursor: Some(cursor),
                ..CollectionState::new()
            };
            Collection::resume(source, page_size, state)
        }
        None => Collection::new(source, page_size),
    };

    let mut printed = 0;

    if args.all {
        let mut pages = pin!(collection.pages());
        while let Some(items) = pages.next().await {
            let items = items.with_context(|| format!("Failed to load {}", label))?;
            for item in &items {
                output::item(item, args.pretty)?;
            }
            printed += items.len();
        }
    } else {
        let outcome = collection
            .load_more()
            .await
            .with_context(|| format!("Failed to load {}", label))?;
        tracing::debug!(?outcome, "Load finished");

        for item in &collection.items() {
            output::item(item, args.pretty)?;
        }
        printed = collection.len();
    }

    if printed == 0 {
        output::note(&format!("No {} found.", label));
    }

    let state = collection.state();
    eprintln!();
    if let Some(total) = state.total_count {
        output::status_field("Total", total);
    }
    match (state.has_more, &state.cursor) {
        (false, _) => output::note(&format!("No more {}.", label)),
        (true, Some(cursor)) if args.all => output::warning(&format!(
            "Stopped: server kept returning cursor {} without new {}",
            cursor, label
        )),
        (true, Some(cursor)) => output::status_field("Next cursor", cursor),
        (true, None) => output::warning(&format!(
            "Server reported more {} but sent no cursor",
            label
        )),
    }

    Ok(())
}
