//! `folio list` command implementation.

use clap::Args;
use folio_storage::PageStore;

use super::{SourceArgs, load_store};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl ListArgs {
    /// Print navigable pages as `slug  title` rows in navigation order.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;
        let pages = load_store(&config)?.navigable_pages()?;

        if pages.is_empty() {
            output.warning("No navigable pages");
            return Ok(());
        }

        let width = pages.iter().map(|p| p.slug.len()).max().unwrap_or(0);
        for page in &pages {
            output.row(&format!("{:width$}", page.slug), &page.title)?;
        }
        Ok(())
    }
}
