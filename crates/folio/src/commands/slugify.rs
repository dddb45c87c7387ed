//! `folio slugify` command implementation.

use clap::Args;
use folio_renderer::slugify;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the slugify command.
#[derive(Args)]
pub(crate) struct SlugifyArgs {
    /// Text to turn into a slug.
    #[arg(required = true)]
    text: Vec<String>,
}

impl SlugifyArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        Output::new().print(&slugify(&self.text.join(" ")))?;
        Ok(())
    }
}
