//! `folio render` command implementation.

use clap::{Args, ValueEnum};
use folio_renderer::escape_html;
use folio_site::RenderedPage;

use super::{SourceArgs, load_view};
use crate::error::CliError;
use crate::output::Output;

/// Output shape of the render command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum RenderFormat {
    /// Complete HTML document.
    #[default]
    Html,
    /// Body fragment only.
    Body,
    /// All fragments and metadata as JSON.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Slug of the page to render.
    slug: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: RenderFormat,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the page file cannot be loaded,
    /// or the page does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config()?;
        let view = load_view(&config)?;

        let page = match view.render(&self.slug) {
            Ok(page) => page,
            Err(e) if e.is_not_found() => {
                return Err(CliError::NotFound(format!(
                    "{}: {}",
                    e.user_message(view.strings()),
                    self.slug
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let text = match self.format {
            RenderFormat::Html => document_html(&page, &config.site.language),
            RenderFormat::Body => page.body_html(),
            RenderFormat::Json => serde_json::to_string_pretty(&page)?,
        };
        Output::new().print(&text)?;
        Ok(())
    }
}

/// Wrap a rendered page in a minimal standalone document.
fn document_html(page: &RenderedPage, language: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"{lang}\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n",
            "{head}\n",
            "</head>\n",
            "<body class=\"{classes}\">\n",
            "{body}\n",
            "</body>\n",
            "</html>",
        ),
        lang = escape_html(language),
        title = escape_html(&page.document_title),
        head = page.head_html,
        classes = escape_html(&page.body_classes.join(" ")),
        body = page.body_html(),
    )
}
