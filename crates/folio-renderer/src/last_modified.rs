//! "Last updated" banner.

use crate::context::RenderContext;
use crate::i18n::StringId;
use crate::text::escape_html;

/// Render the last-updated banner for a Unix timestamp.
///
/// Returns an empty string when the timestamp is unset (`<= 0`).
pub fn last_modified(timestamp: i64, ctx: &RenderContext<'_>) -> String {
    if timestamp <= 0 {
        return String::new();
    }

    let date = ctx.dates.format(timestamp);
    format!(
        r#"<div class="last-updated"><i class="fa fa-clock-o"></i> {}</div>"#,
        escape_html(&ctx.strings.get(StringId::LastUpdated, Some(&date)))
    )
}
