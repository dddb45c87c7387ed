//! Reading time estimation.

use crate::i18n::{StringId, Translator};
use crate::text::strip_tags_spaced;

/// Default reading speed in words per minute.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated reading time of a page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingTime {
    /// Whole minutes, at least 1.
    pub minutes: u32,
    /// Whitespace-delimited words in the text content.
    pub word_count: usize,
    /// Localized display string.
    pub formatted: String,
}

/// Count words in HTML content, ignoring markup.
pub fn word_count(content: &str) -> usize {
    strip_tags_spaced(content).split_whitespace().count()
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up, never 0.
///
/// A rate of 0 is treated as 1.
pub fn minutes_for(words: usize, words_per_minute: u32) -> u32 {
    let rate = usize::try_from(words_per_minute.max(1)).unwrap_or(usize::MAX);
    let minutes = words.div_ceil(rate).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Estimate reading time of HTML content.
pub fn reading_time(content: &str, words_per_minute: u32, strings: &dyn Translator) -> ReadingTime {
    let word_count = word_count(content);
    let minutes = minutes_for(word_count, words_per_minute);
    ReadingTime {
        minutes,
        word_count,
        formatted: strings.get(StringId::ReadingTime, Some(&minutes.to_string())),
    }
}
