//! Zero-width line-break opportunities for long identifiers.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// U+200B ZERO WIDTH SPACE.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Which characters get a break opportunity in front of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakStyle {
    /// Before `.` and `_`.
    Punctuation,
    /// Before `.`, `_` and every ASCII uppercase letter.
    #[default]
    PunctuationAndCase,
}

impl BreakStyle {
    fn breaks_before(self, c: char) -> bool {
        match self {
            BreakStyle::Punctuation => matches!(c, '.' | '_'),
            BreakStyle::PunctuationAndCase => matches!(c, '.' | '_') || c.is_ascii_uppercase(),
        }
    }
}

/// Insert a zero-width space before each break point in `text`.
///
/// A break point already preceded by a zero-width space is left alone, so
/// applying this twice gives the same result as applying it once.
pub fn insert_breaks(text: &str, style: BreakStyle) -> Cow<'_, str> {
    if !text.chars().any(|c| style.breaks_before(c)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut prev = None;
    for c in text.chars() {
        if style.breaks_before(c) && prev != Some(ZERO_WIDTH_SPACE) {
            out.push(ZERO_WIDTH_SPACE);
        }
        out.push(c);
        prev = Some(c);
    }
    Cow::Owned(out)
}
