// WHY: Token clean-up shared by all extraction strategies
// Helpers borrow from their input; only truncation and collapsing allocate

use unicode_segmentation::UnicodeSegmentation;

use crate::entity::TextRange;

/// Sigils that may lead a mention or hashtag token
pub const SIGILS: [char; 2] = ['@', '#'];

/// Trim leading/trailing whitespace and newlines
pub fn trim_token(token: &str) -> &str {
    token.trim()
}

/// Narrow `range` so it excludes surrounding whitespace in `text`
pub fn trimmed_range(text: &str, range: TextRange) -> TextRange {
    let Some(slice) = range.slice(text) else {
        return range;
    };
    let leading = slice.len() - slice.trim_start().len();
    TextRange::new(range.location + leading, slice.trim().len())
}

/// Drop exactly one leading character, whatever its width
pub fn drop_first_char(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next();
    chars.as_str()
}

/// Remove one more leading sigil if the rule left one behind
pub fn strip_sigil(token: &str) -> &str {
    token.strip_prefix(&SIGILS[..]).unwrap_or(token)
}

/// Cut display text down to `max_chars` user-perceived characters
///
/// Counts grapheme clusters, so combining marks and emoji sequences are never
/// split. The ellipsis counts toward the limit; when it alone would
/// not fit, the text is cut without it.
pub fn truncate_display(text: &str, max_chars: Option<usize>, ellipsis: Option<&str>) -> String {
    let Some(max_chars) = max_chars else {
        return text.to_string();
    };
    if grapheme_len(text) <= max_chars {
        return text.to_string();
    }

    let marker = ellipsis.unwrap_or("");
    let marker_len = grapheme_len(marker);
    if marker_len == 0 || marker_len >= max_chars {
        return text.graphemes(true).take(max_chars).collect();
    }

    let mut result: String = text.graphemes(true).take(max_chars - marker_len).collect();
    result.push_str(marker);
    result
}

/// Number of extended grapheme clusters in `text`
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Collapse interior whitespace runs (including \r\n) into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    let mut buffer = String::with_capacity(text.len());
    collapse_whitespace_into(text, &mut buffer);
    buffer
}

/// Collapse whitespace into a supplied buffer
pub fn collapse_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = false;
    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }
}
