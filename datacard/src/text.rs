//! Terminal text measurement.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cut `s` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Column offset that centers `text_width` in `available_width`.
pub fn center_offset(text_width: usize, available_width: usize) -> usize {
    available_width.saturating_sub(text_width) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Broiler", 10), "Broiler");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Broiler House 3", 8), "Broiler…");
        assert_eq!(display_width(&truncate_to_width("Broiler House 3", 8)), 8);
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is 2 columns wide
        assert_eq!(truncate_to_width("鶏鶏鶏", 4), "鶏…");
    }

    #[test]
    fn test_truncate_zero_width() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
