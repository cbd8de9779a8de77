//! Text formatting utilities.

/// Cut `text` to at most `max` characters, marking the cut with `~`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('~');
    out
}

/// Split `text` into lines of at most `width` characters.
///
/// Breaks after the last whitespace that fits, or mid-word when there is
/// none; a newline always ends a line. No character is dropped: the lines
/// concatenate back to `text`.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + width).min(chars.len());
        let window = &chars[start..end];
        let cut = if let Some(nl) = window.iter().position(|&c| c == '\n') {
            start + nl + 1
        } else if end == chars.len() {
            end
        } else {
            window
                .iter()
                .rposition(|c| c.is_whitespace())
                .map_or(end, |i| start + i + 1)
        };
        lines.push(chars[start..cut].iter().collect());
        start = cut;
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Human-readable file size.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024 * 10 && unit < UNITS.len() - 1 {
        value /= 1024;
        unit += 1;
    }
    format!("{value} {}", UNITS[unit])
}
