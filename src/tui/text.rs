//! Shared text formatting helpers used by widget and terminal rendering.

/// Count visible character width (single-cell approximation).
pub fn visible_width(s: &str) -> usize {
    s.chars().count()
}

/// Clip a string to at most `max_width` visible characters.
pub fn clip_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Clip to `width` and right-pad with spaces so the result is exactly `width`.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = clip_to_width(&flatten(s), width);
    let len = visible_width(&out);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

/// Replace line breaks and tabs so a cell always occupies one row.
pub fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect()
}

/// Number of terminal rows `width_chars` occupies at `cols` columns.
pub fn wrapped_rows(width_chars: usize, cols: usize) -> usize {
    if cols == 0 {
        return 1;
    }
    width_chars.max(1).div_ceil(cols)
}
