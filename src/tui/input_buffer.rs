//! Char-indexed editing helpers for the single-line input buffer.
//!
//! All cursor positions are character indices so multi-byte input never
//! splits a UTF-8 sequence.

/// Insert one char at the current cursor position.
pub(crate) fn insert_char_at_cursor(buffer: &mut String, cursor: &mut usize, ch: char) {
    let byte_idx = byte_index_at_char(buffer, *cursor);
    buffer.insert(byte_idx, ch);
    *cursor += 1;
}

/// Delete one char immediately before cursor. No-op at column zero.
pub(crate) fn delete_char_before_cursor(buffer: &mut String, cursor: &mut usize) {
    if *cursor == 0 {
        return;
    }
    let start = byte_index_at_char(buffer, *cursor - 1);
    let end = byte_index_at_char(buffer, *cursor);
    buffer.replace_range(start..end, "");
    *cursor -= 1;
}

/// Delete one char at the current cursor position.
pub(crate) fn delete_char_at_cursor(buffer: &mut String, cursor: usize) {
    if cursor >= char_count(buffer) {
        return;
    }
    let start = byte_index_at_char(buffer, cursor);
    let end = byte_index_at_char(buffer, cursor + 1);
    buffer.replace_range(start..end, "");
}

/// Delete a char range represented in char indices.
pub(crate) fn delete_char_range(buffer: &mut String, start_char: usize, end_char: usize) {
    if start_char >= end_char {
        return;
    }
    let start = byte_index_at_char(buffer, start_char);
    let end = byte_index_at_char(buffer, end_char);
    buffer.replace_range(start..end, "");
}

/// Return the char index where the previous word starts.
pub(crate) fn previous_word_start(buffer: &str, cursor: usize) -> usize {
    let chars: Vec<char> = buffer.chars().collect();
    let mut idx = cursor.min(chars.len());
    while idx > 0 && chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    while idx > 0 && !chars[idx - 1].is_whitespace() {
        idx -= 1;
    }
    idx
}

/// Return the char index just past the end of the next word.
pub(crate) fn next_word_end(buffer: &str, cursor: usize) -> usize {
    let chars: Vec<char> = buffer.chars().collect();
    let mut idx = cursor.min(chars.len());
    while idx < chars.len() && chars[idx].is_whitespace() {
        idx += 1;
    }
    while idx < chars.len() && !chars[idx].is_whitespace() {
        idx += 1;
    }
    idx
}

/// Convert a char index to a byte index, preserving UTF-8 boundaries.
pub(crate) fn byte_index_at_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Return total char count for a UTF-8 string.
pub(crate) fn char_count(s: &str) -> usize {
    s.chars().count()
}
