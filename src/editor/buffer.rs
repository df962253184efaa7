use ropey::{Rope, RopeSlice};

/// Cursor position in the draft buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, counted in characters within the line.
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rope-backed draft text with a cursor and an optional character cap.
///
/// Columns are character offsets, which is also what ropey indexes by, so
/// converting a cursor into a rope position is a single addition. The cap
/// counts characters (line breaks included); inserts that would exceed it are
/// refused and pastes are cut to whatever room is left.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
    max_chars: Option<usize>,
}

impl EditorBuffer {
    /// Create a new buffer from a string. The cursor starts at the origin.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
            max_chars: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Limit the buffer to `max_chars` characters (`None` = unbounded).
    ///
    /// Existing text longer than the limit is kept; only further growth is
    /// refused.
    #[must_use]
    pub const fn with_max_chars(mut self, max_chars: Option<usize>) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub const fn max_chars(&self) -> Option<usize> {
        self.max_chars
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the text changed since creation, the last `set_text`, or
    /// `mark_clean`.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines (an empty buffer has one).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.line_chars(line_idx).into_iter().collect())
    }

    /// Length of a line in characters, without its line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        line.len_chars() - line_break_len(line)
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of characters in the buffer.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Characters that can still be inserted before the cap is hit.
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.max_chars
            .map(|max| max.saturating_sub(self.rope.len_chars()))
    }

    /// Replace the whole text, park the cursor at the end and mark clean.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.dirty = false;
        self.move_to_end();
    }

    /// Insert a character at the cursor. Returns `false` when the cap is full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.remaining_capacity() == Some(0) {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.place_cursor(char_idx + 1);
        self.dirty = true;
        true
    }

    /// Insert as much of `s` as the cap allows. Returns the number of
    /// characters inserted.
    pub fn insert_str(&mut self, s: &str) -> usize {
        let room = self.remaining_capacity().unwrap_or(usize::MAX);
        let accepted: String = s.chars().take(room).collect();
        if accepted.is_empty() {
            return 0;
        }
        let inserted = accepted.chars().count();
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, &accepted);
        self.place_cursor(char_idx + inserted);
        self.dirty = true;
        inserted
    }

    /// Break the line at the cursor (Enter key).
    pub fn split_line(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            let prev_len = self.line_len(self.cursor.line - 1);
            let start = self.rope.line_to_char(self.cursor.line - 1) + prev_len;
            self.rope.remove(start..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - 1);
        }
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        let end = if self.cursor.col >= line_len {
            self.rope.line_to_char(self.cursor.line + 1)
        } else {
            char_idx + 1
        };
        self.rope.remove(char_idx..end);
        self.dirty = true;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(false),
            Direction::Down => self.move_vertical(true),
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move to the start of the previous word, wrapping to the previous line.
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }
        let chars = self.line_chars(self.cursor.line);
        let mut pos = self.cursor.col.min(chars.len());
        while pos > 0 && !is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        self.cursor.set_col(pos);
    }

    /// Move past the current word and the gap after it, wrapping to the next
    /// line at end of line.
    pub fn move_word_right(&mut self) {
        let chars = self.line_chars(self.cursor.line);
        if self.cursor.col >= chars.len() {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }
        let mut pos = self.cursor.col;
        while pos < chars.len() && is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && !is_word_char(chars[pos]) {
            pos += 1;
        }
        self.cursor.set_col(pos);
    }

    /// Move to a line/column, clamping both to the text.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    /// Put the cursor at a rope char index, resolving the line the way
    /// ropey does. An index inside a `\r\n` pair lands at the line end.
    fn place_cursor(&mut self, char_idx: usize) {
        let line = self.rope.char_to_line(char_idx);
        let col = char_idx - self.rope.line_to_char(line);
        self.cursor.line = line;
        self.cursor.set_col(col.min(self.line_len(line)));
    }

    fn cursor_char_idx(&self) -> usize {
        let col = self.cursor.col.min(self.line_len(self.cursor.line));
        self.rope.line_to_char(self.cursor.line) + col
    }

    fn line_chars(&self, line_idx: usize) -> Vec<char> {
        if line_idx >= self.rope.len_lines() {
            return Vec::new();
        }
        self.rope
            .line(line_idx)
            .chars()
            .take(self.line_len(line_idx))
            .collect()
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            self.cursor.set_col(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, down: bool) {
        let target = if down {
            if self.cursor.line + 1 >= self.line_count() {
                return;
            }
            self.cursor.line + 1
        } else {
            let Some(prev) = self.cursor.line.checked_sub(1) else {
                return;
            };
            prev
        };
        self.cursor.line = target;
        self.cursor.col = self.cursor.col_memory.min(self.line_len(target));
    }
}

/// Characters of the line break ending `line`, matching ropey's line
/// break set (`\r\n` counts as one break of two chars).
fn line_break_len(line: RopeSlice) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len > 1 && line.char(len - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("chars", &self.rope.len_chars())
            .field("max_chars", &self.max_chars)
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_cr_is_a_line_break() {
        let buf = EditorBuffer::from_text("ab\rcd");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_len(0), 2);
        assert_eq!(buf.line_at(0), Some("ab".to_string()));
        assert_eq!(buf.line_at(1), Some("cd".to_string()));
    }

    #[test]
    fn test_insert_str_with_bare_cr_keeps_cursor_in_text() {
        let mut buf = EditorBuffer::empty();
        buf.insert_str("x\ry");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
        buf.insert_char('a');
        buf.insert_char('b');
        assert_eq!(buf.text(), "x\ryab");
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    #[test]
    fn test_unicode_line_separator_is_stripped_from_line() {
        let mut buf = EditorBuffer::from_text("one\u{2028}two");
        assert_eq!(buf.line_len(0), 3);
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.char_count(), 0);
    }

    #[test]
    fn test_line_len_counts_chars_not_bytes() {
        let buf = EditorBuffer::from_text("café\nhi");
        assert_eq!(buf.line_len(0), 4);
        assert_eq!(buf.line_len(1), 2);
        assert_eq!(buf.char_count(), 7);
    }

    #[test]
    fn test_line_len_ignores_crlf() {
        let buf = EditorBuffer::from_text("ab\r\ncd");
        assert_eq!(buf.line_len(0), 2);
        assert_eq!(buf.line_at(0), Some("ab".to_string()));
    }

    #[test]
    fn test_set_text_resets_dirty_and_moves_to_end() {
        let mut buf = EditorBuffer::from_text("old");
        buf.insert_char('!');
        buf.set_text("one\ntwo");
        assert!(!buf.is_dirty());
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    #[test]
    fn test_insert_char_marks_dirty_and_advances() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        assert!(buf.insert_char('e'));
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_after_multibyte_char() {
        let mut buf = EditorBuffer::from_text("é");
        buf.move_end();
        buf.insert_char('x');
        assert_eq!(buf.text(), "éx");
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_insert_char_refused_at_cap() {
        let mut buf = EditorBuffer::from_text("abc").with_max_chars(Some(3));
        buf.move_end();
        assert!(!buf.insert_char('d'));
        assert_eq!(buf.text(), "abc");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_str_truncated_to_remaining_capacity() {
        let mut buf = EditorBuffer::from_text("ab").with_max_chars(Some(5));
        buf.move_end();
        assert_eq!(buf.insert_str("cdefgh"), 3);
        assert_eq!(buf.text(), "abcde");
        assert_eq!(buf.remaining_capacity(), Some(0));
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor_to_tail() {
        let mut buf = EditorBuffer::from_text("");
        buf.insert_str("one\ntwo\nthree");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.cursor(), Cursor::at(2, 5));
    }

    #[test]
    fn test_text_over_cap_is_kept_but_cannot_grow() {
        let mut buf = EditorBuffer::from_text("abcdef").with_max_chars(Some(3));
        assert_eq!(buf.text(), "abcdef");
        assert_eq!(buf.remaining_capacity(), Some(0));
        assert_eq!(buf.insert_str("x"), 0);
    }

    #[test]
    fn test_split_line_counts_against_cap() {
        let mut buf = EditorBuffer::from_text("ab").with_max_chars(Some(2));
        buf.move_to(0, 1);
        assert!(!buf.split_line());
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.move_to(0, 5);
        assert!(buf.split_line());
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_removes_multibyte_char() {
        let mut buf = EditorBuffer::from_text("café");
        buf.move_end();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "caf");
        assert_eq!(buf.cursor().col, 3);
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = EditorBuffer::from_text("ab\r\ncd");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.delete_forward();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_horizontal_movement_wraps_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 2);
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_vertical_movement_stops_at_edges() {
        let mut buf = EditorBuffer::from_text("a\nb");
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_word_motion() {
        let mut buf = EditorBuffer::from_text("hello brave world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 12);
        buf.move_to(0, 14);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 12);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
    }

    #[test]
    fn test_word_motion_wraps_at_line_edges() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.move_word_right();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.move_word_left();
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }
}
