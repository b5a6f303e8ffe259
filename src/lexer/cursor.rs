//! Code-point cursor over an immutable source text
//!
//!     The cursor tracks two byte offsets into the source: `start`, the beginning of the
//!     token currently being accumulated, and `position`, the next unread byte. State
//!     functions move `position` forward with [`Cursor::next_char`] and its helpers, then
//!     either emit the pending text `[start, position)` as a token or drop it with
//!     [`Cursor::ignore`].
//!
//!     End of input is reported as `None`. Reading again after `None` has been delivered
//!     (without a [`Cursor::backup`] in between) is a bug in the calling state function and
//!     panics.

use std::ops::Range;
use std::sync::Arc;

/// Characters that always stop [`Cursor::accept_to`].
const LINE_STOPS: [char; 2] = ['\n', '\0'];

#[derive(Debug, Clone)]
pub struct Cursor {
    source: Arc<str>,
    start: usize,
    position: usize,
    at_eof: bool,
}

impl Cursor {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Cursor {
            source: source.into(),
            start: 0,
            position: 0,
            at_eof: false,
        }
    }

    /// The full source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset where the pending token starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte range of the pending token.
    pub fn span(&self) -> Range<usize> {
        self.start..self.position
    }

    /// True when every byte of the source has been read.
    pub fn at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Reads the next code point, or `None` at end of input.
    ///
    /// # Panics
    ///
    /// Panics if called again after `None` was returned without an intervening
    /// [`Cursor::backup`].
    pub fn next_char(&mut self) -> Option<char> {
        match self.source[self.position..].chars().next() {
            Some(c) => {
                self.position += c.len_utf8();
                Some(c)
            }
            None => {
                assert!(
                    !self.at_eof,
                    "next_char attempted to move past end of source"
                );
                self.at_eof = true;
                None
            }
        }
    }

    /// Undoes the last [`Cursor::next_char`].
    ///
    /// May be repeated, but never past the start of the pending token.
    pub fn backup(&mut self) {
        if self.at_eof {
            self.at_eof = false;
            return;
        }
        debug_assert!(
            self.position > self.start,
            "backup moved before the start of the pending token"
        );
        if let Some(c) = self.source[self.start..self.position].chars().next_back() {
            self.position -= c.len_utf8();
        }
    }

    pub fn peek_char(&mut self) -> Option<char> {
        let c = self.next_char();
        self.backup();
        c
    }

    /// Consumes one character if it is in `chars`.
    pub fn accept(&mut self, chars: &str) -> bool {
        match self.next_char() {
            Some(c) if chars.contains(c) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    /// Consumes a maximal run of characters found in `chars`.
    pub fn accept_run(&mut self, chars: &str) {
        self.accept_while(|c| chars.contains(c));
    }

    /// Consumes a maximal run of characters matching `predicate`.
    pub fn accept_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.next_char() {
            if !predicate(c) {
                break;
            }
        }
        self.backup();
    }

    /// Consumes characters up to (not including) the first one in `chars`, a newline, a
    /// NUL, or the end of input.
    pub fn accept_to(&mut self, chars: &str) {
        self.accept_while(|c| !chars.contains(c) && !LINE_STOPS.contains(&c));
    }

    /// True if the unread source starts with `prefix`.
    pub fn looking_at(&self, prefix: &str) -> bool {
        self.source[self.position..].starts_with(prefix)
    }

    /// The pending token text.
    pub fn current(&self) -> &str {
        &self.source[self.start..self.position]
    }

    /// Drops the pending text.
    pub fn ignore(&mut self) {
        self.start = self.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_through_string() {
        let mut cursor = Cursor::new("123");
        for (expected, text) in [(Some('1'), "1"), (Some('2'), "12"), (Some('3'), "123")] {
            assert_eq!(cursor.next_char(), expected);
            assert_eq!(cursor.current(), text);
        }
        assert_eq!(cursor.next_char(), None);
        assert_eq!(cursor.current(), "123");
    }

    #[test]
    fn test_backup_rewinds_one_code_point() {
        let mut cursor = Cursor::new("1");
        assert_eq!(cursor.next_char(), Some('1'));
        assert_eq!(cursor.current(), "1");

        cursor.backup();
        assert_eq!(cursor.current(), "");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_backup_over_multibyte_character() {
        let mut cursor = Cursor::new("aé");
        cursor.next_char();
        assert_eq!(cursor.next_char(), Some('é'));
        assert_eq!(cursor.position(), 3);

        cursor.backup();
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek_char(), Some('é'));
    }

    #[test]
    fn test_backup_clears_end_of_input() {
        let mut cursor = Cursor::new("");
        assert_eq!(cursor.next_char(), None);
        cursor.backup();
        // A second read is legal again after the backup.
        assert_eq!(cursor.next_char(), None);
    }

    #[test]
    #[should_panic(expected = "past end of source")]
    fn test_reading_past_end_panics() {
        let mut cursor = Cursor::new("");
        cursor.next_char();
        cursor.next_char();
    }

    #[test]
    fn test_peek_has_no_net_effect() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek_char(), Some('a'));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.next_char(), Some('a'));
    }

    #[test]
    fn test_accept_and_accept_run() {
        let mut cursor = Cursor::new("  \tx");
        assert!(cursor.accept(" "));
        assert!(!cursor.accept("x"));
        cursor.accept_run(" \t");
        assert_eq!(cursor.current(), "  \t");
        assert_eq!(cursor.peek_char(), Some('x'));
    }

    #[test]
    fn test_accept_run_stops_at_end_of_input() {
        let mut cursor = Cursor::new("...");
        cursor.accept_run(".");
        assert_eq!(cursor.current(), "...");
        assert!(cursor.at_end());
        assert_eq!(cursor.next_char(), None);
    }

    #[test]
    fn test_accept_to_stops_at_line_end() {
        let mut cursor = Cursor::new("one two\nthree");
        cursor.accept_to("");
        assert_eq!(cursor.current(), "one two");
        assert!(cursor.looking_at("\nthree"));
    }

    #[test]
    fn test_accept_to_stops_at_delimiter() {
        let mut cursor = Cursor::new("value\" rest");
        cursor.accept_to("\"");
        assert_eq!(cursor.current(), "value");
        assert!(cursor.looking_at("\""));
    }

    #[test]
    fn test_accept_to_stops_at_nul() {
        let mut cursor = Cursor::new("ab\0cd");
        cursor.accept_to("");
        assert_eq!(cursor.current(), "ab");
    }

    #[test]
    fn test_ignore_moves_start() {
        let mut cursor = Cursor::new("ab");
        cursor.next_char();
        cursor.ignore();
        assert_eq!(cursor.start(), 1);
        assert_eq!(cursor.current(), "");
        cursor.next_char();
        assert_eq!(cursor.current(), "b");
        assert_eq!(cursor.span(), 1..2);
    }
}
