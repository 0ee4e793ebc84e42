//! Character reader over a normalized source text
//!
//! The reader keeps line, column and byte offset in sync with every consumed character. Newlines
//! are normalized once when the reader is created (`\r\n`, `\r` and `\f` all become `\n`), so the
//! rest of the parser only ever has to deal with `\n`.

use crate::location::Location;

pub struct StringReader {
    /// Normalized source
    input: String,
    /// Current position (line, column and byte offset)
    cur: Location,
    /// Single checkpoint used by `mark()` and `reset()`
    bookmark: Option<Location>,
}

/// Normalizes newlines the way CSS preprocessing requires
pub fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{c}' => out.push('\n'),
            _ => out.push(c),
        }
    }
    out
}

impl StringReader {
    pub fn new(text: &str) -> Self {
        Self {
            input: normalize_newlines(text),
            cur: Location::default(),
            bookmark: None,
        }
    }

    /// Returns the (normalized) source text
    pub fn source(&self) -> &str {
        &self.input
    }

    pub fn eof(&self) -> bool {
        self.cur.offset >= self.input.len()
    }

    pub fn location(&self) -> Location {
        self.cur
    }

    pub fn offset(&self) -> usize {
        self.cur.offset
    }

    /// Returns the unread part of the source
    pub fn remaining(&self) -> &str {
        self.input.get(self.cur.offset..).unwrap_or("")
    }

    /// Returns the character `n` positions ahead without consuming anything. `look_ahead(0)` is
    /// the character that the next `read()` returns.
    pub fn look_ahead(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Reads the next character and advances the position
    pub fn read(&mut self) -> Option<char> {
        let c = self.remaining().chars().next()?;
        self.cur.offset += c.len_utf8();
        if c == '\n' {
            self.cur.line += 1;
            self.cur.column = 1;
        } else {
            self.cur.column += 1;
        }
        Some(c)
    }

    /// Reads up to `count` characters and returns them
    pub fn read_count(&mut self, count: usize) -> String {
        let mut s = String::new();
        for _ in 0..count {
            match self.read() {
                Some(c) => s.push(c),
                None => break,
            }
        }
        s
    }

    /// Consumes `literal` when the remaining input starts with it
    pub fn read_match(&mut self, literal: &str) -> bool {
        if !self.remaining().starts_with(literal) {
            return false;
        }
        self.read_count(literal.chars().count());
        true
    }

    /// Consumes `literal` when the remaining input starts with it, ignoring ASCII case
    pub fn read_match_ci(&mut self, literal: &str) -> bool {
        let matched = self
            .remaining()
            .get(..literal.len())
            .is_some_and(|s| s.eq_ignore_ascii_case(literal));
        if matched {
            self.read_count(literal.chars().count());
        }
        matched
    }

    /// Consumes characters as long as `pred` holds and returns the consumed slice
    pub fn read_while<F: Fn(char) -> bool>(&mut self, pred: F) -> String {
        let start = self.cur.offset;
        while let Some(c) = self.look_ahead(0) {
            if !pred(c) {
                break;
            }
            self.read();
        }
        self.slice(start, self.cur.offset).to_string()
    }

    /// Consumes at most `max` characters for which `pred` holds
    pub fn read_while_max<F: Fn(char) -> bool>(&mut self, pred: F, max: usize) -> String {
        let mut s = String::new();
        while s.chars().count() < max {
            match self.look_ahead(0) {
                Some(c) if pred(c) => {
                    self.read();
                    s.push(c);
                }
                _ => break,
            }
        }
        s
    }

    /// Reads up to and including `literal`. When the literal is not found, the rest of the input
    /// is consumed and `false` is returned.
    pub fn read_to(&mut self, literal: &str) -> bool {
        match self.remaining().find(literal) {
            Some(idx) => {
                let count = self.remaining()[..idx + literal.len()].chars().count();
                self.read_count(count);
                true
            }
            None => {
                let count = self.remaining().chars().count();
                self.read_count(count);
                false
            }
        }
    }

    /// Remembers the current position so it can be restored with `reset()`
    pub fn mark(&mut self) -> Location {
        self.bookmark = Some(self.cur);
        self.cur
    }

    /// Returns to the position saved by the last `mark()`
    pub fn reset(&mut self) {
        if let Some(loc) = self.bookmark {
            self.cur = loc;
        }
    }

    /// Moves the reader to the given location. The location must come from this reader (or be a
    /// shifted location that points at the same text).
    pub fn seek(&mut self, loc: Location) {
        self.cur = loc;
        if self.cur.offset > self.input.len() {
            self.cur.offset = self.input.len();
        }
    }

    /// Returns the source between two byte offsets, or an empty string when the range is invalid
    pub fn slice(&self, start: usize, end: usize) -> &str {
        self.input.get(start..end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_are_normalized() {
        let reader = StringReader::new("a\r\nb\rc\u{c}d");
        assert_eq!(reader.source(), "a\nb\nc\nd");
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut reader = StringReader::new("ab\ncé d");
        assert_eq!(reader.read(), Some('a'));
        assert_eq!(reader.read(), Some('b'));
        assert_eq!(reader.location(), Location::new(1, 3, 2));
        assert_eq!(reader.read(), Some('\n'));
        assert_eq!(reader.location(), Location::new(2, 1, 3));
        reader.read_count(2);
        // é is two bytes but one column
        assert_eq!(reader.location(), Location::new(2, 3, 6));
        assert_eq!(reader.look_ahead(1), Some('d'));
    }

    #[test]
    fn mark_and_reset() {
        let mut reader = StringReader::new("url(foo)");
        reader.read_count(4);
        reader.mark();
        assert_eq!(reader.read_while(|c| c != ')'), "foo");
        reader.reset();
        assert_eq!(reader.location(), Location::new(1, 5, 4));
    }

    #[test]
    fn matching() {
        let mut reader = StringReader::new("URL(x) /* c */ y");
        assert!(!reader.read_match("url("));
        assert!(reader.read_match_ci("url("));
        assert!(reader.read_match("x)"));
        reader.read_count(1);
        assert!(reader.read_to("*/"));
        assert_eq!(reader.remaining(), " y");
        assert!(!reader.read_to("*/"));
        assert!(reader.eof());
        assert_eq!(reader.read(), None);
    }
}
