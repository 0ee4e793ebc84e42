use crate::tokens::{clip_string, Keywords, Token, TokenKind, TokenValue, UNITS};
use parserlib_shared::errors::{CssError, CssResult};
use parserlib_shared::location::Location;
use parserlib_shared::reader::StringReader;
use std::collections::VecDeque;

/// Number of already consumed tokens that can be pushed back with `unget()`
const LOOKBACK: usize = 5;

fn is_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n'
}

fn is_digit(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_digit())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c as u32 >= 0xA0
}

/// True when `c` can continue an identifier (`prev` is the character before it)
fn is_ident_char(c: Option<char>, prev: Option<char>) -> bool {
    match c {
        None => false,
        Some(c) => is_name_char(c) || c == '\\' || (prev == Some('\\') && c != '\n'),
    }
}

/// True when the characters `a`, `b` and `c` start an identifier
fn starts_ident(a: Option<char>, b: Option<char>, c: Option<char>) -> bool {
    match a {
        Some('-') => b != Some('-') && starts_ident(b, c, None),
        Some('\\') => is_ident_char(b, a),
        Some(a) => a.is_ascii_alphabetic() || a == '_' || a as u32 >= 0xA0,
        None => false,
    }
}

fn unquoted_url_char(c: char) -> bool {
    matches!(c, '!' | '#' | '$' | '%' | '&' | '*'..='[' | ']'..='~') || c as u32 >= 0xA0
}

/// Which hidden tokens the lexer returns instead of skipping
#[derive(Clone, Copy, Debug)]
struct LexMode {
    whitespace: bool,
    uvar: bool,
    comments: bool,
}

/// The CSS tokenizer.
///
/// Tokens are read on demand from the underlying `StringReader`. The last few consumed tokens
/// are kept in a small buffer so the parser can push tokens back with `unget()`.
pub struct Tokenizer {
    reader: StringReader,
    /// Recently produced tokens. Everything from `cur` onwards has not been consumed yet.
    buf: VecDeque<Token>,
    cur: usize,
    /// Last consumed token
    token: Option<Token>,
}

impl Tokenizer {
    pub fn new(text: &str) -> Self {
        Self {
            reader: StringReader::new(text),
            buf: VecDeque::with_capacity(LOOKBACK + 1),
            cur: 0,
            token: None,
        }
    }

    /// Returns the (normalized) source text
    pub fn source(&self) -> &str {
        self.reader.source()
    }

    pub fn slice(&self, start: usize, end: usize) -> &str {
        self.reader.slice(start, end)
    }

    /// Position of the reader (after all tokens that were read ahead)
    pub fn reader_location(&self) -> Location {
        self.reader.location()
    }

    /// The last consumed token
    pub fn current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// The last consumed token, or an EOF token at the reader position when nothing has been
    /// consumed yet
    pub fn current_or_eof(&self) -> Token {
        match &self.token {
            Some(t) => t.clone(),
            None => {
                let loc = self.reader.location();
                Token::new(TokenKind::Eof, TokenValue::None, "", loc, loc)
            }
        }
    }

    /// Returns the next token. Comments are always skipped, whitespace and `/*[[var]]*/`
    /// placeholders only when not asked for.
    pub fn get(&mut self, uvar: bool, ws: bool) -> Token {
        let tok = loop {
            if self.cur < self.buf.len() {
                self.cur += 1;
                let tok = &self.buf[self.cur - 1];
                let hidden = tok.kind == TokenKind::Comment
                    || (!ws && tok.kind == TokenKind::Whitespace)
                    || (!uvar && tok.kind == TokenKind::Uvar);
                if !hidden {
                    break tok.clone();
                }
                continue;
            }

            let tok = self.lex(LexMode {
                whitespace: ws,
                uvar,
                comments: false,
            });
            self.buf.push_back(tok.clone());
            if self.buf.len() > LOOKBACK {
                self.buf.pop_front();
            } else {
                self.cur += 1;
            }
            break tok;
        };

        self.token = Some(tok.clone());
        tok
    }

    /// Next token skipping whitespace and placeholders
    pub fn grab(&mut self) -> Token {
        self.get(false, false)
    }

    /// Pushes the last consumed token back
    pub fn unget(&mut self) -> CssResult<()> {
        if self.cur == 0 {
            return Err(CssError::new("Too much lookahead."));
        }
        self.unget_last();
        Ok(())
    }

    /// Pushes back a token that was consumed right before, which is always possible
    fn unget_last(&mut self) {
        self.cur = self.cur.saturating_sub(1);
        self.token = match self.cur {
            0 => None,
            n => self.buf.get(n - 1).cloned(),
        };
    }

    /// The next buffered (already lexed) token, if there is one
    pub fn peek_cached(&self) -> Option<&Token> {
        self.buf.get(self.cur)
    }

    /// Kind of the k-th upcoming visible token (1-based) without consuming anything
    pub fn la(&mut self, k: usize) -> TokenKind {
        self.lt(k).kind
    }

    /// The k-th upcoming visible token (1-based) without consuming anything
    pub fn lt(&mut self, k: usize) -> Token {
        let k = k.clamp(1, LOOKBACK - 1);
        let mut tok = self.grab();
        for _ in 1..k {
            tok = self.grab();
        }
        for _ in 0..k {
            self.unget_last();
        }
        tok
    }

    /// Consumes the next token (whitespace included) when it is one of `kinds`
    pub fn match_kinds(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let tok = self.get(false, true);
        self.check(tok, kinds, None)
    }

    /// Skips whitespace and consumes the next token when it is one of `kinds`
    pub fn match_smart(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let tok = self.get(false, kinds.contains(&TokenKind::Whitespace));
        self.check(tok, kinds, None)
    }

    /// Skips whitespace and consumes the next token when it is of `kind` and one of `keywords`
    pub fn match_keyword(&mut self, kind: TokenKind, keywords: &Keywords) -> Option<Token> {
        let tok = self.grab();
        self.check(tok, &[kind], Some(keywords))
    }

    /// Like `match_smart()` but fails with a syntax error
    pub fn must_match_smart(&mut self, kinds: &[TokenKind]) -> CssResult<Token> {
        match self.match_smart(kinds) {
            Some(t) => Ok(t),
            None => Err(self.failure_kinds(kinds)),
        }
    }

    /// Like `match_kinds()` but fails with a syntax error
    pub fn must_match(&mut self, kinds: &[TokenKind]) -> CssResult<Token> {
        match self.match_kinds(kinds) {
            Some(t) => Ok(t),
            None => Err(self.failure_kinds(kinds)),
        }
    }

    pub fn must_match_keyword(&mut self, kind: TokenKind, keywords: &Keywords) -> CssResult<Token> {
        match self.match_keyword(kind, keywords) {
            Some(t) => Ok(t),
            None => {
                let tok = self.lt(1);
                Err(failure(&keywords.describe(), &tok))
            }
        }
    }

    /// Checks the last consumed token instead of reading a new one. On a mismatch the token is
    /// pushed back.
    pub fn match_reuse(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let tok = self.current_or_eof();
        if kinds.contains(&tok.kind) {
            return Some(tok);
        }
        if self.token.is_some() {
            self.unget_last();
        }
        None
    }

    /// Like `match_reuse()` but fails with a syntax error
    pub fn must_reuse(&mut self, kinds: &[TokenKind]) -> CssResult<Token> {
        let tok = self.current_or_eof();
        match self.match_reuse(kinds) {
            Some(t) => Ok(t),
            None => Err(failure(&describe_kinds(kinds), &tok)),
        }
    }

    /// The whole input has been read
    pub fn at_end(&self) -> bool {
        self.reader.eof() && self.peek_cached().map_or(true, |t| t.is_eof())
    }

    fn check(&mut self, tok: Token, kinds: &[TokenKind], keywords: Option<&Keywords>) -> Option<Token> {
        if kinds.contains(&tok.kind) && keywords.map_or(true, |k| k.has(&tok.text)) {
            return Some(tok);
        }
        self.unget_last();
        None
    }

    /// "Expected ..." error for the token that failed to match (it was pushed back)
    fn failure_kinds(&mut self, kinds: &[TokenKind]) -> CssError {
        let tok = self.lt(1);
        failure(&describe_kinds(kinds), &tok)
    }

    /// Drops all buffered tokens
    pub fn reset_buffer(&mut self) {
        self.buf.clear();
        self.cur = 0;
        self.token = None;
    }

    /// Moves the reader to `loc` and forgets everything that was read ahead
    pub fn seek(&mut self, loc: Location) {
        self.reader.seek(loc);
        self.reset_buffer();
    }

    /// Rewinds the reader to the first token that was lexed but not consumed yet
    fn sync_reader(&mut self) {
        if let Some(loc) = self.buf.get(self.cur).map(|t| t.location) {
            self.reader.seek(loc);
        }
        self.reset_buffer();
    }

    /// Skips the rest of a broken declaration or block.
    ///
    /// Nested `{}`, `()` and `[]` pairs are balanced, strings and comments are skipped whole.
    /// With `in_block` set the skip runs to the `}` that closes the current block (which is not
    /// consumed). Otherwise it stops after the next `;` at this level or at a `}`.
    pub fn skip_decl_block(&mut self, in_block: bool) {
        match self.peek_cached().map(|t| t.kind) {
            Some(TokenKind::RBrace) => return,
            Some(TokenKind::Semicolon) if !in_block => {
                self.grab();
                return;
            }
            _ => {}
        }
        self.sync_reader();

        // `None` marks the declaration level, where both `;` and `}` end the skip
        let mut stack: Vec<Option<char>> = Vec::new();
        let mut end: Option<char> = if in_block { Some('}') } else { None };

        while let Some(c) = self.reader.look_ahead(0) {
            let closes = match end {
                Some(e) => c == e,
                None => c == ';' || c == '}',
            };
            if closes {
                match stack.pop() {
                    None => {
                        if c == ';' {
                            self.reader.read();
                        }
                        break;
                    }
                    Some(None) if c == '}' => {
                        self.reader.read();
                        break;
                    }
                    Some(outer) => end = outer,
                }
            } else if matches!(c, '}' | ')' | ']') {
                break;
            } else if let Some(closer) = closing_pair(c) {
                stack.push(end);
                end = Some(closer);
            }
            self.skip_one();
        }
        self.reset_buffer();
    }

    /// Consumes one character, or a whole string, comment or escape starting at it
    fn skip_one(&mut self) {
        match (self.reader.look_ahead(0), self.reader.look_ahead(1)) {
            (Some(q @ ('"' | '\'')), _) => {
                self.reader.read();
                self.read_string_body(q);
                if self.reader.look_ahead(0) == Some(q) {
                    self.reader.read();
                }
            }
            (Some('/'), Some('*')) => {
                self.reader.read_count(2);
                self.reader.read_to("*/");
            }
            (Some('\\'), Some(_)) => {
                self.reader.read_count(2);
            }
            _ => {
                self.reader.read();
            }
        }
    }

    fn skip_space_comments(&mut self) -> bool {
        let start = self.reader.offset();
        loop {
            match (self.reader.look_ahead(0), self.reader.look_ahead(1)) {
                (Some(c), _) if is_space(c) => {
                    self.reader.read_while(is_space);
                }
                (Some('/'), Some('*')) => {
                    self.reader.read_count(2);
                    self.reader.read_to("*/");
                }
                _ => break,
            }
        }
        self.reader.offset() != start
    }

    /// Reads the `An+B` argument of `:nth-child()` and friends straight from the source.
    ///
    /// Returns the `A` part (`2n`, `-n`, `even`, ... or empty) and the signed `B` part (or empty).
    /// The closing `)` or a following `of` is left for the token stream.
    pub fn read_nth_child(&mut self) -> Option<(String, String)> {
        self.sync_reader();
        self.skip_space_comments();
        self.reader.mark();

        let parsed = scan_nth(self.reader.remaining());
        let Some((a, b, len)) = parsed else {
            self.reader.reset();
            return None;
        };
        self.reader.read_count(len);

        let next = self.reader.look_ahead(0);
        let boundary = next.is_some_and(is_space)
            || next == Some(')')
            || (next == Some('/') && self.reader.look_ahead(1) == Some('*'));
        if !boundary {
            self.reader.reset();
            return None;
        }
        Some((a, b))
    }

    /// Returns every token of the remaining input including whitespace, comments and
    /// placeholders. The raw texts of the returned tokens add up to the source text.
    pub fn tokenize_all(&mut self) -> Vec<Token> {
        self.sync_reader();
        let mode = LexMode {
            whitespace: true,
            uvar: true,
            comments: true,
        };
        let mut tokens = Vec::new();
        loop {
            let tok = self.lex(mode);
            if tok.is_eof() {
                break;
            }
            tokens.push(tok);
        }
        tokens
    }

    fn finish(&self, kind: TokenKind, value: TokenValue, start: Location) -> Token {
        let end = self.reader.location();
        Token::new(kind, value, self.reader.slice(start.offset, end.offset), start, end)
    }

    fn lex(&mut self, mode: LexMode) -> Token {
        loop {
            let start = self.reader.location();
            match (self.reader.look_ahead(0), self.reader.look_ahead(1)) {
                (Some(c), _) if is_space(c) => {
                    self.reader.read_while(is_space);
                    if mode.whitespace {
                        return self.finish(TokenKind::Whitespace, TokenValue::None, start);
                    }
                }
                (Some('/'), Some('*')) => {
                    self.reader.read_count(2);
                    self.reader.read_to("*/");
                    let text = self.reader.slice(start.offset, self.reader.offset());
                    if mode.uvar {
                        if let Some(name) = uvar_name(text) {
                            let name = name.to_string();
                            return self.finish(TokenKind::Uvar, TokenValue::Uvar { name }, start);
                        }
                    }
                    if mode.comments {
                        return self.finish(TokenKind::Comment, TokenValue::None, start);
                    }
                }
                _ => break,
            }
        }

        let start = self.reader.location();
        let a = self.reader.look_ahead(0);
        let b = self.reader.look_ahead(1);
        let c = self.reader.look_ahead(2);

        let Some(ch) = a else {
            return self.finish(TokenKind::Eof, TokenValue::None, start);
        };

        if ch.is_ascii_digit()
            || (matches!(ch, '-' | '+' | '.') && (is_digit(b) || (ch != '.' && b == Some('.') && is_digit(c))))
        {
            return self.lex_number(start);
        }

        match ch {
            '-' => {
                if b == Some('-') {
                    if is_ident_char(c, b) {
                        return self.lex_ident(start);
                    }
                    if c == Some('>') {
                        self.reader.read_count(3);
                        return self.finish(TokenKind::Cdco, TokenValue::None, start);
                    }
                } else if starts_ident(a, b, c) {
                    return self.lex_ident(start);
                }
                self.reader.read();
                return self.finish(TokenKind::Minus, TokenValue::None, start);
            }
            'U' | 'u' if b == Some('+') => {
                if let Some(tok) = self.lex_unicode_range(start) {
                    return tok;
                }
                self.reader.read();
                let value = TokenValue::Ident {
                    name: ch.to_string(),
                    vendor_pos: 0,
                    custom: false,
                };
                return self.finish(TokenKind::Ident, value, start);
            }
            _ => {}
        }

        if starts_ident(a, b, c) {
            return self.lex_ident(start);
        }

        if b == Some('=') && matches!(ch, '$' | '*' | '^' | '|' | '~' | '<' | '>') {
            self.reader.read_count(2);
            let kind = if matches!(ch, '<' | '>') {
                TokenKind::EqCmp
            } else {
                TokenKind::AttrEq
            };
            return self.finish(kind, TokenValue::None, start);
        }
        if ch == '|' && b == Some('|') {
            self.reader.read_count(2);
            return self.finish(TokenKind::Combinator, TokenValue::None, start);
        }

        match ch {
            '#' if is_ident_char(b, a) => {
                self.reader.read();
                let name = self.read_name();
                self.finish(TokenKind::Hash, TokenValue::Hash { name }, start)
            }
            '*' => {
                self.reader.read();
                let hack = starts_ident(b, c, None);
                self.finish(TokenKind::Star, TokenValue::Star { hack }, start)
            }
            '"' | '\'' => self.lex_string(ch, start),
            '\\' => {
                self.reader.read();
                if b == Some('\n') {
                    self.reader.read_while(is_space);
                    return self.finish(TokenKind::Whitespace, TokenValue::None, start);
                }
                self.finish(TokenKind::Char, TokenValue::None, start)
            }
            '@' if starts_ident(b, c, self.reader.look_ahead(3)) => {
                self.reader.read();
                let raw = self.read_name();
                let lower = raw.to_lowercase();
                let (name, prefix) = split_vendor(&lower, at_vendor_pos(&lower));
                self.finish(TokenKind::At, TokenValue::At { name, prefix }, start)
            }
            '<' if self.reader.remaining().starts_with("<!--") => {
                self.reader.read_count(4);
                self.finish(TokenKind::Cdco, TokenValue::None, start)
            }
            _ => {
                self.reader.read();
                let kind = TokenKind::from_char(ch).unwrap_or(TokenKind::Char);
                self.finish(kind, TokenValue::None, start)
            }
        }
    }

    /// Reads an identifier name, decoding escapes
    fn read_name(&mut self) -> String {
        let mut name = String::new();
        loop {
            match self.reader.look_ahead(0) {
                Some('\\') => match self.reader.look_ahead(1) {
                    Some('\n') => break,
                    None => {
                        self.reader.read();
                        name.push('\u{FFFD}');
                    }
                    Some(_) => {
                        self.reader.read();
                        name.push(self.read_escape());
                    }
                },
                Some(c) if is_name_char(c) => {
                    self.reader.read();
                    name.push(c);
                }
                _ => break,
            }
        }
        name
    }

    /// Decodes an escape; the backslash has already been consumed
    fn read_escape(&mut self) -> char {
        let hex = self.reader.read_while_max(|c| c.is_ascii_hexdigit(), 6);
        if hex.is_empty() {
            return self.reader.read().unwrap_or('\u{FFFD}');
        }
        if matches!(self.reader.look_ahead(0), Some(' ' | '\t')) {
            self.reader.read();
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&cp| cp != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}')
    }

    fn lex_ident(&mut self, start: Location) -> Token {
        let first = self.reader.look_ahead(0);
        let second = self.reader.look_ahead(1);
        let name = self.read_name();

        let vendor_pos = if first == Some('-') && second != Some('-') {
            name.char_indices()
                .skip(2)
                .find(|(_, c)| *c == '-')
                .map(|(i, _)| i + 1)
                .unwrap_or(0)
        } else {
            0
        };

        if self.reader.look_ahead(0) == Some('(') {
            self.reader.read();
            let lower = name.to_lowercase();
            if matches!(lower.as_str(), "url" | "url-prefix" | "domain") {
                if let Some(uri) = self.read_uri_value() {
                    return self.finish(TokenKind::Uri, TokenValue::Uri { uri, name: lower }, start);
                }
            }
            let (name, prefix) = split_vendor(&lower, vendor_pos);
            let value = TokenValue::Function { name, prefix, ie: false };
            return self.finish(TokenKind::Function, value, start);
        }

        if name == "progid" && self.reader.look_ahead(0) == Some(':') {
            let line = self.reader.remaining().split('\n').next().unwrap_or("");
            if let Some(idx) = line.find('(') {
                let rest = line[..idx].to_string();
                self.reader.read_count(rest.chars().count() + 1);
                let value = TokenValue::Function {
                    name: format!("{}{}", name, rest).to_lowercase(),
                    prefix: None,
                    ie: true,
                };
                return self.finish(TokenKind::Function, value, start);
            }
        }

        let custom = name.starts_with("--");
        let value = TokenValue::Ident {
            name,
            vendor_pos,
            custom,
        };
        self.finish(TokenKind::Ident, value, start)
    }

    /// Reads the argument of `url(`, up to and including the closing `)`. The reader is left
    /// untouched when the argument is not a plain url.
    fn read_uri_value(&mut self) -> Option<String> {
        self.reader.mark();
        self.reader.read_while(is_space);

        let value = match self.reader.look_ahead(0) {
            Some(q @ ('"' | '\'')) => {
                self.reader.read();
                let body = self.read_string_body(q);
                if self.reader.look_ahead(0) == Some(q) {
                    self.reader.read();
                    Some(body)
                } else {
                    None
                }
            }
            _ => {
                let mut v = String::new();
                loop {
                    match self.reader.look_ahead(0) {
                        Some('\\') if self.reader.look_ahead(1).is_some_and(|c| c != '\n') => {
                            self.reader.read();
                            v.push(self.read_escape());
                        }
                        Some(c) if unquoted_url_char(c) => {
                            self.reader.read();
                            v.push(c);
                        }
                        _ => break,
                    }
                }
                if v.is_empty() {
                    None
                } else {
                    Some(v)
                }
            }
        };

        if let Some(v) = value {
            self.reader.read_while(is_space);
            if self.reader.read_match(")") {
                return Some(v);
            }
        }
        self.reader.reset();
        None
    }

    /// Reads a string body up to (not including) the closing quote, a raw newline or the end of
    /// input. Returns the unescaped value.
    fn read_string_body(&mut self, quote: char) -> String {
        let mut value = String::new();
        loop {
            match self.reader.look_ahead(0) {
                None | Some('\n') => break,
                Some(c) if c == quote => break,
                Some('\\') => {
                    self.reader.read();
                    match self.reader.look_ahead(0) {
                        None => break,
                        Some('\n') => {
                            self.reader.read();
                        }
                        Some(_) => value.push(self.read_escape()),
                    }
                }
                Some(c) => {
                    self.reader.read();
                    value.push(c);
                }
            }
        }
        value
    }

    fn lex_string(&mut self, quote: char, start: Location) -> Token {
        self.reader.read();
        let value = self.read_string_body(quote);
        if self.reader.look_ahead(0) == Some(quote) {
            self.reader.read();
            return self.finish(TokenKind::String, TokenValue::String { value }, start);
        }
        self.finish(TokenKind::Invalid, TokenValue::None, start)
    }

    /// `U+XXXX`, `U+XX??` or `U+XXXX-YYYY`. Returns None when there are no hex digits after `U+`.
    fn lex_unicode_range(&mut self, start: Location) -> Option<Token> {
        let rest = self.reader.remaining();
        let bytes = rest.as_bytes();
        let hex_run = |from: usize| {
            let mut i = from;
            while i < bytes.len() && i - from < 6 && bytes[i].is_ascii_hexdigit() {
                i += 1;
            }
            i
        };

        let first_end = hex_run(2);
        if first_end == 2 {
            return None;
        }
        let first = u32::from_str_radix(&rest[2..first_end], 16).unwrap_or(u32::MAX);

        let mut end = first_end;
        let mut valid = first <= 0x10FFFF;
        if bytes.get(end) == Some(&b'?') {
            while end < bytes.len() && end - first_end < 6 && bytes[end] == b'?' {
                end += 1;
            }
            valid = valid && end - 2 <= 6;
        } else if bytes.get(end) == Some(&b'-') && bytes.get(end + 1).is_some_and(|b| b.is_ascii_hexdigit()) {
            let last_end = hex_run(end + 1);
            let last = u32::from_str_radix(&rest[end + 1..last_end], 16).unwrap_or(u32::MAX);
            valid = valid && last <= 0x10FFFF;
            end = last_end;
        }

        self.reader.read_count(end);
        let kind = if valid { TokenKind::URange } else { TokenKind::Invalid };
        Some(self.finish(kind, TokenValue::None, start))
    }

    fn lex_number(&mut self, start: Location) -> Token {
        let mut num = String::new();
        let mut is_float = false;

        if let Some(sign @ ('+' | '-')) = self.reader.look_ahead(0) {
            self.reader.read();
            num.push(sign);
        }
        num.push_str(&self.reader.read_while(|c| c.is_ascii_digit()));
        if self.reader.look_ahead(0) == Some('.') && is_digit(self.reader.look_ahead(1)) {
            self.reader.read();
            num.push('.');
            num.push_str(&self.reader.read_while(|c| c.is_ascii_digit()));
            is_float = true;
        }
        if matches!(self.reader.look_ahead(0), Some('e' | 'E')) {
            let b = self.reader.look_ahead(1);
            let exp = is_digit(b) || (matches!(b, Some('+' | '-')) && is_digit(self.reader.look_ahead(2)));
            if exp {
                self.reader.read();
                num.push('e');
                if let Some(sign @ ('+' | '-')) = self.reader.look_ahead(0) {
                    self.reader.read();
                    num.push(sign);
                }
                num.push_str(&self.reader.read_while(|c| c.is_ascii_digit()));
                is_float = true;
            }
        }
        let value: f64 = num.parse().unwrap_or(0.0);

        let (kind, unit) = if self.reader.look_ahead(0) == Some('%') {
            self.reader.read();
            (TokenKind::Percentage, "%".to_string())
        } else if starts_ident(
            self.reader.look_ahead(0),
            self.reader.look_ahead(1),
            self.reader.look_ahead(2),
        ) {
            let unit = self.read_name().to_lowercase();
            let kind = UNITS
                .get(unit.as_str())
                .map(|cat| cat.token_kind())
                .unwrap_or(TokenKind::Dimension);
            (kind, unit)
        } else {
            (TokenKind::Number, String::new())
        };

        let is_int = unit.is_empty() && (!is_float || value == 0.0);
        self.finish(kind, TokenValue::Number { value, unit, is_int }, start)
    }
}

fn closing_pair(c: char) -> Option<char> {
    match c {
        '{' => Some('}'),
        '(' => Some(')'),
        '[' => Some(']'),
        _ => None,
    }
}

/// Name inside a `/*[[name]]*/` placeholder comment
fn uvar_name(text: &str) -> Option<&str> {
    let name = text.strip_prefix("/*[[")?.strip_suffix("]]*/")?;
    if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        Some(name)
    } else {
        None
    }
}

/// Splits a lowercase name in its vendor-less name and the `-vendor-` prefix
fn split_vendor(lower: &str, vendor_pos: usize) -> (String, Option<String>) {
    match (lower.get(vendor_pos..), lower.get(..vendor_pos)) {
        (Some(name), Some(prefix)) if vendor_pos > 0 => (name.to_string(), Some(prefix.to_string())),
        _ => (lower.to_string(), None),
    }
}

/// Vendor position for at-rule names like `-moz-document`
fn at_vendor_pos(lower: &str) -> usize {
    if !lower.starts_with('-') {
        return 0;
    }
    match lower[1..].find('-') {
        Some(idx) if idx > 0 => idx + 2,
        _ => 0,
    }
}

/// Parses the start of an `An+B` expression: returns (A, B, consumed bytes)
fn scan_nth(s: &str) -> Option<(String, String, usize)> {
    let lower = s.to_ascii_lowercase();
    for word in ["even", "odd"] {
        if lower.starts_with(word) && !lower[word.len()..].starts_with(is_name_char) {
            return Some((word.to_string(), String::new(), word.len()));
        }
    }

    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let has_digits = i > digits_start;

    if !matches!(bytes.get(i), Some(b'n' | b'N')) {
        if !has_digits {
            return None;
        }
        return Some((String::new(), s[..i].to_string(), i));
    }

    i += 1;
    let a = s[..i].to_lowercase();

    // optional "+ B" / "- B" with whitespace around the sign
    let mut j = i;
    while j < bytes.len() && is_space(bytes[j] as char) {
        j += 1;
    }
    let Some(&sign @ (b'+' | b'-')) = bytes.get(j) else {
        return Some((a, String::new(), i));
    };
    j += 1;
    while j < bytes.len() && is_space(bytes[j] as char) {
        j += 1;
    }
    let int_start = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j == int_start {
        return None;
    }
    Some((a, format!("{}{}", sign as char, &s[int_start..j]), j))
}

/// Builds the "Expected ... but found ..." or "Unexpected ..." error for `tok`
pub fn failure(goal: &str, tok: &Token) -> CssError {
    let message = if goal.is_empty() {
        format!("Unexpected \"{}\".", clip_string(&tok.text, 30))
    } else {
        format!("Expected {} but found \"{}\".", goal, clip_string(&tok.text, 30))
    };
    CssError::with_location(&message, tok.location)
}

/// `"a", IDENT, ...` list of token kinds for diagnostics
pub fn describe_kinds(kinds: &[TokenKind]) -> String {
    kinds.iter().map(|k| k.describe()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut t = Tokenizer::new(input);
        let mut out = vec![];
        loop {
            let tok = t.get(false, true);
            if tok.is_eof() {
                break;
            }
            out.push(tok.kind);
        }
        out
    }

    #[test]
    fn numbers_and_units() {
        let mut t = Tokenizer::new("10px 50% 0 1.5e3 -.5deg 3zz 2X");
        let tok = t.grab();
        assert_eq!(tok.kind, TokenKind::Length);
        assert_eq!(tok.number(), Some(10.0));
        assert_eq!(tok.unit(), "px");
        assert_eq!(t.grab().kind, TokenKind::Percentage);
        let zero = t.grab();
        assert!(zero.is_zero());
        assert!(zero.is_int());
        let big = t.grab();
        assert_eq!(big.number(), Some(1500.0));
        assert!(!big.is_int());
        let angle = t.grab();
        assert_eq!(angle.kind, TokenKind::Angle);
        assert_eq!(angle.number(), Some(-0.5));
        assert_eq!(t.grab().kind, TokenKind::Dimension);
        let res = t.grab();
        assert_eq!(res.kind, TokenKind::Resolution);
        assert_eq!(res.unit(), "x");
        assert!(t.grab().is_eof());
    }

    #[test]
    fn identifiers_and_functions() {
        let mut t = Tokenizer::new("-moz-any( --main-color url( \"a b\" ) url() -webkit-box");
        let func = t.grab();
        assert_eq!(func.kind, TokenKind::Function);
        assert_eq!(func.name(), "any");
        assert_eq!(func.prefix(), Some("-moz-"));
        let custom = t.grab();
        assert!(custom.is_custom_ident());
        let uri = t.grab();
        assert_eq!(uri.kind, TokenKind::Uri);
        assert_eq!(uri.value, TokenValue::Uri { uri: "a b".into(), name: "url".into() });
        assert_eq!(uri.text, "url( \"a b\" )");
        let empty = t.grab();
        assert_eq!(empty.kind, TokenKind::Function);
        assert_eq!(t.grab().kind, TokenKind::RParen);
        let vendor = t.grab();
        assert_eq!(vendor.vendor_pos(), 8);
    }

    #[test]
    fn escapes_in_identifiers() {
        let mut t = Tokenizer::new("\\31 0 a\\:b");
        let tok = t.grab();
        assert_eq!(tok.name(), "10");
        assert_eq!(tok.text, "\\31 0");
        assert_eq!(t.grab().name(), "a:b");
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            kinds("a~=b||c>=d"),
            vec![
                TokenKind::Ident,
                TokenKind::AttrEq,
                TokenKind::Ident,
                TokenKind::Combinator,
                TokenKind::Ident,
                TokenKind::EqCmp,
                TokenKind::Ident
            ]
        );
        assert_eq!(
            kinds("<!-- --> #x # @media"),
            vec![
                TokenKind::Cdco,
                TokenKind::Whitespace,
                TokenKind::Cdco,
                TokenKind::Whitespace,
                TokenKind::Hash,
                TokenKind::Whitespace,
                TokenKind::Char,
                TokenKind::Whitespace,
                TokenKind::At
            ]
        );
    }

    #[test]
    fn at_rules_lose_vendor_prefix() {
        let mut t = Tokenizer::new("@-MOZ-document");
        let tok = t.grab();
        assert_eq!(tok.kind, TokenKind::At);
        assert_eq!(tok.name(), "document");
        assert_eq!(tok.prefix(), Some("-moz-"));
    }

    #[test]
    fn strings_and_invalid_tokens() {
        let mut t = Tokenizer::new("'a\\'b' \"open\nU+0-7F U+11FFFF U+4??");
        let s = t.grab();
        assert_eq!(s.kind, TokenKind::String);
        assert_eq!(s.name(), "a'b");
        assert_eq!(t.grab().kind, TokenKind::Invalid);
        assert_eq!(t.grab().kind, TokenKind::URange);
        assert_eq!(t.grab().kind, TokenKind::Invalid);
        assert_eq!(t.grab().kind, TokenKind::URange);
    }

    #[test]
    fn placeholders_and_comments() {
        let mut t = Tokenizer::new("/* c */ a /*[[var]]*/ b");
        assert_eq!(t.grab().text, "a");
        let uvar = t.get(true, false);
        assert_eq!(uvar.kind, TokenKind::Uvar);
        assert_eq!(uvar.name(), "var");
        assert_eq!(t.grab().text, "b");
    }

    #[test]
    fn unget_and_lookahead() {
        let mut t = Tokenizer::new("a b c");
        assert_eq!(t.lt(2).text, "b");
        assert_eq!(t.grab().text, "a");
        assert_eq!(t.la(1), TokenKind::Ident);
        assert_eq!(t.grab().text, "b");
        assert!(t.unget().is_ok());
        assert_eq!(t.current().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(t.grab().text, "b");

        let mut fresh = Tokenizer::new("x");
        assert!(fresh.unget().is_err());
    }

    #[test]
    fn failure_messages() {
        let mut t = Tokenizer::new("color red");
        t.grab();
        let err = t.must_match_smart(&[TokenKind::Colon]).err();
        assert_eq!(err.map(|e| e.message), Some("Expected \":\" but found \"red\".".to_string()));
        // the failed token is still available
        assert_eq!(t.grab().text, "red");
    }

    #[test]
    fn skip_broken_declaration() {
        let mut t = Tokenizer::new("a: b(;{x;}) ; next");
        t.grab();
        t.skip_decl_block(false);
        assert_eq!(t.grab().text, "next");

        // a `;` that was already read ahead is consumed too
        let mut t = Tokenizer::new("x ; y");
        t.grab();
        assert_eq!(t.grab().kind, TokenKind::Semicolon);
        t.unget().unwrap();
        t.skip_decl_block(false);
        assert_eq!(t.grab().text, "y");

        let mut t = Tokenizer::new("junk { a; b } c; } after");
        t.skip_decl_block(true);
        assert_eq!(t.grab().kind, TokenKind::RBrace);
        assert_eq!(t.grab().text, "after");
    }

    #[test]
    fn nth_child_expressions() {
        let mut t = Tokenizer::new(" 2n + 1 of .a)");
        assert_eq!(t.read_nth_child(), Some(("2n".to_string(), "+1".to_string())));
        assert_eq!(t.grab().text, "of");

        let mut t = Tokenizer::new("odd)");
        assert_eq!(t.read_nth_child(), Some(("odd".to_string(), String::new())));
        assert_eq!(t.grab().kind, TokenKind::RParen);

        let mut t = Tokenizer::new("-3)");
        assert_eq!(t.read_nth_child(), Some((String::new(), "-3".to_string())));

        let mut t = Tokenizer::new("foo)");
        assert_eq!(t.read_nth_child(), None);
    }

    #[test]
    fn round_trip() {
        let css = "a{b:c} /* x */ @media (x:1){.y>z::before{q:url(p) 1e3 !important}}";
        let mut t = Tokenizer::new(css);
        let joined: String = t.tokenize_all().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, css);
    }
}
