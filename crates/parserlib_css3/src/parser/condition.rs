use crate::events::EventKind;
use crate::tokenizer::failure;
use crate::tokens::{Token, TokenKind, TokenValue, AND, AND_OR, NOT, OR};
use crate::Css3;
use parserlib_shared::errors::CssResult;

const CONDITION_START: &[TokenKind] = &[TokenKind::Function, TokenKind::Ident, TokenKind::LParen];

/// The at-rule a condition belongs to, which adds its own kinds of tests
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ConditionKind {
    Plain,
    /// `@supports` (and `supports()` in `@import`): `selector()` tests
    Supports,
    /// `@container`: size features and `style()` queries
    Container,
}

/// How the `)` after a condition in parens is read
enum Close {
    /// Read a fresh token
    Fresh,
    /// The current token must be the `)`
    Reuse,
    /// Already consumed
    Skip,
}

impl Css3<'_> {
    /// `not <cond-in-parens>` or `<cond-in-parens> [and|or <cond-in-parens>]*`
    pub(crate) fn parse_condition(&mut self, tok: Option<Token>, kind: ConditionKind) -> CssResult<()> {
        log::trace!("parse_condition");

        let tok = match tok {
            Some(t) => t,
            None => self.tokenizer.grab(),
        };
        if tok.is_keyword(&NOT) {
            return self.parse_condition_in_parens(None, kind);
        }

        let mut tok = Some(tok);
        let mut joiner = AND_OR;
        let mut first = true;
        loop {
            self.parse_condition_in_parens(tok.take(), kind)?;
            let Some(kw) = self.tokenizer.match_keyword(TokenKind::Ident, &joiner) else {
                break;
            };
            if first {
                joiner = if AND.has(&kw.text) { AND } else { OR };
                first = false;
            }
        }
        Ok(())
    }

    /// A function, `(declaration)`, `(feature)` or a nested condition in parens
    pub(crate) fn parse_condition_in_parens(&mut self, tok: Option<Token>, kind: ConditionKind) -> CssResult<()> {
        log::trace!("parse_condition_in_parens");

        let tok = match tok {
            Some(t) => t,
            None => self.tokenizer.must_match_smart(CONDITION_START)?,
        };

        let close = if self.condition_test(&tok, None, kind)? {
            Close::Fresh
        } else if tok.is(TokenKind::Function) {
            self.parse_function(tok, false)?;
            Close::Skip
        } else if tok.is(TokenKind::LParen) {
            match self.tokenizer.match_smart(CONDITION_START) {
                None => Close::Fresh,
                Some(inner) if self.condition_test(&inner, Some(&tok), kind)? => Close::Fresh,
                Some(inner) if !inner.is(TokenKind::Ident) => {
                    self.parse_condition(Some(inner), ConditionKind::Plain)?;
                    Close::Fresh
                }
                Some(inner) if inner.is_keyword(&NOT) => {
                    self.parse_condition_in_parens(None, ConditionKind::Plain)?;
                    Close::Fresh
                }
                Some(inner) => match self.tokenizer.match_smart(&[TokenKind::Colon, TokenKind::LParen]) {
                    Some(colon) if colon.is(TokenKind::Colon) => {
                        // the declaration consumes the `)`
                        self.parse_declaration(inner, Some(colon), true, None)?;
                        return Ok(());
                    }
                    Some(_) => {
                        self.parse_expr(&[TokenKind::RParen], true)?;
                        Close::Reuse
                    }
                    None => Close::Fresh,
                },
            }
        } else {
            Close::Fresh
        };

        match close {
            Close::Fresh => {
                self.tokenizer.must_match_smart(&[TokenKind::RParen])?;
            }
            Close::Reuse => {
                self.tokenizer.must_reuse(&[TokenKind::RParen])?;
            }
            Close::Skip => {}
        }
        Ok(())
    }

    /// Tests specific to `@supports` and `@container`. Returns true when `tok` was handled, the
    /// `)` that closes the test is then left to be read.
    fn condition_test(&mut self, tok: &Token, paren: Option<&Token>, kind: ConditionKind) -> CssResult<bool> {
        match kind {
            ConditionKind::Supports if paren.is_none() && tok.is(TokenKind::Function) && tok.name() == "selector" => {
                let Some(selector) = self.parse_selector_item(None, false)? else {
                    return Err(failure("a selector", &self.tokenizer.current_or_eof()));
                };
                self.tokenizer.unget()?;
                let location = selector.location;
                self.fire(EventKind::SupportsSelector { selector }, location);
                Ok(true)
            }
            ConditionKind::Container if paren.is_some() && tok.is(TokenKind::Ident) => {
                self.tokenizer.unget()?;
                self.parse_media_expression(paren.cloned())?;
                self.tokenizer.unget()?;
                Ok(true)
            }
            ConditionKind::Container if paren.is_none() && tok.is(TokenKind::Function) && tok.name() == "style" => {
                let open = Token::new(TokenKind::LParen, TokenValue::None, "(", tok.location, tok.end);
                self.parse_condition(Some(open), ConditionKind::Plain)?;
                self.tokenizer.unget()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{EventKind, ParseEvent};
    use crate::parser_config::ParserOptions;
    use crate::Css3;

    fn parse(css: &str) -> Vec<ParseEvent> {
        Css3::parse_str(css, ParserOptions::default()).unwrap()
    }

    fn names(events: &[ParseEvent]) -> Vec<String> {
        events.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn supports_declarations() {
        let events = parse("@supports (display: grid) and (not (display: inline-grid)) { a{} }");
        assert_eq!(
            names(&events),
            vec![
                "startstylesheet",
                "property",
                "property",
                "startsupports",
                "startrule",
                "endrule",
                "endsupports",
                "endstylesheet"
            ]
        );
        let decl = events[1].declaration().unwrap();
        assert!(decl.in_parens);
        assert!(decl.invalid.is_none());
    }

    #[test]
    fn supports_selector() {
        let events = parse("@supports selector(a > b) or (x: y) {}");
        match &events[1].kind {
            EventKind::SupportsSelector { selector } => assert_eq!(selector.text, "a > b"),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(events.iter().any(|e| e.name() == "endsupports"));
    }

    #[test]
    fn mixed_joiners_are_an_error() {
        let events = parse("@supports (a: b) and (c: d) or (e: f) {} x{}");
        assert!(events.iter().any(|e| e.name() == "error"));
        assert!(events.iter().any(|e| e.name() == "startrule"));
    }

    #[test]
    fn container_queries() {
        let events = parse("@container card (min-width: 400px) and style(--dark: 1) { a{} }");
        assert_eq!(
            names(&events),
            vec![
                "startstylesheet",
                "property",
                "startcontainer",
                "startrule",
                "endrule",
                "endcontainer",
                "endstylesheet"
            ]
        );
        match &events[2].kind {
            EventKind::Start(crate::events::BlockKind::Container { name }) => {
                assert_eq!(name.as_deref(), Some("card"))
            }
            other => panic!("unexpected event {:?}", other),
        }

        let events = parse("@container not (width > 10px) {}");
        assert_eq!(names(&events).len(), 4);
    }

    #[test]
    fn broken_conditions() {
        let events = parse("@supports display: grid { a{} }");
        assert_eq!(events[1].name(), "error");
    }
}
