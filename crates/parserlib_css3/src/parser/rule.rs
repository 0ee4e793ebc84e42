use crate::events::{BlockKind, EventKind};
use crate::parser::{BlockOptions, RuleOutcome};
use crate::tokens::{Token, TokenKind};
use crate::Css3;
use parserlib_shared::errors::{CssError, CssResult};

impl Css3<'_> {
    /// Reads `selectors { block }` starting at `tok`.
    ///
    /// Top level rules are looked up in the parse cache first, and stored in it when they were
    /// parsed without problems.
    pub(crate) fn parse_style_rule(&mut self, tok: Token) -> CssResult<RuleOutcome> {
        log::trace!("parse_style_rule");

        let can_cache = self.in_style == 0;
        if can_cache {
            let source = self.tokenizer.source();
            let found = self
                .cache
                .as_deref_mut()
                .and_then(|cache| cache.find_block(source, tok.location));
            if let Some((events, end)) = found {
                log::debug!("reusing cached rule at {}", tok.location);
                self.replay(events);
                self.tokenizer.seek(end);
                return Ok(RuleOutcome::Parsed);
            }
        }

        let mut block = None;
        let mut brace_seen = false;
        let result = self.style_rule_body(tok, can_cache, &mut block, &mut brace_seen);
        if let (Some(id), Some(cache)) = (block, self.cache.as_deref_mut()) {
            cache.cancel_block(id);
        }

        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) if self.options.strict => Err(e),
            Err(e) => {
                self.declaration_failed(e, brace_seen);
                Ok(RuleOutcome::Failed)
            }
        }
    }

    fn style_rule_body(
        &mut self,
        tok: Token,
        can_cache: bool,
        block: &mut Option<usize>,
        brace_seen: &mut bool,
    ) -> CssResult<RuleOutcome> {
        let Some(selectors) = self.parse_selectors_group(Some(tok.clone()), true, false)? else {
            self.tokenizer.unget()?;
            return Ok(RuleOutcome::NotRule);
        };

        let start = selectors.first().map_or(tok.location, |s| s.location);
        if can_cache {
            *block = self.cache.as_deref_mut().map(|cache| cache.start_block(start));
        }

        if self.in_scope == 0 && self.in_style == 0 && selectors.iter().any(|s| s.uses_amp() || s.is_relative()) {
            let error = CssError::with_location("Nested selector must be inside a style rule.", tok.location);
            self.fire(
                EventKind::Error {
                    error,
                    recoverable: true,
                },
                tok.location,
            );
        }

        let brace = self.tokenizer.must_reuse(&[TokenKind::LBrace])?;
        *brace_seen = true;

        let end = self.parse_block(
            start,
            BlockOptions {
                brace: Some(brace),
                decl: true,
                event: Some(BlockKind::Rule { selectors }),
                ..Default::default()
            },
        )?;

        if !end.empty {
            if let Some(cache) = self.cache.as_deref_mut() {
                if block.take().is_some() {
                    cache.end_block(self.tokenizer.source(), end.close.end);
                }
            }
        }
        Ok(RuleOutcome::Parsed)
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{BlockKind, EventKind, ParseEvent};
    use crate::parser_config::ParserOptions;
    use crate::Css3;

    fn parse(css: &str) -> Vec<ParseEvent> {
        Css3::parse_str(css, ParserOptions::default()).unwrap()
    }

    #[test]
    fn selectors_of_a_rule() {
        let events = parse("h1, .title > span { color: red }");
        match &events[1].kind {
            EventKind::Start(BlockKind::Rule { selectors }) => {
                let texts = selectors.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
                assert_eq!(texts, vec!["h1", ".title > span"]);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events[1].location.column, 1);
    }

    #[test]
    fn declarations_of_a_rule() {
        let events = parse("a{color:red}");
        let names = events.iter().map(|e| e.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["startstylesheet", "startrule", "property", "endrule", "endstylesheet"]);
        let decl = events[2].declaration().unwrap();
        assert_eq!(decl.property.text, "color");
        assert_eq!(decl.value.text, "red");
    }

    #[test]
    fn nesting_outside_a_rule() {
        let events = parse("& a { color: red } > b {}");
        let errors = events
            .iter()
            .filter_map(|e| e.diagnostic())
            .map(|e| e.message.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            errors,
            vec![
                "Nested selector must be inside a style rule.",
                "Nested selector must be inside a style rule."
            ]
        );
        assert_eq!(events.iter().filter(|e| e.name() == "startrule").count(), 2);
    }

    #[test]
    fn broken_rules_are_skipped() {
        let events = parse("a b c; d { x: y } e{}");
        let names = events.iter().map(|e| e.name()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "startstylesheet",
                "error",
                "startrule",
                "property",
                "endrule",
                "startrule",
                "endrule",
                "endstylesheet"
            ]
        );

        // the unclosed `[` swallows the rest
        let events = parse("a[x { color: red } b{}");
        let names = events.iter().map(|e| e.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["startstylesheet", "error", "endstylesheet"]);
    }
}
