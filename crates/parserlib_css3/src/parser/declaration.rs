use crate::events::{Declaration, EventKind, PropertyName};
use crate::parser::is_nested_selector_start;
use crate::tokenizer::failure;
use crate::tokens::{Token, TokenKind, IMPORTANT};
use crate::value::PropertyValue;
use crate::Css3;
use parserlib_shared::errors::{CssError, CssResult};

const CUSTOM_END: &[TokenKind] = &[
    TokenKind::Delim,
    TokenKind::Semicolon,
    TokenKind::RBrace,
    TokenKind::RBracket,
    TokenKind::RParen,
    TokenKind::Invalid,
];
const PARENS_END: &[TokenKind] = &[TokenKind::Delim, TokenKind::Semicolon, TokenKind::RBrace, TokenKind::RParen];
const VALUE_END: &[TokenKind] = &[TokenKind::Delim, TokenKind::Semicolon, TokenKind::RBrace];

impl Css3<'_> {
    /// Reads `name: value [!important]` followed by `;` or `}` (or `)` inside a condition,
    /// which is consumed).
    ///
    /// `tok` is the already consumed property name. Returns the kind of the token that ended the
    /// declaration, or `None` when this turned out not to be a declaration (for instance
    /// `a:hover {}` inside a style rule). In that case the token stream is rewound to `tok`.
    pub(crate) fn parse_declaration(
        &mut self,
        tok: Token,
        colon: Option<Token>,
        in_parens: bool,
        scope: Option<String>,
    ) -> CssResult<Option<TokenKind>> {
        log::trace!("parse_declaration");

        let custom = tok.is_custom_ident();
        let (name_tok, hack) = if tok.is(TokenKind::Star) {
            (self.tokenizer.must_match(&[TokenKind::Ident])?, Some('*'))
        } else if self.options.underscore_hack && tok.is(TokenKind::Ident) && tok.text.starts_with('_') {
            (tok.clone(), Some('_'))
        } else {
            (tok.clone(), None)
        };
        let name_text = match hack {
            Some('_') => name_tok.text.strip_prefix('_').unwrap_or(&name_tok.text),
            _ => name_tok.text.as_str(),
        };
        let mut property = PropertyName::new(name_text, tok.location);
        property.hack = hack;

        let t2raw = match &colon {
            Some(c) => c.clone(),
            None => self.tokenizer.get(false, true),
        };
        let t2 = if colon.is_none() && t2raw.is(TokenKind::Whitespace) {
            self.tokenizer.grab()
        } else {
            t2raw.clone()
        };

        let mut ti3 = None;
        let not_declaration = if t2.is(TokenKind::Colon) {
            let t3 = self.tokenizer.get(true, true);
            ti3 = Some(t3.kind);
            t3.is(TokenKind::Colon)
        } else {
            true
        };
        if not_declaration {
            self.rewind_to(&tok);
            if !in_parens && (ti3.is_some() || is_nested_selector_start(t2.kind) || t2.is(TokenKind::LBrace)) {
                return Ok(None);
            }
            if in_parens || custom {
                return Err(failure("\":\"", &t2raw));
            }
            return Ok(None);
        }
        if ti3 != Some(TokenKind::Whitespace) {
            self.tokenizer.unget()?;
        }

        // `a:hover {}` looks like a declaration until the brace, so events are held back
        let defer = !in_parens && !custom && matches!(ti3, Some(TokenKind::Ident | TokenKind::Function));
        if defer {
            self.deferred = Some(Vec::new());
        }
        let end = if custom {
            CUSTOM_END
        } else if in_parens {
            PARENS_END
        } else {
            VALUE_END
        };
        let value = self.parse_expr(end, custom);
        let deferred = if defer { self.deferred.take() } else { None };
        let value = value?;

        let t = self.tokenizer.current_or_eof();
        let brace = !in_parens && t.is(TokenKind::LBrace);
        if let Some(events) = deferred {
            if brace {
                self.tokenizer.seek(tok.end);
                return Ok(None);
            }
            for event in events {
                self.dispatch(event);
            }
        }
        if brace {
            self.pair = Some(TokenKind::RBrace);
            let message = format!("Unexpected \"{{\" in \"{}\" declaration", property);
            return Err(CssError::with_location(&message, t.location));
        }

        let value = match value {
            Some(v) => v,
            None if custom => PropertyValue::empty(t.location),
            None => return Err(failure("", &t)),
        };

        let invalid = if custom || self.options.no_validation {
            None
        } else {
            self.validator.validate(&property, &value, scope.as_deref()).err()
        };
        if let Some(err) = invalid.as_ref().filter(|_| self.options.strict) {
            return Err(err.clone());
        }

        let important = t.is(TokenKind::Delim);
        if important {
            self.tokenizer.must_match_keyword(TokenKind::Ident, &IMPORTANT)?;
        }
        let end_kinds: &[TokenKind] = if in_parens {
            &[TokenKind::RParen]
        } else {
            &[TokenKind::Semicolon, TokenKind::RBrace]
        };
        let end_tok = if important {
            self.tokenizer.must_match_smart(end_kinds)?
        } else if t.is_eof() && !in_parens {
            t
        } else {
            self.tokenizer.must_reuse(end_kinds)?
        };

        let declaration = Declaration {
            property,
            value,
            important,
            in_parens,
            scope,
            invalid,
        };
        self.fire(EventKind::Property(Box::new(declaration)), tok.location);

        if end_tok.is(TokenKind::RBrace) {
            self.tokenizer.unget()?;
        }
        Ok(Some(end_tok.kind))
    }

    /// Pushes tokens back until `tok` is the current token again
    fn rewind_to(&mut self, tok: &Token) {
        while self.tokenizer.current().is_some_and(|c| c.location != tok.location) {
            if self.tokenizer.unget().is_err() {
                self.tokenizer.seek(tok.end);
                return;
            }
        }
        if self.tokenizer.current().is_none() {
            self.tokenizer.seek(tok.end);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{EventKind, ParseEvent};
    use crate::parser_config::ParserOptions;
    use crate::Css3;

    fn parse_with(css: &str, options: ParserOptions) -> Vec<ParseEvent> {
        Css3::parse_str(css, options).unwrap()
    }

    fn parse(css: &str) -> Vec<ParseEvent> {
        parse_with(css, ParserOptions::default())
    }

    fn properties(events: &[ParseEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| e.declaration())
            .map(|d| format!("{}={}", d.property, d.value))
            .collect()
    }

    #[test]
    fn simple_declarations() {
        let events = parse("a { color : red ; margin: 0 auto !important }");
        assert_eq!(properties(&events), vec!["color=red", "margin=0 auto"]);
        let margin = events.iter().filter_map(|e| e.declaration()).nth(1).unwrap();
        assert!(margin.important);
        assert!(margin.invalid.is_none());
    }

    #[test]
    fn invalid_values_are_still_reported() {
        let events = parse(".a,.b{color:red;bogus:1}");
        let decls = events.iter().filter_map(|e| e.declaration()).collect::<Vec<_>>();
        assert_eq!(decls.len(), 2);
        assert!(decls[0].invalid.is_none());
        let err = decls[1].invalid.as_ref().unwrap();
        assert_eq!(err.message, "Unknown property \"bogus\".");
    }

    #[test]
    fn custom_properties_take_anything() {
        let events = parse("a{--x: { a: b } [1]; --empty:;}");
        assert_eq!(properties(&events), vec!["--x={ a: b } [1]", "--empty="]);
        assert!(events.iter().all(|e| e.diagnostic().is_none()));
    }

    #[test]
    fn nested_rule_that_looks_like_a_declaration() {
        let events = parse("a{ b:hover { color: red } }");
        let names = events.iter().map(|e| e.name()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["startstylesheet", "startrule", "startrule", "property", "endrule", "endrule", "endstylesheet"]
        );
    }

    #[test]
    fn brace_in_a_value() {
        let events = parse("a{ color: red { x } ; margin: 0 }");
        let errors = events.iter().filter_map(|e| e.diagnostic()).collect::<Vec<_>>();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Unexpected \"{\" in \"color\" declaration");
        assert_eq!(properties(&events), vec!["margin=0"]);
    }

    #[test]
    fn ie_hacks() {
        let css = "a{ *zoom: 1; _height: 1px }";
        let opts = ParserOptions {
            star_hack: true,
            underscore_hack: true,
            ..Default::default()
        };
        let events = parse_with(css, opts);
        let decls = events.iter().filter_map(|e| e.declaration()).collect::<Vec<_>>();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property.hack, Some('*'));
        assert_eq!(decls[0].property.text, "zoom");
        assert_eq!(decls[0].property.location.column, 4);
        assert_eq!(decls[1].property.hack, Some('_'));
        assert_eq!(decls[1].property.text, "height");
        assert!(decls[1].invalid.is_none());

        // without the options both are errors
        let events = parse(css);
        assert!(events.iter().any(|e| matches!(e.kind, EventKind::Error { .. })));
    }

    #[test]
    fn strict_mode_stops_on_invalid_values() {
        let opts = ParserOptions {
            strict: true,
            ..Default::default()
        };
        let err = Css3::parse_str("a{color:1px}", opts).unwrap_err();
        assert!(err.is_validation());
    }
}
