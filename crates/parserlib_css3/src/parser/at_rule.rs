use crate::events::{BlockKind, EventKind};
use crate::parser::condition::ConditionKind;
use crate::parser::BlockOptions;
use crate::selector::Selector;
use crate::tokenizer::failure;
use crate::tokens::{Token, TokenKind, TokenValue, AUTO, FROM_TO, LAYER, NOT, TO};
use crate::Css3;
use parserlib_shared::errors::{CssError, CssResult};

type ScopePrelude = (Option<Vec<Selector>>, Option<Vec<Selector>>, Token);

/// The address of a `url()` token or the value of a string
fn uri_or_string(tok: &Token) -> String {
    match &tok.value {
        TokenValue::Uri { uri, .. } => uri.clone(),
        _ => tok.name().to_string(),
    }
}

/// A `(` standing in for the parenthesis that is part of a function token
fn open_paren(tok: &Token) -> Token {
    Token::new(TokenKind::LParen, TokenValue::None, "(", tok.location, tok.end)
}

impl Css3<'_> {
    /// Reads an at-rule whose `@name` token has been consumed. `top` is set for rules at the
    /// top level of the stylesheet.
    pub(crate) fn parse_at_rule(&mut self, start: &Token, top: bool) -> CssResult<()> {
        log::trace!("parse_at_rule");

        let name = start.name().to_string();
        if top && self.options.top_doc_only && name != "document" {
            self.tokenizer.skip_decl_block(false);
            return Ok(());
        }

        match name.as_str() {
            "charset" => self.parse_charset(start),
            "container" => self.parse_container(start),
            "counter-style" => {
                let name = self.tokenizer.must_match_smart(&[TokenKind::Ident])?.text;
                self.parse_descriptor_block(start, "counter-style", BlockKind::CounterStyle { name })
            }
            "document" => self.parse_document(start),
            "font-face" => self.parse_descriptor_block(start, "font-face", BlockKind::FontFace),
            "font-palette-values" => {
                let id = self.tokenizer.must_match_smart(&[TokenKind::Ident])?.text;
                self.parse_descriptor_block(start, "font-palette-values", BlockKind::FontPaletteValues { id })
            }
            "import" => self.parse_import(start),
            "keyframes" => self.parse_keyframes(start),
            "layer" => self.parse_layer(start),
            "media" => {
                let media = self.parse_media_query_list(false)?;
                self.parse_block(
                    start.location,
                    BlockOptions {
                        event: Some(BlockKind::Media { media }),
                        ..Default::default()
                    },
                )?;
                Ok(())
            }
            "namespace" => self.parse_namespace(start),
            "page" => self.parse_page(start),
            "property" => {
                let name = self.tokenizer.must_match_smart(&[TokenKind::Ident])?.text;
                self.parse_descriptor_block(start, "property", BlockKind::Property { name })
            }
            "scope" => self.parse_scope(start),
            "viewport" => self.parse_descriptor_block(start, "viewport", BlockKind::Viewport),
            "supports" => {
                self.parse_condition(None, ConditionKind::Supports)?;
                self.parse_block(
                    start.location,
                    BlockOptions {
                        event: Some(BlockKind::Supports),
                        ..Default::default()
                    },
                )?;
                Ok(())
            }
            _ => self.parse_unknown_at_rule(start),
        }
    }

    /// `@top-left {}` and the other page margin boxes
    pub(crate) fn parse_margin(&mut self, start: &Token) -> CssResult<()> {
        log::trace!("parse_margin");
        let margin = start.name().to_string();
        self.parse_descriptor_block(start, "page", BlockKind::PageMargin { margin })
    }

    /// A block of descriptors that are validated against the table of `scope`
    fn parse_descriptor_block(&mut self, start: &Token, scope: &str, kind: BlockKind) -> CssResult<()> {
        let margins = matches!(kind, BlockKind::Page { .. });
        self.parse_block(
            start.location,
            BlockOptions {
                decl: true,
                margins,
                scope: Some(scope.to_string()),
                event: Some(kind),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    fn parse_charset(&mut self, start: &Token) -> CssResult<()> {
        let charset = self.tokenizer.must_match_smart(&[TokenKind::String])?;
        self.tokenizer.must_match_smart(&[TokenKind::Semicolon])?;
        self.fire(
            EventKind::Charset {
                charset: charset.name().to_string(),
            },
            start.location,
        );
        Ok(())
    }

    fn parse_container(&mut self, start: &Token) -> CssResult<()> {
        let name = match self.tokenizer.match_smart(&[TokenKind::Ident]) {
            Some(tok) if tok.is_keyword(&NOT) => {
                self.tokenizer.unget()?;
                None
            }
            Some(tok) => Some(tok.text),
            None => None,
        };
        self.parse_condition(None, ConditionKind::Container)?;
        self.parse_block(
            start.location,
            BlockOptions {
                event: Some(BlockKind::Container { name }),
                ..Default::default()
            },
        )?;
        Ok(())
    }

    fn parse_document(&mut self, start: &Token) -> CssResult<()> {
        if self.depth > 0 {
            self.warn("Nested @document produces broken code", start.location);
        }

        let mut functions = Vec::new();
        loop {
            let tok = self
                .tokenizer
                .match_smart(&[TokenKind::Function, TokenKind::Ident, TokenKind::Uri]);
            match tok {
                Some(tok) if tok.is(TokenKind::Uri) => functions.push(tok.text),
                Some(tok) if tok.is(TokenKind::Function) => {
                    let function = self.parse_function(tok, false)?;
                    if function.function_name() == Some("regexp") {
                        functions.push(function.text);
                    } else {
                        self.warn("Unknown document function", function.location());
                    }
                }
                Some(tok) => self.warn("Unknown document function", tok.location),
                None if self.options.empty_document => {}
                None => self.warn("Unknown document function", start.location),
            }
            if self.tokenizer.match_smart(&[TokenKind::Comma]).is_none() {
                break;
            }
        }

        let brace = self.tokenizer.must_match_smart(&[TokenKind::LBrace])?;
        let kind = BlockKind::Document { functions };
        self.fire(EventKind::Start(kind.clone()), start.location);
        let (close, empty) = if self.options.top_doc_only {
            self.tokenizer.skip_decl_block(true);
            (self.tokenizer.must_match_smart(&[TokenKind::RBrace])?, false)
        } else {
            let end = self.parse_block(
                start.location,
                BlockOptions {
                    brace: Some(brace),
                    ..Default::default()
                },
            )?;
            (end.close, end.empty)
        };
        self.fire(EventKind::End { kind, empty }, close.location);
        Ok(())
    }

    fn parse_import(&mut self, start: &Token) -> CssResult<()> {
        let uri = uri_or_string(&self.tokenizer.must_match_smart(&[TokenKind::String, TokenKind::Uri])?);

        let mut layer = None;
        let mut tok = self.tokenizer.grab();
        if tok.is(TokenKind::Function) && tok.name() == "layer" {
            layer = Some(self.parse_layer_name(None));
            self.tokenizer.must_match_smart(&[TokenKind::RParen])?;
            tok = self.tokenizer.grab();
        } else if tok.is_keyword(&LAYER) {
            layer = Some(String::new());
            tok = self.tokenizer.grab();
        }

        let reuse = if tok.is(TokenKind::Function) && tok.name() == "supports" {
            self.parse_condition_in_parens(Some(open_paren(&tok)), ConditionKind::Supports)?;
            false
        } else {
            true
        };
        let media = self.parse_media_query_list(reuse)?;
        self.tokenizer.must_match_smart(&[TokenKind::Semicolon])?;

        self.fire(EventKind::Import { uri, layer, media }, start.location);
        Ok(())
    }

    fn parse_keyframes(&mut self, start: &Token) -> CssResult<()> {
        let prefix = start.prefix().map(str::to_string);
        let name = self
            .tokenizer
            .must_match_smart(&[TokenKind::Ident, TokenKind::String])?
            .name()
            .to_string();
        self.tokenizer.must_match_smart(&[TokenKind::LBrace])?;
        let kind = BlockKind::Keyframes { name, prefix };
        self.fire(EventKind::Start(kind.clone()), start.location);

        let mut any = false;
        let mut last;
        loop {
            let mut keys = Vec::new();
            let mut first = None;
            loop {
                last = self.tokenizer.grab();
                if last.is(TokenKind::Percentage) || last.is_keyword(&FROM_TO) {
                    first.get_or_insert(last.location);
                    keys.push(last.text.clone());
                } else if keys.is_empty() {
                    break;
                } else {
                    return Err(failure("percentage%, \"from\", \"to\"", &last));
                }
                last = self.tokenizer.grab();
                if !last.is(TokenKind::Comma) {
                    break;
                }
            }
            let Some(location) = first else {
                break;
            };

            let brace = if last.is(TokenKind::LBrace) {
                Some(last.clone())
            } else {
                self.tokenizer.unget()?;
                None
            };
            self.parse_block(
                location,
                BlockOptions {
                    brace,
                    decl: true,
                    event: Some(BlockKind::KeyframeRule { keys }),
                    ..Default::default()
                },
            )?;
            any = true;
        }

        let close = if last.is(TokenKind::RBrace) {
            last
        } else {
            self.tokenizer.must_match_smart(&[TokenKind::RBrace])?
        };
        self.fire(EventKind::End { kind, empty: !any }, close.location);
        Ok(())
    }

    /// `@layer a, b.c;` or `@layer name {}`
    fn parse_layer(&mut self, start: &Token) -> CssResult<()> {
        let mut ids = Vec::new();
        loop {
            let mut tok = self.tokenizer.grab();
            if tok.is(TokenKind::Ident) {
                ids.push(self.parse_layer_name(Some(tok)));
                tok = self.tokenizer.grab();
            }
            if tok.is(TokenKind::LBrace) {
                if ids.len() > 1 {
                    self.warn("@layer block cannot have multiple ids", start.location);
                }
                self.parse_block(
                    start.location,
                    BlockOptions {
                        brace: Some(tok),
                        event: Some(BlockKind::Layer {
                            id: ids.into_iter().next(),
                        }),
                        ..Default::default()
                    },
                )?;
                return Ok(());
            }
            if !tok.is(TokenKind::Comma) {
                break;
            }
        }
        self.tokenizer.must_reuse(&[TokenKind::Semicolon])?;
        self.fire(EventKind::Layer { ids }, start.location);
        Ok(())
    }

    /// A dotted layer name such as `base.reset`. Empty when there is no name.
    fn parse_layer_name(&mut self, start: Option<Token>) -> String {
        let mut name = String::new();
        let mut next = start.or_else(|| self.tokenizer.match_smart(&[TokenKind::Ident]));
        while let Some(tok) = next.take() {
            name.push_str(&tok.text);
            if self.tokenizer.match_kinds(&[TokenKind::Dot]).is_none() {
                break;
            }
            name.push('.');
            next = self.tokenizer.match_kinds(&[TokenKind::Ident]);
        }
        name
    }

    fn parse_namespace(&mut self, start: &Token) -> CssResult<()> {
        let prefix = self.tokenizer.match_smart(&[TokenKind::Ident]).map(|t| t.text);
        let uri = uri_or_string(&self.tokenizer.must_match_smart(&[TokenKind::String, TokenKind::Uri])?);
        self.tokenizer.must_match_smart(&[TokenKind::Semicolon])?;
        self.fire(EventKind::Namespace { prefix, uri }, start.location);
        Ok(())
    }

    fn parse_page(&mut self, start: &Token) -> CssResult<()> {
        let id = match self.tokenizer.match_smart(&[TokenKind::Ident]) {
            Some(tok) if tok.is_keyword(&AUTO) => return Err(failure("", &tok)),
            Some(tok) => Some(tok.text),
            None => None,
        };
        let pseudo = match self.tokenizer.match_kinds(&[TokenKind::Colon]) {
            Some(_) => Some(self.tokenizer.must_match(&[TokenKind::Ident])?.text),
            None => None,
        };
        self.parse_descriptor_block(start, "page", BlockKind::Page { id, pseudo })
    }

    /// `@scope (start) to (end) {}`. A broken prelude skips the whole rule.
    fn parse_scope(&mut self, start: &Token) -> CssResult<()> {
        let (first, last, brace) = match self.parse_scope_prelude() {
            Ok(prelude) => prelude,
            Err(e) => {
                self.tokenizer.seek(start.end);
                self.pair = None;
                if self.options.strict {
                    return Err(e);
                }
                self.declaration_failed(e, false);
                return Ok(());
            }
        };

        self.in_scope += 1;
        let result = self.parse_block(
            start.location,
            BlockOptions {
                brace: Some(brace),
                event: Some(BlockKind::Scope { start: first, end: last }),
                ..Default::default()
            },
        );
        self.in_scope -= 1;
        result.map(|_| ())
    }

    fn parse_scope_prelude(&mut self) -> CssResult<ScopePrelude> {
        let mut first = None;
        let mut last = None;
        let mut tok = self.tokenizer.grab();
        if tok.is(TokenKind::LParen) {
            first = self.parse_selectors_group(None, false, true)?;
            self.tokenizer.must_reuse(&[TokenKind::RParen])?;
            tok = self.tokenizer.grab();
        }
        if first.is_some() && tok.is_keyword(&TO) {
            self.tokenizer.must_match_smart(&[TokenKind::LParen])?;
            last = self.parse_selectors_group(None, false, true)?;
            self.tokenizer.must_reuse(&[TokenKind::RParen])?;
            self.tokenizer.grab();
        }
        let brace = self.tokenizer.must_reuse(&[TokenKind::LBrace])?;
        Ok((first, last, brace))
    }

    fn parse_unknown_at_rule(&mut self, start: &Token) -> CssResult<()> {
        if self.options.strict {
            let message = format!("Unknown rule: {}", start.text);
            return Err(CssError::with_location(&message, start.location));
        }
        self.warn(&format!("Unknown @ rule: {}.", start.text), start.location);
        self.tokenizer.skip_decl_block(false);
        Ok(())
    }
}
