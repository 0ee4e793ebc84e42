use crate::events::{BlockKind, EventKind};
use crate::parser::{is_nested_selector_start, RuleOutcome};
use crate::tokenizer::failure;
use crate::tokens::{Token, TokenKind, MARGIN_SYMS};
use crate::Css3;
use parserlib_shared::errors::CssResult;
use parserlib_shared::location::Location;

/// How a `{}` block is read
#[derive(Clone, Debug, Default)]
pub(crate) struct BlockOptions {
    /// The opening brace when it has already been consumed
    pub brace: Option<Token>,
    /// The block holds declarations
    pub decl: bool,
    /// `@top-left` and the other page margin rules are allowed
    pub margins: bool,
    /// At-rule whose descriptors are valid in the block. Nested style rules are not allowed.
    pub scope: Option<String>,
    /// Start and end events to fire around the block
    pub event: Option<BlockKind>,
}

/// The closing brace of a block and whether the block had any content
pub(crate) struct BlockEnd {
    pub close: Token,
    pub empty: bool,
}

impl Css3<'_> {
    /// Reads a `{}` block with declarations, nested rules and at-rules
    pub(crate) fn parse_block(&mut self, start: Location, mut opts: BlockOptions) -> CssResult<BlockEnd> {
        log::trace!("parse_block");

        if opts.brace.take().is_none() {
            self.tokenizer.must_match_smart(&[TokenKind::LBrace])?;
        }
        if let Some(kind) = &opts.event {
            self.fire(EventKind::Start(kind.clone()), start);
        }

        let (close, child) = self.parse_block_items(&opts, false)?;

        if let Some(kind) = opts.event.take() {
            self.fire(EventKind::End { kind, empty: !child }, close.location);
        }
        Ok(BlockEnd { close, empty: !child })
    }

    /// Reads declarations up to the end of the input, as found in a `style` attribute
    pub(crate) fn parse_declaration_list(&mut self) -> CssResult<()> {
        log::trace!("parse_declaration_list");

        let opts = BlockOptions {
            decl: true,
            ..Default::default()
        };
        self.parse_block_items(&opts, true).map(|_| ())
    }

    /// Reads the items of a block up to (and including) its closing brace. Returns the closing
    /// token and whether the block had any content.
    fn parse_block_items(&mut self, opts: &BlockOptions, until_eof: bool) -> CssResult<(Token, bool)> {
        if opts.decl {
            self.in_style += 1;
        }
        self.depth += 1;
        let result = self.block_loop(opts, until_eof);
        self.depth -= 1;
        if opts.decl {
            self.in_style -= 1;
        }
        result
    }

    fn block_loop(&mut self, opts: &BlockOptions, until_eof: bool) -> CssResult<(Token, bool)> {
        let mut child = false;
        let mut prev: Option<(usize, TokenKind)> = None;

        loop {
            let tok = self.tokenizer.get(true, false);
            match tok.kind {
                TokenKind::RBrace if !until_eof => return Ok((tok, child)),
                TokenKind::Eof if until_eof => return Ok((tok, child)),
                TokenKind::Eof => return Err(failure(&TokenKind::RBrace.describe(), &tok)),
                TokenKind::Semicolon => continue,
                TokenKind::Uvar => {
                    child = true;
                    continue;
                }
                _ => {}
            }

            // recovery did not move forward
            let key = (tok.location.offset, tok.kind);
            if prev == Some(key) {
                return Err(failure("", &tok));
            }
            prev = Some(key);

            match self.parse_block_item(tok, opts) {
                Ok(true) => child = true,
                Ok(false) => {}
                Err(e) if self.options.strict => return Err(e),
                Err(e) => self.declaration_failed(e, false),
            }
        }
    }

    /// Reads one declaration, nested rule or at-rule. Returns true when it added content.
    fn parse_block_item(&mut self, tok: Token, opts: &BlockOptions) -> CssResult<bool> {
        let in_style = self.in_style > 0;

        if tok.is(TokenKind::At) {
            if opts.margins && MARGIN_SYMS.has(tok.name()) {
                self.parse_margin(&tok)?;
            } else {
                self.parse_at_rule(&tok, false)?;
            }
            return Ok(true);
        }

        let star_hack = self.options.star_hack && tok.is(TokenKind::Star) && tok.has_star_hack();
        if in_style
            && (tok.is(TokenKind::Ident) || star_hack)
            && self.parse_declaration(tok.clone(), None, false, opts.scope.clone())?.is_some()
        {
            return Ok(true);
        }

        if opts.scope.is_none() && !tok.is_custom_ident() && (!in_style || is_nested_selector_start(tok.kind)) {
            return Ok(self.parse_style_rule(tok)? == RuleOutcome::Parsed);
        }

        Err(failure("", &tok))
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

    fn names(events: &[ParseEvent]) -> Vec<String> {
        events.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn empty_blocks_are_flagged() {
        let events = parse("a{} b{color:red}");
        let empties = events
            .iter()
            .filter_map(|e| match &e.kind {
                EventKind::End { empty, .. } => Some(*empty),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(empties, vec![true, false]);
    }

    #[test]
    fn unclosed_block_at_eof() {
        let events = parse("a{color:red");
        assert_eq!(
            names(&events),
            vec!["startstylesheet", "startrule", "property", "error", "endstylesheet"]
        );
        let err = events[3].diagnostic().unwrap();
        assert_eq!(err.message, "Expected \"}\" but found \"\".");
    }

    #[test]
    fn junk_in_a_block_is_skipped() {
        let events = parse("a{ ) ; color:red }");
        assert_eq!(
            names(&events),
            vec!["startstylesheet", "startrule", "error", "property", "endrule", "endstylesheet"]
        );
        assert_eq!(events[2].diagnostic().unwrap().message, "Unexpected \")\".");
    }

    #[test]
    fn nested_rules() {
        let events = parse("a{ color:red; &:hover{color:blue} > b{} }");
        assert_eq!(
            names(&events),
            vec![
                "startstylesheet",
                "startrule",
                "property",
                "startrule",
                "property",
                "endrule",
                "startrule",
                "endrule",
                "endrule",
                "endstylesheet"
            ]
        );
        match &events[6].kind {
            EventKind::Start(BlockKind::Rule { selectors }) => assert!(selectors[0].is_relative()),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn descriptors_only_in_scoped_blocks() {
        let events = parse("@font-face{ a{} font-family: x }");
        assert_eq!(
            names(&events),
            vec![
                "startstylesheet",
                "startfontface",
                "error",
                "property",
                "endfontface",
                "endstylesheet"
            ]
        );
    }
}
