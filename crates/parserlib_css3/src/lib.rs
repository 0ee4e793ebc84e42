//! CSS3 parser with value validation
//!
//! The parser reads a stylesheet and reports what it finds as a stream of events (see
//! `events`). Declaration values are checked against the grammar of their property by the
//! `validator`. A `ParseCache` can be handed to the parser to reuse the events of unchanged
//! rules when the same document is parsed again after an edit.

pub mod definitions;
pub mod events;
pub mod matcher;
pub mod media;
pub mod parser;
pub mod parser_cache;
pub mod parser_config;
pub mod selector;
pub mod session;
pub mod syntax;
pub mod tokenizer;
pub mod tokens;
pub mod validator;
pub mod value;
pub mod walker;

use crate::events::{EventKind, ParseEvent, ParseListener};
use crate::media::MediaQuery;
use crate::parser_cache::ParseCache;
use crate::parser_config::ParserOptions;
use crate::selector::Selector;
use crate::tokenizer::{failure, Tokenizer};
use crate::tokens::TokenKind;
use crate::validator::Validator;
use crate::value::PropertyValue;
use parserlib_shared::errors::{CssError, CssResult};
use parserlib_shared::location::Location;

pub struct Css3<'a> {
    /// The tokenizer the parser reads from
    pub tokenizer: Tokenizer,
    options: ParserOptions,
    validator: &'a Validator,
    /// Cache of rule events, only present when reusing results of earlier parses
    cache: Option<&'a mut ParseCache>,
    listener: &'a mut dyn ParseListener,
    /// Events held back while it is unclear if a declaration is really a nested rule
    deferred: Option<Vec<ParseEvent>>,
    /// Number of blocks we are in
    depth: usize,
    /// Nesting depth of blocks that hold declarations
    in_style: usize,
    /// Nesting depth of `@scope` blocks
    in_scope: usize,
    /// Closing bracket that must be skipped before resuming after an error
    pair: Option<TokenKind>,
}

impl<'a> Css3<'a> {
    /// Creates a parser for `text` that sends its events to `listener`
    pub fn new(
        text: &str,
        options: ParserOptions,
        validator: &'a Validator,
        listener: &'a mut dyn ParseListener,
    ) -> Self {
        Self {
            tokenizer: Tokenizer::new(text),
            options,
            validator,
            cache: None,
            listener,
            deferred: None,
            depth: 0,
            in_style: 0,
            in_scope: 0,
            pair: None,
        }
    }

    /// Reuses (and fills) the given cache while parsing
    pub fn with_cache(mut self, cache: &'a mut ParseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a whole stylesheet and returns its events
    pub fn parse_str(text: &str, options: ParserOptions) -> CssResult<Vec<ParseEvent>> {
        let validator = Validator::new();
        let mut events = Vec::new();
        Css3::new(text, options, &validator, &mut events).parse()?;
        Ok(events)
    }

    /// Parses a single rule (a style rule or an at-rule)
    pub fn parse_rule(text: &str) -> CssResult<Vec<ParseEvent>> {
        let validator = Validator::new();
        let mut events = Vec::new();
        Css3::new(text, ParserOptions::default(), &validator, &mut events).read_rule()?;
        Ok(events)
    }

    /// Parses the declarations of a `style` attribute
    pub fn parse_style_attribute(text: &str) -> CssResult<Vec<ParseEvent>> {
        let validator = Validator::new();
        let mut events = Vec::new();
        Css3::new(text, ParserOptions::default(), &validator, &mut events).read_style_attribute()?;
        Ok(events)
    }

    /// Parses a single selector such as `ul > li:hover`
    pub fn parse_selector(text: &str) -> CssResult<Selector> {
        with_parser(text, |p| p.read_selector())
    }

    /// Parses a property value such as `1px solid red`
    pub fn parse_property_value(text: &str) -> CssResult<PropertyValue> {
        with_parser(text, |p| p.read_property_value())
    }

    /// Parses a single media query such as `screen and (color)`
    pub fn parse_media_query(text: &str) -> CssResult<MediaQuery> {
        with_parser(text, |p| p.read_media_query())
    }

    /// Parses the whole input as a stylesheet
    pub fn parse(&mut self) -> CssResult<()> {
        log::debug!("parsing stylesheet ({} bytes)", self.tokenizer.source().len());
        if let Some(cache) = self.cache.as_deref_mut() {
            cache.start();
        }
        self.parse_stylesheet()
    }

    /// Sends an event to the listener, or holds it back while events are deferred
    pub(crate) fn fire(&mut self, kind: EventKind, location: Location) {
        let event = ParseEvent::new(kind, location);
        match self.deferred.as_mut() {
            Some(deferred) => deferred.push(event),
            None => self.dispatch(event),
        }
    }

    fn dispatch(&mut self, event: ParseEvent) {
        if let Some(cache) = self.cache.as_deref_mut() {
            cache.add_event(&event);
        }
        self.listener.on_event(&event);
    }

    /// Replays events that came from the cache
    pub(crate) fn replay(&mut self, events: Vec<ParseEvent>) {
        for event in &events {
            self.listener.on_event(event);
        }
    }

    pub(crate) fn warn(&mut self, message: &str, location: Location) {
        log::debug!("warning at {}: {}", location, message);
        self.fire(
            EventKind::Warning {
                message: message.to_string(),
            },
            location,
        );
    }

    /// Reports an error that does not stop the parser
    pub(crate) fn report(&mut self, error: CssError) {
        let location = error.location.unwrap_or_else(|| self.tokenizer.reader_location());
        let recoverable = !self.tokenizer.at_end();
        log::debug!("error at {}: {}", location, error.message);
        self.fire(EventKind::Error { error, recoverable }, location);
    }

    /// Fails unless the whole input has been consumed (the current token may be whitespace)
    fn expect_end(&mut self) -> CssResult<()> {
        let mut tok = self.tokenizer.current_or_eof();
        if tok.is(TokenKind::Whitespace) || tok.is(TokenKind::Uvar) || tok.is(TokenKind::Comment) {
            tok = self.tokenizer.grab();
        }
        if tok.is_eof() {
            Ok(())
        } else {
            Err(failure("end of input", &tok))
        }
    }

    fn read_rule(&mut self) -> CssResult<()> {
        let tok = self.tokenizer.grab();
        if tok.is(TokenKind::At) {
            self.parse_at_rule(&tok, false)?;
        } else if self.parse_style_rule(tok.clone())? == parser::RuleOutcome::NotRule {
            return Err(failure("a rule", &tok));
        }
        self.tokenizer.grab();
        self.expect_end()
    }

    fn read_style_attribute(&mut self) -> CssResult<()> {
        self.parse_declaration_list()
    }

    fn read_selector(&mut self) -> CssResult<Selector> {
        let tok = self.tokenizer.grab();
        let Some(selector) = self.parse_selector_item(Some(tok.clone()), false)? else {
            return Err(failure("a selector", &tok));
        };
        self.expect_end()?;
        Ok(selector)
    }

    fn read_property_value(&mut self) -> CssResult<PropertyValue> {
        let value = self.parse_expr(&[TokenKind::Semicolon, TokenKind::RBrace, TokenKind::Delim], false)?;
        let Some(value) = value else {
            return Err(failure("a value", &self.tokenizer.current_or_eof()));
        };
        self.expect_end()?;
        Ok(value)
    }

    fn read_media_query(&mut self) -> CssResult<MediaQuery> {
        let tok = self.tokenizer.grab();
        let mut list = self.parse_media_query_list(true)?;
        if list.len() != 1 {
            return Err(failure("a media query", &tok));
        }
        self.tokenizer.grab();
        self.expect_end()?;
        Ok(list.remove(0))
    }
}

/// Runs `f` on a throw-away parser with default options, errors included in the result
fn with_parser<T>(text: &str, f: impl FnOnce(&mut Css3<'_>) -> CssResult<T>) -> CssResult<T> {
    let validator = Validator::new();
    let mut events: Vec<ParseEvent> = Vec::new();
    let mut parser = Css3::new(text, ParserOptions::default(), &validator, &mut events);
    f(&mut parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_logger::SimpleLogger;

    #[test]
    fn entry_points() {
        let sel = Css3::parse_selector("ul > li:hover").unwrap();
        assert_eq!(sel.text, "ul > li:hover");
        assert!(Css3::parse_selector("ul >").is_err());

        let value = Css3::parse_property_value(" 1px solid red ").unwrap();
        assert_eq!(value.parts.len(), 3);
        assert_eq!(value.text, "1px solid red");
        let err = Css3::parse_property_value("1px; 2px").unwrap_err();
        assert_eq!(err.message, "Expected end of input but found \";\".");

        let mq = Css3::parse_media_query("screen and (color)").unwrap();
        assert_eq!(mq.media_type.as_deref(), Some("screen"));
        assert_eq!(mq.features.len(), 1);
    }

    #[test]
    fn single_rules() {
        let events = Css3::parse_rule("a { color: red }").unwrap();
        let names = events.iter().map(|e| e.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["startrule", "property", "endrule"]);
        assert!(Css3::parse_rule("a {} b {}").is_err());
    }

    #[test]
    fn parse_with_trace_logging() {
        // another test may have installed the logger already
        let _ = SimpleLogger::new().with_level(log::LevelFilter::Trace).init();
        let events = Css3::parse_str(
            "@media print { a { color: red; } }\nb { bogus: 1 }",
            ParserOptions::default(),
        )
        .unwrap();
        assert_eq!(events.iter().filter(|e| e.name() == "property").count(), 2);
    }

    #[test]
    fn style_attribute() {
        let events = Css3::parse_style_attribute("color: red; margin: 0").unwrap();
        assert_eq!(events.iter().filter(|e| e.name() == "property").count(), 2);
    }
}
