//! A parsing session owns everything that is kept between parses of a document: the compiled
//! value grammars and the parse cache.

use crate::events::{ParseEvent, ParseListener};
use crate::parser_cache::{CacheStats, ParseCache};
use crate::parser_config::{CacheConfig, ParserOptions};
use crate::validator::Validator;
use crate::Css3;
use parserlib_shared::errors::{CssError, CssResult};
use parserlib_shared::location::Location;

/// Events of one parse and the problems found in them
#[derive(Clone, Debug, Default)]
pub struct ParseReport {
    pub events: Vec<ParseEvent>,
    /// Syntax errors and failed validations, in source order
    pub diagnostics: Vec<CssError>,
}

impl ParseReport {
    fn from_events(events: Vec<ParseEvent>) -> Self {
        let diagnostics = events.iter().filter_map(|e| e.diagnostic()).cloned().collect();
        Self { events, diagnostics }
    }
}

pub struct ParseSession {
    validator: Validator,
    cache: ParseCache,
    /// Document the cache holds blocks of
    document: Option<String>,
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ParseSession {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            validator: Validator::new(),
            cache: ParseCache::new(config),
            document: None,
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Makes `id` the document that is parsed next. The cache is emptied when the document
    /// changes, so blocks of unrelated documents never mix.
    pub fn open_document(&mut self, id: &str) {
        if self.document.as_deref() != Some(id) {
            log::debug!("switching parse session to document {}", id);
            self.cache.reset();
            self.document = Some(id.to_string());
        }
    }

    /// Parses `text` and sends the events to `listener`. The cache is only consulted when the
    /// options ask for it.
    pub fn parse_with(&mut self, text: &str, options: ParserOptions, listener: &mut dyn ParseListener) -> CssResult<()> {
        let mut parser = Css3::new(text, options, &self.validator, listener);
        if options.reuse_cache {
            parser = parser.with_cache(&mut self.cache);
        }
        parser.parse()
    }

    pub fn parse(&mut self, text: &str, options: ParserOptions) -> CssResult<Vec<ParseEvent>> {
        let mut events = Vec::new();
        self.parse_with(text, options, &mut events)?;
        Ok(events)
    }

    /// Parses `text` and collects the diagnostics. A strict parse that fails returns the error.
    pub fn parse_report(&mut self, text: &str, options: ParserOptions) -> CssResult<ParseReport> {
        Ok(ParseReport::from_events(self.parse(text, options)?))
    }

    /// Hands the diagnostics a linter kept for the latest parse back to the cache, see
    /// `ParseCache::feedback`
    pub fn feedback(&mut self, diagnostics: &[CssError]) {
        let locations = diagnostics.iter().filter_map(|d| d.location).collect::<Vec<Location>>();
        self.cache.feedback(&locations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached() -> ParserOptions {
        ParserOptions {
            reuse_cache: true,
            ..Default::default()
        }
    }

    #[test]
    fn reparse_is_identical() {
        let mut session = ParseSession::default();
        let css = "a { color: red }\nb { bogus: 1 }\n@media print { c { width: 1px } }";
        let first = session.parse(css, cached()).unwrap();
        let second = session.parse(css, cached()).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.cache_stats().hits, 3);

        let plain = ParseSession::default().parse(css, ParserOptions::default()).unwrap();
        assert_eq!(first, plain);
    }

    #[test]
    fn edits_shift_cached_rules() {
        let mut session = ParseSession::default();
        session.parse("a{x:1}\nb{color:red}", cached()).unwrap();
        let edited = "/* new */ a{x:2}\nb{color:red}";
        let events = session.parse(edited, cached()).unwrap();
        assert_eq!(session.cache_stats().hits, 1);

        let fresh = ParseSession::default().parse(edited, ParserOptions::default()).unwrap();
        assert_eq!(events, fresh);
    }

    #[test]
    fn report_and_feedback() {
        let mut session = ParseSession::default();
        let report = session.parse_report("a{color:red}\nb{bogus:1}", cached()).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].message, "Unknown property \"bogus\".");

        session.feedback(&report.diagnostics);
        let report = session.parse_report("a{color:red}\nb{bogus:1}", cached()).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        // the clean rule was replayed without events
        assert!(report.events.iter().all(|e| e.name() != "startrule" || e.location.line == 2));
    }

    #[test]
    fn switching_documents() {
        let mut session = ParseSession::default();
        session.open_document("one");
        session.parse("a{x:1}", cached()).unwrap();
        session.parse("a{x:1}", cached()).unwrap();
        assert_eq!(session.cache_stats().hits, 1);
        session.open_document("two");
        assert_eq!(session.cache_stats().hits, 0);
    }
}
