use crate::events::EventKind;
use crate::parser::RuleOutcome;
use crate::tokenizer::failure;
use crate::tokens::TokenKind;
use crate::Css3;
use parserlib_shared::errors::CssResult;
use parserlib_shared::location::Location;

impl Css3<'_> {
    /// Reads all top level rules. Errors are reported and skipped unless the parser is strict.
    pub(crate) fn parse_stylesheet(&mut self) -> CssResult<()> {
        log::trace!("parse_stylesheet");

        self.fire(EventKind::StartStylesheet, Location::default());
        loop {
            let tok = self.tokenizer.grab();
            if tok.is_eof() {
                break;
            }

            let result = match tok.kind {
                TokenKind::At => self.parse_at_rule(&tok, true),
                TokenKind::Cdco => Ok(()),
                _ => match self.parse_style_rule(tok.clone()) {
                    Ok(RuleOutcome::NotRule) => {
                        let next = self.tokenizer.grab();
                        if next.is_eof() {
                            Ok(())
                        } else {
                            Err(failure("", &next))
                        }
                    }
                    Ok(_) => Ok(()),
                    Err(e) => Err(e),
                },
            };

            if let Err(e) = result {
                if self.options.strict {
                    return Err(e);
                }
                self.report(e);
            }
        }

        let end = self.tokenizer.current_or_eof().location;
        self.fire(EventKind::EndStylesheet, end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{EventKind, ParseEvent};
    use crate::parser_config::ParserOptions;
    use crate::Css3;

    fn names(events: &[ParseEvent]) -> Vec<String> {
        events.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn empty_stylesheet() {
        let events = Css3::parse_str("", ParserOptions::default()).unwrap();
        assert_eq!(names(&events), vec!["startstylesheet", "endstylesheet"]);
    }

    #[test]
    fn cdo_cdc_are_skipped() {
        let events = Css3::parse_str("<!-- a{} -->", ParserOptions::default()).unwrap();
        assert_eq!(names(&events), vec!["startstylesheet", "startrule", "endrule", "endstylesheet"]);
    }

    #[test]
    fn garbage_is_reported() {
        let events = Css3::parse_str("} a{}", ParserOptions::default()).unwrap();
        assert_eq!(
            names(&events),
            vec!["startstylesheet", "error", "startrule", "endrule", "endstylesheet"]
        );
        match &events[1].kind {
            EventKind::Error { error, recoverable } => {
                assert_eq!(error.message, "Unexpected \"}\".");
                assert!(*recoverable);
            }
            other => panic!("unexpected event {:?}", other),
        }

        let strict = ParserOptions {
            strict: true,
            ..Default::default()
        };
        assert!(Css3::parse_str("} a{}", strict).is_err());
    }
}
