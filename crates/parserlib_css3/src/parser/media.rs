use crate::media::{MediaFeature, MediaQuery};
use crate::tokenizer::failure;
use crate::tokens::{Token, TokenKind, AND, AND_OR, NOT_ONLY, OR};
use crate::Css3;
use parserlib_shared::errors::CssResult;

const QUERY_START: &[TokenKind] = &[TokenKind::Ident, TokenKind::LParen];
const FEATURE_NAME: &[TokenKind] = &[TokenKind::Ident, TokenKind::Number, TokenKind::Dimension, TokenKind::Length];

impl Css3<'_> {
    /// Reads a comma separated media query list, which may be empty.
    ///
    /// With `reuse` set the current token is the first token of the list.
    pub(crate) fn parse_media_query_list(&mut self, reuse: bool) -> CssResult<Vec<MediaQuery>> {
        log::trace!("parse_media_query_list");

        let mut list = Vec::new();
        let mut next = if reuse {
            self.tokenizer.match_reuse(QUERY_START)
        } else {
            self.tokenizer.match_smart(QUERY_START)
        };
        while let Some(tok) = next.take() {
            list.push(self.parse_single_media_query(tok)?);
            if self.tokenizer.match_smart(&[TokenKind::Comma]).is_none() {
                break;
            }
            next = self.tokenizer.match_smart(QUERY_START);
        }
        Ok(list)
    }

    fn parse_single_media_query(&mut self, tok: Token) -> CssResult<MediaQuery> {
        let modifier = tok.is_keyword(&NOT_ONLY).then(|| tok.lower());
        let first = if modifier.is_some() {
            self.tokenizer.must_match_smart(QUERY_START)?
        } else {
            tok.clone()
        };
        let media_type = first.is(TokenKind::Ident).then(|| first.text.clone());

        let mut features = Vec::new();
        if media_type.is_none() {
            features.push(self.parse_media_expression(Some(first))?);
        }
        // `and` after a media type, `and` or `or` otherwise, but never mixed
        let mut joiner = if media_type.is_some() { AND } else { AND_OR };
        let mut mixed = true;
        while let Some(kw) = self.tokenizer.match_keyword(TokenKind::Ident, &joiner) {
            if mixed {
                joiner = if AND.has(&kw.text) { AND } else { OR };
                mixed = false;
            }
            features.push(self.parse_media_expression(None)?);
        }

        let end = self.tokenizer.current_or_eof().end;
        let text = self.tokenizer.slice(tok.location.offset, end.offset).trim_end().to_string();
        Ok(MediaQuery {
            modifier,
            media_type,
            features,
            text,
            location: tok.location,
        })
    }

    /// Reads `(name ...)` up to the closing parenthesis
    pub(crate) fn parse_media_expression(&mut self, start: Option<Token>) -> CssResult<MediaFeature> {
        log::trace!("parse_media_expression");

        let start = match start {
            Some(t) => t,
            None => self.tokenizer.grab(),
        };
        if !start.is(TokenKind::LParen) {
            return Err(failure(&TokenKind::LParen.describe(), &start));
        }
        let name = self.tokenizer.must_match_smart(FEATURE_NAME)?;
        let expr = self.parse_expr(&[TokenKind::RParen], true)?;
        let close = self.tokenizer.must_reuse(&[TokenKind::RParen])?;

        Ok(MediaFeature {
            name,
            expr,
            text: self.tokenizer.slice(start.location.offset, close.end.offset).to_string(),
            location: start.location,
            end: close.end,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{BlockKind, EventKind, ParseEvent};
    use crate::media::MediaQuery;
    use crate::parser_config::ParserOptions;
    use crate::validator::Validator;
    use crate::Css3;
    use parserlib_shared::errors::CssResult;

    fn query_list(text: &str) -> CssResult<Vec<MediaQuery>> {
        let validator = Validator::new();
        let mut events: Vec<ParseEvent> = Vec::new();
        let mut parser = Css3::new(text, ParserOptions::default(), &validator, &mut events);
        parser.parse_media_query_list(false)
    }

    #[test]
    fn types_and_features() {
        let list = query_list("only screen and (color), print and (min-width: 100px)").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].modifier.as_deref(), Some("only"));
        assert_eq!(list[0].media_type.as_deref(), Some("screen"));
        assert_eq!(list[0].text, "only screen and (color)");
        assert_eq!(list[1].features[0].name.text, "min-width");
        assert_eq!(list[1].features[0].text, "(min-width: 100px)");
        assert_eq!(list[1].text, "print and (min-width: 100px)");
    }

    #[test]
    fn feature_only_queries() {
        let list = query_list("(color) or (hover) or (400px <= width)").unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].media_type, None);
        assert_eq!(list[0].features.len(), 3);
        assert_eq!(list[0].features[2].name.text, "400px");

        // `and` and `or` cannot be mixed, the rest is left for the caller
        let list = query_list("(color) and (hover) or (x)").unwrap();
        assert_eq!(list[0].features.len(), 2);
    }

    #[test]
    fn broken_queries() {
        assert!(query_list("screen and color").is_err());
        assert!(query_list("not {").is_err());
        assert!(query_list("(color").is_err());
        assert!(query_list("{").unwrap().is_empty());
    }

    #[test]
    fn media_rule() {
        let events = Css3::parse_str("@media screen, print { a { color: red } }", ParserOptions::default()).unwrap();
        match &events[1].kind {
            EventKind::Start(BlockKind::Media { media }) => {
                let texts = media.iter().map(|m| m.text.as_str()).collect::<Vec<_>>();
                assert_eq!(texts, vec!["screen", "print"]);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(events.len(), 7);
    }
}
