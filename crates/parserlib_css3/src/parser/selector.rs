use crate::parser::{COMBINATORS, SELECTOR_START};
use crate::selector::{Combinator, CombinatorKind, PseudoArgs, Selector, SelectorItem, SelectorPart, SelectorSubPart, SubPartKind};
use crate::tokenizer::failure;
use crate::tokens::{Token, TokenKind, ATTR_FLAGS, OF};
use crate::Css3;
use parserlib_shared::errors::CssResult;
use parserlib_shared::location::Location;

/// Functional pseudo-classes that take a selector list
const SELECTOR_FUNCTIONS: &[&str] = &["not", "is", "where", "any", "has"];

fn combinator(tok: &Token) -> Combinator {
    Combinator {
        kind: CombinatorKind::from_text(&tok.text),
        text: tok.text.clone(),
        location: tok.location,
    }
}

impl Css3<'_> {
    /// Reads a comma separated list of selectors.
    ///
    /// Relative selectors (starting with a combinator) are allowed when `relative` is set. In
    /// `lax` mode empty items such as in `:is(a,,b)` are skipped. The token after the list is
    /// left as the current token.
    pub(crate) fn parse_selectors_group(
        &mut self,
        tok: Option<Token>,
        relative: bool,
        lax: bool,
    ) -> CssResult<Option<Vec<Selector>>> {
        log::trace!("parse_selectors_group");

        let mut selectors = Vec::new();
        let mut tok = tok;
        let mut comma = false;
        loop {
            match self.parse_selector_item(tok.take(), relative)? {
                Some(selector) => selectors.push(selector),
                None if lax => {}
                None => break,
            }
            let mut cur = self.tokenizer.current_or_eof();
            if cur.is(TokenKind::Uvar) {
                cur = self.tokenizer.grab();
            }
            comma = cur.is(TokenKind::Comma);
            if !comma {
                break;
            }
        }
        if comma {
            return Err(failure("", &self.tokenizer.current_or_eof()));
        }
        Ok((!selectors.is_empty()).then_some(selectors))
    }

    /// Reads one selector: simple selector sequences joined by combinators
    pub(crate) fn parse_selector_item(&mut self, tok: Option<Token>, relative: bool) -> CssResult<Option<Selector>> {
        log::trace!("parse_selector_item");

        let tok = match tok {
            Some(t) if !t.is(TokenKind::Uvar) => t,
            _ => self.tokenizer.grab(),
        };
        let location = tok.location;
        let mut end = tok.end;
        let mut items = Vec::new();

        let mut pending = None;
        if relative && COMBINATORS.contains(&tok.kind) {
            pending = Some(tok);
        } else {
            let Some((part, part_end)) = self.parse_simple_selector_sequence(Some(tok))? else {
                return Ok(None);
            };
            items.push(SelectorItem::Part(part));
            end = part_end;
        }

        loop {
            let mut tok = match pending.take() {
                Some(t) => t,
                None => self.tokenizer.current_or_eof(),
            };
            if COMBINATORS.contains(&tok.kind) {
                items.push(SelectorItem::Combinator(combinator(&tok)));
                let Some((part, part_end)) = self.parse_simple_selector_sequence(None)? else {
                    return Err(failure("", &self.tokenizer.current_or_eof()));
                };
                items.push(SelectorItem::Part(part));
                end = part_end;
                continue;
            }
            while tok.is(TokenKind::Uvar) {
                tok = self.tokenizer.get(false, true);
            }
            if !tok.is(TokenKind::Whitespace) {
                break;
            }

            let ws = tok;
            let next = self.tokenizer.grab();
            if next.is(TokenKind::LBrace) {
                break;
            }
            let explicit = COMBINATORS.contains(&next.kind).then(|| combinator(&next));
            let start = if explicit.is_some() { None } else { Some(next) };
            match self.parse_simple_selector_sequence(start)? {
                Some((part, part_end)) => {
                    let comb = explicit.unwrap_or_else(|| Combinator {
                        kind: CombinatorKind::Descendant,
                        text: ws.text.clone(),
                        location: ws.location,
                    });
                    items.push(SelectorItem::Combinator(comb));
                    items.push(SelectorItem::Part(part));
                    end = part_end;
                }
                None if explicit.is_some() => return Err(failure("", &self.tokenizer.current_or_eof())),
                None => {}
            }
        }

        Ok(Some(Selector {
            items,
            text: self.tokenizer.slice(location.offset, end.offset).to_string(),
            location,
            end,
        }))
    }

    /// Reads `ns|element` followed by ids, classes, attributes, pseudo-classes and `&`.
    ///
    /// Returns the part and the position right after it. The token following the sequence is
    /// consumed and left as the current token.
    fn parse_simple_selector_sequence(&mut self, start: Option<Token>) -> CssResult<Option<(SelectorPart, Location)>> {
        let start = match start {
            Some(t) => t,
            None => self.tokenizer.grab(),
        };
        // `--x:foo {}` can only be a declaration
        if start.is_custom_ident() || !SELECTOR_START.contains(&start.kind) {
            return Ok(None);
        }

        let mut modifiers = Vec::new();
        let mut end = start.end;
        let mut tok = start.clone();
        while tok.is(TokenKind::Amp) {
            modifiers.push(SelectorSubPart {
                kind: SubPartKind::Amp,
                text: tok.text.clone(),
                location: tok.location,
            });
            end = tok.end;
            tok = self.tokenizer.get(false, true);
        }

        let mut namespace = None;
        let mut element_name = None;
        let mut pending = Some(tok.clone());
        if tok.is(TokenKind::Pipe) {
            namespace = Some(String::new());
            pending = None;
        } else if tok.is(TokenKind::Star) || tok.is(TokenKind::Ident) {
            let t2 = self.tokenizer.get(false, true);
            if t2.is(TokenKind::Pipe) {
                namespace = Some(tok.text.clone());
                pending = None;
            } else {
                element_name = Some(tok.text.clone());
                end = tok.end;
                pending = Some(t2);
            }
        }
        if namespace.is_some() {
            match self.tokenizer.match_kinds(&[TokenKind::Ident, TokenKind::Star]) {
                Some(name) => {
                    element_name = Some(name.text.clone());
                    end = name.end;
                }
                None => {
                    if !tok.is(TokenKind::Pipe) {
                        self.tokenizer.unget()?;
                    }
                    return Ok(None);
                }
            }
        }

        loop {
            let tok = match pending.take() {
                Some(t) => t,
                None => self.tokenizer.get(false, true),
            };
            let modifier = match tok.kind {
                TokenKind::Amp => SelectorSubPart {
                    kind: SubPartKind::Amp,
                    text: tok.text.clone(),
                    location: tok.location,
                },
                TokenKind::Hash => SelectorSubPart {
                    kind: SubPartKind::Id,
                    text: tok.text.clone(),
                    location: tok.location,
                },
                TokenKind::Dot => {
                    let name = self.tokenizer.must_match(&[TokenKind::Ident])?;
                    SelectorSubPart {
                        kind: SubPartKind::Class,
                        text: format!(".{}", name.text),
                        location: tok.location,
                    }
                }
                TokenKind::LBracket => self.parse_attribute(&tok)?,
                TokenKind::Colon => self.parse_pseudo(&tok)?,
                _ => break,
            };
            end = match tok.kind {
                TokenKind::Amp | TokenKind::Hash => tok.end,
                _ => self.tokenizer.current_or_eof().end,
            };
            modifiers.push(modifier);
        }

        let part = SelectorPart {
            namespace,
            element_name,
            modifiers,
            text: self.tokenizer.slice(start.location.offset, end.offset).to_string(),
            location: start.location,
        };
        Ok(Some((part, end)))
    }

    /// `[ns|name op value flag]`, the `[` has been consumed
    fn parse_attribute(&mut self, start: &Token) -> CssResult<SelectorSubPart> {
        let t1 = self
            .tokenizer
            .must_match_smart(&[TokenKind::Pipe, TokenKind::Ident, TokenKind::Star])?;
        self.pair = Some(TokenKind::RBracket);

        let mut ns = None;
        let mut name = None;
        let mut op = None;
        let mut close = None;
        match t1.kind {
            TokenKind::Pipe => ns = Some(String::new()),
            TokenKind::Star => {
                self.tokenizer.must_match(&[TokenKind::Pipe])?;
                ns = Some("*".to_string());
            }
            _ => {
                let t2 = self.tokenizer.get(false, true);
                match t2.kind {
                    TokenKind::Pipe => ns = Some(t1.text.clone()),
                    TokenKind::AttrEq | TokenKind::Equals => {
                        name = Some(t1.text.clone());
                        op = Some(t2.text.clone());
                    }
                    TokenKind::Whitespace => name = Some(t1.text.clone()),
                    TokenKind::RBracket => {
                        name = Some(t1.text.clone());
                        close = Some(t2);
                    }
                    _ => return Err(failure("\"]\"", &t2)),
                }
            }
        }

        let name = match name {
            Some(n) => n,
            None => self.tokenizer.must_match(&[TokenKind::Ident])?.text,
        };
        if op.is_none() && close.is_none() {
            let t2 = self
                .tokenizer
                .must_match_smart(&[TokenKind::AttrEq, TokenKind::Equals, TokenKind::RBracket])?;
            if t2.is(TokenKind::RBracket) {
                close = Some(t2);
            } else {
                op = Some(t2.text);
            }
        }

        let mut value = None;
        let mut flag = None;
        if op.is_some() {
            let v = self.tokenizer.must_match_smart(&[TokenKind::Ident, TokenKind::String])?;
            value = Some(v.text);
            let t2 = self.tokenizer.grab();
            if t2.is(TokenKind::RBracket) {
                close = Some(t2);
            } else if t2.is_keyword(&ATTR_FLAGS) {
                flag = Some(t2.lower());
            } else {
                return Err(failure(&ATTR_FLAGS.describe(), &t2));
            }
        }

        let close = match close {
            Some(c) => c,
            None => self.tokenizer.must_match_smart(&[TokenKind::RBracket])?,
        };
        self.pair = None;

        Ok(SelectorSubPart {
            kind: SubPartKind::Attribute {
                ns,
                name,
                op,
                value,
                flag,
            },
            text: self.tokenizer.slice(start.location.offset, close.end.offset).to_string(),
            location: start.location,
        })
    }

    /// `:name`, `::name` or `:name(args)`, the first `:` has been consumed
    fn parse_pseudo(&mut self, colon: &Token) -> CssResult<SelectorSubPart> {
        let colons = if self.tokenizer.match_kinds(&[TokenKind::Colon]).is_some() {
            2
        } else {
            1
        };
        let tok = self.tokenizer.must_match(&[TokenKind::Function, TokenKind::Ident])?;

        let (name, args) = if tok.is(TokenKind::Ident) {
            (tok.lower(), None)
        } else {
            let name = tok.name().to_string();
            self.pair = Some(TokenKind::RParen);
            let args = self.parse_pseudo_args(&name)?;
            self.pair = None;
            (name, Some(args))
        };

        let end = self.tokenizer.current_or_eof().end;
        Ok(SelectorSubPart {
            kind: SubPartKind::Pseudo { name, colons, args },
            text: self.tokenizer.slice(colon.location.offset, end.offset).to_string(),
            location: colon.location,
        })
    }

    /// Arguments of a functional pseudo-class up to and including the `)`
    fn parse_pseudo_args(&mut self, name: &str) -> CssResult<PseudoArgs> {
        let mut nth = None;
        let mut takes_selectors = SELECTOR_FUNCTIONS.contains(&name);
        if name == "nth-child" || name == "nth-last-child" {
            nth = self.tokenizer.read_nth_child();
            let t1 = self.tokenizer.get(false, true);
            let t2 = if t1.is(TokenKind::Whitespace) {
                self.tokenizer.grab()
            } else {
                t1.clone()
            };
            if nth.is_some() && t2.is_keyword(&OF) {
                takes_selectors = true;
            } else if t2.is(TokenKind::RParen) {
                return Ok(match nth {
                    Some((a, b)) => PseudoArgs::Nth { a, b, of: Vec::new() },
                    None => PseudoArgs::Value(None),
                });
            } else {
                return Err(failure("", &t1));
            }
        }

        if takes_selectors {
            let lax = matches!(name, "is" | "where" | "any");
            let Some(list) = self.parse_selectors_group(None, name == "has", lax)? else {
                return Err(failure("a selector", &self.tokenizer.current_or_eof()));
            };
            self.tokenizer.must_reuse(&[TokenKind::RParen])?;
            return Ok(match nth {
                Some((a, b)) => PseudoArgs::Nth { a, b, of: list },
                None => PseudoArgs::Selectors(list),
            });
        }

        let value = self.parse_expr(&[TokenKind::RParen], true)?;
        let close = self.tokenizer.current_or_eof();
        if !close.is(TokenKind::RParen) {
            return Err(failure(&TokenKind::RParen.describe(), &close));
        }
        Ok(PseudoArgs::Value(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::selector::{CombinatorKind, PseudoArgs, SelectorItem, Specificity, SubPartKind};
    use crate::Css3;

    #[test]
    fn parts_and_combinators() {
        let sel = Css3::parse_selector("ns|a.b#c > d ~ e + f g").unwrap();
        let combinators = sel
            .items
            .iter()
            .filter_map(|i| match i {
                SelectorItem::Combinator(c) => Some(c.kind),
                SelectorItem::Part(_) => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            combinators,
            vec![
                CombinatorKind::Child,
                CombinatorKind::Sibling,
                CombinatorKind::AdjacentSibling,
                CombinatorKind::Descendant
            ]
        );

        let first = sel.parts().next().unwrap();
        assert_eq!(first.namespace.as_deref(), Some("ns"));
        assert_eq!(first.element_name.as_deref(), Some("a"));
        assert_eq!(first.modifiers.len(), 2);
        assert_eq!(first.modifiers[0].text, ".b");
        assert_eq!(first.text, "ns|a.b#c");
        assert_eq!(sel.specificity(), Specificity::new(0, 1, 1, 5));
    }

    #[test]
    fn attributes() {
        let sel = Css3::parse_selector("[ href ^= \"http\" i][*|lang][data-x]").unwrap();
        let part = sel.parts().next().unwrap();
        assert_eq!(part.element_name, None);
        assert_eq!(part.modifiers.len(), 3);
        match &part.modifiers[0].kind {
            SubPartKind::Attribute {
                ns,
                name,
                op,
                value,
                flag,
            } => {
                assert_eq!(ns, &None);
                assert_eq!(name, "href");
                assert_eq!(op.as_deref(), Some("^="));
                assert_eq!(value.as_deref(), Some("\"http\""));
                assert_eq!(flag.as_deref(), Some("i"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(part.modifiers[0].text, "[ href ^= \"http\" i]");
        match &part.modifiers[1].kind {
            SubPartKind::Attribute { ns, name, .. } => {
                assert_eq!(ns.as_deref(), Some("*"));
                assert_eq!(name, "lang");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(Css3::parse_selector("[a=]").is_err());
        assert!(Css3::parse_selector("[a=b c]").is_err());
    }

    #[test]
    fn pseudo_classes() {
        let sel = Css3::parse_selector("li:nth-child(2n+1 of .a, .b)::before:lang(en)").unwrap();
        let part = sel.parts().next().unwrap();
        assert_eq!(part.modifiers.len(), 3);
        match &part.modifiers[0].kind {
            SubPartKind::Pseudo {
                name,
                colons,
                args: Some(PseudoArgs::Nth { a, b, of }),
            } => {
                assert_eq!(name, "nth-child");
                assert_eq!(*colons, 1);
                assert_eq!((a.as_str(), b.as_str()), ("2n", "+1"));
                assert_eq!(of.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(part.modifiers[0].text, ":nth-child(2n+1 of .a, .b)");
        assert!(part.modifiers[1].is_pseudo_element());
        match &part.modifiers[2].kind {
            SubPartKind::Pseudo {
                args: Some(PseudoArgs::Value(Some(value))),
                ..
            } => assert_eq!(value.text, "en"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn selector_lists_in_pseudo_classes() {
        let sel = Css3::parse_selector("a:is(,b,,c):has(> img)").unwrap();
        let part = sel.parts().next().unwrap();
        match &part.modifiers[0].kind {
            SubPartKind::Pseudo {
                args: Some(PseudoArgs::Selectors(list)),
                ..
            } => assert_eq!(list.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        match &part.modifiers[1].kind {
            SubPartKind::Pseudo {
                args: Some(PseudoArgs::Selectors(list)),
                ..
            } => assert!(list[0].is_relative()),
            other => panic!("unexpected {:?}", other),
        }

        assert!(Css3::parse_selector("a:not(,b)").is_err());
        assert!(Css3::parse_selector("a:not()").is_err());
        assert!(Css3::parse_selector("a:not(> b)").is_err());
    }

    #[test]
    fn nesting_selector() {
        let sel = Css3::parse_selector("&.a & > b").unwrap();
        assert!(sel.uses_amp());
        assert_eq!(sel.parts().count(), 3);
        assert!(!Css3::parse_selector("a:is(b)").unwrap().uses_amp());
        assert!(Css3::parse_selector("a:is(&)").unwrap().uses_amp());
    }

    #[test]
    fn broken_selectors() {
        assert!(Css3::parse_selector("a,").is_err());
        assert!(Css3::parse_selector("a >").is_err());
        assert!(Css3::parse_selector(".").is_err());
        assert!(Css3::parse_selector("a::").is_err());
    }
}
