use crate::tokenizer::failure;
use crate::tokens::{clip_string, Token, TokenKind, AUTO, NAMED_COLORS, NONE};
use crate::value::{PartType, PropertyValue, ValuePart};
use crate::Css3;
use parserlib_shared::errors::CssResult;

const CALC_FUNCTIONS: &[&str] = &[
    "calc", "clamp", "min", "max", "sin", "cos", "tan", "asin", "acos", "atan", "atan2",
];

fn closing_bracket(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

impl Css3<'_> {
    /// Reads value parts until one of `end` (which is consumed) or the end of input.
    ///
    /// In `dumb` mode tokens are collected as they are, only brackets and functions are balanced.
    /// Otherwise hashes are checked to be colors and identifiers are classified.
    pub(crate) fn parse_expr(&mut self, end: &[TokenKind], dumb: bool) -> CssResult<Option<PropertyValue>> {
        log::trace!("parse_expr");

        let mut parts: Vec<ValuePart> = Vec::new();
        loop {
            let tok = self.tokenizer.get(true, false);
            if tok.is_eof() || end.contains(&tok.kind) {
                break;
            }

            let part = if let Some(close) = closing_bracket(tok.kind) {
                if !dumb && tok.is(TokenKind::LBrace) && !parts.is_empty() {
                    break;
                }
                let inner = self.parse_expr(&[close], dumb)?;
                let last = self.tokenizer.current_or_eof();
                if !last.is(close) {
                    return Err(failure(&close.describe(), &last));
                }
                let mut part = ValuePart::from_token(tok);
                part.text = self.tokenizer.slice(part.location().offset, last.end.offset).to_string();
                part.part_type = PartType::Block;
                part.is_var = inner.as_ref().is_some_and(|v| v.is_var);
                part.end = last.end;
                part.expr = inner;
                part
            } else if tok.is(TokenKind::Function) {
                if tok.is_ie_function() && !self.options.ie_filters {
                    return Err(failure("", &tok));
                }
                self.parse_function(tok, dumb)?
            } else if dumb {
                ValuePart::from_token(tok)
            } else if tok.is(TokenKind::Hash) {
                self.hex_color(tok)
            } else if tok.is(TokenKind::Ident) && !tok.is_custom_ident() {
                let mut part = ValuePart::from_token(tok);
                let text = &part.token.text;
                if NONE.has(text) {
                    part.is_none = true;
                } else if !AUTO.has(text) && NAMED_COLORS.has(text) {
                    part.part_type = PartType::Color;
                }
                part
            } else {
                ValuePart::from_token(tok)
            };
            parts.push(part);
        }

        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(PropertyValue::from_parts(parts, self.tokenizer.source())))
    }

    /// Reads the arguments of a function whose name token has been consumed
    pub(crate) fn parse_function(&mut self, tok: Token, dumb: bool) -> CssResult<ValuePart> {
        log::trace!("parse_function");

        let args = self.parse_expr(&[TokenKind::RParen], dumb)?;
        let close = self.tokenizer.current_or_eof();
        if !close.is(TokenKind::RParen) {
            return Err(failure(&TokenKind::RParen.describe(), &close));
        }

        let name = tok.name().to_string();
        let mut part = ValuePart::from_token(tok);
        part.text = self.tokenizer.slice(part.location().offset, close.end.offset).to_string();
        part.end = close.end;
        if let Some(args) = &args {
            part.is_calc = CALC_FUNCTIONS.contains(&name.as_str());
            part.is_var = args.is_var || name == "var" || name == "env";
            part.is_attr = name == "attr"
                && args
                    .parts
                    .first()
                    .is_some_and(|p| matches!(p.kind(), TokenKind::Ident | TokenKind::Uvar));
        }
        part.expr = args;
        Ok(part)
    }

    /// Marks a `#hash` as a color, warns when it cannot be one
    fn hex_color(&mut self, tok: Token) -> ValuePart {
        let mut part = ValuePart::from_token(tok);
        let text = &part.token.text;
        let valid = matches!(text.len(), 4 | 5 | 7 | 9)
            && text.get(1..).is_some_and(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()));
        if valid {
            part.part_type = PartType::Color;
        } else {
            let message = format!("Expected a hex color but found \"{}\".", clip_string(text, 30));
            let location = part.location();
            self.warn(&message, location);
        }
        part
    }
}

#[cfg(test)]
mod tests {
    use crate::value::PartType;
    use crate::Css3;

    #[test]
    fn part_types() {
        let value = Css3::parse_property_value("red #fff none auto 10px \"s\" url(x.png)").unwrap();
        let types = value.parts.iter().map(|p| p.part_type).collect::<Vec<_>>();
        assert_eq!(
            types,
            vec![
                PartType::Color,
                PartType::Color,
                PartType::Ident,
                PartType::Ident,
                PartType::Length,
                PartType::String,
                PartType::Uri
            ]
        );
        assert!(value.parts[2].is_none);
        assert!(!value.parts[3].is_none);
    }

    #[test]
    fn functions_and_blocks() {
        let value = Css3::parse_property_value("calc(1px + var(--x)) [a b] attr(title)").unwrap();
        assert_eq!(value.parts.len(), 3);

        let calc = &value.parts[0];
        assert_eq!(calc.text, "calc(1px + var(--x))");
        assert_eq!(calc.function_name(), Some("calc"));
        assert!(calc.is_calc);
        assert!(calc.is_var);
        assert_eq!(calc.expr.as_ref().unwrap().parts.len(), 3);

        let block = &value.parts[1];
        assert_eq!(block.part_type, PartType::Block);
        assert_eq!(block.text, "[a b]");
        assert!(value.parts[2].is_attr);
        assert!(value.is_var);
    }

    #[test]
    fn unbalanced_brackets() {
        let err = Css3::parse_property_value("rgb(1, 2").unwrap_err();
        assert_eq!(err.message, "Expected \")\" but found \"\".");
        assert!(Css3::parse_property_value("[a").is_err());
    }

    #[test]
    fn bad_hex_colors_are_warned() {
        let events = Css3::parse_str("a{color:#ggg}", Default::default()).unwrap();
        let warning = events.iter().find(|e| e.name() == "warning").unwrap();
        assert_eq!(warning.location.column, 9);
    }
}
