use crate::tokens::{Token, TokenKind};
use parserlib_shared::location::{Location, PositionDelta, ShiftPosition};
use serde::Serialize;
use std::fmt;

/// Semantic type of a part of a property value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PartType {
    Ident,
    Color,
    Number,
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Flex,
    Percentage,
    Dimension,
    String,
    Uri,
    UnicodeRange,
    Function,
    /// `( ... )`, `[ ... ]` or `{ ... }`
    Block,
    /// `--custom-property` identifier
    CustomProperty,
    /// `,`, `/`, `+`, `-`, `*`, `=` and friends
    Operator,
    /// `/*[[name]]*/` placeholder
    Variable,
    Unknown,
}

impl PartType {
    /// Default part type for a token, before the value parser refines it
    pub fn for_token(token: &Token) -> PartType {
        match token.kind {
            TokenKind::Ident if token.is_custom_ident() => PartType::CustomProperty,
            TokenKind::Ident => PartType::Ident,
            TokenKind::Number => PartType::Number,
            TokenKind::Length => PartType::Length,
            TokenKind::Angle => PartType::Angle,
            TokenKind::Time => PartType::Time,
            TokenKind::Frequency => PartType::Frequency,
            TokenKind::Resolution => PartType::Resolution,
            TokenKind::Flex => PartType::Flex,
            TokenKind::Percentage => PartType::Percentage,
            TokenKind::Dimension => PartType::Dimension,
            TokenKind::String => PartType::String,
            TokenKind::Uri => PartType::Uri,
            TokenKind::URange => PartType::UnicodeRange,
            TokenKind::Function => PartType::Function,
            TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen => PartType::Block,
            TokenKind::Uvar => PartType::Variable,
            TokenKind::Comma
            | TokenKind::Char
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Equals
            | TokenKind::Gt
            | TokenKind::EqCmp
            | TokenKind::Colon => PartType::Operator,
            _ => PartType::Unknown,
        }
    }
}

/// One component of a property value: a single token, or a function / bracketed block together
/// with its contents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValuePart {
    /// The first token (the function name token for functions, the opening bracket for blocks)
    pub token: Token,
    /// Raw source text, including function arguments and the closing bracket
    pub text: String,
    pub part_type: PartType,
    /// Arguments of a function or contents of a block
    pub expr: Option<PropertyValue>,
    /// Position right after the part
    pub end: Location,
    /// One of the `calc()` family functions
    pub is_calc: bool,
    /// `var()`, `env()` or a placeholder, which can stand for anything
    pub is_var: bool,
    /// `attr()`
    pub is_attr: bool,
    /// The `none` keyword
    pub is_none: bool,
}

impl ValuePart {
    pub fn from_token(token: Token) -> Self {
        Self {
            part_type: PartType::for_token(&token),
            text: token.text.clone(),
            end: token.end,
            is_var: token.kind == TokenKind::Uvar,
            token,
            expr: None,
            is_calc: false,
            is_attr: false,
            is_none: false,
        }
    }

    pub fn location(&self) -> Location {
        self.token.location
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Lowercase function name without vendor prefix
    pub fn function_name(&self) -> Option<&str> {
        match self.part_type {
            PartType::Function => Some(self.token.name()),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        self.token.number()
    }

    pub fn is_zero(&self) -> bool {
        self.token.is_zero()
    }
}

impl fmt::Display for ValuePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl ShiftPosition for ValuePart {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.token.shift_position(delta);
        self.end.shift_position(delta);
        self.expr.shift_position(delta);
    }
}

/// The value of a declaration (everything between `:` and `;` or `!important`), or the
/// arguments of a function.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PropertyValue {
    pub parts: Vec<ValuePart>,
    /// Raw source text from the first to the last part
    pub text: String,
    pub location: Location,
    pub end: Location,
    /// Contains a `var()`, `env()` or placeholder somewhere
    pub is_var: bool,
}

impl PropertyValue {
    /// Builds a value from its parts. `source` is the text the part positions refer to.
    pub fn from_parts(parts: Vec<ValuePart>, source: &str) -> Self {
        let location = parts.first().map(|p| p.location()).unwrap_or_default();
        let end = parts.last().map(|p| p.end).unwrap_or(location);
        let text = source.get(location.offset..end.offset).unwrap_or("").to_string();
        let is_var = parts.iter().any(|p| p.is_var);
        Self {
            parts,
            text,
            location,
            end,
            is_var,
        }
    }

    /// An empty value (allowed for custom properties) at the given position
    pub fn empty(at: Location) -> Self {
        Self {
            parts: vec![],
            text: String::new(),
            location: at,
            end: at,
            is_var: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl ShiftPosition for PropertyValue {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.parts.shift_position(delta);
        self.location.shift_position(delta);
        self.end.shift_position(delta);
    }
}

impl ShiftPosition for Token {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
        self.end.shift_position(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    #[test]
    fn parts_from_tokens() {
        let mut t = Tokenizer::new("10px --x , 'a'");
        let len = ValuePart::from_token(t.grab());
        assert_eq!(len.part_type, PartType::Length);
        assert_eq!(ValuePart::from_token(t.grab()).part_type, PartType::CustomProperty);
        assert_eq!(ValuePart::from_token(t.grab()).part_type, PartType::Operator);
        assert_eq!(ValuePart::from_token(t.grab()).part_type, PartType::String);
    }

    #[test]
    fn value_text_spans_all_parts() {
        let css = "a: 1px  solid red;";
        let mut t = Tokenizer::new(css);
        t.grab();
        t.grab();
        let parts = (0..3).map(|_| ValuePart::from_token(t.grab())).collect::<Vec<_>>();
        let value = PropertyValue::from_parts(parts, css);
        assert_eq!(value.text, "1px  solid red");
        assert_eq!(value.location, Location::new(1, 4, 3));
        assert_eq!(value.end, Location::new(1, 18, 17));
    }

    #[test]
    fn shifting_moves_nested_parts() {
        let css = "f(a)";
        let mut t = Tokenizer::new(css);
        let mut func = ValuePart::from_token(t.grab());
        let arg = ValuePart::from_token(t.grab());
        func.expr = Some(PropertyValue::from_parts(vec![arg], css));
        let mut value = PropertyValue::from_parts(vec![func], css);

        let delta = PositionDelta::between(Location::new(1, 1, 0), Location::new(3, 5, 40));
        value.shift_position(&delta);
        assert_eq!(value.location, Location::new(3, 5, 40));
        let inner = value.parts[0].expr.as_ref().map(|e| e.location);
        assert_eq!(inner, Some(Location::new(3, 7, 42)));
    }
}
