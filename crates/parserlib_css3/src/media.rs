use crate::tokens::Token;
use crate::value::PropertyValue;
use parserlib_shared::location::{Location, PositionDelta, ShiftPosition};
use serde::Serialize;
use std::fmt;

/// A `(feature: value)` expression of a media query
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MediaFeature {
    /// The feature name (or the number of a range like `(400px < width)`)
    pub name: Token,
    /// Everything after the name up to the closing parenthesis
    pub expr: Option<PropertyValue>,
    pub text: String,
    pub location: Location,
    pub end: Location,
}

/// One query of a media query list, e.g. `only screen and (color)`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MediaQuery {
    /// `only` or `not`
    pub modifier: Option<String>,
    pub media_type: Option<String>,
    pub features: Vec<MediaFeature>,
    pub text: String,
    pub location: Location,
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl ShiftPosition for MediaFeature {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.name.shift_position(delta);
        self.expr.shift_position(delta);
        self.location.shift_position(delta);
        self.end.shift_position(delta);
    }
}

impl ShiftPosition for MediaQuery {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.features.shift_position(delta);
        self.location.shift_position(delta);
    }
}
