use crate::location::{Location, PositionDelta, ShiftPosition};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The two families of problems found in a stylesheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Token stream or grammar production problems (unexpected token, unterminated construct)
    Syntax,
    /// A declaration value that does not match the grammar of its property
    Validation,
}

/// Parser error that defines an error (message) on the given position
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CssError {
    pub kind: ErrorKind,
    /// Error message
    pub message: String,
    /// Location of the error, if available (during parsing mostly)
    pub location: Option<Location>,
}

impl CssError {
    #[must_use]
    pub fn new(message: &str) -> Self {
        CssError {
            kind: ErrorKind::Syntax,
            message: message.to_string(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(message: &str, location: Location) -> Self {
        CssError {
            kind: ErrorKind::Syntax,
            message: message.to_string(),
            location: Some(location),
        }
    }

    #[must_use]
    pub fn validation(message: &str, location: Location) -> Self {
        CssError {
            kind: ErrorKind::Validation,
            message: message.to_string(),
            location: Some(location),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

impl Display for CssError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{} at {:?}", self.message, loc),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CssError {}

impl ShiftPosition for CssError {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
    }
}

pub type CssResult<T> = Result<T, CssError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = CssError::with_location("Unexpected \"}\".", Location::new(2, 4, 10));
        assert_eq!(err.to_string(), "Unexpected \"}\". at (2:4)");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(CssError::new("oops").to_string(), "oops");
        assert!(CssError::validation("bad", Location::default()).is_validation());
    }

    #[test]
    fn errors_move_with_their_source() {
        let mut err = CssError::with_location("bad", Location::new(2, 4, 10));
        err.shift_position(&PositionDelta::between(Location::new(2, 1, 7), Location::new(3, 3, 12)));
        assert_eq!(err.location, Some(Location::new(3, 6, 15)));

        let mut bare = CssError::new("oops");
        bare.shift_position(&PositionDelta::between(Location::new(1, 1, 0), Location::new(2, 1, 5)));
        assert_eq!(bare.location, None);
    }
}
