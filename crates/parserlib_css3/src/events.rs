//! Events fired by the parser
//!
//! The parser does not build a tree. It reports what it finds as a flat sequence of
//! `ParseEvent`s: block-like constructs produce a start and an end event, statements and
//! declarations a single event. Listeners receive the events in source order.

use crate::media::MediaQuery;
use crate::selector::Selector;
use crate::value::PropertyValue;
use parserlib_shared::errors::CssError;
use parserlib_shared::location::{Location, PositionDelta, ShiftPosition};
use serde::Serialize;
use std::fmt;

/// Name of a declared property
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyName {
    /// Name as written, without a `*` or `_` hack prefix
    pub text: String,
    /// `*` or `_` when an IE hack was used
    pub hack: Option<char>,
    /// Position of the name (including the hack prefix)
    pub location: Location,
    /// Position of the name after a `-vendor-` prefix, 0 without prefix
    pub vendor_pos: usize,
}

impl PropertyName {
    /// A name without hack prefix; the vendor prefix is detected from the text
    pub fn new(text: &str, location: Location) -> Self {
        let vendor_pos = match text.strip_prefix('-') {
            Some(rest) if !rest.starts_with('-') => rest.find('-').filter(|&i| i > 0).map_or(0, |i| i + 2),
            _ => 0,
        };
        Self {
            text: text.to_string(),
            hack: None,
            location,
            vendor_pos,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.text.starts_with("--")
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hack {
            Some(hack) => write!(f, "{}{}", hack, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

/// A `name: value` declaration
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Declaration {
    pub property: PropertyName,
    pub value: PropertyValue,
    pub important: bool,
    /// Declaration inside a condition, e.g. `@supports (display: grid)`
    pub in_parens: bool,
    /// At-rule whose descriptor table was used for validation
    pub scope: Option<String>,
    /// Validation error, the declaration is still reported
    pub invalid: Option<CssError>,
}

/// Constructs that have a body
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum BlockKind {
    Rule { selectors: Vec<Selector> },
    Media { media: Vec<MediaQuery> },
    Supports,
    Container { name: Option<String> },
    Layer { id: Option<String> },
    Scope {
        start: Option<Vec<Selector>>,
        end: Option<Vec<Selector>>,
    },
    Document { functions: Vec<String> },
    FontFace,
    FontPaletteValues { id: String },
    Page { id: Option<String>, pseudo: Option<String> },
    PageMargin { margin: String },
    Property { name: String },
    CounterStyle { name: String },
    Viewport,
    Keyframes { name: String, prefix: Option<String> },
    KeyframeRule { keys: Vec<String> },
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Rule { .. } => "rule",
            BlockKind::Media { .. } => "media",
            BlockKind::Supports => "supports",
            BlockKind::Container { .. } => "container",
            BlockKind::Layer { .. } => "layer",
            BlockKind::Scope { .. } => "scope",
            BlockKind::Document { .. } => "document",
            BlockKind::FontFace => "fontface",
            BlockKind::FontPaletteValues { .. } => "fontpalettevalues",
            BlockKind::Page { .. } => "page",
            BlockKind::PageMargin { .. } => "pagemargin",
            BlockKind::Property { .. } => "property",
            BlockKind::CounterStyle { .. } => "counterstyle",
            BlockKind::Viewport => "viewport",
            BlockKind::Keyframes { .. } => "keyframes",
            BlockKind::KeyframeRule { .. } => "keyframerule",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum EventKind {
    StartStylesheet,
    EndStylesheet,
    Charset {
        charset: String,
    },
    Import {
        uri: String,
        layer: Option<String>,
        media: Vec<MediaQuery>,
    },
    Namespace {
        prefix: Option<String>,
        uri: String,
    },
    /// `@layer a, b;` statement
    Layer {
        ids: Vec<String>,
    },
    Start(BlockKind),
    End {
        kind: BlockKind,
        /// The body had no declarations or nested rules
        empty: bool,
    },
    /// `selector()` function in an `@supports` condition
    SupportsSelector {
        selector: Selector,
    },
    Property(Box<Declaration>),
    Error {
        error: CssError,
        /// False when the error happened at the end of input
        recoverable: bool,
    },
    Warning {
        message: String,
    },
}

/// An event with the position where the construct starts
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParseEvent {
    pub kind: EventKind,
    pub location: Location,
}

impl ParseEvent {
    pub fn new(kind: EventKind, location: Location) -> Self {
        Self { kind, location }
    }

    /// Lowercase event name such as `startrule` or `property`
    pub fn name(&self) -> String {
        match &self.kind {
            EventKind::StartStylesheet => "startstylesheet".into(),
            EventKind::EndStylesheet => "endstylesheet".into(),
            EventKind::Charset { .. } => "charset".into(),
            EventKind::Import { .. } => "import".into(),
            EventKind::Namespace { .. } => "namespace".into(),
            EventKind::Layer { .. } => "layer".into(),
            EventKind::Start(kind) => format!("start{}", kind.name()),
            EventKind::End { kind, .. } => format!("end{}", kind.name()),
            EventKind::SupportsSelector { .. } => "supportsselector".into(),
            EventKind::Property(_) => "property".into(),
            EventKind::Error { .. } => "error".into(),
            EventKind::Warning { .. } => "warning".into(),
        }
    }

    /// The declaration of a `property` event
    pub fn declaration(&self) -> Option<&Declaration> {
        match &self.kind {
            EventKind::Property(decl) => Some(decl),
            _ => None,
        }
    }

    /// Syntax error or validation failure reported by this event
    pub fn diagnostic(&self) -> Option<&CssError> {
        match &self.kind {
            EventKind::Error { error, .. } => Some(error),
            EventKind::Property(decl) => decl.invalid.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location, self.name())?;
        match &self.kind {
            EventKind::Start(BlockKind::Rule { selectors }) => {
                let list = selectors.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
                write!(f, " {}", list.join(", "))
            }
            EventKind::Start(BlockKind::Media { media }) => {
                let list = media.iter().map(|m| m.text.as_str()).collect::<Vec<_>>();
                write!(f, " {}", list.join(", "))
            }
            EventKind::Property(decl) => {
                write!(f, " {}: {}", decl.property, decl.value)?;
                if decl.important {
                    write!(f, " !important")?;
                }
                if let Some(err) = &decl.invalid {
                    write!(f, " [invalid: {}]", err.message)?;
                }
                Ok(())
            }
            EventKind::Error { error, .. } => write!(f, " {}", error.message),
            EventKind::Warning { message } => write!(f, " {}", message),
            EventKind::Import { uri, .. } => write!(f, " {}", uri),
            EventKind::Namespace { uri, .. } => write!(f, " {}", uri),
            EventKind::Layer { ids } => write!(f, " {}", ids.join(", ")),
            _ => Ok(()),
        }
    }
}

impl ShiftPosition for PropertyName {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
    }
}

impl ShiftPosition for Declaration {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.property.shift_position(delta);
        self.value.shift_position(delta);
        self.invalid.shift_position(delta);
    }
}

impl ShiftPosition for BlockKind {
    fn shift_position(&mut self, delta: &PositionDelta) {
        match self {
            BlockKind::Rule { selectors } => selectors.shift_position(delta),
            BlockKind::Media { media } => media.shift_position(delta),
            BlockKind::Scope { start, end } => {
                start.shift_position(delta);
                end.shift_position(delta);
            }
            _ => {}
        }
    }
}

impl ShiftPosition for ParseEvent {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
        match &mut self.kind {
            EventKind::Import { media, .. } => media.shift_position(delta),
            EventKind::Start(kind) | EventKind::End { kind, .. } => kind.shift_position(delta),
            EventKind::SupportsSelector { selector } => selector.shift_position(delta),
            EventKind::Property(decl) => decl.shift_position(delta),
            EventKind::Error { error, .. } => error.shift_position(delta),
            _ => {}
        }
    }
}

/// Receives the events of a parse
pub trait ParseListener {
    fn on_event(&mut self, event: &ParseEvent);
}

impl ParseListener for Vec<ParseEvent> {
    fn on_event(&mut self, event: &ParseEvent) {
        self.push(event.clone());
    }
}

/// Adapts a closure to a `ParseListener`
pub struct CallbackListener<F: FnMut(&ParseEvent)>(pub F);

impl<F: FnMut(&ParseEvent)> ParseListener for CallbackListener<F> {
    fn on_event(&mut self, event: &ParseEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        let loc = Location::default();
        let start = ParseEvent::new(EventKind::Start(BlockKind::FontFace), loc);
        assert_eq!(start.name(), "startfontface");
        let end = ParseEvent::new(
            EventKind::End {
                kind: BlockKind::Supports,
                empty: true,
            },
            loc,
        );
        assert_eq!(end.name(), "endsupports");
    }

    #[test]
    fn shifting_errors() {
        let err = CssError::with_location("Unexpected \"}\".", Location::new(2, 3, 9));
        let mut event = ParseEvent::new(
            EventKind::Error {
                error: err,
                recoverable: true,
            },
            Location::new(2, 3, 9),
        );
        let delta = PositionDelta::between(Location::new(1, 1, 0), Location::new(3, 1, 20));
        event.shift_position(&delta);
        assert_eq!(event.location, Location::new(4, 3, 29));
        assert_eq!(event.diagnostic().and_then(|e| e.location), Some(Location::new(4, 3, 29)));
    }

    #[test]
    fn listeners() {
        let mut count = 0;
        {
            let mut listener = CallbackListener(|_: &ParseEvent| count += 1);
            listener.on_event(&ParseEvent::new(EventKind::StartStylesheet, Location::default()));
        }
        assert_eq!(count, 1);

        let mut collected: Vec<ParseEvent> = vec![];
        collected.on_event(&ParseEvent::new(EventKind::EndStylesheet, Location::default()));
        assert_eq!(collected.len(), 1);
    }
}
