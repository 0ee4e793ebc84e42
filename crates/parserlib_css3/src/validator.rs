use crate::definitions::{self, Definition, Scope};
use crate::events::PropertyName;
use crate::matcher::{GrammarCache, PartIter};
use crate::Css3;
use crate::tokens::{clip_string, GLOBAL_KEYWORDS};
use crate::value::{PartType, PropertyValue};
use parserlib_shared::errors::{CssError, CssResult};
use parserlib_shared::location::Location;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Checks declaration values against the grammar of their property.
///
/// Values that passed once are remembered per property and at-rule scope, so re-validating an
/// unchanged declaration is a set lookup.
#[derive(Default)]
pub struct Validator {
    grammars: GrammarCache,
    known: RefCell<HashMap<KnownKey, HashSet<String>>>,
}

/// Descriptor table name (`None` for style rules) and property
type KnownKey = (Option<&'static str>, String);

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grammars(&self) -> &GrammarCache {
        &self.grammars
    }

    /// Validates a declaration. `scope` is the at-rule (such as `font-face`) whose descriptor
    /// table applies, `None` for regular style rules.
    pub fn validate(&self, name: &PropertyName, value: &PropertyValue, scope: Option<&str>) -> CssResult<()> {
        let table = scope.and_then(definitions::scope);
        let mut prop = name.text.to_lowercase();
        let mut definition = lookup(table, &prop);
        let vendor_pos = name.vendor_pos;
        if definition.is_none() && vendor_pos > 0 {
            prop = prop.get(vendor_pos..).unwrap_or_default().to_string();
            definition = lookup(table, &prop);
        }

        let grammar = match definition {
            Some(Definition::Grammar(grammar)) => grammar,
            Some(Definition::Any) => return Ok(()),
            None if vendor_pos > 0 => return Ok(()),
            None => {
                let misplaced = table.is_some() && definitions::property(&prop).is_some();
                let what = if misplaced { "Misplaced" } else { "Unknown" };
                return Err(CssError::validation(
                    &format!("{} property \"{}\".", what, name),
                    name.location,
                ));
            }
        };

        if value.is_var {
            return Ok(());
        }
        if let Some(first) = value.parts.first() {
            if first.part_type == PartType::Ident && GLOBAL_KEYWORDS.has(&first.token.text) {
                return match value.parts.get(1) {
                    Some(next) => Err(failure("end of value", &next.text, next.location())),
                    None => Ok(()),
                };
            }
        }

        let source = value.text.trim();
        let key = (table.map(|t| t.name), prop.clone());
        if self.known.borrow().get(&key).is_some_and(|k| k.contains(source)) {
            return Ok(());
        }

        let matcher = match self.grammars.compile(grammar) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("{} ({})", e.message, prop);
                return Ok(());
            }
        };
        let mut it = PartIter::new(&value.parts);
        let mut matched = matcher.matches(&mut it, &self.grammars).is_some();
        if (!matched || !it.at_end()) && mentions_attr(source) {
            if !matched {
                it.pos = 0;
                it.try_attr = true;
                matched = matcher.matches(&mut it, &self.grammars).is_some();
            }
            while it.current().is_some_and(|p| p.is_attr) {
                it.pos += 1;
            }
        }

        if let Some(extra) = it.current().filter(|_| matched || it.pos > 0) {
            log::trace!("{}: extra value part {}", prop, extra.text);
            return Err(failure("end of value", &extra.text, extra.location()));
        }
        if !matched {
            log::trace!("{}: \"{}\" does not match {}", prop, source, grammar);
            return Err(match it.bad_func {
                Some(bad) => failure(&bad.matcher.to_string(), &bad.args.text, bad.args.location),
                None => failure(&self.describe(grammar), &value.text, value.location),
            });
        }

        self.known.borrow_mut().entry(key).or_default().insert(source.to_string());
        Ok(())
    }

    /// Parses `value` and validates it as the value of `property`
    pub fn validate_str(&self, property: &str, value: &str) -> CssResult<()> {
        let value = Css3::parse_property_value(value)?;
        self.validate(&PropertyName::new(property, Location::default()), &value, None)
    }

    /// Readable form of a grammar for error messages, with named types expanded
    pub fn describe(&self, grammar: &str) -> String {
        let text = definitions::named_type(grammar)
            .or_else(|| {
                let name = grammar.strip_prefix('<')?.strip_suffix('>')?;
                match definitions::property(name) {
                    Some(Definition::Grammar(g)) => Some(g),
                    _ => None,
                }
            })
            .unwrap_or(grammar);
        if !text.contains('<') {
            return text.to_string();
        }
        match self.grammars.compile(text) {
            Ok(m) => m.to_string(),
            Err(_) => text.to_string(),
        }
    }

    /// Number of remembered valid values, over all properties
    pub fn known_values(&self) -> usize {
        self.known.borrow().values().map(HashSet::len).sum()
    }
}

fn lookup(table: Option<&Scope>, prop: &str) -> Option<Definition> {
    match table {
        Some(scope) => scope
            .descriptor(prop)
            .or_else(|| scope.all_properties.then(|| definitions::property(prop)).flatten()),
        None => definitions::property(prop),
    }
}

fn failure(expected: &str, found: &str, location: Location) -> CssError {
    CssError::validation(
        &format!("Expected {} but found \"{}\".", expected, clip_string(found, 30)),
        location,
    )
}

/// True when `attr(` appears at the start of a word
fn mentions_attr(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.match_indices("attr(").any(|(i, _)| {
        lower[..i]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn border_width() {
        let v = Validator::new();
        assert!(v.validate_str("border-width", "2px").is_ok());
        assert!(v.validate_str("border-width", "thin 0 1em").is_ok());

        let err = v.validate_str("border-width", "2zz").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message, "Expected [ thin | medium | thick | <len> ]{1,4} but found \"2zz\".");
        assert_eq!(err.location, Some(Location::new(1, 1, 0)));
    }

    #[test]
    fn leftover_parts() {
        let v = Validator::new();
        let err = v.validate_str("border-width", "1px 2zz").unwrap_err();
        assert_eq!(err.message, "Expected end of value but found \"2zz\".");
        assert_eq!(err.location, Some(Location::new(1, 5, 4)));

        let err = v.validate_str("color", "inherit red").unwrap_err();
        assert_eq!(err.message, "Expected end of value but found \"red\".");
    }

    #[test_case("-moz-bogus", "1", true; "unknown vendor property")]
    #[test_case("-webkit-border-width", "1px", true; "vendor fallback")]
    #[test_case("-webkit-border-width", "1zz", false; "vendor fallback checks the value")]
    #[test_case("quotes", "anything goes", true; "any value")]
    #[test_case("z-index", "initial", true; "global keyword")]
    #[test_case("bogus", "1", false; "unknown property")]
    fn property_names(property: &str, value: &str, valid: bool) {
        let v = Validator::new();
        assert_eq!(v.validate_str(property, value).is_ok(), valid);
    }

    #[test]
    fn unknown_property_message() {
        let err = Validator::new().validate_str("bogus", "1").unwrap_err();
        assert_eq!(err.message, "Unknown property \"bogus\".");
    }

    #[test]
    fn scoped_descriptors() {
        let v = Validator::new();
        let value = Css3::parse_property_value("swap").unwrap();
        let name = PropertyName::new("font-display", Location::default());
        assert!(v.validate(&name, &value, Some("font-face")).is_ok());

        let value = Css3::parse_property_value("red").unwrap();
        let name = PropertyName::new("color", Location::default());
        let err = v.validate(&name, &value, Some("font-face")).unwrap_err();
        assert_eq!(err.message, "Misplaced property \"color\".");
        // @page falls back to all properties
        assert!(v.validate(&name, &value, Some("page")).is_ok());
    }

    #[test_case("viewport", "width", "device-width")]
    #[test_case("font-face", "font-weight", "auto")]
    fn descriptor_values_stay_in_their_scope(scope: &str, property: &str, value: &str) {
        let v = Validator::new();
        let parsed = Css3::parse_property_value(value).unwrap();
        let name = PropertyName::new(property, Location::default());
        assert!(v.validate(&name, &parsed, Some(scope)).is_ok());
        assert!(v.validate(&name, &parsed, Some(scope)).is_ok());
        assert!(v.validate(&name, &parsed, None).is_err());
        assert!(v.validate_str(property, value).is_err());
    }

    #[test]
    fn bad_function_arguments() {
        let v = Validator::new();
        let err = v.validate_str("transform", "rotate(1px)").unwrap_err();
        assert_eq!(err.message, "Expected none | <angle-or-0> but found \"1px\".");
        assert_eq!(err.location, Some(Location::new(1, 8, 7)));
    }

    #[test]
    fn variables_and_known_values() {
        let v = Validator::new();
        assert!(v.validate_str("width", "var(--w)").is_ok());
        assert!(v.validate_str("width", "10px").is_ok());
        assert!(v.validate_str("width", "10px").is_ok());
        assert_eq!(v.known_values(), 1);
    }

    #[test]
    fn attr_is_tried_where_types_fail() {
        let v = Validator::new();
        assert!(v.validate_str("width", "attr(data-w px)").is_ok());
        assert!(mentions_attr("ATTR(x)"));
        assert!(!mentions_attr("xattr(x)"));
    }
}
