//! Selector model
//!
//! A `Selector` is a list of simple selector sequences (`SelectorPart`) joined by combinators.
//! Every part holds an optional namespace and element name and the modifiers that follow them
//! (`#id`, `.class`, `[attr]`, `:pseudo` and `&`). Specificity is always calculated from the
//! parsed structure, it is never stored separately.

use crate::value::PropertyValue;
use parserlib_shared::location::{Location, PositionDelta, ShiftPosition};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Pseudo-elements that may be written with a single colon
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CombinatorKind {
    /// Whitespace
    Descendant,
    /// `>`
    Child,
    /// `+`
    AdjacentSibling,
    /// `~`
    Sibling,
    /// `||`
    Column,
}

impl CombinatorKind {
    pub fn from_text(text: &str) -> CombinatorKind {
        match text {
            ">" => CombinatorKind::Child,
            "+" => CombinatorKind::AdjacentSibling,
            "~" => CombinatorKind::Sibling,
            "||" => CombinatorKind::Column,
            _ => CombinatorKind::Descendant,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Combinator {
    pub kind: CombinatorKind,
    pub text: String,
    pub location: Location,
}

/// The argument of a functional pseudo-class
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PseudoArgs {
    /// `:not()`, `:is()`, `:where()`, `:any()` and `:has()`
    Selectors(Vec<Selector>),
    /// `:nth-child(An+B of S)`
    Nth {
        a: String,
        b: String,
        of: Vec<Selector>,
    },
    /// Any other function, e.g. `:lang(en)` or `:dir(rtl)`
    Value(Option<PropertyValue>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SubPartKind {
    /// `&`
    Amp,
    /// `#name`
    Id,
    /// `.name`
    Class,
    /// `[ns|name op "value" i]`
    Attribute {
        ns: Option<String>,
        name: String,
        op: Option<String>,
        value: Option<String>,
        flag: Option<String>,
    },
    /// `:name`, `::name` or `:name(args)`
    Pseudo {
        /// Lowercase name without colons (and without vendor prefix for functions)
        name: String,
        colons: usize,
        args: Option<PseudoArgs>,
    },
}

/// A modifier of a simple selector sequence
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectorSubPart {
    pub kind: SubPartKind,
    pub text: String,
    pub location: Location,
}

impl SelectorSubPart {
    pub fn is_pseudo_element(&self) -> bool {
        match &self.kind {
            SubPartKind::Pseudo { name, colons, args } => {
                *colons == 2 || (args.is_none() && LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()))
            }
            _ => false,
        }
    }
}

/// A simple selector sequence such as `ns|a.b:hover`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectorPart {
    /// `ns` in `ns|a`, `*` in `*|a`, empty in `|a`
    pub namespace: Option<String>,
    pub element_name: Option<String>,
    pub modifiers: Vec<SelectorSubPart>,
    pub text: String,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum SelectorItem {
    Part(SelectorPart),
    Combinator(Combinator),
}

impl SelectorItem {
    pub fn location(&self) -> Location {
        match self {
            SelectorItem::Part(p) => p.location,
            SelectorItem::Combinator(c) => c.location,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selector {
    pub items: Vec<SelectorItem>,
    pub text: String,
    pub location: Location,
    pub end: Location,
}

impl Selector {
    pub fn parts(&self) -> impl Iterator<Item = &SelectorPart> {
        self.items.iter().filter_map(|item| match item {
            SelectorItem::Part(p) => Some(p),
            SelectorItem::Combinator(_) => None,
        })
    }

    /// A relative selector starts with a combinator, e.g. `> a` inside `:has()`
    pub fn is_relative(&self) -> bool {
        matches!(self.items.first(), Some(SelectorItem::Combinator(_)))
    }

    pub fn specificity(&self) -> Specificity {
        Specificity::calculate(self)
    }

    /// Uses the `&` nesting selector anywhere, including inside `:is()` and friends
    pub fn uses_amp(&self) -> bool {
        self.parts().flat_map(|p| &p.modifiers).any(|m| match &m.kind {
            SubPartKind::Amp => true,
            SubPartKind::Pseudo { args: Some(PseudoArgs::Selectors(list)), .. }
            | SubPartKind::Pseudo { args: Some(PseudoArgs::Nth { of: list, .. }), .. } => {
                list.iter().any(Selector::uses_amp)
            }
            _ => false,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Selector weight. `a` is always 0 for selectors in a stylesheet, `b` counts ids, `c` classes,
/// attributes and pseudo-classes, `d` element names and pseudo-elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Specificity {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl Specificity {
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    pub fn calculate(selector: &Selector) -> Self {
        let mut total = Specificity::default();
        for part in selector.parts() {
            total.add_part(part);
        }
        total
    }

    /// The most specific selector of a list, as used by `:is()`, `:not()` and `:has()`
    fn max_of(selectors: &[Selector]) -> Self {
        selectors.iter().map(Specificity::calculate).max().unwrap_or_default()
    }

    fn add(&mut self, other: Specificity) {
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
    }

    fn add_part(&mut self, part: &SelectorPart) {
        if part.element_name.as_deref().is_some_and(|name| !name.ends_with('*')) {
            self.d += 1;
        }
        for modifier in &part.modifiers {
            match &modifier.kind {
                SubPartKind::Amp => {}
                SubPartKind::Id => self.b += 1,
                SubPartKind::Class | SubPartKind::Attribute { .. } => self.c += 1,
                SubPartKind::Pseudo { name, args, .. } => match (name.as_str(), args) {
                    ("where", _) => {}
                    (_, Some(PseudoArgs::Selectors(list))) => self.add(Specificity::max_of(list)),
                    (_, Some(PseudoArgs::Nth { of, .. })) => {
                        self.c += 1;
                        self.add(Specificity::max_of(of));
                    }
                    _ if modifier.is_pseudo_element() => self.d += 1,
                    _ => self.c += 1,
                },
            }
        }
    }

    /// Single number for quick sorting
    pub fn value(&self) -> u32 {
        self.a * 1000 + self.b * 100 + self.c * 10 + self.d
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.a, self.b, self.c, self.d).cmp(&(other.a, other.b, other.c, other.d))
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.a, self.b, self.c, self.d)
    }
}

impl ShiftPosition for Combinator {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
    }
}

impl ShiftPosition for PseudoArgs {
    fn shift_position(&mut self, delta: &PositionDelta) {
        match self {
            PseudoArgs::Selectors(list) => list.shift_position(delta),
            PseudoArgs::Nth { of, .. } => of.shift_position(delta),
            PseudoArgs::Value(value) => value.shift_position(delta),
        }
    }
}

impl ShiftPosition for SelectorSubPart {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
        if let SubPartKind::Pseudo { args, .. } = &mut self.kind {
            args.shift_position(delta);
        }
    }
}

impl ShiftPosition for SelectorPart {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.location.shift_position(delta);
        self.modifiers.shift_position(delta);
    }
}

impl ShiftPosition for SelectorItem {
    fn shift_position(&mut self, delta: &PositionDelta) {
        match self {
            SelectorItem::Part(p) => p.shift_position(delta),
            SelectorItem::Combinator(c) => c.shift_position(delta),
        }
    }
}

impl ShiftPosition for Selector {
    fn shift_position(&mut self, delta: &PositionDelta) {
        self.items.shift_position(delta);
        self.location.shift_position(delta);
        self.end.shift_position(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(element: Option<&str>, modifiers: Vec<SubPartKind>) -> SelectorItem {
        SelectorItem::Part(SelectorPart {
            namespace: None,
            element_name: element.map(String::from),
            modifiers: modifiers
                .into_iter()
                .map(|kind| SelectorSubPart {
                    kind,
                    text: String::new(),
                    location: Location::default(),
                })
                .collect(),
            text: String::new(),
            location: Location::default(),
        })
    }

    fn selector(items: Vec<SelectorItem>) -> Selector {
        Selector {
            items,
            text: String::new(),
            location: Location::default(),
            end: Location::default(),
        }
    }

    fn descendant() -> SelectorItem {
        SelectorItem::Combinator(Combinator {
            kind: CombinatorKind::Descendant,
            text: " ".into(),
            location: Location::default(),
        })
    }

    fn pseudo(name: &str, colons: usize, args: Option<PseudoArgs>) -> SubPartKind {
        SubPartKind::Pseudo {
            name: name.into(),
            colons,
            args,
        }
    }

    #[test]
    fn id_class_element() {
        // #id .cls a
        let sel = selector(vec![
            part(None, vec![SubPartKind::Id]),
            descendant(),
            part(None, vec![SubPartKind::Class]),
            descendant(),
            part(Some("a"), vec![]),
        ]);
        assert_eq!(sel.specificity(), Specificity::new(0, 1, 1, 1));
        assert_eq!(sel.specificity().to_string(), "0,1,1,1");
        assert_eq!(sel.specificity().value(), 111);
    }

    #[test]
    fn negation_counts_its_argument() {
        // a:not(.cls)
        let inner = selector(vec![part(None, vec![SubPartKind::Class])]);
        let sel = selector(vec![part(
            Some("a"),
            vec![pseudo("not", 1, Some(PseudoArgs::Selectors(vec![inner])))],
        )]);
        assert_eq!(sel.specificity(), Specificity::new(0, 0, 1, 1));
    }

    #[test]
    fn pseudo_elements_and_where() {
        // *::before:hover:where(#x)
        let inner = selector(vec![part(None, vec![SubPartKind::Id])]);
        let sel = selector(vec![part(
            Some("*"),
            vec![
                pseudo("before", 2, None),
                pseudo("hover", 1, None),
                pseudo("where", 1, Some(PseudoArgs::Selectors(vec![inner]))),
            ],
        )]);
        assert_eq!(sel.specificity(), Specificity::new(0, 0, 1, 1));

        let legacy = selector(vec![part(Some("p"), vec![pseudo("first-line", 1, None)])]);
        assert_eq!(legacy.specificity(), Specificity::new(0, 0, 0, 2));
    }

    #[test]
    fn ordering() {
        assert!(Specificity::new(0, 1, 0, 0) > Specificity::new(0, 0, 9, 9));
        assert!(Specificity::new(0, 0, 1, 2) < Specificity::new(0, 0, 2, 0));
    }
}
