//! Grammar matchers
//!
//! A `Matcher` is the compiled form of a value definition such as `<len> | auto`. Matchers are
//! built by the `GrammarCache`, which hands out the same `Rc` for the same grammar text, and
//! are run against the parts of a property value through a `PartIter`.
//!
//! Matching follows the combinators of the value definition syntax. `&&` and `||` groups are
//! matched with a depth-first search that also backtracks over successful matches, because a
//! greedy choice (e.g. `<time>` taking the first duration of `animation`) can block a valid
//! assignment further on.

use crate::definitions::{self, Definition, FunctionGroup};
use crate::syntax::{parse_grammar, Multiplier, SyntaxNode};
use crate::tokens::{TokenKind, GLOBAL_KEYWORDS};
use crate::value::{PartType, PropertyValue, ValuePart};
use lazy_static::lazy_static;
use parserlib_shared::errors::{CssError, CssResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

// Binding strength of the combinators, used to decide where brackets are needed when a
// matcher is printed.
const PREC_MOD: u8 = 5;
const PREC_SEQ: u8 = 4;
const PREC_ANDAND: u8 = 3;
const PREC_OROR: u8 = 2;
const PREC_ALT: u8 = 1;

pub type SimpleTest = fn(&ValuePart) -> bool;

#[derive(Clone)]
pub enum Matcher {
    /// Literal words, compared case-insensitively
    Keywords { words: Vec<String>, text: String },
    /// A basic type tested by a predicate, e.g. `<len>`
    Simple { name: &'static str, test: SimpleTest },
    /// `name( body )`; without a body any arguments are accepted
    Function { name: String, body: Option<Rc<Matcher>> },
    /// `<fn:group>`: any function of a group, with per-function argument grammars
    FunctionGroup { group: &'static FunctionGroup },
    Alt(Vec<Rc<Matcher>>),
    Seq(Vec<Rc<Matcher>>),
    /// `&&` when `required` is set (per member), `||` otherwise
    Many {
        members: Vec<Rc<Matcher>>,
        required: Option<Vec<bool>>,
    },
    Braces {
        inner: Rc<Matcher>,
        min: usize,
        max: usize,
        marker: Option<char>,
        /// Matched before every repetition after the first, e.g. `, <inner>` for `#`
        separator: Option<Rc<Matcher>>,
    },
    /// A named type that is printed by its name instead of its expansion
    Alias { name: String, inner: Rc<Matcher> },
    /// A `[ ... ]` block whose contents match the inner matcher
    Bracketed(Rc<Matcher>),
}

/// A function whose arguments did not match, kept for the error message
pub struct BadFunction<'a> {
    pub args: &'a PropertyValue,
    pub matcher: Rc<Matcher>,
}

/// Cursor over the parts of a value
pub struct PartIter<'a> {
    pub parts: &'a [ValuePart],
    pub pos: usize,
    /// Accept `attr()` wherever a basic type is expected
    pub try_attr: bool,
    pub bad_func: Option<BadFunction<'a>>,
}

impl<'a> PartIter<'a> {
    pub fn new(parts: &'a [ValuePart]) -> Self {
        Self {
            parts,
            pos: 0,
            try_attr: false,
            bad_func: None,
        }
    }

    pub fn current(&self) -> Option<&'a ValuePart> {
        self.parts.get(self.pos)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.parts.len()
    }
}

fn is_global_keyword(p: &ValuePart) -> bool {
    GLOBAL_KEYWORDS.has(&p.token.text)
}

fn is_custom_ident(p: &ValuePart) -> bool {
    p.kind() == TokenKind::Ident && !is_global_keyword(p)
}

fn custom_ident_except(p: &ValuePart, excluded: &[&str]) -> bool {
    is_custom_ident(p) && !excluded.iter().any(|e| e.eq_ignore_ascii_case(&p.token.text))
}

/// Value of a unitless integer
fn int(p: &ValuePart) -> Option<f64> {
    match p.kind() {
        TokenKind::Number if p.token.is_int() => p.number(),
        _ => None,
    }
}

fn number_of(p: &ValuePart, kinds: &[TokenKind]) -> Option<f64> {
    if kinds.contains(&p.kind()) {
        p.number()
    } else {
        None
    }
}

fn in_range(n: Option<f64>, min: f64, max: f64) -> bool {
    n.is_some_and(|n| n >= min && n <= max)
}

/// Channel keyword of a relative color, e.g. `r`, `g`, `b` or `alpha` for `rgb(from ...)`
fn is_relative_channel(p: &ValuePart, letters: &str) -> bool {
    if p.kind() != TokenKind::Ident {
        return false;
    }
    let text = p.token.text.to_ascii_lowercase();
    match text.len() {
        1 => letters.contains(text.as_str()),
        _ => text == "alpha",
    }
}

macro_rules! relative_color {
    ($tests:ident, $name:literal) => {
        $tests.insert(
            concat!("<rel-", $name, ">"),
            (|p: &ValuePart| p.is_none || is_relative_channel(p, $name)) as SimpleTest,
        );
        $tests.insert(
            concat!("<rel-", $name, "-num-pct>"),
            (|p: &ValuePart| {
                p.is_none
                    || p.is_calc
                    || matches!(p.kind(), TokenKind::Number | TokenKind::Percentage)
                    || is_relative_channel(p, $name)
            }) as SimpleTest,
        );
    };
}

lazy_static! {
    /// Basic types that are tested directly on a single value part
    static ref SIMPLE_TYPES: HashMap<&'static str, SimpleTest> = {
        use TokenKind::*;

        let mut t: HashMap<&'static str, SimpleTest> = HashMap::new();
        t.insert("<animateable-feature-name>", |p| {
            custom_ident_except(p, &["will-change", "auto", "scroll-position", "contents"])
        });
        t.insert("<angle>", |p| p.is_calc || p.kind() == Angle);
        t.insert("<angle-or-0>", |p| p.is_calc || p.is_zero() || p.kind() == Angle);
        t.insert("<ascii4>", |p| {
            p.kind() == String && {
                let value = p.token.name();
                value.chars().count() == 4 && value.chars().all(|c| (' '..='~').contains(&c))
            }
        });
        t.insert("<attr>", |p| p.is_attr);
        t.insert("<custom-ident>", is_custom_ident);
        t.insert("<custom-prop>", |p| p.part_type == PartType::CustomProperty);
        t.insert("<flex>", |p| p.is_calc || number_of(p, &[Flex]).is_some_and(|n| n >= 0.0));
        t.insert("<func>", |p| p.part_type == PartType::Function);
        t.insert("<hue>", |p| p.is_calc || matches!(p.kind(), Number | Angle));
        t.insert("<ident>", |p| p.kind() == Ident);
        t.insert("<ident-for-grid>", |p| custom_ident_except(p, &["span", "auto"]));
        t.insert("<ident-not-none>", |p| p.kind() == Ident && !p.is_none);
        t.insert("<ie-function>", |p| p.token.is_ie_function());
        t.insert("<int>", |p| p.is_calc || int(p).is_some());
        t.insert("<int0-1>", |p| p.is_calc || p.is_zero() || int(p) == Some(1.0));
        t.insert("<int0+>", |p| p.is_calc || int(p).is_some_and(|n| n >= 0.0));
        t.insert("<int1+>", |p| p.is_calc || int(p).is_some_and(|n| n > 0.0));
        t.insert("<int2-4>", |p| p.is_calc || in_range(int(p), 2.0, 4.0));
        t.insert("<len>", |p| p.is_calc || p.is_zero() || p.kind() == Length);
        t.insert("<len0+>", |p| {
            p.is_calc || p.is_zero() || number_of(p, &[Length]).is_some_and(|n| n >= 0.0)
        });
        t.insert("<len-pct>", |p| p.is_calc || p.is_zero() || matches!(p.kind(), Length | Percentage));
        t.insert("<len-pct0+>", |p| {
            p.is_calc || p.is_zero() || number_of(p, &[Length, Percentage]).is_some_and(|n| n >= 0.0)
        });
        t.insert("<named-or-hex-color>", |p| p.part_type == PartType::Color);
        t.insert("<num>", |p| p.is_calc || p.kind() == Number);
        t.insert("<num0+>", |p| p.is_calc || number_of(p, &[Number]).is_some_and(|n| n >= 0.0));
        t.insert("<num0-1>", |p| p.is_calc || in_range(number_of(p, &[Number]), 0.0, 1.0));
        t.insert("<num1-1000>", |p| p.is_calc || in_range(number_of(p, &[Number]), 1.0, 1000.0));
        t.insert("<num-pct>", |p| p.is_calc || matches!(p.kind(), Number | Percentage));
        t.insert("<num-pct0+>", |p| {
            p.is_calc || number_of(p, &[Number, Percentage]).is_some_and(|n| n >= 0.0)
        });
        t.insert("<num-pct-none>", |p| p.is_calc || p.is_none || matches!(p.kind(), Number | Percentage));
        t.insert("<pct>", |p| p.is_calc || p.is_zero() || p.kind() == Percentage);
        t.insert("<pct0+>", |p| {
            p.is_calc || p.is_zero() || number_of(p, &[Percentage]).is_some_and(|n| n >= 0.0)
        });
        t.insert("<pct0-100>", |p| {
            p.is_calc || p.is_zero() || in_range(number_of(p, &[Percentage]), 0.0, 100.0)
        });
        t.insert("<keyframes-name>", |p| is_custom_ident(p) || p.kind() == String);
        t.insert("<resolution>", |p| p.kind() == Resolution);
        t.insert("<string>", |p| p.kind() == String);
        t.insert("<time>", |p| p.is_calc || p.kind() == Time);
        t.insert("<time0+>", |p| p.is_calc || number_of(p, &[Time]).is_some_and(|n| n >= 0.0));
        t.insert("<unicode-range>", |p| p.kind() == URange);
        t.insert("<uri>", |p| p.part_type == PartType::Uri);

        relative_color!(t, "hsl");
        relative_color!(t, "hwb");
        relative_color!(t, "lab");
        relative_color!(t, "lch");
        relative_color!(t, "rgb");
        t
    };
}

impl Matcher {
    fn is_meta(&self) -> bool {
        matches!(
            self,
            Matcher::Alt(_) | Matcher::Seq(_) | Matcher::Many { .. } | Matcher::Braces { .. } | Matcher::Alias { .. }
        )
    }

    fn is_optional(&self) -> bool {
        matches!(self, Matcher::Braces { marker: Some('?'), .. })
    }

    /// Matches at the current position of `it`. On success the iterator is left after the
    /// matched parts and the number of repetitions is returned (1 for anything that is not a
    /// repetition). On failure the position is restored.
    pub fn matches<'a>(&self, it: &mut PartIter<'a>, grammars: &GrammarCache) -> Option<usize> {
        let start = it.pos;
        let Some(part) = it.current() else {
            return match self {
                Matcher::Braces { min: 0, .. } => Some(0),
                Matcher::Alias { inner, .. } => inner.matches(it, grammars),
                _ => None,
            };
        };

        let res = if self.is_meta() {
            self.match_combinator(it, grammars)
        } else if part.is_var || self.match_part(part, it, grammars) || (it.try_attr && part.is_attr) {
            it.pos += 1;
            Some(1)
        } else {
            None
        };
        if res.is_none() {
            it.pos = start;
        }
        res
    }

    fn match_combinator<'a>(&self, it: &mut PartIter<'a>, grammars: &GrammarCache) -> Option<usize> {
        match self {
            Matcher::Alt(members) => members.iter().find_map(|m| m.matches(it, grammars)).map(|_| 1),
            Matcher::Seq(members) => {
                for m in members {
                    m.matches(it, grammars)?;
                }
                Some(1)
            }
            Matcher::Many { members, required } => {
                many_test(members, required.as_deref(), it, grammars).then_some(1)
            }
            Matcher::Braces {
                inner,
                min,
                max,
                separator,
                ..
            } => {
                let mut count = 0;
                while count < *max {
                    let m = match (count, separator) {
                        (0, _) | (_, None) => inner,
                        (_, Some(sep)) => sep,
                    };
                    let before = it.pos;
                    if m.matches(it, grammars).is_none() {
                        break;
                    }
                    count += 1;
                    if it.pos == before {
                        break;
                    }
                }
                (count >= *min).then_some(count)
            }
            Matcher::Alias { inner, .. } => inner.matches(it, grammars),
            _ => None,
        }
    }

    /// Tests a single part against a leaf matcher
    fn match_part<'a>(&self, part: &'a ValuePart, it: &mut PartIter<'a>, grammars: &GrammarCache) -> bool {
        match self {
            Matcher::Keywords { words, .. } => {
                if matches!(part.part_type, PartType::Function | PartType::Block) {
                    return false;
                }
                let text = part.token.text.to_lowercase();
                if words.contains(&text) {
                    return true;
                }
                let vendor_pos = part.token.vendor_pos();
                vendor_pos > 0 && text.get(vendor_pos..).is_some_and(|t| words.iter().any(|w| w == t))
            }
            Matcher::Simple { test, .. } => test(part),
            Matcher::Function { .. } | Matcher::FunctionGroup { .. } => self.match_function(part, it, grammars),
            Matcher::Bracketed(inner) => {
                if part.kind() != TokenKind::LBracket {
                    return false;
                }
                let parts = part.expr.as_ref().map(|e| e.parts.as_slice()).unwrap_or_default();
                let mut contents = PartIter::new(parts);
                inner.matches(&mut contents, grammars).is_some() && contents.at_end()
            }
            _ => false,
        }
    }

    fn match_function<'a>(&self, part: &'a ValuePart, it: &mut PartIter<'a>, grammars: &GrammarCache) -> bool {
        if !matches!(part.part_type, PartType::Function | PartType::Uri) {
            return false;
        }
        let name = part.token.name();
        let prefixed = format!("{}{}", part.token.prefix().unwrap_or(""), name);

        let body = match self {
            Matcher::Function { name: expected, body } => {
                if expected != name && *expected != prefixed {
                    return false;
                }
                body.clone()
            }
            Matcher::FunctionGroup { group } => {
                let Some(grammar) = group.function(name).or_else(|| group.function(&prefixed)) else {
                    return false;
                };
                match grammars.compile(grammar) {
                    Ok(m) => Some(m),
                    Err(e) => {
                        log::warn!("{}", e.message);
                        return false;
                    }
                }
            }
            _ => return false,
        };
        let Some(body) = body else {
            return true;
        };

        match &part.expr {
            Some(args) if args.is_var => true,
            Some(args) if !args.is_empty() => {
                let mut inner = PartIter::new(&args.parts);
                if body.matches(&mut inner, grammars).is_some() && inner.at_end() {
                    return true;
                }
                it.bad_func = Some(BadFunction { args, matcher: body });
                false
            }
            _ => body.matches(&mut PartIter::new(&[]), grammars).is_some(),
        }
    }

    /// Prints the matcher in value definition syntax. `prec` is the binding strength of the
    /// surrounding combinator.
    pub fn to_string_prec(&self, prec: u8) -> String {
        fn bracket(s: String, needed: bool) -> String {
            if needed {
                format!("[ {} ]", s)
            } else {
                s
            }
        }

        match self {
            Matcher::Keywords { text, .. } => bracket(text.clone(), prec > PREC_ALT && text.contains(' ')),
            Matcher::Simple { name, .. } => name.to_string(),
            Matcher::Function { name, body: None } => format!("{}()", name),
            Matcher::Function { name, body: Some(body) } => format!("{}( {} )", name, body.to_string_prec(0)),
            Matcher::FunctionGroup { group } => {
                let list = group.names().map(|n| format!("{}()", n)).collect::<Vec<_>>();
                bracket(list.join(" | "), prec > PREC_ALT)
            }
            Matcher::Alt(members) => {
                let list = members.iter().map(|m| m.to_string_prec(PREC_ALT)).collect::<Vec<_>>();
                bracket(list.join(" | "), prec > PREC_ALT)
            }
            Matcher::Seq(members) => {
                let list = members.iter().map(|m| m.to_string_prec(PREC_SEQ)).collect::<Vec<_>>();
                bracket(list.join(" "), prec > PREC_SEQ)
            }
            Matcher::Many { members, required } => {
                let p = if required.is_some() { PREC_ANDAND } else { PREC_OROR };
                let list = members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| match required {
                        Some(req) if !req.get(i).copied().unwrap_or(true) => {
                            let s = m.to_string_prec(PREC_MOD);
                            if s.ends_with('?') {
                                s
                            } else {
                                s + "?"
                            }
                        }
                        _ => m.to_string_prec(p),
                    })
                    .collect::<Vec<_>>();
                let sep = if required.is_some() { " && " } else { " || " };
                bracket(list.join(sep), prec > p)
            }
            Matcher::Braces {
                inner, min, max, marker, ..
            } => {
                let mut s = inner.to_string_prec(PREC_MOD);
                if let Some(marker) = marker {
                    s.push(*marker);
                }
                let explicit = match marker {
                    None => true,
                    Some('#') => !(*min == 1 || *max == usize::MAX),
                    Some(_) => false,
                };
                if explicit {
                    let range = match max {
                        max if max == min => format!("{{{}}}", min),
                        &usize::MAX => format!("{{{},}}", min),
                        max => format!("{{{},{}}}", min, max),
                    };
                    s.push_str(&range);
                }
                s
            }
            Matcher::Alias { name, .. } => name.clone(),
            Matcher::Bracketed(inner) => format!("\"[\" {} \"]\"", inner.to_string_prec(PREC_SEQ)),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_prec(0))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({})", self)
    }
}

struct ManyState {
    seen: Vec<bool>,
    max: usize,
}

fn many_test(members: &[Rc<Matcher>], required: Option<&[bool]>, it: &mut PartIter<'_>, g: &GrammarCache) -> bool {
    let mut state = ManyState {
        seen: vec![false; members.len()],
        max: 0,
    };
    // without a complete match, search again for the match with the most required members
    if !many_run(members, required, &mut state, 0, false, it, g) {
        many_run(members, required, &mut state, 0, true, it, g);
    }
    match required {
        None => state.max > 0,
        Some(req) => req.iter().zip(&state.seen).all(|(r, seen)| !r || *seen),
    }
}

fn many_run(
    members: &[Rc<Matcher>],
    required: Option<&[bool]>,
    state: &mut ManyState,
    count: usize,
    retry: bool,
    it: &mut PartIter<'_>,
    g: &GrammarCache,
) -> bool {
    for (i, m) in members.iter().enumerate() {
        if state.seen[i] {
            continue;
        }
        let start = it.pos;
        // an optional member that matched nothing does not count
        if m.matches(it, g).is_some_and(|n| n > 0) {
            state.seen[i] = true;
            let add = required.map_or(true, |r| r.get(i).copied().unwrap_or(true));
            if many_run(members, required, state, count + usize::from(add), retry, it, g) {
                return true;
            }
            state.seen[i] = false;
        }
        it.pos = start;
    }
    if retry {
        return count == state.max;
    }
    state.max = state.max.max(count);
    count == members.len()
}

/// Compiles grammars into matchers and remembers them. Compiling the same text twice returns
/// the same matcher.
#[derive(Default)]
pub struct GrammarCache {
    matchers: RefCell<HashMap<String, Rc<Matcher>>>,
}

impl GrammarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matchers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, key: &str) -> Option<Rc<Matcher>> {
        self.matchers.borrow().get(key).cloned()
    }

    fn remember(&self, key: &str, m: Rc<Matcher>) -> Rc<Matcher> {
        self.matchers.borrow_mut().insert(key.to_string(), m.clone());
        m
    }

    /// Compiles a grammar such as `[ <len> | auto ]{1,2}`
    pub fn compile(&self, grammar: &str) -> CssResult<Rc<Matcher>> {
        if let Some(m) = self.cached(grammar) {
            return Ok(m);
        }
        let node = parse_grammar(grammar)?;
        let m = self.build(&node)?;
        Ok(self.remember(grammar, m))
    }

    /// Matcher of a single term: literal words or a `<type>`
    pub fn term(&self, text: &str) -> CssResult<Rc<Matcher>> {
        let key = text.to_lowercase();
        if let Some(m) = self.cached(&key) {
            return Ok(m);
        }

        let m = if !key.starts_with('<') {
            let words = key
                .split('|')
                .map(|w| w.trim())
                .map(|w| w.strip_prefix('"').and_then(|w| w.strip_suffix('"')).unwrap_or(w))
                .map(String::from)
                .collect();
            Rc::new(Matcher::Keywords {
                words,
                text: key.clone(),
            })
        } else if let Some(name) = text.strip_prefix("<fn:").and_then(|t| t.strip_suffix('>')) {
            let group = definitions::function_group(name)
                .ok_or_else(|| CssError::new(&format!("Internal grammar error. Unknown function group \"{}\".", name)))?;
            Rc::new(Matcher::FunctionGroup { group })
        } else if let Some((name, test)) = SIMPLE_TYPES.get_key_value(key.as_str()) {
            Rc::new(Matcher::Simple { name, test: *test })
        } else {
            let grammar = self.type_grammar(&key).ok_or_else(|| {
                CssError::new(&format!("Internal grammar error. Unknown type \"{}\".", key))
            })?;
            let inner = self.compile(grammar)?;
            if key == "<url>" {
                Rc::new(Matcher::Alias { name: key.clone(), inner })
            } else {
                inner
            }
        };
        Ok(self.remember(&key, m))
    }

    /// Grammar behind a `<type>`: a named type, a property or an at-rule descriptor
    fn type_grammar(&self, key: &str) -> Option<&'static str> {
        if let Some(grammar) = definitions::named_type(key) {
            return Some(grammar);
        }
        let name = key.strip_prefix('<')?.strip_suffix('>')?;
        let grammar_of = |d: Definition| match d {
            Definition::Grammar(g) => Some(g),
            Definition::Any => None,
        };
        definitions::property(name).and_then(grammar_of).or_else(|| {
            definitions::SCOPES
                .iter()
                .find_map(|scope| scope.descriptor(name).and_then(grammar_of))
        })
    }

    fn build(&self, node: &SyntaxNode) -> CssResult<Rc<Matcher>> {
        match node {
            SyntaxNode::Keywords(text) | SyntaxNode::Type(text) => self.term(text),
            SyntaxNode::Function { name, body } => {
                let body = match body {
                    Some(b) => Some(self.build(b)?),
                    None => None,
                };
                Ok(Rc::new(Matcher::Function {
                    name: name.clone(),
                    body,
                }))
            }
            SyntaxNode::Alternatives(list) => self.alt(self.build_all(list)?),
            SyntaxNode::AnyOrder(list) => Ok(many(None, self.build_all(list)?)),
            SyntaxNode::AllAnyOrder(list) => {
                let members = self.build_all(list)?;
                let required = members.iter().map(|m| !m.is_optional()).collect();
                Ok(many(Some(required), members))
            }
            SyntaxNode::Sequence(list) => {
                let mut members = self.build_all(list)?;
                if members.len() == 1 {
                    if let Some(m) = members.pop() {
                        return Ok(m);
                    }
                }
                Ok(Rc::new(Matcher::Seq(members)))
            }
            SyntaxNode::Multiplied { node, multiplier } => {
                let inner = self.build(node)?;
                self.braces(inner, multiplier)
            }
            SyntaxNode::Bracketed(inner) => Ok(Rc::new(Matcher::Bracketed(self.build(inner)?))),
        }
    }

    fn build_all(&self, list: &[SyntaxNode]) -> CssResult<Vec<Rc<Matcher>>> {
        list.iter().map(|n| self.build(n)).collect()
    }

    fn braces(&self, inner: Rc<Matcher>, multiplier: &Multiplier) -> CssResult<Rc<Matcher>> {
        let separator = match multiplier.comma {
            true => Some(Rc::new(Matcher::Seq(vec![self.term(",")?, inner.clone()]))),
            false => None,
        };
        Ok(Rc::new(Matcher::Braces {
            inner,
            min: multiplier.min,
            max: multiplier.max,
            marker: multiplier.marker,
            separator,
        }))
    }

    /// Alternatives, with all keyword alternatives merged into one set in front
    fn alt(&self, members: Vec<Rc<Matcher>>) -> CssResult<Rc<Matcher>> {
        let (keywords, mut others): (Vec<_>, Vec<_>) =
            members.into_iter().partition(|m| matches!(m.as_ref(), Matcher::Keywords { .. }));
        if !keywords.is_empty() {
            let text = keywords
                .iter()
                .filter_map(|m| match m.as_ref() {
                    Matcher::Keywords { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" | ");
            others.insert(0, self.term(&text)?);
        }
        if others.len() == 1 {
            if let Some(m) = others.pop() {
                return Ok(m);
            }
        }
        Ok(Rc::new(Matcher::Alt(others)))
    }
}

fn many(required: Option<Vec<bool>>, mut members: Vec<Rc<Matcher>>) -> Rc<Matcher> {
    if members.len() == 1 {
        if let Some(m) = members.pop() {
            return m;
        }
    }
    Rc::new(Matcher::Many { members, required })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Css3;

    fn matches(grammars: &GrammarCache, grammar: &str, value: &str) -> bool {
        let m = grammars.compile(grammar).unwrap();
        let value = Css3::parse_property_value(value).unwrap();
        let mut it = PartIter::new(&value.parts);
        m.matches(&mut it, grammars).is_some() && it.at_end()
    }

    #[test]
    fn length_or_percentage() {
        let g = GrammarCache::new();
        assert!(matches(&g, "<len> | <pct>", "10px"));
        assert!(matches(&g, "<len> | <pct>", "50%"));
        assert!(matches(&g, "<len> | <pct>", "0"));
        assert!(!matches(&g, "<len> | <pct>", "10"));
        assert!(!matches(&g, "<len> | <pct>", "foo"));
    }

    #[test]
    fn compiling_is_idempotent() {
        let g = GrammarCache::new();
        let a = g.compile("<len> | auto").unwrap();
        let b = g.compile("<len> | auto").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        let c = g.term("<COLOR>").unwrap();
        let d = g.term("<color>").unwrap();
        assert!(Rc::ptr_eq(&c, &d));
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let g = GrammarCache::new();
        assert!(matches(&g, "thin | medium | thick", "MEDIUM"));
        assert!(matches(&g, "-webkit-box | block", "-webkit-box"));
        assert!(!matches(&g, "thin | medium | thick", "'thin'"));
    }

    #[test]
    fn repetitions() {
        let g = GrammarCache::new();
        assert!(matches(&g, "<len>{1,4}", "1px 2px 3px"));
        assert!(!matches(&g, "<len>{1,4}", "1px 2px 3px 4px 5px"));
        assert!(matches(&g, "<num>#", "1, 2, 3"));
        assert!(!matches(&g, "<num>#", "1 2"));
        assert!(matches(&g, "<num>#{2}", "1,2"));
    }

    #[test]
    fn any_order_groups_backtrack() {
        let g = GrammarCache::new();
        // taking `1s` for <time> leaves nothing for `-2s`
        assert!(matches(&g, "<time> || <time0+>", "1s -2s"));
        assert!(matches(&g, "<len> && <color>", "red 1px"));
        assert!(!matches(&g, "<len> && <color>", "1px"));
        assert!(matches(&g, "<len> && <color>?", "1px"));
    }

    #[test]
    fn functions() {
        let g = GrammarCache::new();
        assert!(matches(&g, "<color>", "rgb(1, 2, 3)"));
        assert!(matches(&g, "<color>", "RGBA(1 2 3 / 50%)"));
        assert!(!matches(&g, "<color>", "rgb(1, 2)"));
        assert!(matches(&g, "none | <fn:transform>+", "rotateX(10deg) translate(1px, 2px)"));
        assert!(matches(&g, "<len>", "calc(1px + 2em)"));
        assert!(matches(&g, "<len>", "var(--x)"));
    }

    #[test]
    fn bad_function_arguments_are_remembered() {
        let g = GrammarCache::new();
        let m = g.compile("<color>").unwrap();
        let value = Css3::parse_property_value("rgb(1, 2)").unwrap();
        let mut it = PartIter::new(&value.parts);
        assert!(m.matches(&mut it, &g).is_none());
        assert_eq!(it.bad_func.map(|b| b.args.text.clone()).as_deref(), Some("1, 2"));
    }

    #[test]
    fn printing() {
        let g = GrammarCache::new();
        assert_eq!(g.compile("<len> | thin | medium | thick").unwrap().to_string(), "thin | medium | thick | <len>");
        assert_eq!(
            g.compile("[ <len> | thin | medium | thick ]{1,4}").unwrap().to_string(),
            "[ thin | medium | thick | <len> ]{1,4}"
        );
        assert_eq!(g.compile("<num>#").unwrap().to_string(), "<num>#");
        assert_eq!(g.compile("<num>#{2}").unwrap().to_string(), "<num>#{2}");
        assert_eq!(g.compile("<len> && <num>?").unwrap().to_string(), "<len> && <num>?");
        assert_eq!(g.compile("a || b c").unwrap().to_string(), "a || b c");
        assert_eq!(g.compile("url()").unwrap().to_string(), "url()");
        assert_eq!(g.compile("<url>").unwrap().to_string(), "<url>");
    }

    #[test]
    fn unknown_types_fail_to_compile() {
        let g = GrammarCache::new();
        let err = g.compile("<nope> | a").unwrap_err();
        assert!(err.message.contains("Unknown type"));
    }
}
