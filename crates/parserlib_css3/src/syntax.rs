//! Parser for the value definition syntax used in the property tables
//!
//! ```text
//! ALT:    OROR [ " | " OROR ]*         exactly one matches
//! OROR:   ANDAND [ " || " ANDAND ]*    at least one matches, in any order
//! ANDAND: SEQ [ " && " SEQ ]*          all match, in any order
//! SEQ:    TERM [ " " TERM ]*           all match, in the given order
//! TERM:   [ <type> | literal | "[ " ALT " ]" | fn() | fn( ALT ) ] MOD?
//! MOD:    ? | * | + | # | {m} | {m,} | {m,n} | #{m,n}
//! ```
//!
//! A run of plain words separated by single bars (`thin | medium | thick`) is kept together as
//! one keyword node, which the matcher turns into a single set lookup.

use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_while1};
use nom::character::complete::{char, digit1, multispace0, multispace1, one_of};
use nom::combinator::{map, map_res, not, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;
use parserlib_shared::errors::CssError;

/// Repetition of a term
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Multiplier {
    pub min: usize,
    /// `usize::MAX` for an open upper bound
    pub max: usize,
    /// `?`, `*`, `+` or `#` as written in the grammar
    pub marker: Option<char>,
    /// Repetitions are separated by commas
    pub comma: bool,
}

impl Multiplier {
    fn new(min: usize, max: usize, marker: Option<char>, comma: bool) -> Self {
        Self {
            min,
            max,
            marker,
            comma,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxNode {
    /// One or more literal words (`auto`, `a | b`, `,`, `"["`), lowercase as written
    Keywords(String),
    /// `<type>` reference, including the angle brackets
    Type(String),
    /// `name( ... )`; no body means `name()` which accepts any arguments
    Function {
        name: String,
        body: Option<Box<SyntaxNode>>,
    },
    /// `a | b`
    Alternatives(Vec<SyntaxNode>),
    /// `a || b`
    AnyOrder(Vec<SyntaxNode>),
    /// `a && b`
    AllAnyOrder(Vec<SyntaxNode>),
    /// `a b`
    Sequence(Vec<SyntaxNode>),
    Multiplied {
        node: Box<SyntaxNode>,
        multiplier: Multiplier,
    },
    /// `"[" x "]"`: a square bracket block whose contents match `x`
    Bracketed(Box<SyntaxNode>),
}

/// Parses a complete grammar definition
pub fn parse_grammar(input: &str) -> Result<SyntaxNode, CssError> {
    match terminated(parse_alternatives, multispace0)(input) {
        Ok(("", node)) => Ok(node),
        Ok((rest, _)) => Err(grammar_error(input, rest)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(grammar_error(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(grammar_error(input, "")),
    }
}

fn grammar_error(input: &str, rest: &str) -> CssError {
    let pos = input.len() - rest.len();
    let found = rest.chars().take(30).collect::<String>();
    CssError::new(&format!(
        "Internal grammar error. Unexpected \"{}\" at position {} in \"{}\".",
        found, pos, input
    ))
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn value_or_list(mut list: Vec<SyntaxNode>, wrap: fn(Vec<SyntaxNode>) -> SyntaxNode) -> SyntaxNode {
    if list.len() == 1 {
        if let Some(node) = list.pop() {
            return node;
        }
    }
    wrap(list)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

/// A single bar that is not the start of `||`
fn single_bar(input: &str) -> IResult<&str, char> {
    delimited(multispace0, terminated(char('|'), not(char('|'))), multispace0)(input)
}

/// True when a keyword run may end right before `rest`
fn keyword_run_ends(rest: &str) -> bool {
    let trimmed = rest.trim_start();
    trimmed.is_empty()
        || single_bar(rest).is_ok()
        || trimmed.starts_with(']')
        || (trimmed.starts_with(')') && trimmed.len() < rest.len())
}

/// The longest run of bar separated words that is followed by a place where an alternative
/// may end. Shorter runs are tried when the longest one is followed by something else, e.g. in
/// `a | b || c` only `a` is a run.
fn parse_keyword_run(input: &str) -> IResult<&str, SyntaxNode> {
    let (mut rest, first) = word(input)?;
    let mut ends = vec![(rest, first)];
    while let Ok((next, w)) = preceded(tuple((multispace0, char('|'), multispace0)), word)(rest) {
        ends.push((next, w));
        rest = next;
    }

    while let Some(&(rest, _)) = ends.last() {
        if keyword_run_ends(rest) {
            let text = ends.iter().map(|(_, w)| w.to_lowercase()).collect::<Vec<_>>().join(" | ");
            return Ok((rest, SyntaxNode::Keywords(text)));
        }
        ends.pop();
    }
    Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify)))
}

fn parse_alternatives(input: &str) -> IResult<&str, SyntaxNode> {
    let (input, list) = separated_list1(single_bar, alt((parse_keyword_run, parse_doublebar_list)))(input)?;
    Ok((input, value_or_list(list, SyntaxNode::Alternatives)))
}

fn parse_doublebar_list(input: &str) -> IResult<&str, SyntaxNode> {
    let (input, list) = separated_list1(ws(tag("||")), parse_doubleampersand_list)(input)?;
    Ok((input, value_or_list(list, SyntaxNode::AnyOrder)))
}

fn parse_doubleampersand_list(input: &str) -> IResult<&str, SyntaxNode> {
    let (input, list) = separated_list1(ws(tag("&&")), parse_sequence)(input)?;
    Ok((input, value_or_list(list, SyntaxNode::AllAnyOrder)))
}

fn parse_sequence(input: &str) -> IResult<&str, SyntaxNode> {
    let separator = terminated(multispace1, not(one_of("&|)]")));
    let (input, mut list) = separated_list1(separator, parse_component)(input)?;

    if list.len() == 3 && is_literal(&list[0], "\"[\"") && is_literal(&list[2], "\"]\"") {
        let inner = list.swap_remove(1);
        return Ok((input, SyntaxNode::Bracketed(Box::new(inner))));
    }
    Ok((input, value_or_list(list, SyntaxNode::Sequence)))
}

fn is_literal(node: &SyntaxNode, text: &str) -> bool {
    matches!(node, SyntaxNode::Keywords(k) if k == text)
}

fn parse_component(input: &str) -> IResult<&str, SyntaxNode> {
    let (input, node) = alt((parse_group, parse_function, parse_term))(input)?;
    let (input, multiplier) = opt(parse_multiplier)(input)?;
    let node = match multiplier {
        Some(multiplier) => SyntaxNode::Multiplied {
            node: Box::new(node),
            multiplier,
        },
        None => node,
    };
    Ok((input, node))
}

fn parse_group(input: &str) -> IResult<&str, SyntaxNode> {
    delimited(
        pair(char('['), multispace0),
        parse_alternatives,
        pair(multispace0, char(']')),
    )(input)
}

fn parse_function(input: &str) -> IResult<&str, SyntaxNode> {
    let (input, name) = terminated(word, pair(char('('), multispace0))(input)?;
    let (input, body) = alt((
        value(None, char(')')),
        map(terminated(parse_alternatives, pair(multispace0, char(')'))), Some),
    ))(input)?;
    Ok((
        input,
        SyntaxNode::Function {
            name: name.to_lowercase(),
            body: body.map(Box::new),
        },
    ))
}

fn parse_term(input: &str) -> IResult<&str, SyntaxNode> {
    alt((
        map(recognize(delimited(char('<'), is_not(">\t\n "), char('>'))), |t: &str| {
            SyntaxNode::Type(t.to_lowercase())
        }),
        map(
            alt((
                recognize(delimited(char('"'), opt(is_not("\"")), char('"'))),
                recognize(delimited(char('\''), opt(is_not("'")), char('\''))),
                is_not(" \t\n?*+#{}()[]|&"),
            )),
            |t: &str| SyntaxNode::Keywords(t.to_lowercase()),
        ),
    ))(input)
}

fn integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// `{m}`, `{m,}` or `{m,n}`
fn parse_curly_braces_multiplier(input: &str) -> IResult<&str, (usize, usize)> {
    let range = map(
        pair(ws(integer), opt(preceded(ws(char(',')), opt(ws(integer))))),
        |(min, rest)| match rest {
            None => (min, min),
            Some(None) => (min, usize::MAX),
            Some(Some(max)) => (min, max),
        },
    );
    delimited(char('{'), range, char('}'))(input)
}

fn parse_multiplier(input: &str) -> IResult<&str, Multiplier> {
    alt((
        map(parse_curly_braces_multiplier, |(min, max)| Multiplier::new(min, max, None, false)),
        map(preceded(char('#'), parse_curly_braces_multiplier), |(min, max)| {
            Multiplier::new(min, max, Some('#'), true)
        }),
        map(one_of("?*+#"), |c| match c {
            '?' => Multiplier::new(0, 1, Some(c), false),
            '*' => Multiplier::new(0, usize::MAX, Some(c), false),
            '+' => Multiplier::new(1, usize::MAX, Some(c), false),
            _ => Multiplier::new(1, usize::MAX, Some(c), true),
        }),
    ))(input)
}
