use parserlib_bin::css3::tokenizer::Tokenizer;
use parserlib_bin::css3::tokens::TokenKind;
use test_case::test_case;

fn first(input: &str) -> (TokenKind, String) {
    let tok = Tokenizer::new(input).grab();
    (tok.kind, tok.text)
}

#[test_case("10px", TokenKind::Length; "length")]
#[test_case("50%", TokenKind::Percentage; "percentage")]
#[test_case("45deg", TokenKind::Angle; "angle")]
#[test_case("200ms", TokenKind::Time; "time")]
#[test_case("3khz", TokenKind::Frequency; "frequency")]
#[test_case("1fr", TokenKind::Flex; "flex")]
#[test_case("2x", TokenKind::Resolution; "resolution")]
#[test_case("3zz", TokenKind::Dimension; "unknown unit")]
#[test_case("1.5e3", TokenKind::Number; "exponent")]
#[test_case("-moz-calc(", TokenKind::Function; "vendor function")]
#[test_case("url(a.png)", TokenKind::Uri; "unquoted uri")]
#[test_case("@media", TokenKind::At; "at keyword")]
#[test_case("#fff", TokenKind::Hash; "hash")]
#[test_case("'str'", TokenKind::String; "string")]
#[test_case("'open", TokenKind::Invalid; "unterminated string")]
#[test_case("U+0-7F", TokenKind::URange; "unicode range")]
#[test_case("|=", TokenKind::AttrEq; "attribute operator")]
#[test_case("||", TokenKind::Combinator; "column combinator")]
#[test_case("<!--", TokenKind::Cdco; "html comment open")]
fn token_kinds(input: &str, kind: TokenKind) {
    let (found, text) = first(input);
    assert_eq!(found, kind);
    assert_eq!(text, input);
}

#[test_case("a{b:c}")]
#[test_case("@import url(x.css) screen;\n/* comment */\n.a > b ~ c { d: e !important }")]
#[test_case("a { b: 'unterminated\n}")]
#[test_case("@media (min-width: 10px) { a::before { content: \"\\201C\" } }")]
#[test_case("/*[[placeholder]]*/ x { y: U+0025-00FF }")]
fn raw_texts_add_up_to_the_source(css: &str) {
    let joined: String = Tokenizer::new(css).tokenize_all().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(joined, css);
}

#[test]
fn locations_follow_lines() {
    let tokens = Tokenizer::new("a\n  b").tokenize_all();
    let b = tokens.iter().find(|t| t.text == "b").unwrap();
    assert_eq!(b.location.line, 2);
    assert_eq!(b.location.column, 3);
    assert_eq!(b.location.offset, 4);
}
