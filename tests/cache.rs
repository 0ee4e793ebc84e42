use parserlib_bin::css3::events::ParseEvent;
use parserlib_bin::css3::parser_config::ParserOptions;
use parserlib_bin::css3::session::ParseSession;
use test_case::test_case;

fn cached() -> ParserOptions {
    ParserOptions {
        reuse_cache: true,
        ..Default::default()
    }
}

fn uncached(css: &str) -> Vec<ParseEvent> {
    ParseSession::default().parse(css, ParserOptions::default()).unwrap()
}

#[test]
fn only_the_edited_rule_is_parsed_again() {
    let mut session = ParseSession::default();
    session.parse("a{color:red}a{color:red}", cached()).unwrap();
    // the second rule already reuses a copy of the first
    let stats = session.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));

    let edited = "a{color:red}a{color:blue}";
    let events = session.parse(edited, cached()).unwrap();
    let stats = session.cache_stats();
    assert_eq!((stats.hits, stats.misses), (2, 2));
    assert_eq!(events, uncached(edited));
}

#[test_case("a{color:red}\nb{width:1px}", "/* x */\na{color:red}\nb{width:1px}", 2; "lines inserted before")]
#[test_case("a{color:red}\nb{width:1px}", "xx{}a{color:red}\nb{width:1px}", 2; "columns shifted on the first line")]
#[test_case("a{color:red}\nb{width:1px}", "a{color:red}\nb{width:2px}", 1; "second rule edited")]
#[test_case("a{color:red}\nb{width:1px}", "b{width:1px}\na{color:red}", 2; "rules swapped")]
#[test_case("@media print{a{color:red}}", "@media screen{a{color:red}}", 1; "rule inside an at-rule")]
fn reparse_matches_a_fresh_parse(before: &str, after: &str, hits: usize) {
    let mut session = ParseSession::default();
    session.parse(before, cached()).unwrap();
    let events = session.parse(after, cached()).unwrap();
    assert_eq!(session.cache_stats().hits, hits);
    assert_eq!(events, uncached(after));
}

#[test]
fn repeated_parses_are_identical() {
    let css = "a { color: red; bogus: 1 }\n@supports (display: grid) { b { margin: 0 } }\nc { d: e }";
    let mut session = ParseSession::default();
    let first = session.parse(css, cached()).unwrap();
    for _ in 0..3 {
        assert_eq!(session.parse(css, cached()).unwrap(), first);
    }
    assert_eq!(first, uncached(css));
}

#[test]
fn errors_inside_rules_are_replayed() {
    let mut session = ParseSession::default();
    let css = "a{color:red;]}\nb{}";
    session.parse(css, cached()).unwrap();
    let events = session.parse(css, cached()).unwrap();
    assert_eq!(session.cache_stats().hits, 1);
    assert_eq!(events, uncached(css));
    assert!(events.iter().any(|e| e.name() == "error"));
}

#[test]
fn rules_with_broken_selectors_are_not_cached() {
    let mut session = ParseSession::default();
    let css = "a, {color:red}";
    session.parse(css, cached()).unwrap();
    session.parse(css, cached()).unwrap();
    assert_eq!(session.cache_stats().hits, 0);
}
