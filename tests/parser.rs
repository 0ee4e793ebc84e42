use parserlib_bin::css3::events::{BlockKind, EventKind, ParseEvent};
use parserlib_bin::css3::parser_config::ParserOptions;
use parserlib_bin::css3::Css3;
use test_case::test_case;

fn parse(css: &str) -> Vec<ParseEvent> {
    Css3::parse_str(css, ParserOptions::default()).unwrap()
}

fn names(events: &[ParseEvent]) -> Vec<String> {
    events.iter().map(|e| e.name()).collect()
}

fn messages(events: &[ParseEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| e.diagnostic())
        .map(|e| e.message.clone())
        .collect()
}

#[test]
fn rule_with_valid_and_unknown_properties() {
    let events = parse(".a,.b{color:red;bogus:1}");
    assert_eq!(
        names(&events),
        vec!["startstylesheet", "startrule", "property", "property", "endrule", "endstylesheet"]
    );

    match &events[1].kind {
        EventKind::Start(BlockKind::Rule { selectors }) => {
            let texts = selectors.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
            assert_eq!(texts, vec![".a", ".b"]);
        }
        other => panic!("unexpected event {:?}", other),
    }

    let color = events[2].declaration().unwrap();
    assert_eq!(color.property.text, "color");
    assert_eq!(color.value.text, "red");
    assert!(color.invalid.is_none());

    let bogus = events[3].declaration().unwrap();
    assert_eq!(bogus.value.text, "1");
    assert_eq!(
        bogus.invalid.as_ref().map(|e| e.message.as_str()),
        Some("Unknown property \"bogus\".")
    );
}

#[test_case("a { color: red }", &["startrule", "property", "endrule"]; "style rule")]
#[test_case("@charset \"utf-8\";", &["charset"]; "charset")]
#[test_case("@import url(a.css) print;", &["import"]; "import")]
#[test_case("@namespace svg url(http://www.w3.org/2000/svg);", &["namespace"]; "namespace")]
#[test_case("@layer a, b;", &["layer"]; "layer statement")]
#[test_case("@font-face { font-display: swap }", &["startfontface", "property", "endfontface"]; "font face")]
#[test_case("@media print { a {} }", &["startmedia", "startrule", "endrule", "endmedia"]; "media")]
#[test_case("@keyframes spin { from { opacity: 0 } }", &["startkeyframes", "startkeyframerule", "property", "endkeyframerule", "endkeyframes"]; "keyframes")]
fn top_level_constructs(css: &str, expected: &[&str]) {
    let events = parse(css);
    let inner = names(&events);
    assert_eq!(inner.first().map(String::as_str), Some("startstylesheet"));
    assert_eq!(inner.last().map(String::as_str), Some("endstylesheet"));
    assert_eq!(&inner[1..inner.len() - 1], expected);
    assert!(messages(&events).is_empty(), "{:?}", messages(&events));
}

#[test_case("a { color: red; }", &[] ; "valid")]
#[test_case("a { width: 1px 2px }", &["Expected end of value but found \"2px\"."] ; "extra part")]
#[test_case("a { colr: red }", &["Unknown property \"colr\"."] ; "typo")]
#[test_case("a { --x: 1px solid }", &[] ; "custom property")]
#[test_case("a { width: var(--w) }", &[] ; "variable")]
#[test_case("a { width: calc(1px + 2%) }", &[] ; "calc")]
fn validation_messages(css: &str, expected: &[&str]) {
    assert_eq!(messages(&parse(css)), expected);
}

#[test]
fn errors_are_recovered_from() {
    let events = parse("a { color: red; ] b: c; width: 1px } d {}");
    assert!(events.iter().any(|e| e.name() == "error"));
    let props = events
        .iter()
        .filter_map(|e| e.declaration())
        .map(|d| d.property.text.clone())
        .collect::<Vec<_>>();
    assert_eq!(props, vec!["color", "width"]);
    assert_eq!(events.iter().filter(|e| e.name() == "startrule").count(), 2);
}

#[test]
fn strict_mode_stops_at_the_first_error() {
    let options = ParserOptions {
        strict: true,
        ..Default::default()
    };
    let err = Css3::parse_str("a { color: red; ] }", options).unwrap_err();
    assert_eq!(err.message, "Unexpected \"]\".");
}

#[test]
fn nested_rules() {
    let events = parse("a { color: red; &:hover { color: blue } > b { margin: 0 } }");
    assert_eq!(
        names(&events)
            .iter()
            .filter(|n| n.starts_with("start") || n.starts_with("end"))
            .count(),
        8
    );
    assert!(messages(&events).is_empty());
}

#[test]
fn hacks() {
    let css = "a { *zoom: 1; _height: 1px }";
    // without the hack the underscore is part of the name
    assert_eq!(messages(&parse("a { _height: 1px }")), vec!["Unknown property \"_height\"."]);

    let options = ParserOptions {
        star_hack: true,
        underscore_hack: true,
        ..Default::default()
    };
    let events = Css3::parse_str(css, options).unwrap();
    let hacks = events
        .iter()
        .filter_map(|e| e.declaration())
        .map(|d| d.property.hack)
        .collect::<Vec<_>>();
    assert_eq!(hacks, vec![Some('*'), Some('_')]);
}

#[test]
fn entry_points() {
    let selector = Css3::parse_selector("ul#nav > li.item:hover::before").unwrap();
    assert_eq!(selector.specificity().to_string(), "0,1,2,3");

    let value = Css3::parse_property_value("1px solid red").unwrap();
    assert_eq!(value.parts.len(), 3);

    let query = Css3::parse_media_query("not print and (color)").unwrap();
    assert_eq!(query.modifier.as_deref(), Some("not"));

    assert_eq!(Css3::parse_style_attribute("color: red").unwrap().len(), 1);
    assert_eq!(Css3::parse_rule("@media print {}").unwrap().len(), 2);
}

#[test_case("@viewport { width: device-width } a { width: device-width }"; "viewport width")]
#[test_case("@font-face { font-weight: auto } a { font-weight: auto }"; "font face weight")]
fn descriptor_values_are_not_style_values(css: &str) {
    let decls = parse(css)
        .iter()
        .filter_map(|e| e.declaration().cloned())
        .collect::<Vec<_>>();
    assert_eq!(decls.len(), 2);
    assert!(decls[0].invalid.is_none());
    assert!(decls[1].invalid.is_some());
}
