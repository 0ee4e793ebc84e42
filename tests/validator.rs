use parserlib_bin::css3::validator::Validator;
use test_case::test_case;

#[test_case("border-width", "2px")]
#[test_case("border-width", "thin 0 1em")]
#[test_case("margin", "0 auto")]
#[test_case("z-index", "auto")]
#[test_case("z-index", "10")]
#[test_case("font-weight", "bold")]
#[test_case("opacity", "0.5")]
#[test_case("color", "red")]
#[test_case("color", "#abc")]
#[test_case("color", "rgb(1, 2, 3)")]
#[test_case("width", "var(--w)")]
#[test_case("width", "inherit")]
#[test_case("-webkit-border-width", "1px")]
#[test_case("-moz-unknown-thing", "whatever")]
fn valid_values(property: &str, value: &str) {
    let validator = Validator::new();
    assert!(validator.validate_str(property, value).is_ok(), "{}: {}", property, value);
}

#[test_case("border-width", "2zz")]
#[test_case("z-index", "1.5")]
#[test_case("font-weight", "1001")]
#[test_case("opacity", "2")]
#[test_case("color", "#ab")]
#[test_case("color", "rgb(1, 2)")]
#[test_case("transform", "rotate(1px)")]
#[test_case("width", "inherit 1px")]
fn invalid_values(property: &str, value: &str) {
    let validator = Validator::new();
    let err = validator.validate_str(property, value).unwrap_err();
    assert!(err.is_validation());
    assert!(err.location.is_some());
}

#[test_case("border-width", "2zz", "Expected [ thin | medium | thick | <len> ]{1,4} but found \"2zz\"."; "grammar")]
#[test_case("border-width", "1px 2zz", "Expected end of value but found \"2zz\"."; "leftover")]
#[test_case("bogus", "1", "Unknown property \"bogus\"."; "unknown")]
fn messages(property: &str, value: &str, message: &str) {
    let validator = Validator::new();
    assert_eq!(validator.validate_str(property, value).unwrap_err().message, message);
}
