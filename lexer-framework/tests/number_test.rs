use lexer_framework::{LanguageDef, Number, TokenParser};
use parser_framework::parse;
use rstest::rstest;

fn tokens() -> TokenParser {
    TokenParser::new(LanguageDef::default()).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "{actual} != {expected}"
    );
}

#[test]
fn test_signed_float() {
    let reply = parse(&tokens().float(), "-123.567");
    assert_eq!(reply.offset(), 8);
    assert_close(reply.into_value().unwrap(), -123.567);
}

#[rstest]
#[case("0x1A", 26)]
#[case("0X1a", 26)]
#[case("0o17", 15)]
#[case("0", 0)]
#[case("42", 42)]
#[case("007", 7)]
fn test_natural(#[case] input: &str, #[case] expected: u64) {
    let reply = parse(&tokens().natural(), input);
    assert_eq!(reply.into_value(), Some(expected));
}

#[test]
fn test_natural_consumes_trailing_space() {
    let reply = parse(&tokens().natural(), "12  x");
    assert_eq!(reply.offset(), 4);
}

#[test]
fn test_natural_overflow_fails_after_digits() {
    let reply = parse(&tokens().natural(), "18446744073709551616");
    assert_eq!(reply.offset(), 20);
    assert_eq!(
        reply.message().as_deref(),
        Some("number literal out of range")
    );
    assert_eq!(
        parse(&tokens().natural(), "18446744073709551615").into_value(),
        Some(u64::MAX)
    );
}

#[test]
fn test_hexadecimal_needs_digits() {
    let reply = parse(&tokens().natural(), "0xg");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 2);
}

#[rstest]
#[case("17", 17)]
#[case("-17", -17)]
#[case("+17", 17)]
#[case("-0x10", -16)]
#[case("-9223372036854775808", i64::MIN)]
fn test_integer(#[case] input: &str, #[case] expected: i64) {
    assert_eq!(parse(&tokens().integer(), input).into_value(), Some(expected));
}

#[test]
fn test_integer_out_of_range() {
    let reply = parse(&tokens().integer(), "9223372036854775808");
    assert_eq!(reply.offset(), 19);
    assert_eq!(
        reply.message().as_deref(),
        Some("integer literal out of range")
    );
}

#[rstest]
#[case("1.5", 1.5)]
#[case("2e3", 2000.0)]
#[case("2.5E-2", 0.025)]
#[case("1.0e+2", 100.0)]
#[case("-0.125", -0.125)]
fn test_float(#[case] input: &str, #[case] expected: f64) {
    let reply = parse(&tokens().float(), input);
    assert_eq!(reply.offset(), input.len());
    assert_close(reply.into_value().unwrap(), expected);
}

#[test]
fn test_float_requires_fraction_or_exponent() {
    let reply = parse(&tokens().float(), "12 ");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 2);
}

#[test]
fn test_fraction_requires_digits() {
    let reply = parse(&tokens().float(), "1.x");
    assert_eq!(reply.offset(), 2);
    assert_eq!(reply.message().as_deref(), Some("expected fraction"));
}

#[rstest]
#[case("42", Number::Natural(42))]
#[case("0x2A", Number::Natural(42))]
#[case("0", Number::Natural(0))]
#[case("0.5", Number::Float(0.5))]
#[case("4.25", Number::Float(4.25))]
#[case("1e2", Number::Float(100.0))]
fn test_natural_or_float(#[case] input: &str, #[case] expected: Number) {
    assert_eq!(parse(&tokens().natural_or_float(), input).into_value(), Some(expected));
}

#[rstest]
#[case("-123.567", -123.567)]
#[case("0x10", 16.0)]
#[case("-3", -3.0)]
#[case("6.02e23", 6.02e23)]
fn test_number(#[case] input: &str, #[case] expected: f64) {
    assert_close(parse(&tokens().number(), input).into_value().unwrap(), expected);
}

#[test]
fn test_bare_digit_parsers() {
    let tokens = tokens();
    assert_eq!(parse(&tokens.decimal(), "123 ").offset(), 3);
    assert_eq!(parse(&tokens.hexadecimal(), "xff").into_value(), Some(255));
    assert_eq!(parse(&tokens.octal(), "o777").into_value(), Some(511));
    assert!(parse(&tokens.hexadecimal(), "ff").is_err());
}

#[test]
fn test_number_label() {
    let reply = parse(&tokens().natural_or_float(), "abc");
    assert_eq!(reply.offset(), 0);
    assert_eq!(reply.message().as_deref(), Some("expected number"));
}
