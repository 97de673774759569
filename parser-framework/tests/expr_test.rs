use parser_framework::{
    between, build_expression_parser, char_, eof, lazy, pattern, spaces, Assoc, Operator,
    OperatorTable, Parser,
};
use rstest::rstest;

fn symbol(c: char) -> Parser<char> {
    char_(c).then_ignore(spaces())
}

fn number() -> Parser<f64> {
    pattern(r"[0-9]+(\.[0-9]+)?")
        .unwrap()
        .then_ignore(spaces())
        .map(|text| text.parse::<f64>().unwrap())
}

fn arithmetic() -> OperatorTable<f64> {
    vec![
        vec![
            Operator::binary(symbol('+'), Assoc::Left, |a: f64, b: f64| a + b),
            Operator::binary(symbol('-'), Assoc::Left, |a: f64, b: f64| a - b),
        ],
        vec![
            Operator::binary(symbol('*'), Assoc::Left, |a: f64, b: f64| a * b),
            Operator::binary(symbol('/'), Assoc::Left, |a: f64, b: f64| a / b),
        ],
        vec![Operator::binary(symbol('^'), Assoc::Right, f64::powf)],
        vec![
            Operator::prefix(symbol('-'), |a: f64| -a),
            Operator::postfix(symbol('!'), |a: f64| (1..=a as u64).product::<u64>() as f64),
        ],
    ]
}

fn expression() -> Parser<f64> {
    let term = number().or(between(symbol('('), symbol(')'), lazy(expression)));
    build_expression_parser(arithmetic(), term)
}

fn evaluate(input: &str) -> Option<f64> {
    let whole = spaces().ignore_then(expression()).then_ignore(eof());
    parser_framework::parse(&whole, input).into_value()
}

#[rstest]
#[case("1 + 2 * 3", 7.0)]
#[case("(1 + 2) * 3", 9.0)]
#[case("10 - 4 - 3", 3.0)]
#[case("64 / 4 / 2", 8.0)]
#[case("2 ^ 3 ^ 2", 512.0)]
#[case("-2 ^ 2", 4.0)]
#[case("1 - -2", 3.0)]
#[case("3! + 1", 7.0)]
#[case("(3 + 4) * 5.0 / 0.2 - 7", 168.0)]
fn test_precedence_and_associativity(#[case] input: &str, #[case] expected: f64) {
    let value = evaluate(input).unwrap();
    assert!((value - expected).abs() < 1e-9, "{input} = {value}");
}

#[test]
fn test_missing_operand_fails_after_operator() {
    let reply = parser_framework::parse(&expression(), "1 +");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 3);
}

#[test]
fn test_empty_table_is_the_term() {
    let bare = build_expression_parser(Vec::new(), number());
    assert_eq!(parser_framework::parse(&bare, "42").into_value(), Some(42.0));
}

fn comparison() -> Parser<f64> {
    let table = vec![
        vec![Operator::binary(symbol('<'), Assoc::None, |a: f64, b: f64| {
            if a < b {
                1.0
            } else {
                0.0
            }
        })],
        vec![Operator::binary(symbol('+'), Assoc::Left, |a: f64, b: f64| a + b)],
    ];
    build_expression_parser(table, number())
}

#[test]
fn test_non_associative_operator_once() {
    let reply = parser_framework::parse(&comparison(), "1 + 1 < 3");
    assert_eq!(reply.into_value(), Some(1.0));
}

#[test]
fn test_chained_non_associative_operator_is_ambiguous() {
    let reply = parser_framework::parse(&comparison(), "1 < 2 < 3");
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 8);
    assert_eq!(
        reply.message().as_deref(),
        Some("ambiguous use of a non associative operator")
    );
}

fn mixed() -> Parser<f64> {
    let table = vec![vec![
        Operator::binary(symbol('+'), Assoc::Left, |a: f64, b: f64| a + b),
        Operator::binary(symbol('^'), Assoc::Right, f64::powf),
    ]];
    build_expression_parser(table, number())
}

#[rstest]
#[case("1 + 2 ^ 3", "ambiguous use of a right associative operator")]
#[case("1 ^ 2 + 3", "ambiguous use of a left associative operator")]
fn test_mixed_associativity_is_ambiguous(#[case] input: &str, #[case] message: &str) {
    let reply = parser_framework::parse(&mixed(), input);
    assert!(reply.is_err());
    assert_eq!(reply.offset(), 8);
    assert_eq!(reply.message().as_deref(), Some(message));
}

#[test]
fn test_single_associativity_at_mixed_level() {
    assert_eq!(parser_framework::parse(&mixed(), "1 + 2 + 3").into_value(), Some(6.0));
    assert_eq!(parser_framework::parse(&mixed(), "2 ^ 1 ^ 3").into_value(), Some(2.0));
}
